//! Example: a record behind an owning pointer
//!
//! Run with:
//! ```bash
//! EXAMPLE_FOO=bound cargo run --example struct_pointer
//! ```

use envbind::{bind, EnvBind};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[env(name = "HOME")]
    pub home: String,

    #[env(name = "PORT", default = "3000")]
    pub port: i32,

    #[env(name = "PRODUCTION")]
    pub is_production: bool,

    #[env(name = "HOSTS", separator = ":")]
    pub hosts: Vec<String>,

    #[env(name = "DURATION")]
    pub duration: Duration,

    pub example_foo: Option<Box<Foo>>,
}

#[derive(Debug, Default, EnvBind)]
struct Foo {
    #[env(name = "EXAMPLE_FOO")]
    pub name: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Only non-null pointers are followed
    let mut config = Config {
        example_foo: Some(Box::new(Foo {
            name: "a".to_string(),
        })),
        ..Config::default()
    };

    bind(&mut config)?;

    println!("{config:#?}");
    if let Some(foo) = &config.example_foo {
        println!("ExampleFoo: {foo:?}");
    }

    Ok(())
}
