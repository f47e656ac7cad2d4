//! Example: records nested by value
//!
//! Run with:
//! ```bash
//! EXAMPLE_FOO1=one EXAMPLE_FOO2=two HOSTS=a:b:c DURATION=1h30m \
//!   cargo run --example embedded_struct
//! ```

use envbind::{EnvBind, Record};
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

    // No name of its own: bound field by field
    foo: Foo,
}

#[derive(Debug, Default, EnvBind)]
struct Foo {
    #[env(name = "EXAMPLE_FOO1")]
    pub name1: String,

    #[env(name = "EXAMPLE_FOO2")]
    pub name2: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;

    println!("{config:#?}");

    Ok(())
}
