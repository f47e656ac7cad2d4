//! Example: reporting errors from nested records
//!
//! Run with:
//! ```bash
//! DB_POOL_SIZE=lots RUST_LOG=envbind=warn cargo run --example strict_nested
//! ```

use envbind::{Binder, EnvBind};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default, EnvBind)]
struct Config {
    #[env(name = "SERVICE_NAME", default = "api")]
    pub service_name: String,

    database: Database,
}

#[derive(Debug, Default, EnvBind)]
struct Database {
    #[env(name = "DB_URL", default = "postgres://localhost/app")]
    pub url: String,

    #[env(name = "DB_POOL_SIZE", default = "10")]
    pub pool_size: u32,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Lenient: errors inside `database` are logged and dropped
    let mut lenient = Config::default();
    Binder::new().bind(&mut lenient)?;
    println!("lenient: {lenient:#?}");

    // Strict: the same errors fail the bind
    let mut strict = Config::default();
    match Binder::new().strict_nested(true).bind(&mut strict) {
        Ok(()) => println!("strict: {strict:#?}"),
        Err(e) => println!("strict: {e}"),
    }

    Ok(())
}
