#[macro_use]
extern crate log;

use postgres::{Client, NoTls};
use r2d2_postgres::PostgresConnectionManager;

pub mod api;
pub mod config;
pub mod models;
pub mod photo;
pub mod schema;
pub mod store;
pub mod visits;

use store::StoreError;

pub type PgPool = r2d2::Pool<PostgresConnectionManager<NoTls>>;

/// Opens a single connection, for the admin binaries.
pub fn establish_connection(database_url: &str) -> Result<Client, postgres::Error> {
    Client::connect(database_url, NoTls)
}

/// Builds the connection pool shared by all request handlers.
pub fn create_db_pool(database_url: &str, pool_size: u32) -> Result<PgPool, StoreError> {
    let pg_config: postgres::Config = database_url.parse()?;
    let manager = PostgresConnectionManager::new(pg_config, NoTls);
    let pool = r2d2::Pool::builder().max_size(pool_size).build(manager)?;
    info!("connection pool ready (max_size = {})", pool_size);
    Ok(pool)
}
