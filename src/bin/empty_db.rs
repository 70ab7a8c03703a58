use std::error::Error;

use encountify::config::Config;
use encountify::{establish_connection, schema};

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from_env()?;
    let mut db = establish_connection(config.require_database_url()?)?;
    schema::empty_db(&mut db)?;
    log::info!("dropped all tables");
    Ok(())
}
