use std::error::Error;
use std::process;

use encountify::config::Config;
use encountify::{establish_connection, schema};

fn create() -> Result<(), Box<dyn Error>> {
    let config = Config::from_env()?;
    let mut db = establish_connection(config.require_database_url()?)?;
    schema::create_db(&mut db)?;
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match create() {
        Ok(_) => log::info!("database tables are in place"),
        Err(err) => {
            println!("Failed to create DB: {}", err);
            process::exit(1);
        }
    }
}
