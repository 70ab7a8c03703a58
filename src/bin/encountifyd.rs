#[macro_use]
extern crate log;

use std::env;
use std::error::Error;

use actix_web::{middleware, web, App, HttpServer};
use getopts::Options;

use encountify::api::{self, AppState};
use encountify::config::{parse_pool_size, Config};
use encountify::create_db_pool;

fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} [options]", program);
    print!("{}", opts.usage(&brief));
}

#[actix_web::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("b", "bind", "address to listen on", "ADDR");
    opts.optopt("p", "pool-size", "maximum database connections", "SIZE");
    opts.optflag("m", "memory", "serve from an in-memory store instead of Postgres");
    opts.optflag("h", "help", "print this help menu");
    let matches = opts.parse(&args[1..])?;
    if matches.opt_present("h") {
        print_usage(&program, opts);
        return Ok(());
    }

    let mut config = Config::from_env()?;
    if let Some(bind) = matches.opt_str("b") {
        config.bind_address = bind;
    }
    if let Some(size) = matches.opt_str("p") {
        config.pool_size = parse_pool_size(&size)?;
    }

    let state = if matches.opt_present("m") {
        warn!("serving from memory, nothing will be persisted");
        AppState::in_memory()
    } else {
        let pool = create_db_pool(config.require_database_url()?, config.pool_size)?;
        AppState::postgres(pool)
    };
    let state = web::Data::new(state);

    info!("listening on {}", config.bind_address);
    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(middleware::Logger::default())
            .configure(api::configure)
    })
    .bind(config.bind_address.as_str())?
    .run()
    .await?;

    Ok(())
}
