use std::env;
use std::error::Error;

use getopts::Options;

use encountify::config::Config;
use encountify::create_db_pool;
use encountify::store::{PgStore, UserStore};

fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} [options]", program);
    print!("{}", opts.usage(&brief));
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("n", "name", "user name", "NAME");
    opts.optopt("e", "email", "user email", "EMAIL");
    opts.optflag("h", "help", "print this help menu");
    let matches = opts.parse(&args[1..])?;
    if matches.opt_present("h") {
        print_usage(&program, opts);
        return Ok(());
    }

    let (name, email) = match (matches.opt_str("n"), matches.opt_str("e")) {
        (Some(name), Some(email)) => (name, email),
        _ => {
            print_usage(&program, opts);
            return Ok(());
        }
    };

    let config = Config::from_env()?;
    let store = PgStore::new(create_db_pool(config.require_database_url()?, 1)?);
    let user = store.insert_user(&name, &email)?;
    println!("Created user with ID {}", user.id);
    Ok(())
}
