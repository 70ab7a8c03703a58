use std::env;
use std::error::Error;
use std::path::PathBuf;

use getopts::Options;

use encountify::config::Config;
use encountify::create_db_pool;
use encountify::photo::{replace_user_picture, FilePicker, PhotoUpdateOutcome};
use encountify::store::PgStore;

fn print_usage(program: &str, opts: Options) {
    let brief = format!("Usage: {} [options] [PHOTO]", program);
    print!("{}", opts.usage(&brief));
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args[0].clone();

    let mut opts = Options::new();
    opts.optopt("u", "uid", "user id", "UID");
    opts.optopt("c", "cache", "directory photos are cached in", "DIR");
    opts.optflag("h", "help", "print this help menu");
    let matches = opts.parse(&args[1..])?;
    if matches.opt_present("h") {
        print_usage(&program, opts);
        return Ok(());
    }
    let uid: i32 = match matches.opt_str("u") {
        Some(uid) => uid.parse()?,
        None => {
            print_usage(&program, opts);
            return Ok(());
        }
    };
    let cache_dir = match matches.opt_str("c") {
        Some(dir) => PathBuf::from(dir),
        None => env::temp_dir().join("encountify"),
    };
    // No free argument behaves like dismissing the picker.
    let picker = FilePicker::new(matches.free.first().map(PathBuf::from));

    let config = Config::from_env()?;
    let store = PgStore::new(create_db_pool(config.require_database_url()?, 1)?);
    match replace_user_picture(&picker, &cache_dir, &store, uid)? {
        PhotoUpdateOutcome::Updated { bytes } => {
            println!("Updated picture of user {} ({} bytes)", uid, bytes)
        }
        outcome => println!("Picture of user {} left unchanged: {:?}", uid, outcome),
    }
    Ok(())
}
