use clinic_records::commands::Command;
use clinic_records::config::Config;
use clinic_records::store;
use clinic_records::utils::dates::today;
use dotenvy::dotenv;
use envconfig::Envconfig;

type Error = Box<dyn std::error::Error + Send + Sync>;

fn main() -> Result<(), Error> {
    // Initialize the logger with "info" level unless RUST_LOG says otherwise
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    // Load environment variables from a .env file if present
    dotenv().ok();

    let config = Config::init_from_env()?;
    let today = today();

    let command = Command::parse(std::env::args().skip(1), today).map_err(|e| {
        log::warn!("{}", e);
        e
    })?;

    if command == Command::Help {
        println!("{}", command.render(&[], today, config.recent_limit));
        return Ok(());
    }

    log::info!("Running {:?} against {}", command, config.data_path().display());
    let prescriptions = store::load_prescriptions(config.data_path())?;

    print!("{}", command.render(&prescriptions, today, config.recent_limit));
    Ok(())
}
