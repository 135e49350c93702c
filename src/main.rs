use clap::Parser;
use std::path::PathBuf;

use medical_service::config::{Config, Overrides, Variant};
use medical_service::interrupt;
use medical_service::menu::{Failure, Menu};
use medical_service::{Console, SqliteProvider};

#[derive(Parser)]
#[command(author, version = env!("CARGO_PKG_VERSION"), about = "Record patients, doctors and appointments and print reports", long_about = None)]
struct Cli {
    /// Config file (default: ~/.medical-service/config.toml if it exists)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// SQLite database file
    #[arg(long, value_name = "PATH")]
    database: Option<PathBuf>,

    /// Menu to run
    #[arg(long, value_enum)]
    variant: Option<Variant>,
}

fn main() {
    let cli = Cli::parse();

    let overrides = Overrides {
        database: cli.database,
        variant: cli.variant,
    };
    let config = match Config::resolve(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = interrupt::install() {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }

    let provider = SqliteProvider::new(&config.database.path);
    let mut menu = Menu::new(provider, Console::stdio(), config.service.variant);

    if let Err(e) = menu.run() {
        match Failure::classify(&e) {
            Failure::Interrupted => {
                print!("{}", interrupt::farewell());
            }
            Failure::Store => {
                eprintln!("Database error: {:#}", e);
                std::process::exit(1);
            }
            Failure::Other => {
                eprintln!("Error: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}
