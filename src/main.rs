use clap::Parser;
use env_logger::Env;
use std::process;

mod browse;
mod cli;
mod config;
mod view;

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let args = cli::Args::parse();
    if let Err(err) = cli::run(args) {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}
