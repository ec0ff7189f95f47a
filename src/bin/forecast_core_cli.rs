use std::{env, process};

use forecast_core::{
    cli::{self, CliContext},
    config::ConfigManager,
    init,
    time::SystemClock,
};

fn main() {
    init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();
    let config = ConfigManager::new()?.load()?;
    let ctx = CliContext::new(config, Box::new(SystemClock));
    let output = cli::run(&args, &ctx)?;
    println!("{output}");
    Ok(())
}
