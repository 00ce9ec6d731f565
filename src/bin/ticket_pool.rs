//! Interactive command-line front end for the ticket pool.
//!
//! Commands: `START`, `STOP`, `STATUS`, `LOG`, `CONFIG`, `SET <json>`, `EXIT`.
//!
//! The initial configuration comes from `TICKETING_CONFIG_FILE` (a JSON file)
//! if set, otherwise from `TICKETING_*` environment variables (a `.env` file
//! is loaded first).

use std::io::{self, BufRead, Write};

use anyhow::Context;
use ticket_pool::builders::SystemBuilder;
use ticket_pool::config::Configuration;
use ticket_pool::core::AppResult;
use ticket_pool::runtime::TicketingSystem;
use ticket_pool::util::init_tracing;

const CONFIG_FILE_VAR: &str = "TICKETING_CONFIG_FILE";

fn main() -> AppResult<()> {
    let _ = dotenvy::dotenv();
    init_tracing();

    let config = load_config()?;
    let system = SystemBuilder::new().with_config(config).build()?;
    println!("Configuration: {}", config.to_json());

    let stdin = io::stdin();
    let mut printed = 0usize;
    prompt()?;
    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        let (command, rest) = line
            .trim()
            .split_once(char::is_whitespace)
            .unwrap_or((line.trim(), ""));

        match command.to_ascii_uppercase().as_str() {
            "START" => {
                system.start()?;
                println!("System started!");
            }
            "STOP" => {
                system.stop();
                println!("System stopped!");
            }
            "STATUS" => print_status(&system),
            "LOG" => printed = print_log(&system, printed),
            "CONFIG" => println!("{}", system.get_config().to_json()),
            "SET" => match Configuration::from_json_str(rest.trim()) {
                Ok(cfg) => match system.set_config(cfg) {
                    Ok(()) => println!("Configuration saved."),
                    Err(e) => println!("{e}"),
                },
                Err(e) => println!("invalid configuration: {e}"),
            },
            "EXIT" => {
                system.stop();
                println!("Exiting the system. Goodbye!");
                return Ok(());
            }
            "" => {}
            _ => println!("Invalid command! Please try again."),
        }
        prompt()?;
    }

    system.stop();
    Ok(())
}

fn load_config() -> AppResult<Configuration> {
    if let Ok(path) = std::env::var(CONFIG_FILE_VAR) {
        return Configuration::from_json_file(&path)
            .map_err(|e| anyhow::anyhow!("{CONFIG_FILE_VAR}: {e}"));
    }
    Configuration::from_env().map_err(|e| anyhow::anyhow!("environment configuration: {e}"))
}

fn prompt() -> AppResult<()> {
    print!("\nCommands: START, STOP, STATUS, LOG, CONFIG, SET <json>, EXIT\n> ");
    io::stdout().flush().context("flushing stdout")
}

fn print_status(system: &TicketingSystem) {
    let status = system.status();
    println!(
        "Running: {} | Tickets: {} / {} ({} remaining) | Log entries: {}",
        status.running,
        status.pool.size,
        status.pool.capacity,
        status.pool.remaining(),
        status.log_len
    );
}

fn print_log(system: &TicketingSystem, from: usize) -> usize {
    let fresh = system.log_since(from);
    for entry in &fresh {
        println!("{entry}");
    }
    from + fresh.len()
}
