//! web2app - turn websites into standalone macOS apps.

use colored::Colorize;
use std::process;

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let exit_code = match web2app::cli::run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {}", "Error:".red().bold(), e);
            for suggestion in e.recovery_suggestions() {
                eprintln!("  {} {}", "hint:".yellow(), suggestion);
            }
            1
        }
    };

    process::exit(exit_code);
}
