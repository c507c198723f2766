// ABOUTME: Entry point for the otpssh binary
// ABOUTME: Doubles as the ssh askpass helper when launched with the OTP in its environment

use clap::Parser;
use otpssh_cli::cli::Cli;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Exec mode sets us up as ssh's askpass program; answer and get out.
    if let Some(answer) = otpssh_session::askpass_response() {
        println!("{answer}");
        return ExitCode::SUCCESS;
    }

    // Load .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    otpssh_log::init_with_level(otpssh_log::level_for(cli.verbose));

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Failed to create runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let result = rt.block_on(otpssh_cli::run(cli));
    // The stdin reader thread can still be parked in a blocking read.
    rt.shutdown_background();

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            otpssh_cli::report(&err);
            ExitCode::FAILURE
        }
    }
}
