use std::io;
use std::process::ExitCode;

use clap::Parser;
use tattoo_gen_lib::commands::generate;
use tattoo_gen_lib::config::{GeneratorConfig, load_env_files};
use tattoo_gen_lib::constants::DEFAULT_LOG_LEVEL;
use tattoo_gen_lib::logging::setup_logging;

/// Generate a tattoo design.
#[derive(Parser, Debug)]
#[command(name = "create_tattoo")]
struct Args {
    /// The prompt for the tattoo design.
    prompt: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _ = setup_logging(DEFAULT_LOG_LEVEL);
    load_env_files();

    let status = generate::run(
        |key| std::env::var(key).ok(),
        &args.prompt,
        GeneratorConfig::client,
        &mut io::stdout(),
        &mut io::stderr(),
    )
    .await;

    ExitCode::from(status)
}
