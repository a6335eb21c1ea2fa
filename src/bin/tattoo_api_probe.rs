use std::io;

use clap::Parser;
use tattoo_gen_lib::commands::probe::{ProbeOptions, run_probe};
use tattoo_gen_lib::constants::{DEFAULT_LOG_LEVEL, DEFAULT_PROBE_PROMPT, DEFAULT_PROBE_URL};
use tattoo_gen_lib::logging::setup_logging;
use tracing::error;

/// Send one example request to the hosted tattoo generation endpoint and
/// report what came back.
#[derive(Parser, Debug)]
#[command(name = "tattoo_api_probe")]
struct Args {
    /// Endpoint to POST to
    #[arg(long, env = "TATTOO_API_URL", default_value = DEFAULT_PROBE_URL)]
    url: String,

    /// Prompt sent in the request body
    #[arg(long, env = "TATTOO_API_PROMPT", default_value = DEFAULT_PROBE_PROMPT)]
    prompt: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = Args::parse();
    let _ = setup_logging(DEFAULT_LOG_LEVEL);

    let options = ProbeOptions {
        url: args.url,
        prompt: args.prompt,
        ..ProbeOptions::default()
    };

    if let Err(err) = run_probe(&options, &mut io::stdout()).await {
        error!("Failed to write probe report: {}", err);
    }
}
