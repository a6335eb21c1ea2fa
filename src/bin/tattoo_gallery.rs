use std::io;
use std::process::ExitCode;

use tattoo_gen_lib::commands::gallery;
use tattoo_gen_lib::config::{load_env_files, output_dir_from_lookup};
use tattoo_gen_lib::constants::{DEFAULT_LOG_LEVEL, PUBLIC_PATH_PREFIX};
use tattoo_gen_lib::logging::setup_logging;
use tracing::error;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let _ = setup_logging(DEFAULT_LOG_LEVEL);
    load_env_files();

    let dir = output_dir_from_lookup(&|key: &str| std::env::var(key).ok());

    match gallery::run(&dir, PUBLIC_PATH_PREFIX, &mut io::stdout()).await {
        Ok(status) => ExitCode::from(status),
        Err(err) => {
            error!("Failed to write gallery listing: {}", err);
            ExitCode::FAILURE
        }
    }
}
