use partition_matrix::cli;
use partition_matrix::core::error::{EXIT_CONFIG, HarnessError};
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout stays the report; RUST_LOG overrides the default.
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .try_init();

    match cli::run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            let code = e
                .downcast_ref::<HarnessError>()
                .map(HarnessError::exit_code)
                .unwrap_or(EXIT_CONFIG);
            ExitCode::from(code)
        }
    }
}
