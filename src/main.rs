use hikelog::commands::Cli;
use hikelog::libs::error::HikeError;
use hikelog::msg_error;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match Cli::menu() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<HikeError>() {
                Some(err) => {
                    tracing::debug!(error = %err, "command failed");
                    msg_error!(err.user_message());
                }
                None => msg_error!(e),
            }
            ExitCode::FAILURE
        }
    }
}
