mod cli;
mod diagnose;
mod infra;
mod render;
mod routes;
mod server;

use grc_diagnostic::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
