mod cli;
mod infra;
mod routes;
mod screen;
mod server;

use denboard::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
