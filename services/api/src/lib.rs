mod cli;
mod demo;
mod infra;
mod routes;
mod seed;
mod server;

use medvisa::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
