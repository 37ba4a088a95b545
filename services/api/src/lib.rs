mod cli;
mod infra;
mod quotes;
mod report;
mod routes;
mod server;

use credit_impact::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
