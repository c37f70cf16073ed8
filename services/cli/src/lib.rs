mod check;
mod cli;
mod commands;

use estate_inputs::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
