mod cli;
mod commands;
mod infra;
mod render;

use talent_match::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
