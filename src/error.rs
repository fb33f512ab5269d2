use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Correction rejected: {0} meal headers found, expected at most 4")]
    DuplicatedMeals(usize),

    #[error("Correction rejected: no meal headers found")]
    NoMeals,

    #[error("Correction rejected: Day {0} not found in regenerated text")]
    DayNotFound(u32),
}

pub type Result<T> = std::result::Result<T, PlanError>;
