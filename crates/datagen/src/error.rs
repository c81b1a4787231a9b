#[derive(Debug, thiserror::Error)]
pub enum DatagenError {
    #[error("Invalid generator setting: {0}")]
    Config(String),

    #[error("Invalid distribution parameters: {0}")]
    Distribution(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] geodemo_core::error::CoreError),
}
