#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("No sample data found in table {table}")]
    NoSampleData { table: &'static str },

    #[error("Internal error: {0}")]
    Internal(String),
}
