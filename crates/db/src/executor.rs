use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::error::DbError;
use crate::result::ResultSet;

/// Executes one SQL statement and returns its result set.
///
/// Implemented by [`crate::FireboltClient`] in production and by in-memory
/// fakes in tests.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn execute(&self, sql: &str) -> Result<ResultSet, DbError>;
}

/// Execute a query and decode every row into `T`.
pub async fn query_as<T: DeserializeOwned>(
    executor: &dyn QueryExecutor,
    sql: &str,
) -> Result<Vec<T>, DbError> {
    executor.execute(sql).await?.decode()
}

/// Verify the database is reachable with a trivial query.
pub async fn health_check(executor: &dyn QueryExecutor) -> Result<(), DbError> {
    executor.execute("SELECT 1").await?;
    Ok(())
}
