//! Persistence gateway boundary.
//!
//! The engine never talks to the data service directly; it hands a
//! table name and a flat field map to whatever implements this trait.
//! A single insert is atomic from the engine's point of view, and a
//! failed insert is not retried here: the session is torn down and the
//! user re-invokes the intent.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    /// The data service refused the record (validation, permissions).
    #[error("insert rejected: {0}")]
    Rejected(String),

    /// The data service could not be reached.
    #[error("data service unavailable: {0}")]
    Unavailable(String),
}

/// Acknowledgement of a successful insert.
#[derive(Debug, Clone)]
pub struct InsertReceipt {
    pub inserted_id: Option<String>,
    pub message: String,
}

/// Single-row record insert, implemented by the backend client.
#[async_trait]
pub trait PersistenceGateway: Send + Sync {
    async fn insert(&self, table: &str, record: Value) -> Result<InsertReceipt, GatewayError>;
}
