//! Persistence errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query error: {0}")]
    Query(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::Query("constraint violated".to_string());
        assert!(err.to_string().contains("constraint violated"));
    }
}
