//! Error types for the domain services.

use hotel_database::DatabaseError;
use thiserror::Error;

/// Errors raised by the hotel domain services
#[derive(Debug, Error)]
pub enum OperationError {
    #[error("{entity} {id} not found")]
    NotFound { entity: String, id: String },

    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("Database error: {0}")]
    Database(DatabaseError),
}

pub type OperationResult<T> = Result<T, OperationError>;

impl OperationError {
    pub fn not_found(entity: impl Into<String>, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
}

impl From<DatabaseError> for OperationError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(what) => {
                let (entity, id) = what.split_once(' ').unwrap_or((what.as_str(), ""));
                OperationError::NotFound {
                    entity: entity.to_string(),
                    id: id.to_string(),
                }
            }
            DatabaseError::Duplicate(message) | DatabaseError::Conflict(message) => {
                OperationError::Conflict { message }
            }
            DatabaseError::ValidationError(message) => OperationError::Validation { message },
            other => OperationError::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_errors_map_to_domain_errors() {
        let not_found = OperationError::from(DatabaseError::not_found("hotel", 7));
        assert!(matches!(
            &not_found,
            OperationError::NotFound { entity, id } if entity == "hotel" && id == "7"
        ));
        assert_eq!(not_found.to_string(), "hotel 7 not found");

        let duplicate = OperationError::from(DatabaseError::Duplicate("room 101 exists".into()));
        assert!(matches!(duplicate, OperationError::Conflict { .. }));

        let check = OperationError::from(DatabaseError::ValidationError("CHECK failed".into()));
        assert!(matches!(check, OperationError::Validation { .. }));

        let query = OperationError::from(DatabaseError::QueryError("syntax".into()));
        assert!(matches!(query, OperationError::Database(_)));
    }
}
