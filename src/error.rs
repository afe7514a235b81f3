use std::fmt;

use thiserror::Error;

pub type DbResult<T> = Result<T, DbError>;

/// Errors raised by repository operations.
#[derive(Debug, Error)]
pub enum DbError {
    #[error("a client with email {0:?} already exists")]
    DuplicateEmail(String),

    #[error("phone number refers to a client that does not exist")]
    UnknownClient,

    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl DbError {
    /// Classify a failed statement that wrote `email`, turning constraint
    /// violations into their typed variants.
    pub(crate) fn from_write(err: sqlx::Error, email: Option<&str>) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if db_err.is_unique_violation() {
                if let Some(email) = email {
                    return DbError::DuplicateEmail(email.to_string());
                }
            }
            if db_err.is_foreign_key_violation() {
                return DbError::UnknownClient;
            }
        }
        DbError::Database(err)
    }
}

/// Result of a mutation that is skipped when its target is missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    ClientNotFound(i32),
    PhoneNotFound { client_id: i32, phone: String },
}

impl Outcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, Outcome::Applied)
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Applied => write!(f, "done"),
            Outcome::ClientNotFound(id) => write!(f, "client {id} does not exist"),
            Outcome::PhoneNotFound { client_id, phone } => {
                write!(f, "client {client_id} has no phone number {phone}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_messages_name_the_missing_target() {
        assert_eq!(Outcome::ClientNotFound(7).to_string(), "client 7 does not exist");
        let missing = Outcome::PhoneNotFound {
            client_id: 2,
            phone: "79999".into(),
        };
        assert_eq!(missing.to_string(), "client 2 has no phone number 79999");
        assert!(!missing.is_applied());
        assert!(Outcome::Applied.is_applied());
    }

    #[test]
    fn non_database_errors_pass_through() {
        let err = DbError::from_write(sqlx::Error::RowNotFound, Some("a@x.com"));
        assert!(matches!(err, DbError::Database(sqlx::Error::RowNotFound)));
    }

    #[test]
    fn duplicate_email_message_quotes_the_address() {
        let err = DbError::DuplicateEmail("a@x.com".into());
        assert_eq!(err.to_string(), "a client with email \"a@x.com\" already exists");
    }
}
