// Copyright (C) 2026 Relief Ledger contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// The requested audit event was not found.
    EventNotFound(i64),
    /// The requested donation was not found.
    DonationNotFound(i64),
    /// The requested lead was not found.
    LeadNotFound(i64),
    /// A stored row could not be turned back into a domain value.
    ReconstructionError(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A record changed between being read and being written.
    ///
    /// Nothing was written. The caller may reload and try again.
    ConcurrentModification {
        /// The kind of record ("donation" or "lead").
        entity: &'static str,
        /// The record identifier.
        id: i64,
        /// What no longer matched.
        reason: String,
    },
    /// Another connection held a lock the write needed, past the backend's
    /// wait limit, or the backend aborted the transaction as a deadlock
    /// victim. Nothing was written.
    WriteContention(String),
    /// The requested resource was not found.
    NotFound(String),
}

impl PersistenceError {
    /// Returns true if the operation may succeed after reloading state.
    #[must_use]
    pub const fn is_concurrent_modification(&self) -> bool {
        matches!(
            self,
            Self::ConcurrentModification { .. } | Self::WriteContention(_)
        )
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::EventNotFound(id) => write!(f, "Event not found: {id}"),
            Self::DonationNotFound(id) => write!(f, "Donation not found: {id}"),
            Self::LeadNotFound(id) => write!(f, "Lead not found: {id}"),
            Self::ReconstructionError(msg) => write!(f, "Reconstruction error: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::ConcurrentModification { entity, id, reason } => {
                write!(f, "The {entity} {id} was modified concurrently: {reason}")
            }
            Self::WriteContention(msg) => write!(f, "Write contention: {msg}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

/// Messages the backends use for lock timeouts and deadlocks.
///
/// `SQLite` reports `SQLITE_BUSY` and `SQLITE_LOCKED` as unknown errors, and
/// `MySQL` reports lock waits and deadlocks the same way, so only the text
/// identifies them.
const CONTENTION_MESSAGES: [&str; 4] = [
    "database is locked",
    "database table is locked",
    "Deadlock found",
    "Lock wait timeout exceeded",
];

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::{DatabaseErrorKind, Error};

        match err {
            Error::NotFound => Self::NotFound("Record not found".to_string()),
            Error::DatabaseError(DatabaseErrorKind::SerializationFailure, info) => {
                Self::WriteContention(info.message().to_string())
            }
            Error::DatabaseError(_, ref info)
                if CONTENTION_MESSAGES
                    .iter()
                    .any(|needle| info.message().contains(needle)) =>
            {
                Self::WriteContention(info.message().to_string())
            }
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<time::error::Format> for PersistenceError {
    fn from(err: time::error::Format) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<time::error::Parse> for PersistenceError {
    fn from(err: time::error::Parse) -> Self {
        Self::ReconstructionError(err.to_string())
    }
}
