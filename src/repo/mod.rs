// Repository operations - isolate all database side effects.
// Each module holds the parameterized reads/writes for one entity family;
// routes never touch SQL directly.

pub mod interactions;
pub mod posts;
pub mod rankings;
pub mod users;

use crate::error::AppError;

/// True when the error is a UNIQUE or PRIMARY KEY constraint violation.
/// Duplicate detection relies on this rather than a pre-check, so there is
/// no race window between checking and inserting.
pub(crate) fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(e, rusqlite::Error::SqliteFailure(err, _)
        if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
            || err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY)
}

/// Convert broken-reference failures (foreign key, CHECK) into a typed
/// validation error; everything else stays a storage failure.
pub(crate) fn map_reference_violation(e: rusqlite::Error) -> AppError {
    match &e {
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY =>
        {
            AppError::Validation("Referenced row does not exist".into())
        }
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_CHECK =>
        {
            AppError::Validation("Invalid field value".into())
        }
        _ => e.into(),
    }
}
