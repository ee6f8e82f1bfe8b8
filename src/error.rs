// ❗ Error types for the reconciliation core
//
// Bad input data never produces these: it degrades to empty values.
// These are raised only when an invariant between stages is broken.

use thiserror::Error;

use crate::entities::AthleteId;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ReconcileError {
    /// A medal record refers to an athlete code the resolver never saw
    #[error("Unresolved athlete code {code} for medal in {discipline} / {event}")]
    UnresolvedAthlete {
        code: String,
        discipline: String,
        event: String,
    },

    /// The resolver handed out an id that has no identity behind it
    #[error("No identity for athlete_id {0}")]
    MissingIdentity(AthleteId),
}

/// Convenience Result type for core operations
pub type Result<T> = std::result::Result<T, ReconcileError>;
