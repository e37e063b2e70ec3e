use chrono::DateTime;
use chrono::Utc;

/// Credential record read from the external user store.
///
/// The store owns the full user document; the session domain reads
/// only the fields needed for verification and reports back a new
/// `last_authenticated_at` for the store to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credential {
    /// Opaque unique subject identifier
    pub subject_id: String,
    /// Salted, algorithm-tagged password hash (PHC string)
    pub password_hash: String,
    pub last_authenticated_at: Option<DateTime<Utc>>,
}
