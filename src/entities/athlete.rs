// 🏃 Athlete Entity - Stable identity across both dataset generations
//
// "The athlete_id is IDENTITY (minted once, never changes)"
//
// Problem solved:
// - The historical archive and the current-games extract share no key
// - Same person appears as "BOERS Isayah" in one and "Isayah Boers" in another
// - CompositeKey gives a loose match: first name + birth date + affiliation

use serde::{Deserialize, Serialize};

use crate::fields::first_token;

/// Numeric athlete identifier shared by bio and result tables
pub type AthleteId = u64;

// ============================================================================
// ATHLETE IDENTITY
// ============================================================================

/// One row of the athlete bio table
///
/// Historical rows are read as-is (with `born` normalized on seeding);
/// new rows are materialized once by the resolver and never edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AthleteIdentity {
    pub athlete_id: AthleteId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub sex: String,

    /// Canonical dd-Mon-yyyy or empty
    #[serde(default)]
    pub born: String,

    #[serde(default)]
    pub height: String,

    #[serde(default)]
    pub weight: String,

    #[serde(default)]
    pub country: String,

    #[serde(default)]
    pub country_noc: String,
}

impl AthleteIdentity {
    pub fn has_birth_date(&self) -> bool {
        !self.born.trim().is_empty()
    }
}

// ============================================================================
// NEW ATHLETE RECORD (current-games extract)
// ============================================================================

/// One row of the current-games athlete file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NewAthleteRecord {
    /// Source-local athlete code (medallist and team files refer to it)
    pub code: String,

    /// Registration name, "SURNAME Given"
    #[serde(default)]
    pub name: String,

    /// Display name, "Given Surname" (may be blank)
    #[serde(default)]
    pub name_tv: String,

    #[serde(default)]
    pub gender: String,

    #[serde(default)]
    pub birth_date: String,

    #[serde(default)]
    pub height: String,

    #[serde(default)]
    pub weight: String,

    #[serde(default)]
    pub country_code: String,

    #[serde(default)]
    pub country_long: String,

    #[serde(default)]
    pub nationality_code: String,

    /// Bracketed list, e.g. "['Cycling Road', 'Cycling Track']"
    #[serde(default)]
    pub disciplines: String,

    /// Bracketed list, e.g. "[\"Women's Road Race\"]"
    #[serde(default)]
    pub events: String,
}

// ============================================================================
// COMPOSITE KEY
// ============================================================================

/// Loose identity key: (first name token, canonical birth date, affiliation)
///
/// Only the first name token is used so that changed surnames still match.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CompositeKey {
    pub first_name: String,
    pub born: String,
    pub affiliation: String,
}

impl CompositeKey {
    pub fn new(full_name: &str, born: &str, affiliation: &str) -> Self {
        CompositeKey {
            first_name: first_token(full_name).to_string(),
            born: born.trim().to_string(),
            affiliation: affiliation.trim().to_string(),
        }
    }

    pub fn has_birth_date(&self) -> bool {
        !self.born.is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
