// Olympic Results Reconciliation - Core Library
// Exposes all modules for use in the CLI and tests

pub mod config;
pub mod dates;      // Date normalizer - free-text dates → dd-Mon-yyyy
pub mod entities;   // Athletes, games, results, countries
pub mod error;
pub mod fields;     // List fields + name formatting
pub mod gap_fill;   // Medal gap filler
pub mod identity;   // Athlete identity resolver
pub mod io;         // CSV sources & sinks
pub mod merger;     // Event result merger
pub mod pipeline;
pub mod tally;      // Ages + medal tally

// Re-export commonly used types
pub use config::{CurrentGames, InputFiles, OutputFiles, PipelineConfig};
pub use dates::{normalize_date, DateContext, DateNormalizer, DatePattern, MatchOutcome};
pub use entities::{
    AthleteId, AthleteIdentity, CompositeKey, NewAthleteRecord,
    CountryTable, GameCatalog, GameEdition,
    EventCatalog, EventResultRow, EventTriple, Medal, MedalRecord, MedalTable, TeamMembership,
};
pub use error::ReconcileError;
pub use fields::{display_name, parse_list_field};
pub use gap_fill::MedalGapFiller;
pub use identity::{AthleteIdentityResolver, ParticipationYears};
pub use merger::{EmissionSet, EventResultMerger, ResultNumbering};
pub use pipeline::{Pipeline, Reconciled, RunSummary};
pub use tally::{compute_age, TallyAggregator, TallyEntry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
