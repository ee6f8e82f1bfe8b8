// Entity Models - the rows and lookup tables the reconciliation works on
//
// Identity (athlete_id, edition_id) is stable; everything else is a value
// read from one of the two dataset generations.

pub mod athlete;
pub mod country;
pub mod game;
pub mod result;

pub use athlete::{AthleteId, AthleteIdentity, CompositeKey, NewAthleteRecord};
pub use country::CountryTable;
pub use game::{GameCatalog, GameEdition};
pub use result::{
    EventCatalog, EventResultRow, EventTriple, Medal, MedalRecord, MedalTable, TeamMembership,
};
