// 🩹 Medal Gap Filler - Every authoritative medal ends up in the result table
//
// The merger only emits rows for catalog pairs found in the athlete's own
// discipline/event lists. When those lists are incomplete or noisy, a
// medal from the medallist file can go missing. This pass synthesizes the
// missing rows straight from the medal records.

use tracing::{debug, error};

use crate::config::CurrentGames;
use crate::entities::{EventResultRow, EventTriple, MedalRecord, MedalTable, TeamMembership};
use crate::error::{ReconcileError, Result};
use crate::identity::AthleteIdentityResolver;
use crate::merger::EmissionSet;

pub struct MedalGapFiller<'a> {
    edition: &'a CurrentGames,
    teams: &'a TeamMembership,
}

impl<'a> MedalGapFiller<'a> {
    pub fn new(edition: &'a CurrentGames, teams: &'a TeamMembership) -> Self {
        MedalGapFiller { edition, teams }
    }

    /// Append a row for every medal record the merger did not emit
    ///
    /// Gap-filled rows have no result_id. Every medallist must already have
    /// been resolved; if one wasn't, nothing is appended and the broken
    /// invariant is returned as an error.
    pub fn fill(
        &self,
        medals: &MedalTable,
        emitted: &EmissionSet,
        resolver: &AthleteIdentityResolver,
        rows: &mut Vec<EventResultRow>,
    ) -> Result<usize> {
        let mut missing = Vec::new();

        for (triple, record) in medals.iter() {
            if emitted.contains(triple) {
                continue;
            }
            match self.build_row(triple, record, resolver) {
                Ok(row) => missing.push(row),
                Err(e) => {
                    error!(error = %e, "Medal gap fill aborted");
                    return Err(e);
                }
            }
        }

        let added = missing.len();
        rows.extend(missing);
        debug!(added, "Gap-filled medal rows");
        Ok(added)
    }

    fn build_row(
        &self,
        triple: &EventTriple,
        record: &MedalRecord,
        resolver: &AthleteIdentityResolver,
    ) -> Result<EventResultRow> {
        let athlete_id = resolver.id_for_code(&triple.athlete_code).ok_or_else(|| {
            ReconcileError::UnresolvedAthlete {
                code: triple.athlete_code.clone(),
                discipline: triple.discipline.clone(),
                event: triple.event.clone(),
            }
        })?;
        let athlete = resolver
            .identity(athlete_id)
            .ok_or(ReconcileError::MissingIdentity(athlete_id))?;

        Ok(EventResultRow {
            edition: self.edition.edition.clone(),
            edition_id: self.edition.edition_id.clone(),
            country_noc: athlete.country_noc.clone(),
            sport: triple.discipline.clone(),
            event: triple.event.clone(),
            result_id: None,
            athlete: athlete.name.clone(),
            athlete_id: athlete.athlete_id,
            pos: record.pos.clone(),
            medal: record.medal_type.clone(),
            is_team_sport: self.teams.contains(triple),
            age: None,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
