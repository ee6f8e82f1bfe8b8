// 🔗 Event Result Merger - New-source athletes → canonical result rows
//
// Each current-games athlete carries two free-text lists (disciplines,
// events). Positions in the two lists don't line up, so every combination
// is tried and only the pairs in the canonical event catalog survive.
//
// Result numbering: one result_id per (discipline, event) for the whole
// pass, counted up from the archive's maximum result_id. All heats/rounds
// of an event share that id.

use std::collections::{HashMap, HashSet};
use tracing::trace;

use crate::config::CurrentGames;
use crate::entities::{
    AthleteId, EventCatalog, EventResultRow, EventTriple, MedalTable, NewAthleteRecord,
    TeamMembership,
};
use crate::fields::{display_name, parse_list_field};

/// (athlete_code, discipline, event) triples emitted during a merge pass
pub type EmissionSet = HashSet<EventTriple>;

// ============================================================================
// RESULT NUMBERING
// ============================================================================

/// (discipline, event) → result_id, scoped to one merge pass
#[derive(Debug, Clone)]
pub struct ResultNumbering {
    last: u64,
    ids: HashMap<(String, String), u64>,
}

impl ResultNumbering {
    /// First new id will be `max_result_id + 1`
    pub fn starting_after(max_result_id: u64) -> Self {
        ResultNumbering {
            last: max_result_id,
            ids: HashMap::new(),
        }
    }

    /// Id for a pair: cached if seen before in this pass, otherwise the next one
    pub fn result_id(&mut self, discipline: &str, event: &str) -> u64 {
        let key = (discipline.to_string(), event.to_string());
        if let Some(&id) = self.ids.get(&key) {
            return id;
        }
        self.last += 1;
        self.ids.insert(key, self.last);
        self.last
    }

    /// Highest id handed out so far (the starting max if none yet)
    pub fn last_assigned(&self) -> u64 {
        self.last
    }

    /// Number of distinct (discipline, event) pairs numbered
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

// ============================================================================
// MERGER
// ============================================================================

pub struct EventResultMerger<'a> {
    catalog: &'a EventCatalog,
    medals: &'a MedalTable,
    teams: &'a TeamMembership,
    edition: &'a CurrentGames,
    numbering: ResultNumbering,
    emitted: EmissionSet,
}

impl<'a> EventResultMerger<'a> {
    pub fn new(
        catalog: &'a EventCatalog,
        medals: &'a MedalTable,
        teams: &'a TeamMembership,
        edition: &'a CurrentGames,
        max_result_id: u64,
    ) -> Self {
        EventResultMerger {
            catalog,
            medals,
            teams,
            edition,
            numbering: ResultNumbering::starting_after(max_result_id),
            emitted: EmissionSet::new(),
        }
    }

    /// Append one row per catalog (discipline, event) pair of this athlete
    ///
    /// Returns how many rows were appended. `age` is left empty.
    pub fn merge(
        &mut self,
        record: &NewAthleteRecord,
        athlete_id: AthleteId,
        rows: &mut Vec<EventResultRow>,
    ) -> usize {
        let disciplines = parse_list_field(&record.disciplines);
        let events = parse_list_field(&record.events);
        let athlete_name = display_name(&record.name_tv, &record.name);
        let before = rows.len();

        for discipline in &disciplines {
            for event in &events {
                if !self.catalog.contains(discipline, event) {
                    continue;
                }

                let triple = EventTriple::new(&record.code, discipline, event);
                let result_id = self.numbering.result_id(discipline, event);
                let (pos, medal) = match self.medals.get(&triple) {
                    Some(found) => (found.pos.clone(), found.medal_type.clone()),
                    None => (String::new(), String::new()),
                };
                let is_team_sport = self.teams.contains(&triple);

                rows.push(EventResultRow {
                    edition: self.edition.edition.clone(),
                    edition_id: self.edition.edition_id.clone(),
                    country_noc: record.country_code.clone(),
                    sport: discipline.clone(),
                    event: event.clone(),
                    result_id: Some(result_id),
                    athlete: athlete_name.clone(),
                    athlete_id,
                    pos,
                    medal,
                    is_team_sport,
                    age: None,
                });
                self.emitted.insert(triple);
            }
        }

        let appended = rows.len() - before;
        trace!(code = %record.code, appended, "Merged event rows");
        appended
    }

    pub fn emitted(&self) -> &EmissionSet {
        &self.emitted
    }

    pub fn numbering(&self) -> &ResultNumbering {
        &self.numbering
    }

    /// Finish the pass, keeping only the emission set for gap filling
    pub fn into_emitted(self) -> EmissionSet {
        self.emitted
    }
}

// ============================================================================
// TESTS
// ============================================================================
