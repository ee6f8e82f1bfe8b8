// 🏅 Tally Aggregator - Per-row age + per-country medal counts
//
// One pass over the full result table:
//   age   = game year - birth year (minus 1 if the birthday hadn't come yet)
//   tally = (edition, edition_id, NOC) → athletes, gold/silver/bronze, total
//
// Team events award ONE medal per country, not one per team member, so
// medals are deduplicated on (edition_id, sport, event, NOC, medal).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::{debug, warn};

use crate::dates::parse_canonical;
use crate::entities::{AthleteId, CountryTable, EventResultRow, GameCatalog, GameEdition, Medal};
use crate::identity::AthleteIdentityResolver;

// ============================================================================
// TALLY ENTRY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TallyEntry {
    pub edition: String,
    pub edition_id: String,

    /// Empty when the NOC isn't in the country lookup
    #[serde(rename = "Country")]
    pub country: String,

    #[serde(rename = "NOC")]
    pub noc: String,

    pub number_of_athletes: usize,
    pub gold_medal_count: usize,
    pub silver_medal_count: usize,
    pub bronze_medal_count: usize,
    pub total_medals: usize,
}

impl TallyEntry {
    fn new(edition: &str, edition_id: &str, noc: &str, country: &str) -> Self {
        TallyEntry {
            edition: edition.to_string(),
            edition_id: edition_id.to_string(),
            country: country.to_string(),
            noc: noc.to_string(),
            number_of_athletes: 0,
            gold_medal_count: 0,
            silver_medal_count: 0,
            bronze_medal_count: 0,
            total_medals: 0,
        }
    }

    fn count_medal(&mut self, medal: Medal) {
        match medal {
            Medal::Gold => self.gold_medal_count += 1,
            Medal::Silver => self.silver_medal_count += 1,
            Medal::Bronze => self.bronze_medal_count += 1,
        }
        self.total_medals += 1;
    }
}

// ============================================================================
// AGE
// ============================================================================

/// Age of an athlete born on `born` (canonical date) at the given games
///
/// Returns None when `born` is empty or not a canonical date.
pub fn compute_age(born: &str, game: &GameEdition) -> Option<i32> {
    let birth = parse_canonical(born)?;
    Some(age_at(birth, game))
}

fn age_at(birth: NaiveDate, game: &GameEdition) -> i32 {
    let mut age = game.game_year() - birth.year();

    if let Some(end) = game.competition_end {
        let birthday_not_reached = (birth.month(), birth.day()) > (end.month(), end.day());
        if birth > end || birthday_not_reached {
            age -= 1;
        }
    }

    age
}

// ============================================================================
// AGGREGATOR
// ============================================================================

pub struct TallyAggregator<'a> {
    games: &'a GameCatalog,
    resolver: &'a AthleteIdentityResolver,
    countries: &'a CountryTable,
}

impl<'a> TallyAggregator<'a> {
    pub fn new(
        games: &'a GameCatalog,
        resolver: &'a AthleteIdentityResolver,
        countries: &'a CountryTable,
    ) -> Self {
        TallyAggregator {
            games,
            resolver,
            countries,
        }
    }

    /// Fill `age` on every row and build the tally, in first-seen order
    pub fn aggregate(&self, rows: &mut [EventResultRow]) -> Vec<TallyEntry> {
        let mut entries: Vec<TallyEntry> = Vec::new();
        let mut entry_index: HashMap<(String, String, String), usize> = HashMap::new();
        let mut athletes_seen: HashSet<(String, String, AthleteId)> = HashSet::new();
        let mut medals_seen: HashSet<(String, String, String, String, Medal)> = HashSet::new();
        let mut unknown_editions: HashSet<String> = HashSet::new();

        for row in rows.iter_mut() {
            row.age = self.age_for(row, &mut unknown_editions);

            let key = (row.edition.clone(), row.edition_id.clone(), row.country_noc.clone());
            let idx = match entry_index.get(&key) {
                Some(&idx) => idx,
                None => {
                    let country = self.countries.name(&row.country_noc).unwrap_or("");
                    entries.push(TallyEntry::new(&row.edition, &row.edition_id, &row.country_noc, country));
                    entry_index.insert(key, entries.len() - 1);
                    entries.len() - 1
                }
            };
            let entry = &mut entries[idx];

            if athletes_seen.insert((row.edition_id.clone(), row.country_noc.clone(), row.athlete_id)) {
                entry.number_of_athletes += 1;
            }

            if let Some(medal) = row.medal() {
                let medal_key = (
                    row.edition_id.clone(),
                    row.sport.clone(),
                    row.event.clone(),
                    row.country_noc.clone(),
                    medal,
                );
                if medals_seen.insert(medal_key) {
                    entry.count_medal(medal);
                }
            }
        }

        debug!(
            rows = rows.len(),
            entries = entries.len(),
            "Aggregated medal tally"
        );
        entries
    }

    fn age_for(&self, row: &EventResultRow, unknown_editions: &mut HashSet<String>) -> Option<i32> {
        let game = match self.games.get(&row.edition_id) {
            Some(game) => game,
            None => {
                if unknown_editions.insert(row.edition_id.clone()) {
                    warn!(edition_id = %row.edition_id, "Edition not in games table, ages left empty");
                }
                return None;
            }
        };
        let athlete = self.resolver.identity(row.athlete_id)?;
        compute_age(&athlete.born, game)
    }
}

// ============================================================================
// TESTS
// ============================================================================
