// 📂 Record Sources & Sinks - CSV ↔ typed rows
//
// Every table goes through `csv::Reader::deserialize` into a serde struct.
// Column names that don't match Rust naming are mapped with serde renames.
// Unknown columns are ignored; a UTF-8 BOM in the header is tolerated.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::config::CurrentGames;
use crate::entities::{
    AthleteIdentity, CountryTable, EventCatalog, EventResultRow, EventTriple, GameCatalog,
    GameEdition, MedalRecord, MedalTable, NewAthleteRecord, TeamMembership,
};
use crate::fields::parse_list_field;
use crate::identity::ParticipationYears;

// ============================================================================
// ON-DISK ROW SHAPES
// ============================================================================

#[derive(Debug, Deserialize)]
struct CountryRow {
    noc: String,
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct NocRow {
    code: String,
    #[serde(default)]
    country_long: String,
}

#[derive(Debug, Deserialize)]
struct MedallistRow {
    code_athlete: String,
    discipline: String,
    event: String,
    #[serde(default)]
    medal_type: String,
}

#[derive(Debug, Deserialize)]
struct TeamRow {
    discipline: String,
    /// Column is plural on disk but holds a single event name
    events: String,
    #[serde(default)]
    athletes_codes: String,
}

#[derive(Debug, Deserialize)]
struct EventRow {
    sport: String,
    event: String,
}

// ============================================================================
// GENERIC READ / WRITE
// ============================================================================

/// Deserialize every row of a CSV file
pub fn read_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let mut rows = Vec::new();
    for (line, result) in reader.deserialize().enumerate() {
        let row: T = result.with_context(|| {
            format!("Failed to deserialize row {} of {}", line + 1, path.display())
        })?;
        rows.push(row);
    }

    debug!(path = %path.display(), rows = rows.len(), "Read CSV");
    Ok(rows)
}

/// Serialize rows to a CSV file (header from the struct's field names)
pub fn write_rows<'a, T, I>(path: &Path, rows: I) -> Result<usize>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
        }
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create CSV file: {}", path.display()))?;

    let mut written = 0;
    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Failed to write row to {}", path.display()))?;
        written += 1;
    }
    writer
        .flush()
        .with_context(|| format!("Failed to flush {}", path.display()))?;

    debug!(path = %path.display(), rows = written, "Wrote CSV");
    Ok(written)
}

// ============================================================================
// HISTORICAL ARCHIVE
// ============================================================================

pub fn read_games(path: &Path, current: &CurrentGames) -> Result<GameCatalog> {
    let rows: Vec<GameEdition> = read_rows(path)?;
    Ok(GameCatalog::from_rows(rows, current))
}

pub fn read_countries(path: &Path) -> Result<CountryTable> {
    let rows: Vec<CountryRow> = read_rows(path)?;
    let mut table = CountryTable::new();
    for row in rows {
        table.insert(&row.noc, &row.country);
    }
    Ok(table)
}

pub fn read_athletes(path: &Path) -> Result<Vec<AthleteIdentity>> {
    read_rows(path)
}

/// Historical result table plus what seeding and numbering need from it
#[derive(Debug, Default)]
pub struct HistoricalResults {
    pub rows: Vec<EventResultRow>,

    /// Century hints for each athlete's birth date
    pub participation: ParticipationYears,

    pub max_result_id: u64,
}

/// Read the archive's result table
///
/// Rows whose edition is missing from the catalog are kept but contribute
/// no participation year.
pub fn read_event_results(path: &Path, games: &GameCatalog) -> Result<HistoricalResults> {
    let rows: Vec<EventResultRow> = read_rows(path)?;
    let mut participation = ParticipationYears::new();
    let mut max_result_id = 0;
    let mut unknown_editions = 0usize;

    for row in &rows {
        if let Some(id) = row.result_id {
            max_result_id = max_result_id.max(id);
        }
        match games.year_of(&row.edition_id) {
            Some(year) => participation.entry(row.athlete_id).or_default().push(year),
            None => unknown_editions += 1,
        }
    }

    if unknown_editions > 0 {
        warn!(
            rows = unknown_editions,
            "Result rows reference editions missing from the games table"
        );
    }

    Ok(HistoricalResults {
        rows,
        participation,
        max_result_id,
    })
}

// ============================================================================
// CURRENT GAMES EXTRACT
// ============================================================================

pub fn read_new_athletes(path: &Path) -> Result<Vec<NewAthleteRecord>> {
    read_rows(path)
}

/// "Gold Medal" → medal "Gold", pos "1"
pub fn read_medallists(path: &Path) -> Result<MedalTable> {
    let rows: Vec<MedallistRow> = read_rows(path)?;
    let mut table = MedalTable::new();
    for row in rows {
        table.insert(
            EventTriple::new(&row.code_athlete, &row.discipline, &row.event),
            MedalRecord::from_label(&row.medal_type),
        );
    }
    Ok(table)
}

/// One membership per athlete code listed on each team row
pub fn read_teams(path: &Path) -> Result<TeamMembership> {
    let rows: Vec<TeamRow> = read_rows(path)?;
    let mut teams = TeamMembership::new();
    for row in rows {
        for code in parse_list_field(&row.athletes_codes) {
            teams.insert(EventTriple::new(&code, &row.discipline, &row.events));
        }
    }
    Ok(teams)
}

pub fn read_events(path: &Path) -> Result<EventCatalog> {
    let rows: Vec<EventRow> = read_rows(path)?;
    let mut catalog = EventCatalog::new();
    for row in &rows {
        catalog.insert(&row.sport, &row.event);
    }
    Ok(catalog)
}

/// Add names for NOCs the historical country table doesn't know
///
/// Returns how many were added.
pub fn add_new_nocs(path: &Path, countries: &mut CountryTable) -> Result<usize> {
    let rows: Vec<NocRow> = read_rows(path)?;
    let added = rows
        .iter()
        .filter(|row| countries.insert_if_absent(&row.code, &row.country_long))
        .count();
    Ok(added)
}

// ============================================================================
// TESTS
// ============================================================================
