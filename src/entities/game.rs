// 🏟️ Game Editions - edition id → year + competition window
//
// Built once from the games table, immutable afterwards.
// The age calculation needs the competition window of every edition.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::config::CurrentGames;
use crate::dates::{month_number, normalize_date, parse_canonical, CANONICAL_FORMAT};

// ============================================================================
// GAME EDITION
// ============================================================================

/// One row of the games table plus the parsed competition window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEdition {
    pub edition: String,
    pub edition_id: String,

    #[serde(default)]
    pub edition_url: String,

    pub year: i32,

    #[serde(default)]
    pub city: String,

    #[serde(default)]
    pub country_flag_url: String,

    #[serde(default)]
    pub country_noc: String,

    #[serde(default)]
    pub start_date: String,

    #[serde(default)]
    pub end_date: String,

    /// "dd-Mon-yyyy to dd-Mon-yyyy" once normalized, "—" when unknown
    #[serde(default)]
    pub competition_date: String,

    /// Empty when the games took place; a note otherwise
    #[serde(rename = "isHeld", default)]
    pub is_held: String,

    #[serde(skip)]
    pub competition_start: Option<NaiveDate>,

    #[serde(skip)]
    pub competition_end: Option<NaiveDate>,
}

impl GameEdition {
    pub fn was_held(&self) -> bool {
        self.is_held.trim().is_empty()
    }

    /// Year the competition actually ran (Tokyo 2020 ran in 2021);
    /// falls back to the edition year when the window is unknown
    pub fn game_year(&self) -> i32 {
        self.competition_start
            .map(|d| d.year())
            .unwrap_or(self.year)
    }
}

// ============================================================================
// GAME CATALOG
// ============================================================================

pub struct GameCatalog {
    editions: Vec<GameEdition>,
    index: HashMap<String, usize>,
}

impl GameCatalog {
    /// Normalize every edition's dates and index by edition id
    ///
    /// - The current games get their fixed, configured dates
    /// - Held editions: start/end normalized with the edition year,
    ///   competition range rewritten as "dd-Mon-yyyy to dd-Mon-yyyy"
    /// - Editions that were not held keep their raw values
    pub fn from_rows(rows: Vec<GameEdition>, current: &CurrentGames) -> Self {
        let mut editions = Vec::with_capacity(rows.len());
        let mut index = HashMap::new();

        for mut game in rows {
            if game.edition_id == current.edition_id {
                game.start_date = current.start_date.clone();
                game.end_date = current.end_date.clone();
                game.competition_date = current.competition_date.clone();
            } else if game.was_held() {
                game.start_date = normalize_date(&game.start_date, &[], Some(game.year));
                game.end_date = normalize_date(&game.end_date, &[], Some(game.year));
                game.competition_date = transform_competition_range(&game.competition_date, game.year);
            }

            if let Some((start, end)) = parse_competition_range(&game.competition_date) {
                game.competition_start = Some(start);
                game.competition_end = Some(end);
            }

            index.insert(game.edition_id.clone(), editions.len());
            editions.push(game);
        }

        GameCatalog { editions, index }
    }

    pub fn get(&self, edition_id: &str) -> Option<&GameEdition> {
        self.index.get(edition_id).map(|&idx| &self.editions[idx])
    }

    /// Edition year (as listed, not the competition year)
    pub fn year_of(&self, edition_id: &str) -> Option<i32> {
        self.get(edition_id).map(|g| g.year)
    }

    /// All editions in input order
    pub fn editions(&self) -> &[GameEdition] {
        &self.editions
    }

    pub fn len(&self) -> usize {
        self.editions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editions.is_empty()
    }
}

// ============================================================================
// COMPETITION RANGES
// ============================================================================

/// Rewrite a free-text competition range into "dd-Mon-yyyy to dd-Mon-yyyy"
///
/// Handles:
/// - "21 July –  8 August 2021" (explicit year on the end date wins)
/// - "6 – 13 April" (start borrows the end month)
/// - "14 May – 28 October"
///
/// Anything else (including a lone "—") is returned trimmed but unchanged.
pub fn transform_competition_range(raw: &str, year: i32) -> String {
    let trimmed = raw.trim();
    build_range(trimmed, year).unwrap_or_else(|| trimmed.to_string())
}

fn build_range(s: &str, year: i32) -> Option<String> {
    let parts: Vec<&str> = s.split(['–', '—']).map(str::trim).collect();
    if parts.len() != 2 {
        return None;
    }

    let end_words: Vec<&str> = parts[1].split_whitespace().collect();
    if end_words.len() < 2 {
        return None;
    }
    let year = match end_words.get(2) {
        Some(explicit) => explicit.parse().ok()?,
        None => year,
    };
    let end_day: u32 = end_words[0].parse().ok()?;
    let end_month = month_number(end_words[1])?;

    let start_words: Vec<&str> = parts[0].split_whitespace().collect();
    let start_day: u32 = start_words.first()?.parse().ok()?;
    let start_month = match start_words.get(1) {
        Some(month) => month_number(month)?,
        None => end_month,
    };

    let start = NaiveDate::from_ymd_opt(year, start_month, start_day)?;
    let end = NaiveDate::from_ymd_opt(year, end_month, end_day)?;
    Some(format!(
        "{} to {}",
        start.format(CANONICAL_FORMAT),
        end.format(CANONICAL_FORMAT)
    ))
}

/// Split "dd-Mon-yyyy to dd-Mon-yyyy" into its two dates
pub fn parse_competition_range(range: &str) -> Option<(NaiveDate, NaiveDate)> {
    let (start, end) = range.split_once(" to ")?;
    Some((parse_canonical(start)?, parse_canonical(end)?))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_game(edition_id: &str, year: i32, competition: &str, is_held: &str) -> GameEdition {
        GameEdition {
            edition: format!("{} Summer Olympics", year),
            edition_id: edition_id.to_string(),
            edition_url: format!("/editions/{}", edition_id),
            year,
            city: "Test City".to_string(),
            country_flag_url: String::new(),
            country_noc: "TST".to_string(),
            start_date: "6 April".to_string(),
            end_date: "15 April".to_string(),
            competition_date: competition.to_string(),
            is_held: is_held.to_string(),
            competition_start: None,
            competition_end: None,
        }
    }

    #[test]
    fn test_transform_range_with_explicit_year() {
        assert_eq!(
            transform_competition_range("21 July –  8 August 2021", 2020),
            "21-Jul-2021 to 08-Aug-2021"
        );
    }

    #[test]
    fn test_transform_range_borrowing_end_month() {
        assert_eq!(
            transform_competition_range("6 – 13 April", 1896),
            "06-Apr-1896 to 13-Apr-1896"
        );
    }

    #[test]
    fn test_transform_range_across_months() {
        assert_eq!(
            transform_competition_range("14 May – 28 October", 1900),
            "14-May-1900 to 28-Oct-1900"
        );
    }

    #[test]
    fn test_transform_range_unknown_kept() {
        assert_eq!(transform_competition_range("—", 1916), "—");
        assert_eq!(transform_competition_range(" – ", 1916), "–");
        assert_eq!(transform_competition_range("sometime in May", 1916), "sometime in May");
    }

    #[test]
    fn test_parse_competition_range() {
        let (start, end) = parse_competition_range("24-Jul-2024 to 11-Aug-2024").unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 7, 24).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2024, 8, 11).unwrap());
        assert!(parse_competition_range("—").is_none());
    }

    #[test]
    fn test_catalog_normalizes_held_editions() {
        let rows = vec![create_test_game("1", 1896, "6 – 13 April", "")];
        let catalog = GameCatalog::from_rows(rows, &CurrentGames::default());

        let game = catalog.get("1").unwrap();
        assert_eq!(game.start_date, "06-Apr-1896");
        assert_eq!(game.end_date, "15-Apr-1896");
        assert_eq!(game.competition_date, "06-Apr-1896 to 13-Apr-1896");
        assert_eq!(game.competition_end, NaiveDate::from_ymd_opt(1896, 4, 13));
        assert_eq!(game.game_year(), 1896);
    }

    #[test]
    fn test_catalog_keeps_cancelled_editions() {
        let rows = vec![create_test_game("7", 1916, "—", "Not held due to war")];
        let catalog = GameCatalog::from_rows(rows, &CurrentGames::default());

        let game = catalog.get("7").unwrap();
        assert_eq!(game.start_date, "6 April");
        assert!(game.competition_start.is_none());
        assert_eq!(game.game_year(), 1916);
    }

    #[test]
    fn test_catalog_fixes_current_games() {
        let current = CurrentGames::default();
        let rows = vec![create_test_game(&current.edition_id, 2024, "—", "")];
        let catalog = GameCatalog::from_rows(rows, &current);

        let game = catalog.get(&current.edition_id).unwrap();
        assert_eq!(game.start_date, "26-Jul-2024");
        assert_eq!(game.competition_date, "24-Jul-2024 to 11-Aug-2024");
        assert_eq!(game.competition_end, NaiveDate::from_ymd_opt(2024, 8, 11));
    }

    #[test]
    fn test_game_year_follows_competition_window() {
        let rows = vec![create_test_game("61", 2020, "21 July –  8 August 2021", "")];
        let catalog = GameCatalog::from_rows(rows, &CurrentGames::default());

        assert_eq!(catalog.year_of("61"), Some(2020));
        assert_eq!(catalog.get("61").unwrap().game_year(), 2021);
        assert!(catalog.get("99").is_none());
    }
}
