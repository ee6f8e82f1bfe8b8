// ⚙️ Pipeline Configuration - where the files live, which edition is "current"
//
// Loaded from a JSON file (same approach as the rule files), every field
// optional: missing fields fall back to the standard dataset layout.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

// ============================================================================
// CURRENT GAMES
// ============================================================================

/// The edition the new extract belongs to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrentGames {
    /// Edition label written on every merged row
    pub edition: String,

    pub edition_id: String,

    /// Fixed dates (the games table has no reliable values for them)
    pub start_date: String,
    pub end_date: String,
    pub competition_date: String,
}

impl Default for CurrentGames {
    fn default() -> Self {
        CurrentGames {
            edition: "2024 Summer Olympics".to_string(),
            edition_id: "63".to_string(),
            start_date: "26-Jul-2024".to_string(),
            end_date: "11-Aug-2024".to_string(),
            competition_date: "24-Jul-2024 to 11-Aug-2024".to_string(),
        }
    }
}

// ============================================================================
// FILE LAYOUT
// ============================================================================

/// Input file names, relative to `data_dir`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputFiles {
    pub games: String,
    pub countries: String,
    pub event_results: String,
    pub athletes: String,
    pub new_athletes: String,
    pub new_medallists: String,
    pub new_teams: String,
    pub new_events: String,
    pub new_nocs: String,
}

impl Default for InputFiles {
    fn default() -> Self {
        InputFiles {
            games: "olympics_games.csv".to_string(),
            countries: "olympics_country.csv".to_string(),
            event_results: "olympic_athlete_event_results.csv".to_string(),
            athletes: "olympic_athlete_bio.csv".to_string(),
            new_athletes: "paris/athletes.csv".to_string(),
            new_medallists: "paris/medallists.csv".to_string(),
            new_teams: "paris/teams.csv".to_string(),
            new_events: "paris/events.csv".to_string(),
            new_nocs: "paris/nocs.csv".to_string(),
        }
    }
}

/// Output file names, relative to `output_dir`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputFiles {
    pub athletes: String,
    pub event_results: String,
    pub tally: String,
    pub games: String,
}

impl Default for OutputFiles {
    fn default() -> Self {
        OutputFiles {
            athletes: "new_olympic_athlete_bio.csv".to_string(),
            event_results: "new_olympic_athlete_event_results.csv".to_string(),
            tally: "new_medal_tally.csv".to_string(),
            games: "new_olympics_games.csv".to_string(),
        }
    }
}

// ============================================================================
// PIPELINE CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub inputs: InputFiles,
    pub outputs: OutputFiles,
    pub current_games: CurrentGames,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            data_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            inputs: InputFiles::default(),
            outputs: OutputFiles::default(),
            current_games: CurrentGames::default(),
        }
    }
}

impl PipelineConfig {
    /// Load from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        serde_json::from_str(&content).context("Failed to parse config JSON")
    }

    /// Builder pattern: override the input directory
    pub fn with_data_dir(mut self, data_dir: PathBuf) -> Self {
        self.data_dir = data_dir;
        self
    }

    /// Builder pattern: override the output directory
    pub fn with_output_dir(mut self, output_dir: PathBuf) -> Self {
        self.output_dir = output_dir;
        self
    }

    pub fn input_path(&self, file: &str) -> PathBuf {
        self.data_dir.join(file)
    }

    pub fn output_path(&self, file: &str) -> PathBuf {
        self.output_dir.join(file)
    }
}

// ============================================================================
// TESTS
// ============================================================================
