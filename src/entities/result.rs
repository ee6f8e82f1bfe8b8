// 🥇 Event Results - Result rows, medals, and the lookup tables around them

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{HashMap, HashSet};

use super::athlete::AthleteId;

// ============================================================================
// MEDAL
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Medal {
    Gold,
    Silver,
    Bronze,
}

impl Medal {
    /// Parse "Gold", "Gold Medal", "Silver Medal", ...
    pub fn from_label(label: &str) -> Option<Medal> {
        let label = label.trim();
        if label.starts_with("Gold") {
            Some(Medal::Gold)
        } else if label.starts_with("Silver") {
            Some(Medal::Silver)
        } else if label.starts_with("Bronze") {
            Some(Medal::Bronze)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Medal::Gold => "Gold",
            Medal::Silver => "Silver",
            Medal::Bronze => "Bronze",
        }
    }

    /// Placement written to the `pos` column
    pub fn placement(&self) -> &'static str {
        match self {
            Medal::Gold => "1",
            Medal::Silver => "2",
            Medal::Bronze => "3",
        }
    }
}

// ============================================================================
// EVENT RESULT ROW
// ============================================================================

/// One athlete's participation in one event of one edition
///
/// Append-only: after creation only `age` is ever filled in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventResultRow {
    pub edition: String,
    pub edition_id: String,
    pub country_noc: String,

    /// Discipline
    pub sport: String,
    pub event: String,

    /// Empty for gap-filled rows
    pub result_id: Option<u64>,

    pub athlete: String,
    pub athlete_id: AthleteId,

    /// "1", "2", "3" or empty for new rows; free text in the archive
    #[serde(default)]
    pub pos: String,

    /// "Gold", "Silver", "Bronze" or empty
    #[serde(default)]
    pub medal: String,

    #[serde(
        rename = "isTeamSport",
        default,
        serialize_with = "serialize_team_flag",
        deserialize_with = "deserialize_team_flag"
    )]
    pub is_team_sport: bool,

    #[serde(default)]
    pub age: Option<i32>,
}

impl EventResultRow {
    pub fn medal(&self) -> Option<Medal> {
        Medal::from_label(&self.medal)
    }
}

fn serialize_team_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *flag { "TRUE" } else { "FALSE" })
}

fn deserialize_team_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(matches!(raw.trim().to_lowercase().as_str(), "true" | "1" | "yes"))
}

// ============================================================================
// EVENT TRIPLE
// ============================================================================

/// (athlete_code, discipline, event) - the key shared by medal records,
/// team membership, and the merger's emission set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EventTriple {
    pub athlete_code: String,
    pub discipline: String,
    pub event: String,
}

impl EventTriple {
    pub fn new(athlete_code: &str, discipline: &str, event: &str) -> Self {
        EventTriple {
            athlete_code: athlete_code.to_string(),
            discipline: discipline.to_string(),
            event: event.to_string(),
        }
    }
}

// ============================================================================
// MEDAL RECORDS (ground truth)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct MedalRecord {
    /// "Gold", "Silver", "Bronze" (first word of the source label)
    pub medal_type: String,

    /// "1", "2", "3" or empty
    pub pos: String,
}

impl MedalRecord {
    /// Build from a source label such as "Gold Medal"
    pub fn from_label(label: &str) -> Self {
        let medal_type = label.trim().split(' ').next().unwrap_or("").to_string();
        let pos = Medal::from_label(label)
            .map(|m| m.placement().to_string())
            .unwrap_or_default();
        MedalRecord { medal_type, pos }
    }
}

/// Medal records in the order they were read
///
/// A repeated key replaces the earlier value but keeps its position.
#[derive(Debug, Clone, Default)]
pub struct MedalTable {
    entries: Vec<(EventTriple, MedalRecord)>,
    index: HashMap<EventTriple, usize>,
}

impl MedalTable {
    pub fn new() -> Self {
        MedalTable::default()
    }

    pub fn insert(&mut self, key: EventTriple, record: MedalRecord) {
        match self.index.get(&key) {
            Some(&idx) => self.entries[idx].1 = record,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, record));
            }
        }
    }

    pub fn get(&self, key: &EventTriple) -> Option<&MedalRecord> {
        self.index.get(key).map(|&idx| &self.entries[idx].1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&EventTriple, &MedalRecord)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ============================================================================
// TEAM MEMBERSHIP
// ============================================================================

/// Which athletes took part in which events as members of a team
#[derive(Debug, Clone, Default)]
pub struct TeamMembership {
    members: HashSet<EventTriple>,
}

impl TeamMembership {
    pub fn new() -> Self {
        TeamMembership::default()
    }

    pub fn insert(&mut self, triple: EventTriple) {
        self.members.insert(triple);
    }

    pub fn contains(&self, triple: &EventTriple) -> bool {
        self.members.contains(triple)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl FromIterator<EventTriple> for TeamMembership {
    fn from_iter<I: IntoIterator<Item = EventTriple>>(iter: I) -> Self {
        TeamMembership {
            members: iter.into_iter().collect(),
        }
    }
}

// ============================================================================
// CANONICAL EVENT CATALOG
// ============================================================================

/// The valid (discipline, event) pairs of the current games
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    pairs: HashSet<(String, String)>,
}

impl EventCatalog {
    pub fn new() -> Self {
        EventCatalog::default()
    }

    pub fn insert(&mut self, discipline: &str, event: &str) {
        self.pairs.insert((discipline.to_string(), event.to_string()));
    }

    pub fn contains(&self, discipline: &str, event: &str) -> bool {
        self.pairs.contains(&(discipline.to_string(), event.to_string()))
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, &'a str)> for EventCatalog {
    fn from_iter<I: IntoIterator<Item = (&'a str, &'a str)>>(iter: I) -> Self {
        let mut catalog = EventCatalog::new();
        for (discipline, event) in iter {
            catalog.insert(discipline, event);
        }
        catalog
    }
}

// ============================================================================
// TESTS
// ============================================================================
