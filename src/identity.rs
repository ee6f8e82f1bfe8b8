// 🪪 Athlete Identity Resolver - Match new-source athletes to archive identities
//
// Problem solved:
// - The current-games extract has no athlete_id, only a source-local code
// - Same athlete must keep the archive's athlete_id across generations
// - Unknown athletes get fresh ids, counted up from the archive maximum
//
// All state (counter, identity table, key index) lives in one struct that
// the pipeline owns and passes by &mut.

use std::collections::HashMap;
use tracing::debug;

use crate::dates::normalize_date;
use crate::entities::{AthleteId, AthleteIdentity, CompositeKey, NewAthleteRecord};
use crate::fields::display_name;

/// athlete_id → years of the editions the athlete appears in, in file order
pub type ParticipationYears = HashMap<AthleteId, Vec<i32>>;

// ============================================================================
// RESOLVER
// ============================================================================

pub struct AthleteIdentityResolver {
    /// Highest id in use; the next minted id is `max_id + 1`
    max_id: AthleteId,

    identities: HashMap<AthleteId, AthleteIdentity>,

    /// Identity ids in first-seen order (output order)
    order: Vec<AthleteId>,

    key_index: HashMap<CompositeKey, AthleteId>,

    /// Source-local athlete code → resolved id
    code_index: HashMap<String, AthleteId>,

    minted: usize,
}

impl AthleteIdentityResolver {
    /// Empty resolver (ids start at 1)
    pub fn new() -> Self {
        AthleteIdentityResolver {
            max_id: 0,
            identities: HashMap::new(),
            order: Vec::new(),
            key_index: HashMap::new(),
            code_index: HashMap::new(),
            minted: 0,
        }
    }

    /// Build the resolver from the archive's athlete table
    ///
    /// Birth dates are normalized using each athlete's participation years
    /// as century hints. Duplicate composite keys: the later athlete wins.
    pub fn seed<I>(athletes: I, participation: &ParticipationYears) -> Self
    where
        I: IntoIterator<Item = AthleteIdentity>,
    {
        let mut resolver = AthleteIdentityResolver::new();
        for athlete in athletes {
            let hints = participation
                .get(&athlete.athlete_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            resolver.seed_identity(athlete, hints);
        }
        debug!(
            identities = resolver.identities.len(),
            keys = resolver.key_index.len(),
            max_id = resolver.max_id,
            "Seeded identity index"
        );
        resolver
    }

    /// Add one archive athlete
    pub fn seed_identity(&mut self, mut athlete: AthleteIdentity, year_hints: &[i32]) {
        let born = normalize_date(&athlete.born, year_hints, None);
        if born.is_empty() && !athlete.born.trim().is_empty() {
            debug!(athlete_id = athlete.athlete_id, raw = %athlete.born, "Unparseable birth date");
        }
        athlete.born = born;
        let id = athlete.athlete_id;
        self.max_id = self.max_id.max(id);

        if athlete.has_birth_date() {
            let key = CompositeKey::new(&athlete.name, &athlete.born, &athlete.country_noc);
            self.key_index.insert(key, id);
        }

        if self.identities.insert(id, athlete).is_none() {
            self.order.push(id);
        }
    }

    /// Resolve a new-source athlete to an athlete_id, minting one if needed
    ///
    /// Lookup order: nationality-code key, then country-code key.
    /// Existing identities are never modified.
    pub fn resolve(&mut self, record: &NewAthleteRecord) -> AthleteId {
        let born = normalize_date(&record.birth_date, &[], None);
        let by_nationality = CompositeKey::new(&record.name_tv, &born, &record.nationality_code);
        let by_country = CompositeKey::new(&record.name_tv, &born, &record.country_code);

        let id = if let Some(&id) = self.key_index.get(&by_nationality) {
            debug!(code = %record.code, athlete_id = id, "Matched by nationality key");
            id
        } else if let Some(&id) = self.key_index.get(&by_country) {
            debug!(code = %record.code, athlete_id = id, "Matched by country key");
            id
        } else {
            self.mint(record, born, by_nationality)
        };

        self.code_index.insert(record.code.clone(), id);
        id
    }

    fn mint(&mut self, record: &NewAthleteRecord, born: String, key: CompositeKey) -> AthleteId {
        self.max_id += 1;
        let id = self.max_id;
        self.key_index.insert(key, id);

        let identity = AthleteIdentity {
            athlete_id: id,
            name: display_name(&record.name_tv, &record.name),
            sex: record.gender.clone(),
            born,
            height: record.height.clone(),
            weight: record.weight.clone(),
            country: record.country_long.clone(),
            country_noc: record.country_code.clone(),
        };
        self.identities.insert(id, identity);
        self.order.push(id);
        self.minted += 1;

        debug!(code = %record.code, athlete_id = id, "Minted new identity");
        id
    }

    pub fn lookup(&self, key: &CompositeKey) -> Option<AthleteId> {
        self.key_index.get(key).copied()
    }

    pub fn identity(&self, id: AthleteId) -> Option<&AthleteIdentity> {
        self.identities.get(&id)
    }

    /// Id resolved for a source-local code, if that code went through `resolve`
    pub fn id_for_code(&self, code: &str) -> Option<AthleteId> {
        self.code_index.get(code).copied()
    }

    /// All identities, archive first, minted ones after, in first-seen order
    pub fn identities(&self) -> impl Iterator<Item = &AthleteIdentity> {
        self.order.iter().filter_map(|id| self.identities.get(id))
    }

    pub fn max_id(&self) -> AthleteId {
        self.max_id
    }

    /// Number of identities minted by `resolve`
    pub fn minted_count(&self) -> usize {
        self.minted
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}

impl Default for AthleteIdentityResolver {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_athlete(id: AthleteId, name: &str, born: &str, noc: &str) -> AthleteIdentity {
        AthleteIdentity {
            athlete_id: id,
            name: name.to_string(),
            sex: "Female".to_string(),
            born: born.to_string(),
            height: "170".to_string(),
            weight: "60".to_string(),
            country: "Test Country".to_string(),
            country_noc: noc.to_string(),
        }
    }

    fn create_test_record(code: &str, name_tv: &str, birth: &str, nationality: &str, country: &str) -> NewAthleteRecord {
        NewAthleteRecord {
            code: code.to_string(),
            name: "BOERS Isayah".to_string(),
            name_tv: name_tv.to_string(),
            gender: "Male".to_string(),
            birth_date: birth.to_string(),
            height: "0".to_string(),
            weight: "0".to_string(),
            country_code: country.to_string(),
            country_long: "Netherlands".to_string(),
            nationality_code: nationality.to_string(),
            disciplines: String::new(),
            events: String::new(),
        }
    }

    fn seeded() -> AthleteIdentityResolver {
        let athletes = vec![
            create_test_athlete(10, "Ana Smith", "1990-05-01", "USA"),
            create_test_athlete(11, "Ernest Hutcheon", "04-Apr-49", "ANZ"),
            create_test_athlete(12, "Nobody Known", "", "FRA"),
        ];
        let mut participation = ParticipationYears::new();
        participation.insert(11, vec![1972, 1976]);
        AthleteIdentityResolver::seed(athletes, &participation)
    }

    #[test]
    fn test_seed_normalizes_birth_dates() {
        let resolver = seeded();

        assert_eq!(resolver.identity(10).unwrap().born, "01-May-1990");
        assert_eq!(resolver.identity(11).unwrap().born, "04-Apr-1949");
        assert_eq!(resolver.identity(12).unwrap().born, "");
        assert_eq!(resolver.max_id(), 12);
        assert_eq!(resolver.len(), 3);
    }

    #[test]
    fn test_seed_skips_keys_without_birth_date() {
        let resolver = seeded();

        assert_eq!(resolver.lookup(&CompositeKey::new("Ana", "01-May-1990", "USA")), Some(10));
        assert_eq!(resolver.lookup(&CompositeKey::new("Nobody", "", "FRA")), None);
    }

    #[test]
    fn test_seed_duplicate_key_last_wins() {
        let athletes = vec![
            create_test_athlete(1, "Maria Lopez", "01-Jan-1980", "ESP"),
            create_test_athlete(2, "Maria Garcia", "01-Jan-1980", "ESP"),
        ];
        let resolver = AthleteIdentityResolver::seed(athletes, &ParticipationYears::new());

        assert_eq!(resolver.lookup(&CompositeKey::new("Maria", "01-Jan-1980", "ESP")), Some(2));
    }

    #[test]
    fn test_resolve_matches_nationality_key() {
        let mut resolver = seeded();
        let record = create_test_record("A1", "Ana Smith-Jones", "1990-05-01", "USA", "PUR");

        assert_eq!(resolver.resolve(&record), 10);
        assert_eq!(resolver.minted_count(), 0);
        assert_eq!(resolver.id_for_code("A1"), Some(10));
    }

    #[test]
    fn test_resolve_falls_back_to_country_key() {
        let mut resolver = seeded();
        let record = create_test_record("A2", "Ana Smith", "1990-05-01", "XXX", "USA");

        assert_eq!(resolver.resolve(&record), 10);
        assert_eq!(resolver.minted_count(), 0);
    }

    #[test]
    fn test_resolve_mints_new_identity() {
        let mut resolver = seeded();
        let record = create_test_record("B1", "", "2001-02-03", "NED", "NED");

        let id = resolver.resolve(&record);
        assert_eq!(id, 13);
        assert_eq!(resolver.minted_count(), 1);

        let identity = resolver.identity(13).unwrap();
        assert_eq!(identity.name, "Isayah Boers");
        assert_eq!(identity.born, "03-Feb-2001");
        assert_eq!(identity.sex, "Male");
        assert_eq!(identity.country, "Netherlands");
        assert_eq!(identity.country_noc, "NED");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut resolver = seeded();
        let record = create_test_record("C1", "isayah BOERS", "2001-02-03", "NED", "NED");

        let first = resolver.resolve(&record);
        let second = resolver.resolve(&record);

        assert_eq!(first, second);
        assert_eq!(resolver.minted_count(), 1);
        assert_eq!(resolver.identity(first).unwrap().name, "Isayah Boers");
    }

    #[test]
    fn test_resolve_blank_birth_matches_only_earlier_identical_key() {
        let mut resolver = seeded();
        let first = resolver.resolve(&create_test_record("D1", "Nobody Else", "", "FRA", "FRA"));
        let again = resolver.resolve(&create_test_record("D2", "Nobody Again", "", "FRA", "FRA"));

        // Archive athlete 12 has no birth date → never matched by key
        assert_ne!(first, 12);
        assert_eq!(first, again);
    }

    #[test]
    fn test_matched_identity_not_overwritten() {
        let mut resolver = seeded();
        let record = create_test_record("E1", "Ana Smith", "1990-05-01", "USA", "USA");

        resolver.resolve(&record);

        let identity = resolver.identity(10).unwrap();
        assert_eq!(identity.name, "Ana Smith");
        assert_eq!(identity.sex, "Female");
        assert_eq!(identity.country, "Test Country");
    }

    #[test]
    fn test_identities_in_first_seen_order() {
        let mut resolver = seeded();
        resolver.resolve(&create_test_record("F1", "New Person", "2000-01-01", "NED", "NED"));

        let ids: Vec<AthleteId> = resolver.identities().map(|a| a.athlete_id).collect();
        assert_eq!(ids, vec![10, 11, 12, 13]);
    }
}
