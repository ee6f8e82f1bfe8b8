// 📅 Date Normalizer - Many source date shapes → one canonical form
// Ordered pattern matchers: the first matcher that claims the input decides
//
// Canonical form: dd-Mon-yyyy ("04-Apr-1949")

use chrono::NaiveDate;
use std::sync::OnceLock;

/// chrono format string for the canonical date form
pub const CANONICAL_FORMAT: &str = "%d-%b-%Y";

// ============================================================================
// MATCH OUTCOME
// ============================================================================

/// What a matcher decided about an input it recognized
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchOutcome {
    /// Converted to canonical form
    Date(String),

    /// Shape recognized, values don't form a real date → empty output
    Unparseable,

    /// Shape recognized, conversion failed mid-parse → input returned as-is
    Verbatim,
}

/// Contextual hints available to every matcher
#[derive(Debug, Clone, Copy, Default)]
pub struct DateContext<'a> {
    /// Reference years; the first one anchors two-digit year inference
    pub year_hints: &'a [i32],

    /// Year to use when the input only has day + month
    pub default_year: Option<i32>,
}

impl<'a> DateContext<'a> {
    pub fn reference_year(&self) -> Option<i32> {
        self.year_hints.first().copied()
    }
}

// ============================================================================
// PATTERN TRAIT
// ============================================================================

/// DatePattern - One independent date shape
///
/// `input` is already cleaned: trimmed, dashes unified, quotes stripped,
/// lowercased. Returning `None` means "not my shape", and the next matcher
/// gets a turn.
pub trait DatePattern: Send + Sync {
    /// Short name for logging and tests
    fn name(&self) -> &str;

    fn try_match(&self, input: &str, ctx: &DateContext) -> Option<MatchOutcome>;
}

// ============================================================================
// HELPERS
// ============================================================================

const MONTHS: [&str; 12] = [
    "january", "february", "march", "april", "may", "june",
    "july", "august", "september", "october", "november", "december",
];

/// Month number (1-12) from a full English name or 3-letter abbreviation
pub fn month_number(name: &str) -> Option<u32> {
    let lower = name.trim().to_lowercase();
    if lower.len() < 3 {
        return None;
    }
    MONTHS
        .iter()
        .position(|m| *m == lower || (lower.len() == 3 && m.starts_with(&lower)))
        .map(|idx| idx as u32 + 1)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn canonical(year: i32, month: u32, day: u32) -> Option<String> {
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format(CANONICAL_FORMAT).to_string())
}

fn date_or_unparseable(date: Option<String>) -> MatchOutcome {
    match date {
        Some(d) => MatchOutcome::Date(d),
        None => MatchOutcome::Unparseable,
    }
}

/// Rebuild a full year from two digits relative to a reference year
///
/// "67" against 2024 → 2067 is in the future → 1967
pub fn infer_century(short_year: i32, reference_year: i32) -> i32 {
    let full = (reference_year / 100) * 100 + short_year;
    if full > reference_year {
        full - 100
    } else {
        full
    }
}

/// Parse a canonical dd-Mon-yyyy string back into a date
pub fn parse_canonical(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), CANONICAL_FORMAT).ok()
}

// ============================================================================
// MATCHERS (in priority order)
// ============================================================================

/// 0. Already canonical: 21-Oct-1991
pub struct CanonicalPattern;

impl DatePattern for CanonicalPattern {
    fn name(&self) -> &str {
        "dd-Mon-yyyy"
    }

    fn try_match(&self, input: &str, _ctx: &DateContext) -> Option<MatchOutcome> {
        let parts: Vec<&str> = input.split('-').collect();
        if parts.len() != 3 || !is_digits(parts[0]) || parts[0].len() > 2 {
            return None;
        }
        if !is_digits(parts[2]) || parts[2].len() != 4 {
            return None;
        }
        let month = month_number(parts[1])?;
        let day: u32 = parts[0].parse().ok()?;
        let year: i32 = parts[2].parse().ok()?;
        Some(date_or_unparseable(canonical(year, month, day)))
    }
}

/// 1. ISO: 1991-10-21
pub struct IsoPattern;

impl DatePattern for IsoPattern {
    fn name(&self) -> &str {
        "yyyy-mm-dd"
    }

    fn try_match(&self, input: &str, _ctx: &DateContext) -> Option<MatchOutcome> {
        let parts: Vec<&str> = input.split('-').collect();
        if parts.len() != 3 || !parts.iter().all(|p| is_digits(p)) {
            return None;
        }

        let parsed = (
            parts[0].parse::<i32>(),
            parts[1].parse::<u32>(),
            parts[2].parse::<u32>(),
        );
        let date = match parsed {
            (Ok(y), Ok(m), Ok(d)) => canonical(y, m, d),
            _ => None,
        };
        Some(date_or_unparseable(date))
    }
}

/// 2. Month + two-digit year: Dec-67 (needs a reference year)
pub struct MonthShortYearPattern;

impl DatePattern for MonthShortYearPattern {
    fn name(&self) -> &str {
        "Mon-yy"
    }

    fn try_match(&self, input: &str, ctx: &DateContext) -> Option<MatchOutcome> {
        let reference = ctx.reference_year()?;
        if input.len() != 6 {
            return None;
        }
        let (mon, short_year) = input.split_once('-')?;
        if !is_digits(short_year) || short_year.len() > 2 {
            return None;
        }

        let converted = month_number(mon).and_then(|month| {
            let short: i32 = short_year.parse().ok()?;
            canonical(infer_century(short, reference), month, 1)
        });
        Some(converted.map_or(MatchOutcome::Verbatim, MatchOutcome::Date))
    }
}

/// 3. Day + month + two-digit year: 04-Apr-49 (needs a reference year)
pub struct DayMonthShortYearPattern;

impl DatePattern for DayMonthShortYearPattern {
    fn name(&self) -> &str {
        "dd-Mon-yy"
    }

    fn try_match(&self, input: &str, ctx: &DateContext) -> Option<MatchOutcome> {
        let reference = ctx.reference_year()?;
        let parts: Vec<&str> = input.split('-').collect();
        if parts.len() != 3 || !is_digits(parts[0]) || !is_digits(parts[2]) {
            return None;
        }
        if parts[2].len() > 2 {
            return None;
        }

        let converted = month_number(parts[1]).and_then(|month| {
            let day: u32 = parts[0].parse().ok()?;
            let short: i32 = parts[2].parse().ok()?;
            canonical(infer_century(short, reference), month, day)
        });
        Some(converted.map_or(MatchOutcome::Verbatim, MatchOutcome::Date))
    }
}

/// 4. Textual: 24 November 1873
pub struct DayMonthYearPattern;

impl DatePattern for DayMonthYearPattern {
    fn name(&self) -> &str {
        "dd Month yyyy"
    }

    fn try_match(&self, input: &str, _ctx: &DateContext) -> Option<MatchOutcome> {
        let words: Vec<&str> = input.split_whitespace().collect();
        if words.len() != 3 || !is_digits(words[0]) || !is_digits(words[2]) {
            return None;
        }

        let date = month_number(words[1]).and_then(|month| {
            let day: u32 = words[0].parse().ok()?;
            let year: i32 = words[2].parse().ok()?;
            canonical(year, month, day)
        });
        Some(date_or_unparseable(date))
    }
}

/// 5. Day + month with a default year: 6 April
pub struct DayMonthDefaultYearPattern;

impl DatePattern for DayMonthDefaultYearPattern {
    fn name(&self) -> &str {
        "dd Month"
    }

    fn try_match(&self, input: &str, ctx: &DateContext) -> Option<MatchOutcome> {
        let year = ctx.default_year?;
        let words: Vec<&str> = input.split_whitespace().collect();
        if words.len() != 2 || !is_digits(words[0]) {
            return None;
        }

        let date = month_number(words[1]).and_then(|month| {
            let day: u32 = words[0].parse().ok()?;
            canonical(year, month, day)
        });
        Some(date_or_unparseable(date))
    }
}

/// 6. Month + year: July 1882 (1st of the month)
pub struct MonthYearPattern;

impl DatePattern for MonthYearPattern {
    fn name(&self) -> &str {
        "Month yyyy"
    }

    fn try_match(&self, input: &str, _ctx: &DateContext) -> Option<MatchOutcome> {
        let words: Vec<&str> = input.split_whitespace().collect();
        if words.len() != 2 || !is_digits(words[1]) {
            return None;
        }

        let date = month_number(words[0]).and_then(|month| {
            let year: i32 = words[1].parse().ok()?;
            canonical(year, month, 1)
        });
        Some(date_or_unparseable(date))
    }
}

/// 7. Bare year: 1879 (1st of January)
pub struct BareYearPattern;

impl DatePattern for BareYearPattern {
    fn name(&self) -> &str {
        "yyyy"
    }

    fn try_match(&self, input: &str, _ctx: &DateContext) -> Option<MatchOutcome> {
        if input.len() != 4 || !is_digits(input) {
            return None;
        }
        let year: i32 = input.parse().ok()?;
        Some(date_or_unparseable(canonical(year, 1, 1)))
    }
}

/// 8. Free text with a 4-digit year somewhere: "(1926 or 1927)" → first one
pub struct EmbeddedYearPattern;

impl DatePattern for EmbeddedYearPattern {
    fn name(&self) -> &str {
        "text with yyyy"
    }

    fn try_match(&self, input: &str, _ctx: &DateContext) -> Option<MatchOutcome> {
        let start = input
            .as_bytes()
            .windows(4)
            .position(|w| w.iter().all(u8::is_ascii_digit))?;
        let year: i32 = input[start..start + 4].parse().ok()?;
        Some(date_or_unparseable(canonical(year, 1, 1)))
    }
}

// ============================================================================
// NORMALIZER
// ============================================================================

/// DateNormalizer - Tries each pattern in order, first claim wins
pub struct DateNormalizer {
    patterns: Vec<Box<dyn DatePattern>>,
}

impl DateNormalizer {
    /// Standard matcher order
    pub fn new() -> Self {
        DateNormalizer {
            patterns: vec![
                Box::new(CanonicalPattern),
                Box::new(IsoPattern),
                Box::new(MonthShortYearPattern),
                Box::new(DayMonthShortYearPattern),
                Box::new(DayMonthYearPattern),
                Box::new(DayMonthDefaultYearPattern),
                Box::new(MonthYearPattern),
                Box::new(BareYearPattern),
                Box::new(EmbeddedYearPattern),
            ],
        }
    }

    /// Custom matcher list (order matters)
    pub fn with_patterns(patterns: Vec<Box<dyn DatePattern>>) -> Self {
        DateNormalizer { patterns }
    }

    /// Names of the matchers, in the order they are tried
    pub fn pattern_names(&self) -> Vec<&str> {
        self.patterns.iter().map(|p| p.name()).collect()
    }

    /// Normalize a raw date string to dd-Mon-yyyy, or empty if unknown
    ///
    /// Never fails. Inputs claimed by the two-digit-year matchers that
    /// cannot be converted come back unchanged (trimmed).
    pub fn normalize(&self, raw: &str, year_hints: &[i32], default_year: Option<i32>) -> String {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return String::new();
        }

        let cleaned = clean_input(trimmed);
        let ctx = DateContext {
            year_hints,
            default_year,
        };

        for pattern in &self.patterns {
            if let Some(outcome) = pattern.try_match(&cleaned, &ctx) {
                return match outcome {
                    MatchOutcome::Date(date) => date,
                    MatchOutcome::Unparseable => String::new(),
                    MatchOutcome::Verbatim => trimmed.to_string(),
                };
            }
        }

        String::new()
    }
}

impl Default for DateNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

fn clean_input(trimmed: &str) -> String {
    trimmed
        .replace(['–', '—', '‐'], "-")
        .trim_matches('"')
        .trim_matches(|c: char| c == '“' || c == '”')
        .trim()
        .to_lowercase()
}

fn standard_normalizer() -> &'static DateNormalizer {
    static NORMALIZER: OnceLock<DateNormalizer> = OnceLock::new();
    NORMALIZER.get_or_init(DateNormalizer::new)
}

/// Normalize with the standard matcher order
///
/// # Examples:
/// ```
/// use olympic_reconciliation::normalize_date;
///
/// assert_eq!(normalize_date("1991-10-21", &[], None), "21-Oct-1991");
/// assert_eq!(normalize_date("Dec-67", &[2024], None), "01-Dec-1967");
/// assert_eq!(normalize_date("6 April", &[], Some(1896)), "06-Apr-1896");
/// ```
pub fn normalize_date(raw: &str, year_hints: &[i32], default_year: Option<i32>) -> String {
    standard_normalizer().normalize(raw, year_hints, default_year)
}

// ============================================================================
// TESTS
// ============================================================================
