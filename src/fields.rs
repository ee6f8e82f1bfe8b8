// 🧩 Field Helpers - Free-text list fields and athlete name shapes

// ============================================================================
// LIST FIELDS
// ============================================================================

/// Parse a bracketed list field into its items
///
/// Tolerates the shapes the current-games extract actually contains:
/// - `""` → `[]`
/// - `"[\"Men's 100m\"]"` (outer quotes around the whole list)
/// - `['Cycling Road', 'Cycling Track']` (single or double quoted items)
/// - `[Swimming, Diving]` (bare tokens)
/// - anything without brackets → `[]`
pub fn parse_list_field(raw: &str) -> Vec<String> {
    let mut s = raw.trim();
    if s.is_empty() {
        return Vec::new();
    }

    // Outer quote wrapping the whole expression
    if s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"')) || (s.starts_with('\'') && s.ends_with('\'')))
    {
        s = s[1..s.len() - 1].trim();
    }

    if s.len() < 2 || !s.starts_with('[') || !s.ends_with(']') {
        return Vec::new();
    }

    let content = s[1..s.len() - 1].trim();
    let chars: Vec<char> = content.chars().collect();
    let mut items = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        while i < chars.len() && (chars[i] == ' ' || chars[i] == ',') {
            i += 1;
        }
        if i >= chars.len() {
            break;
        }

        if chars[i] == '"' || chars[i] == '\'' {
            let quote = chars[i];
            i += 1;
            let start = i;
            while i < chars.len() && chars[i] != quote {
                i += 1;
            }
            items.push(chars[start..i].iter().collect());
            i += 1; // closing quote
        } else {
            let start = i;
            while i < chars.len() && chars[i] != ',' {
                i += 1;
            }
            let item: String = chars[start..i].iter().collect();
            let item = item.trim();
            if !item.is_empty() {
                items.push(item.to_string());
            }
        }
    }

    items
}

// ============================================================================
// NAMES
// ============================================================================

/// Title-case every word: a letter is uppercased when it follows a
/// non-letter, lowercased otherwise ("o'BRIEN" → "O'Brien")
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for c in s.chars() {
        if prev_is_letter {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        prev_is_letter = c.is_alphabetic();
    }
    out
}

/// "Surname Given Names" → "Given Names Surname"
///
/// Single-word names come back unchanged.
pub fn reverse_name(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.len() >= 2 {
        format!("{} {}", parts[1..].join(" "), parts[0])
    } else {
        name.to_string()
    }
}

/// Name shown on result rows and new identities: display name when
/// present, otherwise the reversed registration name
pub fn display_name(name_tv: &str, name: &str) -> String {
    let tv = name_tv.trim();
    if tv.is_empty() {
        title_case(&reverse_name(name))
    } else {
        title_case(tv)
    }
}

/// First whitespace-separated token, or "" for blank input
pub fn first_token(s: &str) -> &str {
    s.split_whitespace().next().unwrap_or("")
}

// ============================================================================
// TESTS
// ============================================================================
