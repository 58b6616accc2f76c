//! Survey form decoding.
//!
//! Submitted fields arrive as raw strings (an HTML form body, a CSV row or
//! command-line flags). Nothing here rejects input: numbers are coerced the
//! way a browser form value is turned into a number, so anything unparseable
//! becomes NaN and later falls through to the default classification.

use crate::models::{WeeklySurveyEntry, DEFAULT_USER_ID};

/// Converts a raw field to a number. Never fails.
///
/// - a missing field is NaN
/// - blank or whitespace-only text is `0`
/// - decimal and exponent literals parse normally (`"3"`, `"-2.5"`, `".5"`, `"1e3"`)
/// - `Infinity` with an optional sign, and `0x`/`0o`/`0b` integer literals
/// - everything else is NaN
pub fn coerce_number(raw: Option<&str>) -> f64 {
    let Some(raw) = raw else {
        return f64::NAN;
    };

    let text = raw.trim();
    if text.is_empty() {
        return 0.0;
    }

    match text {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    if let Some(value) = parse_prefixed_integer(text) {
        return value;
    }

    // Rust accepts "inf" and "nan" spellings that a form number does not.
    let decimal_literal = text
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !decimal_literal {
        return f64::NAN;
    }

    text.parse::<f64>().unwrap_or(f64::NAN)
}

fn parse_prefixed_integer(text: &str) -> Option<f64> {
    let radix = match text.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };

    let digits = &text[2..];
    if digits.is_empty() {
        return Some(f64::NAN);
    }

    let value = digits.chars().try_fold(0.0_f64, |acc, c| {
        c.to_digit(radix)
            .map(|digit| acc * f64::from(radix) + f64::from(digit))
    });

    Some(value.unwrap_or(f64::NAN))
}

/// Ordered key/value pairs from one submission, duplicates kept.
#[derive(Debug, Clone, Default)]
pub struct FormFields {
    pairs: Vec<(String, String)>,
}

impl FormFields {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        Self {
            pairs: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.pairs
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// A scalar field. Repeated keys behave like an array and are joined
    /// with commas, which keeps them from matching any number or selector.
    pub fn text(&self, key: &str) -> Option<String> {
        let values: Vec<&str> = self.values(key).collect();
        match values.as_slice() {
            [] => None,
            [single] => Some((*single).to_string()),
            many => Some(many.join(",")),
        }
    }

    pub fn number(&self, key: &str) -> f64 {
        coerce_number(self.text(key).as_deref())
    }

    /// A multi-select field, accepting `key`, `key[]` and indexed `key[N]`.
    /// Indexed values follow the others, ordered by index. A lone blank
    /// `key` value means nothing was selected.
    pub fn list(&self, key: &str) -> Vec<String> {
        let bracketed = format!("{key}[]");
        let mut values: Vec<(&str, &str)> = Vec::new();
        let mut indexed: Vec<(u64, &str)> = Vec::new();

        for (k, v) in &self.pairs {
            if *k == key || *k == bracketed {
                values.push((k.as_str(), v.as_str()));
            } else if let Some(index) = list_index(k, key) {
                indexed.push((index, v.as_str()));
            }
        }

        if indexed.is_empty() {
            if let [(k, v)] = values.as_slice() {
                if *k == key && v.is_empty() {
                    return Vec::new();
                }
            }
        }

        indexed.sort_by_key(|(index, _)| *index);
        values
            .into_iter()
            .map(|(_, v)| v)
            .chain(indexed.into_iter().map(|(_, v)| v))
            .map(str::to_string)
            .collect()
    }
}

/// `habits[3]` → `Some(3)` for key `habits`.
fn list_index(field: &str, key: &str) -> Option<u64> {
    let digits = field.strip_prefix(key)?.strip_prefix('[')?.strip_suffix(']')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

#[derive(Debug, Clone, PartialEq)]
pub struct WorkloadForm {
    pub study_hours: f64,
    pub sleep_hours: f64,
    pub assignments: f64,
    pub stress_level: f64,
    pub week: Option<String>,
}

impl WorkloadForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            study_hours: fields.number("study_hours"),
            sleep_hours: fields.number("sleep_hours"),
            assignments: fields.number("assignments"),
            stress_level: fields.number("stress_level"),
            week: fields.text("week"),
        }
    }

    pub fn to_entry(&self) -> WeeklySurveyEntry {
        WeeklySurveyEntry {
            user_id: DEFAULT_USER_ID,
            study_hours: self.study_hours,
            sleep_hours: self.sleep_hours,
            assignments: self.assignments,
            stress_level: self.stress_level,
            week: self.week.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PressureForm {
    pub pressure: f64,
}

impl PressureForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            pressure: fields.number("pressure"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitsForm {
    pub habits: Vec<String>,
}

impl HabitsForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            habits: fields.list("habits"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GoalsForm {
    pub academic: Option<String>,
    pub health: Option<String>,
}

impl GoalsForm {
    pub fn from_fields(fields: &FormFields) -> Self {
        Self {
            academic: fields.text("academic"),
            health: fields.text("health"),
        }
    }
}
