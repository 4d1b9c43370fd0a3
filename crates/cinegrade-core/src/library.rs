//! Built-in grades modelled on well-known directors and studios.
//!
//! The table ships as JSON in the producer schema and goes through the same
//! validation as analyzer output.

use std::sync::OnceLock;

use serde::Deserialize;

use crate::grade::NamedGrade;
use crate::transform::raw::RawGradeParams;

const LIBRARY_JSON: &str = include_str!("../assets/library.json");

/// Who a library grade is modelled on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Director,
    Studio,
}

impl Category {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Director => "director",
            Self::Studio => "studio",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "director" => Ok(Self::Director),
            "studio" => Ok(Self::Studio),
            other => Err(format!("unknown category `{other}`")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryGrade {
    pub id: String,
    pub author: String,
    pub category: Category,
    /// Short notes on what defines the look.
    pub highlights: Vec<String>,
    pub grade: NamedGrade,
}

#[derive(Deserialize)]
struct LibraryEntry {
    id: String,
    name: String,
    author: String,
    category: Category,
    #[serde(default)]
    description: String,
    #[serde(default)]
    highlights: Vec<String>,
    parameters: RawGradeParams,
}

fn load(json: &str) -> Vec<LibraryGrade> {
    let entries: Vec<serde_json::Value> = match serde_json::from_str(json) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!("grade library is not a JSON array: {e}");
            return Vec::new();
        }
    };

    entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| {
            let entry: LibraryEntry = match serde_json::from_value(value) {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("skipping library entry {index}: {e}");
                    return None;
                }
            };
            match NamedGrade::from_raw(entry.name, entry.description, &entry.parameters) {
                Ok(grade) => Some(LibraryGrade {
                    id: entry.id,
                    author: entry.author,
                    category: entry.category,
                    highlights: entry.highlights,
                    grade,
                }),
                Err(e) => {
                    tracing::warn!("skipping library entry `{}`: {e}", entry.id);
                    None
                }
            }
        })
        .collect()
}

/// Every library grade, in catalogue order.
pub fn all() -> &'static [LibraryGrade] {
    static LIBRARY: OnceLock<Vec<LibraryGrade>> = OnceLock::new();
    LIBRARY.get_or_init(|| {
        let grades = load(LIBRARY_JSON);
        tracing::debug!("loaded {} library grades", grades.len());
        grades
    })
}

/// Look up a grade by id, ignoring ASCII case.
pub fn find(id: &str) -> Option<&'static LibraryGrade> {
    all().iter().find(|g| g.id.eq_ignore_ascii_case(id))
}

pub fn by_category(category: Category) -> impl Iterator<Item = &'static LibraryGrade> {
    all().iter().filter(move |g| g.category == category)
}
