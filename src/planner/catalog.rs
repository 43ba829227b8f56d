//! Requirement Catalog
//!
//! Read-only lookup mapping a course code to its prerequisite set and
//! the terms it is offered in, plus the career-boost ranking hints.
//! Built once at startup and never mutated afterwards.
//!
//! Unknown course codes are deliberately unconstrained: no
//! prerequisites, offered in every term. The demo catalog is small and
//! hand-maintained, and unrecognized codes must not block planning.

use super::types::Term;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Prerequisites and offered terms for one catalog course.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CatalogEntry {
    #[serde(default)]
    pub prerequisites: Vec<String>,
    #[serde(default)]
    pub offered_terms: HashSet<Term>,
}

impl CatalogEntry {
    pub fn new(prerequisites: &[&str], offered_terms: &[Term]) -> Self {
        Self {
            prerequisites: prerequisites.iter().map(|p| p.to_string()).collect(),
            offered_terms: offered_terms.iter().copied().collect(),
        }
    }
}

/// Errors raised while loading a catalog document from disk.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// On-disk catalog document shape.
#[derive(Debug, Serialize, Deserialize, Default)]
struct CatalogDocument {
    #[serde(default)]
    courses: HashMap<String, CatalogEntry>,
    #[serde(default)]
    career_boosts: HashMap<String, Vec<String>>,
}

/// The course catalog plus career-boost table.
#[derive(Debug, Clone)]
pub struct CourseCatalog {
    entries: HashMap<String, CatalogEntry>,
    career_boosts: HashMap<String, Vec<String>>,
}

impl CourseCatalog {
    /// Build a catalog from parts. Alternate catalog sources (a real
    /// catalog service, fixtures) construct through here.
    pub fn new(
        entries: HashMap<String, CatalogEntry>,
        career_boosts: HashMap<String, Vec<String>>,
    ) -> Self {
        Self {
            entries,
            career_boosts,
        }
    }

    /// Built-in demo catalog, stable across releases so the planner
    /// endpoints work out of the box.
    pub fn demo() -> Self {
        use Term::{Fall, Winter};

        let mut entries = HashMap::new();
        entries.insert("CPS109".to_string(), CatalogEntry::new(&[], &[Fall, Winter]));
        entries.insert(
            "CPS209".to_string(),
            CatalogEntry::new(&["CPS109"], &[Fall, Winter]),
        );
        entries.insert(
            "CPS305".to_string(),
            CatalogEntry::new(&["CPS209"], &[Fall, Winter]),
        );
        entries.insert("CPS506".to_string(), CatalogEntry::new(&["CPS305"], &[Fall]));
        entries.insert(
            "CPS510".to_string(),
            CatalogEntry::new(&["CPS305"], &[Winter]),
        );
        entries.insert(
            "CPS633".to_string(),
            CatalogEntry::new(&["CPS305"], &[Fall, Winter]),
        );

        let mut career_boosts = HashMap::new();
        career_boosts.insert(
            "ai".to_string(),
            vec!["CPS510".to_string(), "CPS633".to_string()],
        );
        career_boosts.insert(
            "data".to_string(),
            vec!["CPS510".to_string(), "CPS633".to_string()],
        );
        career_boosts.insert(
            "software".to_string(),
            vec!["CPS305".to_string(), "CPS506".to_string()],
        );

        Self {
            entries,
            career_boosts,
        }
    }

    /// Load a catalog document from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path)?;
        let doc: CatalogDocument = serde_json::from_str(&raw)?;
        Ok(Self::new(doc.courses, doc.career_boosts))
    }

    /// Resolve the catalog from the `CATALOG_PATH` environment
    /// variable, falling back to the demo catalog when unset or when
    /// the file cannot be loaded.
    pub fn from_env() -> Self {
        match std::env::var("CATALOG_PATH") {
            Ok(path) => match Self::from_json_file(&path) {
                Ok(catalog) => {
                    log::info!("Loaded course catalog from {}", path);
                    catalog
                }
                Err(e) => {
                    log::warn!("Could not load catalog from {}: {}; using demo catalog", path, e);
                    Self::demo()
                }
            },
            Err(_) => Self::demo(),
        }
    }

    pub fn contains(&self, course: &str) -> bool {
        self.entries.contains_key(course)
    }

    /// Prerequisite course codes. Empty for unknown courses.
    pub fn prerequisites(&self, course: &str) -> &[String] {
        self.entries
            .get(course)
            .map(|e| e.prerequisites.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the course is offered in the given term. Unknown
    /// courses are always considered offered.
    pub fn is_offered_in(&self, course: &str, term: Term) -> bool {
        match self.entries.get(course) {
            Some(entry) => entry.offered_terms.contains(&term),
            None => true,
        }
    }

    /// All catalog course codes, sorted for deterministic iteration.
    pub fn course_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.entries.keys().cloned().collect();
        ids.sort();
        ids
    }

    pub fn entry(&self, course: &str) -> Option<&CatalogEntry> {
        self.entries.get(course)
    }

    /// Boost list for a career, matched case-insensitively after
    /// trimming. None when the career is unrecognized.
    pub fn career_boost(&self, career: &str) -> Option<&[String]> {
        let key = career.trim().to_lowercase();
        self.career_boosts.get(&key).map(|v| v.as_slice())
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::demo()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_demo_catalog_lookups() {
        let catalog = CourseCatalog::demo();
        assert_eq!(catalog.prerequisites("CPS209"), &["CPS109".to_string()]);
        assert!(catalog.is_offered_in("CPS506", Term::Fall));
        assert!(!catalog.is_offered_in("CPS506", Term::Winter));
        assert_eq!(catalog.course_ids().first().map(String::as_str), Some("CPS109"));
    }

    #[test]
    fn test_unknown_courses_are_unconstrained() {
        let catalog = CourseCatalog::demo();
        assert!(catalog.prerequisites("ZZZ999").is_empty());
        assert!(catalog.is_offered_in("ZZZ999", Term::Fall));
        assert!(catalog.is_offered_in("ZZZ999", Term::Winter));
        assert!(!catalog.contains("ZZZ999"));
    }

    #[test]
    fn test_career_boost_normalizes_key() {
        let catalog = CourseCatalog::demo();
        let boost = catalog.career_boost("  AI ").unwrap();
        assert_eq!(boost, &["CPS510".to_string(), "CPS633".to_string()]);
        assert!(catalog.career_boost("astronaut").is_none());
    }

    #[test]
    fn test_load_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                "courses": {{
                    "MTH110": {{"prerequisites": [], "offered_terms": ["Fall"]}},
                    "MTH210": {{"prerequisites": ["MTH110"], "offered_terms": ["Winter"]}}
                }},
                "career_boosts": {{"math": ["MTH210"]}}
            }}"#
        )
        .unwrap();

        let catalog = CourseCatalog::from_json_file(file.path()).unwrap();
        assert!(catalog.contains("MTH110"));
        assert!(catalog.is_offered_in("MTH210", Term::Winter));
        assert!(!catalog.is_offered_in("MTH210", Term::Fall));
        assert_eq!(catalog.prerequisites("MTH210"), &["MTH110".to_string()]);
        assert_eq!(catalog.career_boost("math").unwrap(), &["MTH210".to_string()]);
    }

    #[test]
    fn test_load_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = CourseCatalog::from_json_file(file.path()).unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
