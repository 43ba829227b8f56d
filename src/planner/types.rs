//! Planner Types
//!
//! Core data structures for the course-plan engine: terms, semesters,
//! the generate/repair request and response schemas, and the validation
//! issues the validator reports.

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================
// TERMS AND SEMESTERS
// ============================================================

/// A scheduling period. The repair logic is specialized to the
/// two-term Fall/Winter layout.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Term {
    Fall,
    Winter,
}

impl Term {
    pub fn as_str(&self) -> &'static str {
        match self {
            Term::Fall => "Fall",
            Term::Winter => "Winter",
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One term's worth of scheduled courses. Course order is insertion
/// order; the repairer drops the last inserted course first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Semester {
    pub term: Term,
    #[serde(default)]
    pub courses: Vec<String>,
}

impl Semester {
    pub fn new(term: Term) -> Self {
        Self {
            term,
            courses: Vec::new(),
        }
    }
}

/// A candidate schedule. Exactly two semesters (Fall then Winter) in
/// this version.
pub type Plan = Vec<Semester>;

// ============================================================
// REQUEST / RESPONSE SCHEMAS
// ============================================================

fn default_max_courses_per_term() -> i32 {
    5
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanRequest {
    #[serde(default)]
    pub completed_courses: Vec<String>,
    #[serde(default)]
    pub target_career: Option<String>,
    /// Non-positive values are clamped to 1 rather than rejected.
    #[serde(default = "default_max_courses_per_term")]
    pub max_courses_per_term: i32,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            completed_courses: Vec::new(),
            target_career: None,
            max_courses_per_term: default_max_courses_per_term(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanResponse {
    pub semesters: Plan,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairRequest {
    #[serde(default)]
    pub current_plan: Plan,
    #[serde(default)]
    pub locked_courses: Vec<String>,
    #[serde(default)]
    pub swap_out: Option<String>,
    #[serde(default)]
    pub swap_in: Option<String>,
    #[serde(default)]
    pub completed_courses: Vec<String>,
    /// Requests predating this field default to 5.
    #[serde(default = "default_max_courses_per_term")]
    pub max_courses_per_term: i32,
}

impl Default for RepairRequest {
    fn default() -> Self {
        Self {
            current_plan: Vec::new(),
            locked_courses: Vec::new(),
            swap_out: None,
            swap_in: None,
            completed_courses: Vec::new(),
            max_courses_per_term: default_max_courses_per_term(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepairResponse {
    pub updated_plan: Plan,
    pub notes: Vec<String>,
}

/// Clamp the caller-supplied per-term limit to at least one course.
pub(crate) fn clamp_max_per_term(raw: i32) -> usize {
    raw.max(1) as usize
}

// ============================================================
// VALIDATION ISSUES
// ============================================================

/// A single violation found by the validator. Issues are produced in a
/// fixed scan order (semester order, then course order within each
/// semester, then cross-semester duplicates) so the first issue
/// deterministically drives one repair step.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationIssue {
    #[error("{term}: too many courses (max {max}).")]
    OverCapacity { term: Term, max: usize },

    #[error("{course} is already completed but appears in the plan.")]
    AlreadyCompleted { course: String },

    #[error("{course} is not offered in {term}.")]
    NotOffered { course: String, term: Term },

    #[error("{course} missing prereqs when scheduled: {missing:?}")]
    MissingPrereqs { course: String, missing: Vec<String> },

    #[error("{course} appears more than once across semesters.")]
    Duplicate { course: String },
}

/// The validator's verdict: valid iff no issues were produced.
#[derive(Debug, Clone, Default)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issue messages in scan order, for response notes.
    pub fn messages(&self) -> Vec<String> {
        self.issues.iter().map(|i| i.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_messages() {
        let issue = ValidationIssue::NotOffered {
            course: "CPS506".to_string(),
            term: Term::Winter,
        };
        assert_eq!(issue.to_string(), "CPS506 is not offered in Winter.");

        let issue = ValidationIssue::OverCapacity {
            term: Term::Fall,
            max: 5,
        };
        assert_eq!(issue.to_string(), "Fall: too many courses (max 5).");
    }

    #[test]
    fn test_clamp_max_per_term() {
        assert_eq!(clamp_max_per_term(5), 5);
        assert_eq!(clamp_max_per_term(0), 1);
        assert_eq!(clamp_max_per_term(-3), 1);
    }

    #[test]
    fn test_request_defaults() {
        let req: PlanRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.max_courses_per_term, 5);
        assert!(req.completed_courses.is_empty());

        let req: RepairRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.max_courses_per_term, 5);
        assert!(req.swap_out.is_none());
    }
}
