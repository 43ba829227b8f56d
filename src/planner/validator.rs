//! Plan Validator
//!
//! Checks a candidate plan against the completed-course set, the
//! catalog, and the per-term capacity, producing an ordered issue
//! list. The scan order is fixed (semester order, then course order
//! within each semester, then cross-semester duplicates) so the
//! repairer can always act on the first issue.

use super::catalog::CourseCatalog;
use super::types::{Plan, ValidationIssue, ValidationReport};
use std::collections::HashSet;

/// Validate a plan. Pure function: repeated calls on the same inputs
/// yield identical reports.
pub fn validate_plan(
    catalog: &CourseCatalog,
    plan: &Plan,
    completed_courses: &[String],
    max_per_term: usize,
) -> ValidationReport {
    let mut issues = Vec::new();

    let completed: HashSet<&str> = completed_courses.iter().map(String::as_str).collect();
    // Grows as semesters are scanned: completed plus strictly earlier
    // terms. Same-term courses never satisfy a prerequisite.
    let mut satisfied: HashSet<String> = completed_courses.iter().cloned().collect();

    let mut all_courses: Vec<&str> = Vec::new();

    for sem in plan {
        if sem.courses.len() > max_per_term {
            issues.push(ValidationIssue::OverCapacity {
                term: sem.term,
                max: max_per_term,
            });
        }

        for course in &sem.courses {
            all_courses.push(course);

            if completed.contains(course.as_str()) {
                issues.push(ValidationIssue::AlreadyCompleted {
                    course: course.clone(),
                });
            }

            if !catalog.is_offered_in(course, sem.term) {
                issues.push(ValidationIssue::NotOffered {
                    course: course.clone(),
                    term: sem.term,
                });
            }

            let missing: Vec<String> = catalog
                .prerequisites(course)
                .iter()
                .filter(|p| !satisfied.contains(*p))
                .cloned()
                .collect();
            if !missing.is_empty() {
                issues.push(ValidationIssue::MissingPrereqs {
                    course: course.clone(),
                    missing,
                });
            }
        }

        for course in &sem.courses {
            satisfied.insert(course.clone());
        }
    }

    // One issue per duplicated course id, in first-encounter order.
    let mut seen: HashSet<&str> = HashSet::new();
    let mut reported: HashSet<&str> = HashSet::new();
    for &course in &all_courses {
        if !seen.insert(course) && reported.insert(course) {
            issues.push(ValidationIssue::Duplicate {
                course: course.to_string(),
            });
        }
    }

    ValidationReport { issues }
}
