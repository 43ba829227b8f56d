//! Plan Generator
//!
//! Greedily fills the Fall and Winter terms with eligible catalog
//! courses, ranked by an optional career preference, then validates
//! and auto-repairs the draft. Generation never fails: an
//! unsatisfiable request degrades to a best-effort plan plus notes.

use super::catalog::CourseCatalog;
use super::repair::auto_repair;
use super::types::{clamp_max_per_term, Plan, PlanRequest, PlanResponse, Semester, Term};
use super::validator::validate_plan;
use std::collections::HashSet;

/// Rank candidate courses for selection. Boosted courses for a
/// recognized career come first in the boost list's order; everything
/// else follows alphabetically. CourseIds are unique, so the order is
/// total.
fn rank_for_career(catalog: &CourseCatalog, courses: Vec<String>, career: Option<&str>) -> Vec<String> {
    let boost = career.and_then(|c| catalog.career_boost(c)).unwrap_or(&[]);

    let boosted: Vec<String> = boost.iter().filter(|b| courses.contains(*b)).cloned().collect();
    let mut rest: Vec<String> = courses.into_iter().filter(|c| !boosted.contains(c)).collect();
    rest.sort();

    let mut ranked = boosted;
    ranked.extend(rest);
    ranked
}

/// Admit ranked courses into one semester: capacity, offering, and
/// prerequisites against the satisfied-so-far set. Admitted courses
/// are removed from `remaining`.
fn fill_semester(
    catalog: &CourseCatalog,
    semester: &mut Semester,
    remaining: &mut Vec<String>,
    satisfied: &HashSet<String>,
    max_per_term: usize,
) {
    let mut idx = 0;
    while idx < remaining.len() {
        if semester.courses.len() >= max_per_term {
            break;
        }
        let course = &remaining[idx];
        let prereqs_met = catalog.prerequisites(course).iter().all(|p| satisfied.contains(p));
        if catalog.is_offered_in(course, semester.term) && prereqs_met {
            semester.courses.push(remaining.remove(idx));
        } else {
            idx += 1;
        }
    }
}

/// Generate a two-term plan for the request.
pub fn generate_plan(catalog: &CourseCatalog, req: &PlanRequest) -> PlanResponse {
    let max_per = clamp_max_per_term(req.max_courses_per_term);

    let completed: HashSet<String> = req.completed_courses.iter().cloned().collect();
    let remaining: Vec<String> = catalog
        .course_ids()
        .into_iter()
        .filter(|c| !completed.contains(c))
        .collect();
    let mut remaining = rank_for_career(catalog, remaining, req.target_career.as_deref());

    let mut fall = Semester::new(Term::Fall);
    let mut winter = Semester::new(Term::Winter);
    let mut notes: Vec<String> = Vec::new();

    let mut satisfied = completed;
    fill_semester(catalog, &mut fall, &mut remaining, &satisfied, max_per);

    for course in &fall.courses {
        satisfied.insert(course.clone());
    }
    fill_semester(catalog, &mut winter, &mut remaining, &satisfied, max_per);

    let mut semesters: Plan = vec![fall, winter];

    // Validate and auto-repair so the endpoint stays demo-stable.
    let report = validate_plan(catalog, &semesters, &req.completed_courses, max_per);
    if !report.is_valid() {
        notes.extend(report.messages());

        let (repaired, repair_notes) =
            auto_repair(catalog, &semesters, &req.completed_courses, max_per);
        semesters = repaired;
        notes.extend(repair_notes);

        let recheck = validate_plan(catalog, &semesters, &req.completed_courses, max_per);
        if !recheck.is_valid() {
            notes.extend(recheck.messages());
            notes.push("Warning: plan may still be invalid; review validator notes.".to_string());
        }
    }

    notes.push("Generated a deterministic plan (Fall/Winter).".to_string());
    if let Some(career) = &req.target_career {
        notes.push(format!(
            "Course ordering influenced by target_career='{}' (simple scoring).",
            career
        ));
    }

    PlanResponse { semesters, notes }
}
