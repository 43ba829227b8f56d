//! Plan Repairer
//!
//! Deterministic best-effort repair of an invalid plan, bounded to
//! five iterations. Each iteration re-validates, records the first
//! issue, and applies exactly one mutation in priority order:
//! offering-mismatch move, prerequisite-driven move, then a
//! deterministic drop. The drop guarantees progress, so the loop
//! always terminates within the budget. Repair never errors;
//! exhaustion is reported through notes.

use super::catalog::CourseCatalog;
use super::types::{Plan, Semester, Term};
use super::validator::validate_plan;
use std::collections::HashSet;

const MAX_REPAIR_ITERATIONS: usize = 5;

/// Move the first course out of `src` that its catalog entry bars
/// from `src`'s term but allows in `dst`'s, if `dst` has capacity.
fn try_offering_move(
    catalog: &CourseCatalog,
    src: &mut Semester,
    dst: &mut Semester,
    max_per_term: usize,
) -> Option<String> {
    for idx in 0..src.courses.len() {
        let course = &src.courses[idx];
        if catalog.contains(course)
            && !catalog.is_offered_in(course, src.term)
            && catalog.is_offered_in(course, dst.term)
            && dst.courses.len() < max_per_term
        {
            let course = src.courses.remove(idx);
            dst.courses.push(course.clone());
            return Some(course);
        }
    }
    None
}

/// Move the first Fall course whose prerequisites are unmet by the
/// completed set alone into Winter, when Winter offers it and has
/// capacity. Help for chains the generator could not split.
fn try_prereq_move(
    catalog: &CourseCatalog,
    fall: &mut Semester,
    winter: &mut Semester,
    completed: &HashSet<String>,
    max_per_term: usize,
) -> Option<String> {
    for idx in 0..fall.courses.len() {
        let course = &fall.courses[idx];
        if !catalog.contains(course) {
            continue;
        }
        let missing = catalog
            .prerequisites(course)
            .iter()
            .any(|p| !completed.contains(p));
        if missing
            && winter.courses.len() < max_per_term
            && catalog.is_offered_in(course, Term::Winter)
        {
            let course = fall.courses.remove(idx);
            winter.courses.push(course.clone());
            return Some(course);
        }
    }
    None
}

/// Repair a plan toward validity. The caller's plan is cloned before
/// mutation; the input is never changed.
pub fn auto_repair(
    catalog: &CourseCatalog,
    plan: &Plan,
    completed_courses: &[String],
    max_per_term: usize,
) -> (Plan, Vec<String>) {
    let mut plan = plan.clone();
    let mut notes: Vec<String> = Vec::new();

    let completed: HashSet<String> = completed_courses.iter().cloned().collect();

    for _ in 0..MAX_REPAIR_ITERATIONS {
        let report = validate_plan(catalog, &plan, completed_courses, max_per_term);
        if report.is_valid() {
            return (plan, notes);
        }

        notes.push(format!("Validator: {}", report.issues[0]));

        // Only the 2-term Fall/Winter grid is supported.
        if plan.len() != 2 {
            notes.push("Auto-repair: expected 2 semesters (Fall/Winter); stopping.".to_string());
            break;
        }
        let (head, tail) = plan.split_at_mut(1);
        let fall = &mut head[0];
        let winter = &mut tail[0];

        // 1) Offering mismatch: move to the other term if it is
        //    offered there and capacity allows.
        if let Some(course) = try_offering_move(catalog, fall, winter, max_per_term) {
            notes.push(format!("Auto-repair: moved {} from Fall to Winter.", course));
            continue;
        }
        if let Some(course) = try_offering_move(catalog, winter, fall, max_per_term) {
            notes.push(format!("Auto-repair: moved {} from Winter to Fall.", course));
            continue;
        }

        // 2) Prereq problems: defer a Fall course to Winter.
        if let Some(course) = try_prereq_move(catalog, fall, winter, &completed, max_per_term) {
            notes.push(format!(
                "Auto-repair: moved {} from Fall to Winter to satisfy prereqs.",
                course
            ));
            continue;
        }

        // 3) Still invalid: drop deterministically, last of Winter
        //    first, else last of Fall.
        if let Some(dropped) = winter.courses.pop() {
            notes.push(format!(
                "Auto-repair: dropped {} (could not place validly).",
                dropped
            ));
        } else if let Some(dropped) = fall.courses.pop() {
            notes.push(format!(
                "Auto-repair: dropped {} (could not place validly).",
                dropped
            ));
        } else {
            notes.push("Auto-repair: nothing left to adjust.".to_string());
            break;
        }
    }

    (plan, notes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(fall: &[&str], winter: &[&str]) -> Plan {
        vec![
            Semester {
                term: Term::Fall,
                courses: fall.iter().map(|c| c.to_string()).collect(),
            },
            Semester {
                term: Term::Winter,
                courses: winter.iter().map(|c| c.to_string()).collect(),
            },
        ]
    }

    #[test]
    fn test_valid_plan_is_returned_untouched() {
        let catalog = CourseCatalog::demo();
        let p = plan(&["CPS109"], &["CPS209"]);
        let (repaired, notes) = auto_repair(&catalog, &p, &[], 5);
        assert_eq!(repaired, p);
        assert!(notes.is_empty());
    }

    #[test]
    fn test_input_plan_is_not_mutated() {
        let catalog = CourseCatalog::demo();
        let p = plan(&["CPS209"], &[]);
        let before = p.clone();
        let _ = auto_repair(&catalog, &p, &[], 5);
        assert_eq!(p, before);
    }

    #[test]
    fn test_offering_mismatch_moves_course() {
        let catalog = CourseCatalog::demo();
        // CPS510 is Winter-only but sits in Fall.
        let completed = vec!["CPS109".to_string(), "CPS209".to_string(), "CPS305".to_string()];
        let p = plan(&["CPS510"], &[]);
        let (repaired, notes) = auto_repair(&catalog, &p, &completed, 5);
        assert!(repaired[0].courses.is_empty());
        assert_eq!(repaired[1].courses, vec!["CPS510".to_string()]);
        assert!(notes.iter().any(|n| n.contains("moved CPS510 from Fall to Winter")));
    }

    #[test]
    fn test_prereq_move_defers_fall_course() {
        let catalog = CourseCatalog::demo();
        // CPS209 needs CPS109; with CPS109 scheduled in Fall the
        // validator objects to CPS209 sharing the term, and repair
        // defers it to Winter.
        let p = plan(&["CPS109", "CPS209"], &[]);
        let (repaired, _) = auto_repair(&catalog, &p, &[], 5);
        assert_eq!(repaired[0].courses, vec!["CPS109".to_string()]);
        assert_eq!(repaired[1].courses, vec!["CPS209".to_string()]);
        let report = validate_plan(&catalog, &repaired, &[], 5);
        assert!(report.is_valid());
    }

    #[test]
    fn test_capacity_overflow_drops_last_inserted() {
        let catalog = CourseCatalog::demo();
        // Scenario D: six unknown courses in one semester, max five.
        let p = plan(&[], &["U1", "U2", "U3", "U4", "U5", "U6"]);
        let report = validate_plan(&catalog, &p, &[], 5);
        assert_eq!(report.issues.len(), 1);

        let (repaired, notes) = auto_repair(&catalog, &p, &[], 5);
        assert_eq!(
            repaired[1].courses,
            vec!["U1", "U2", "U3", "U4", "U5"]
                .into_iter()
                .map(String::from)
                .collect::<Vec<_>>()
        );
        assert!(notes.iter().any(|n| n.contains("dropped U6")));
        assert!(validate_plan(&catalog, &repaired, &[], 5).is_valid());
    }

    #[test]
    fn test_drop_falls_back_to_fall_when_winter_empty() {
        let catalog = CourseCatalog::demo();
        // Completed course scheduled again: unfixable by moves, so the
        // repairer drops from Fall once Winter has nothing left.
        let completed = vec!["CPS109".to_string()];
        let p = plan(&["CPS109"], &[]);
        let (repaired, notes) = auto_repair(&catalog, &p, &completed, 5);
        assert!(repaired[0].courses.is_empty());
        assert!(notes.iter().any(|n| n.contains("dropped CPS109")));
    }

    #[test]
    fn test_wrong_semester_count_stops_early() {
        let catalog = CourseCatalog::demo();
        let p = vec![Semester {
            term: Term::Fall,
            courses: vec!["CPS209".to_string()],
        }];
        let (repaired, notes) = auto_repair(&catalog, &p, &[], 5);
        assert_eq!(repaired, p);
        assert!(notes.iter().any(|n| n.contains("expected 2 semesters")));
    }

    #[test]
    fn test_repair_terminates_within_budget() {
        let catalog = CourseCatalog::demo();
        // Every course is already completed; nothing can stay. Ten
        // scheduled copies exceed the budget, and repair must still
        // return without panicking.
        let completed: Vec<String> = catalog.course_ids();
        let p = plan(
            &["CPS109", "CPS209", "CPS305", "CPS506", "CPS633"],
            &["CPS510", "CPS633", "CPS109", "CPS209", "CPS305"],
        );
        let (repaired, notes) = auto_repair(&catalog, &p, &completed, 5);
        assert_eq!(repaired.len(), 2);
        assert!(!notes.is_empty());
    }
}
