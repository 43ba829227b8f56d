//! Swap Applicator
//!
//! Applies a user-requested course substitution to an existing plan,
//! respecting locked courses, then runs the validate/repair/validate
//! pipeline on the result. A locked swap is a hard stop reported via a
//! note; nothing else in the request is touched.

use super::catalog::CourseCatalog;
use super::repair::auto_repair;
use super::types::{clamp_max_per_term, RepairRequest, RepairResponse};
use super::validator::validate_plan;
use std::collections::HashSet;

/// Apply the requested swap (if any) and repair the plan. The caller's
/// plan is cloned before mutation.
pub fn repair_plan(catalog: &CourseCatalog, req: &RepairRequest) -> RepairResponse {
    let mut updated = req.current_plan.clone();
    let mut notes: Vec<String> = Vec::new();

    let locked: HashSet<&str> = req.locked_courses.iter().map(String::as_str).collect();
    let max_per = clamp_max_per_term(req.max_courses_per_term);

    if let (Some(swap_out), Some(swap_in)) = (&req.swap_out, &req.swap_in) {
        if locked.contains(swap_out.as_str()) {
            return RepairResponse {
                updated_plan: updated,
                notes: vec!["Swap blocked: the course you tried to remove is locked.".to_string()],
            };
        }

        // First-occurrence semantics: only the first semester holding
        // swap_out is rewritten, even if a later one also holds it.
        let mut did_swap = false;
        for sem in updated.iter_mut() {
            if sem.courses.iter().any(|c| c == swap_out) {
                for course in sem.courses.iter_mut() {
                    if course == swap_out {
                        *course = swap_in.clone();
                    }
                }
                did_swap = true;
                notes.push(format!("Swapped {} -> {}.", swap_out, swap_in));
                break;
            }
        }

        if !did_swap {
            notes.push("swap_out not found in the current plan.".to_string());
        }
    } else {
        notes.push("No swap requested; plan returned unchanged.".to_string());
    }

    // Validate and auto-repair after the swap, same pipeline as
    // generation.
    let report = validate_plan(catalog, &updated, &req.completed_courses, max_per);
    if !report.is_valid() {
        notes.extend(report.messages());

        let (repaired, repair_notes) =
            auto_repair(catalog, &updated, &req.completed_courses, max_per);
        updated = repaired;
        notes.extend(repair_notes);

        let recheck = validate_plan(catalog, &updated, &req.completed_courses, max_per);
        if !recheck.is_valid() {
            notes.extend(recheck.messages());
            notes.push("Warning: repair may still be invalid; review validator notes.".to_string());
        }
    }

    RepairResponse {
        updated_plan: updated,
        notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::types::{Plan, Semester, Term};

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

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_locked_swap_is_blocked_without_repair() {
        // Scenario C: swapping out a locked course aborts with exactly
        // one note and leaves the (invalid) plan untouched.
        let catalog = CourseCatalog::demo();
        let req = RepairRequest {
            // Deliberately invalid so a repair pass would change it.
            current_plan: plan(&["CPS109", "CPS209"], &[]),
            locked_courses: strings(&["CPS109"]),
            swap_out: Some("CPS109".to_string()),
            swap_in: Some("CPS633".to_string()),
            ..Default::default()
        };
        let resp = repair_plan(&catalog, &req);
        assert_eq!(resp.updated_plan, req.current_plan);
        assert_eq!(resp.notes.len(), 1);
        assert!(resp.notes[0].contains("blocked"));
    }

    #[test]
    fn test_swap_rewrites_first_semester_only() {
        let catalog = CourseCatalog::demo();
        let req = RepairRequest {
            current_plan: plan(&["ABC100"], &["ABC100"]),
            swap_out: Some("ABC100".to_string()),
            swap_in: Some("XYZ200".to_string()),
            ..Default::default()
        };
        let resp = repair_plan(&catalog, &req);
        assert_eq!(resp.updated_plan[0].courses, strings(&["XYZ200"]));
        // Second occurrence is untouched by the swap itself.
        assert_eq!(resp.updated_plan[1].courses, strings(&["ABC100"]));
        assert!(resp.notes.iter().any(|n| n.contains("Swapped ABC100 -> XYZ200")));
    }

    #[test]
    fn test_missing_swap_out_still_runs_pipeline() {
        // Scenario E: swap_out absent leaves the plan unchanged apart
        // from the not-found note, and validation still runs.
        let catalog = CourseCatalog::demo();
        let req = RepairRequest {
            current_plan: plan(&["CPS109"], &["CPS209"]),
            swap_out: Some("CPS305".to_string()),
            swap_in: Some("CPS633".to_string()),
            ..Default::default()
        };
        let resp = repair_plan(&catalog, &req);
        assert_eq!(resp.updated_plan, req.current_plan);
        assert!(resp
            .notes
            .iter()
            .any(|n| n.contains("swap_out not found")));
    }

    #[test]
    fn test_no_swap_requested_validates_plan() {
        let catalog = CourseCatalog::demo();
        let req = RepairRequest {
            current_plan: plan(&["CPS109"], &["CPS209"]),
            ..Default::default()
        };
        let resp = repair_plan(&catalog, &req);
        assert_eq!(resp.updated_plan, req.current_plan);
        assert!(resp.notes.iter().any(|n| n.contains("No swap requested")));
    }

    #[test]
    fn test_invalid_swap_result_is_repaired() {
        let catalog = CourseCatalog::demo();
        // Winter-only CPS510 sitting in Fall forces an
        // offering-mismatch repair move after the pass-through.
        let req = RepairRequest {
            current_plan: plan(&["CPS510"], &[]),
            completed_courses: strings(&["CPS109", "CPS209", "CPS305"]),
            ..Default::default()
        };
        let resp = repair_plan(&catalog, &req);
        assert!(resp.updated_plan[0].courses.is_empty());
        assert_eq!(resp.updated_plan[1].courses, strings(&["CPS510"]));
        let report = validate_plan(&catalog, &resp.updated_plan, &req.completed_courses, 5);
        assert!(report.is_valid());
    }

    #[test]
    fn test_max_per_term_defaults_to_five() {
        let catalog = CourseCatalog::demo();
        // Five unknown courses in one term is fine under the default.
        let req = RepairRequest {
            current_plan: plan(&["U1", "U2", "U3", "U4", "U5"], &[]),
            ..Default::default()
        };
        let resp = repair_plan(&catalog, &req);
        assert_eq!(resp.updated_plan[0].courses.len(), 5);
    }
}
