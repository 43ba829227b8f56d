//! PathPilot Backend
//!
//! Student academic-advising backend. The heart is the course-plan
//! engine: deterministic generation and repair of two-term schedules
//! under prerequisite, offering, and capacity constraints. A thin
//! actix-web layer exposes it, and an SQLite timeline keeps advising
//! activity auditable.

pub mod api;
pub mod history;
pub mod planner;

pub use history::*;
pub use planner::*;
