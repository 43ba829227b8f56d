//! Course-Plan Engine
//!
//! Generates and repairs two-term (Fall/Winter) course schedules
//! against the requirement catalog.
//!
//! Pipeline: the generator drafts a plan, the validator checks it, and
//! the repairer mutates an invalid plan toward validity within a
//! bounded number of iterations. The engine is pure computation: no
//! I/O, no shared mutable state, and it never errors on domain input —
//! unsatisfiable requests degrade to a best-effort plan plus notes.

pub mod catalog;
pub mod generator;
pub mod repair;
pub mod swap;
pub mod types;
pub mod validator;

pub use catalog::*;
pub use generator::*;
pub use repair::*;
pub use swap::*;
pub use types::*;
pub use validator::*;
