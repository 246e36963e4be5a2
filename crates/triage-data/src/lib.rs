//! Startup-loaded reference data: the symptom universe and the read-only
//! lookup tables (descriptions, precautions, complications, severities).
//!
//! Everything here is loaded once from CSV, validated, and then shared
//! immutably across request handlers. Loaders accept `impl io::Read` so
//! tests can feed in-memory data; path-based wrappers open files.

pub mod tables;
pub mod universe;

pub use tables::ReferenceTables;
pub use universe::SymptomUniverse;
