//! Persisted document types
//!
//! These mirror the on-disk JSON field for field. They are kept separate
//! from the in-memory records so the file format does not drift when the
//! records change shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The whole snapshot file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotDocument {
    /// Student entries keyed by student ID
    pub students: BTreeMap<String, StudentEntry>,
    /// Course entries keyed by course code
    pub courses: BTreeMap<String, CourseEntry>,
}

/// One student as persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentEntry {
    pub name: String,
    pub age: u32,
    pub address: String,
    pub student_id: String,
    pub grades: BTreeMap<String, String>,
    pub courses: Vec<String>,
}

/// One course as persisted; `students` holds IDs only
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub course_name: String,
    pub course_code: String,
    pub instructor: String,
    pub students: Vec<String>,
}
