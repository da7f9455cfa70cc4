//! Record kinds - the two keyed tables of the store
//!
//! - `Student`: keyed by student ID
//! - `Course`: keyed by course code

/// Which table a key belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    /// Keyed by student ID
    Student,
    /// Keyed by course code
    Course,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Student => write!(f, "Student"),
            RecordKind::Course => write!(f, "Course"),
        }
    }
}
