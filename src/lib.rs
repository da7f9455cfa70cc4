//! # Registrar - Student & Course Record Manager
//!
//! A small, single-process record manager for students and courses.
//!
//! Registrar provides:
//! - An in-memory record store keyed by student ID and course code
//! - Enrollment that links students and courses in both directions at once
//! - Per-course grades, accepted only for courses the student joined
//! - A JSON snapshot codec that rebuilds the student/course links on load
//! - A numbered console menu and a one-shot CLI on top of the same session

pub mod record;
pub mod student;
pub mod course;
pub mod store;
pub mod snapshot;
pub mod session;
pub mod menu;
pub mod config;
pub mod output;
pub mod ui;

// Re-exports for convenient access
pub use record::RecordKind;
pub use student::Student;
pub use course::Course;
pub use store::{LinkIssue, RecordStore, StoreStats};
pub use session::{CourseView, Reply, Session, StudentView};
pub use snapshot::DEFAULT_SNAPSHOT_FILE;

use std::path::PathBuf;

/// Result type alias for Registrar operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Registrar operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} already exists: {key}")]
    DuplicateKey { kind: RecordKind, key: String },

    #[error("{kind} not found: {key}")]
    NotFound { kind: RecordKind, key: String },

    #[error("Student is not enrolled in this course. (student {student_id}, course {course_code})")]
    NotEnrolled {
        student_id: String,
        course_code: String,
    },

    #[error("Corrupt snapshot: {0}")]
    CorruptSnapshot(String),

    #[error("Snapshot encode error: {0}")]
    Encode(String),

    #[error("No snapshot found at {}", .0.display())]
    MissingSnapshot(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a student lookup miss
    pub fn student_not_found(id: &str) -> Self {
        Error::NotFound {
            kind: RecordKind::Student,
            key: id.to_string(),
        }
    }

    /// Shorthand for a course lookup miss
    pub fn course_not_found(code: &str) -> Self {
        Error::NotFound {
            kind: RecordKind::Course,
            key: code.to_string(),
        }
    }

    /// True for the one condition a caller may treat as "start empty"
    pub fn is_missing_snapshot(&self) -> bool {
        matches!(self, Error::MissingSnapshot(_))
    }
}
