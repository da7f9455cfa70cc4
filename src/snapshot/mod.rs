//! Snapshot Codec - JSON persistence of the whole store
//!
//! The persisted document has two keyed collections:
//! - students(name, age, address, student_id, grades, courses)
//! - courses(course_name, course_code, instructor, students)
//!
//! Courses store only student IDs. Loading rebuilds the store in two phases:
//! every student first, then every course with its roster checked against
//! the students already loaded.

pub mod codec;
pub mod document;
pub mod file;

pub use codec::{export, from_json_str, import};
pub use document::{CourseEntry, SnapshotDocument, StudentEntry};
pub use file::{load, load_if_exists, save};

/// Snapshot file used when the caller does not name one
pub const DEFAULT_SNAPSHOT_FILE: &str = "data.json";
