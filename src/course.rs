//! Course records
//!
//! The roster holds student IDs, not student records. Names and grades are
//! looked up through the store when a course is displayed.

/// A course in the record store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    /// Unique key
    pub course_code: String,
    pub course_name: String,
    pub instructor: String,
    /// Enrolled student IDs, in enrollment order
    pub roster: Vec<String>,
}

impl Course {
    /// Create a new course with an empty roster
    pub fn new(
        course_code: impl Into<String>,
        course_name: impl Into<String>,
        instructor: impl Into<String>,
    ) -> Self {
        Self {
            course_code: course_code.into(),
            course_name: course_name.into(),
            instructor: instructor.into(),
            roster: Vec::new(),
        }
    }

    /// Check whether the roster contains a student ID
    pub fn has_student(&self, student_id: &str) -> bool {
        self.roster.iter().any(|id| id == student_id)
    }

    pub(crate) fn push_student(&mut self, student_id: &str) {
        self.roster.push(student_id.to_string());
    }
}

impl std::fmt::Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (Code: {})", self.course_name, self.course_code)
    }
}
