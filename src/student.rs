//! Student records
//!
//! A student carries the person fields (name, age, address) directly,
//! plus the course codes they joined and a grade per course code.

use std::collections::BTreeMap;

/// A student in the record store.
///
/// Grades and course codes are only changed through the store, which keeps
/// the course side of each enrollment in step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    /// Unique key
    pub student_id: String,
    pub name: String,
    pub age: u32,
    pub address: String,
    /// Grade per course code; a later grade overwrites an earlier one
    pub grades: BTreeMap<String, String>,
    /// Enrolled course codes, in enrollment order
    pub courses: Vec<String>,
}

impl Student {
    /// Create a new student with no grades and no courses
    pub fn new(
        student_id: impl Into<String>,
        name: impl Into<String>,
        age: u32,
        address: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            name: name.into(),
            age,
            address: address.into(),
            grades: BTreeMap::new(),
            courses: Vec::new(),
        }
    }

    /// Check whether this student joined the given course
    pub fn is_enrolled_in(&self, course_code: &str) -> bool {
        self.courses.iter().any(|c| c == course_code)
    }

    /// Grade recorded for a course, if any
    pub fn grade_for(&self, course_code: &str) -> Option<&str> {
        self.grades.get(course_code).map(String::as_str)
    }

    pub(crate) fn push_course(&mut self, course_code: &str) {
        self.courses.push(course_code.to_string());
    }

    pub(crate) fn set_grade(&mut self, course_code: &str, grade: &str) {
        self.grades.insert(course_code.to_string(), grade.to_string());
    }
}

impl std::fmt::Display for Student {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (ID: {})", self.name, self.student_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_student_is_blank() {
        let s = Student::new("S1", "Ana", 20, "X St");
        assert!(s.courses.is_empty());
        assert!(s.grades.is_empty());
        assert_eq!(s.to_string(), "Ana (ID: S1)");
    }

    #[test]
    fn test_grade_overwrites() {
        let mut s = Student::new("S1", "Ana", 20, "X St");
        s.push_course("C1");
        s.set_grade("C1", "B");
        s.set_grade("C1", "A");
        assert_eq!(s.grade_for("C1"), Some("A"));
        assert!(s.is_enrolled_in("C1"));
        assert!(!s.is_enrolled_in("C2"));
    }
}
