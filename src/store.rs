//! Record Store - the authoritative in-memory tables
//!
//! Holds every student keyed by student ID and every course keyed by course
//! code. Enrollment writes both sides of the link in one step, so a student's
//! course list and a course's roster always agree for records created here.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::course::Course;
use crate::record::RecordKind;
use crate::student::Student;
use crate::{Error, Result};

/// In-memory record store.
///
/// Nothing is ever removed: records and enrollments are append-only, grades
/// are overwritten in place.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RecordStore {
    students: BTreeMap<String, Student>,
    courses: BTreeMap<String, Course>,
}

impl RecordStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a store from already-resolved tables.
    pub(crate) fn from_tables(
        students: BTreeMap<String, Student>,
        courses: BTreeMap<String, Course>,
    ) -> Self {
        Self { students, courses }
    }

    // ========== Creation ==========

    /// Add a student with no grades and no courses.
    ///
    /// Fails with `DuplicateKey` if the ID is taken; the existing record is
    /// left untouched.
    pub fn add_student(
        &mut self,
        student_id: &str,
        name: &str,
        age: u32,
        address: &str,
    ) -> Result<&Student> {
        if self.students.contains_key(student_id) {
            return Err(Error::DuplicateKey {
                kind: RecordKind::Student,
                key: student_id.to_string(),
            });
        }

        tracing::debug!(student_id, student_name = name, "Adding student");
        let student = self
            .students
            .entry(student_id.to_string())
            .or_insert_with(|| Student::new(student_id, name, age, address));
        Ok(student)
    }

    /// Add a course with an empty roster. Same duplicate policy as students.
    pub fn add_course(
        &mut self,
        course_code: &str,
        course_name: &str,
        instructor: &str,
    ) -> Result<&Course> {
        if self.courses.contains_key(course_code) {
            return Err(Error::DuplicateKey {
                kind: RecordKind::Course,
                key: course_code.to_string(),
            });
        }

        tracing::debug!(course_code, course_name, "Adding course");
        let course = self
            .courses
            .entry(course_code.to_string())
            .or_insert_with(|| Course::new(course_code, course_name, instructor));
        Ok(course)
    }

    // ========== Linking ==========

    /// Enroll a student in a course.
    ///
    /// Both keys are checked before anything is written; on success the course
    /// code is appended to the student and the student ID to the roster.
    pub fn enroll(&mut self, student_id: &str, course_code: &str) -> Result<()> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| Error::student_not_found(student_id))?;
        let course = self
            .courses
            .get_mut(course_code)
            .ok_or_else(|| Error::course_not_found(course_code))?;

        student.push_course(course_code);
        course.push_student(student_id);
        tracing::debug!(student_id, course_code, roster = course.roster.len(), "Enrolled");
        Ok(())
    }

    /// Record (or overwrite) a grade.
    ///
    /// The course only has to appear in the student's own course list; the
    /// course table is not consulted.
    pub fn add_grade(&mut self, student_id: &str, course_code: &str, grade: &str) -> Result<()> {
        let student = self
            .students
            .get_mut(student_id)
            .ok_or_else(|| Error::student_not_found(student_id))?;

        if !student.is_enrolled_in(course_code) {
            return Err(Error::NotEnrolled {
                student_id: student_id.to_string(),
                course_code: course_code.to_string(),
            });
        }

        student.set_grade(course_code, grade);
        tracing::debug!(student_id, course_code, grade, "Grade recorded");
        Ok(())
    }

    // ========== Lookup ==========

    /// Get a student by ID
    pub fn get_student(&self, student_id: &str) -> Result<&Student> {
        self.students
            .get(student_id)
            .ok_or_else(|| Error::student_not_found(student_id))
    }

    /// Get a course by code
    pub fn get_course(&self, course_code: &str) -> Result<&Course> {
        self.courses
            .get(course_code)
            .ok_or_else(|| Error::course_not_found(course_code))
    }

    /// Resolve a course's roster to student records, in roster order.
    pub fn roster(&self, course_code: &str) -> Result<Vec<&Student>> {
        let course = self.get_course(course_code)?;
        Ok(course
            .roster
            .iter()
            .filter_map(|id| self.students.get(id))
            .collect())
    }

    /// Resolve a student's course codes to course records, in enrollment order.
    pub fn enrolled_courses(&self, student_id: &str) -> Result<Vec<&Course>> {
        let student = self.get_student(student_id)?;
        Ok(student
            .courses
            .iter()
            .filter_map(|code| self.courses.get(code))
            .collect())
    }

    /// All students in ID order
    pub fn students(&self) -> impl Iterator<Item = &Student> {
        self.students.values()
    }

    /// All courses in code order
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    pub fn len_students(&self) -> usize {
        self.students.len()
    }

    pub fn len_courses(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty() && self.courses.is_empty()
    }

    /// Get store statistics
    pub fn stats(&self) -> StoreStats {
        StoreStats {
            students: self.students.len(),
            courses: self.courses.len(),
            enrollments: self.courses.values().map(|c| c.roster.len()).sum(),
            grades: self.students.values().map(|s| s.grades.len()).sum(),
        }
    }

    // ========== Audit ==========

    /// Report every place where the two sides of an enrollment disagree.
    pub fn check_links(&self) -> Vec<LinkIssue> {
        let mut issues = Vec::new();

        for student in self.students.values() {
            for code in &student.courses {
                match self.courses.get(code) {
                    None => issues.push(LinkIssue::UnknownCourse {
                        student_id: student.student_id.clone(),
                        course_code: code.clone(),
                    }),
                    Some(course) if !course.has_student(&student.student_id) => {
                        issues.push(LinkIssue::MissingFromRoster {
                            student_id: student.student_id.clone(),
                            course_code: code.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        for course in self.courses.values() {
            for id in &course.roster {
                match self.students.get(id) {
                    None => issues.push(LinkIssue::UnknownStudent {
                        course_code: course.course_code.clone(),
                        student_id: id.clone(),
                    }),
                    Some(student) if !student.is_enrolled_in(&course.course_code) => {
                        issues.push(LinkIssue::MissingFromStudent {
                            course_code: course.course_code.clone(),
                            student_id: id.clone(),
                        })
                    }
                    Some(_) => {}
                }
            }
        }

        issues
    }
}

/// A broken student/course link found by [`RecordStore::check_links`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkIssue {
    /// Student lists a course code that has no course record
    UnknownCourse { student_id: String, course_code: String },
    /// Roster lists a student ID that has no student record
    UnknownStudent { course_code: String, student_id: String },
    /// Student lists the course but is absent from its roster
    MissingFromRoster { student_id: String, course_code: String },
    /// Roster lists the student but the student does not list the course
    MissingFromStudent { course_code: String, student_id: String },
}

impl std::fmt::Display for LinkIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LinkIssue::UnknownCourse { student_id, course_code } => {
                write!(f, "student {} lists unknown course {}", student_id, course_code)
            }
            LinkIssue::UnknownStudent { course_code, student_id } => {
                write!(f, "course {} lists unknown student {}", course_code, student_id)
            }
            LinkIssue::MissingFromRoster { student_id, course_code } => {
                write!(f, "student {} lists course {} but is not on its roster", student_id, course_code)
            }
            LinkIssue::MissingFromStudent { course_code, student_id } => {
                write!(f, "course {} rosters student {} who does not list it", course_code, student_id)
            }
        }
    }
}

/// Statistics about a record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub students: usize,
    pub courses: usize,
    pub enrollments: usize,
    pub grades: usize,
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Record Store Statistics:")?;
        writeln!(f, "  Students: {}", self.students)?;
        writeln!(f, "  Courses: {}", self.courses)?;
        writeln!(f, "  Enrollments: {} (graded: {})", self.enrollments, self.grades)
    }
}
