//! Session - the command surface driven by the menu and the CLI
//!
//! One entry point per menu action. Each takes plain text/integer arguments
//! and returns a [`Reply`] (a message or a display payload) or a typed
//! [`Error`]. Nothing here prints; the caller decides how to show replies.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::store::{RecordStore, StoreStats};
use crate::{Error, Result, snapshot};

/// What a command hands back to the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Reply {
    /// A one-line confirmation
    Message(String),
    /// Student details
    Student(StudentView),
    /// Course details with the roster resolved
    Course(CourseView),
    /// Every record, one line each
    Listing(ListingView),
    /// Counts
    Stats(StoreStats),
    /// Link audit findings (empty when consistent)
    Issues(Vec<String>),
}

impl Reply {
    fn message(text: impl Into<String>) -> Self {
        Reply::Message(text.into())
    }
}

/// Display payload for a student
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StudentView {
    pub student_id: String,
    pub name: String,
    pub age: u32,
    pub address: String,
    pub courses: Vec<String>,
    pub grades: BTreeMap<String, String>,
}

/// Display payload for a course
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseView {
    pub course_code: String,
    pub course_name: String,
    pub instructor: String,
    pub students: Vec<RosterEntry>,
}

/// One resolved roster line
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RosterEntry {
    pub student_id: String,
    pub name: String,
    pub grade: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingView {
    pub students: Vec<ListingRow>,
    pub courses: Vec<ListingRow>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListingRow {
    pub key: String,
    pub label: String,
    pub count: usize,
}

/// A record store bound to the snapshot file it is saved to.
#[derive(Debug)]
pub struct Session {
    store: RecordStore,
    snapshot_path: PathBuf,
}

impl Session {
    /// Start with an empty store
    pub fn new(snapshot_path: impl Into<PathBuf>) -> Self {
        Self::with_store(RecordStore::new(), snapshot_path)
    }

    pub fn with_store(store: RecordStore, snapshot_path: impl Into<PathBuf>) -> Self {
        Self {
            store,
            snapshot_path: snapshot_path.into(),
        }
    }

    /// Startup load: a missing snapshot starts an empty store.
    ///
    /// A corrupt snapshot is still an error; the caller chooses whether to
    /// continue with [`Session::new`].
    pub fn open(snapshot_path: impl Into<PathBuf>) -> Result<(Self, Reply)> {
        let snapshot_path = snapshot_path.into();
        match snapshot::load_if_exists(&snapshot_path)? {
            Some(store) => Ok((
                Self::with_store(store, snapshot_path),
                Reply::message("Data loaded successfully."),
            )),
            None => Ok((
                Self::new(snapshot_path),
                Reply::message("No previous data found. Starting fresh."),
            )),
        }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    // ========== Menu actions ==========

    /// 1. Add Student
    pub fn add_student(
        &mut self,
        name: &str,
        age: u32,
        address: &str,
        student_id: &str,
    ) -> Result<Reply> {
        self.store.add_student(student_id, name, age, address)?;
        Ok(Reply::message(format!(
            "Student {} (ID: {}) added successfully.",
            name, student_id
        )))
    }

    /// 2. Add Course
    pub fn add_course(
        &mut self,
        course_name: &str,
        course_code: &str,
        instructor: &str,
    ) -> Result<Reply> {
        self.store.add_course(course_code, course_name, instructor)?;
        Ok(Reply::message(format!(
            "Course {} (Code: {}) created with instructor {}.",
            course_name, course_code, instructor
        )))
    }

    /// 3. Enroll in Course
    pub fn enroll(&mut self, student_id: &str, course_code: &str) -> Result<Reply> {
        self.store.enroll(student_id, course_code)?;
        let student = self.store.get_student(student_id)?;
        let course = self.store.get_course(course_code)?;
        Ok(Reply::message(format!(
            "Student {} enrolled in course {}.",
            student, course
        )))
    }

    /// 4. Add Grade
    pub fn add_grade(&mut self, student_id: &str, course_code: &str, grade: &str) -> Result<Reply> {
        self.store.add_grade(student_id, course_code, grade)?;
        let student = self.store.get_student(student_id)?;
        Ok(Reply::message(format!(
            "Grade {} added for student {} in course {}.",
            grade, student, course_code
        )))
    }

    /// 5. Display Student Details
    pub fn student_details(&self, student_id: &str) -> Result<Reply> {
        let student = self.store.get_student(student_id)?;
        Ok(Reply::Student(StudentView {
            student_id: student.student_id.clone(),
            name: student.name.clone(),
            age: student.age,
            address: student.address.clone(),
            courses: student.courses.clone(),
            grades: student.grades.clone(),
        }))
    }

    /// 6. Display Course Details
    pub fn course_details(&self, course_code: &str) -> Result<Reply> {
        let course = self.store.get_course(course_code)?;
        let students = self
            .store
            .roster(course_code)?
            .into_iter()
            .map(|s| RosterEntry {
                student_id: s.student_id.clone(),
                name: s.name.clone(),
                grade: s.grade_for(course_code).map(str::to_string),
            })
            .collect();

        Ok(Reply::Course(CourseView {
            course_code: course.course_code.clone(),
            course_name: course.course_name.clone(),
            instructor: course.instructor.clone(),
            students,
        }))
    }

    /// 7. Save Data (to the session file unless `path` is given)
    pub fn save(&self, path: Option<&Path>) -> Result<Reply> {
        let path = path.unwrap_or(self.snapshot_path.as_path());
        snapshot::save(&self.store, path)?;
        Ok(Reply::message("Data saved successfully."))
    }

    /// 8. Load Data.
    ///
    /// Unlike [`Session::open`], a missing file is an error here. The current
    /// store is only replaced once the new one has loaded in full.
    pub fn load(&mut self, path: Option<&Path>) -> Result<Reply> {
        let path = path.unwrap_or(self.snapshot_path.as_path());
        let store = snapshot::load(path)?;
        self.store = store;
        Ok(Reply::message("Data loaded successfully."))
    }

    /// 0. Exit, saving first when `autosave` is set
    pub fn exit(&self, autosave: bool) -> Result<Reply> {
        if autosave {
            self.save(None)?;
            Ok(Reply::message("Exiting the program. Data saved successfully."))
        } else {
            Ok(Reply::message("Exiting the program."))
        }
    }

    // ========== Extras ==========

    /// Every student and course, key order
    pub fn list(&self) -> Reply {
        let students = self
            .store
            .students()
            .map(|s| ListingRow {
                key: s.student_id.clone(),
                label: s.name.clone(),
                count: s.courses.len(),
            })
            .collect();
        let courses = self
            .store
            .courses()
            .map(|c| ListingRow {
                key: c.course_code.clone(),
                label: c.course_name.clone(),
                count: c.roster.len(),
            })
            .collect();
        Reply::Listing(ListingView { students, courses })
    }

    pub fn stats(&self) -> Reply {
        Reply::Stats(self.store.stats())
    }

    /// Audit student/course links
    pub fn check(&self) -> Reply {
        Reply::Issues(self.store.check_links().iter().map(ToString::to_string).collect())
    }
}

/// Map an error to the wording the menu shows for it
pub fn describe_error(err: &Error) -> String {
    match err {
        Error::NotFound { kind, key } => format!("{} not found: {}", kind, key),
        Error::NotEnrolled { .. } => "Student is not enrolled in this course.".to_string(),
        other => other.to_string(),
    }
}
