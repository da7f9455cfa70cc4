//! Conversion between the record store and the snapshot document

use std::collections::BTreeMap;

use super::document::{CourseEntry, SnapshotDocument, StudentEntry};
use crate::course::Course;
use crate::store::RecordStore;
use crate::student::Student;
use crate::{Error, Result};

/// Project the store down to its persisted form.
pub fn export(store: &RecordStore) -> SnapshotDocument {
    let students = store
        .students()
        .map(|s| {
            let entry = StudentEntry {
                name: s.name.clone(),
                age: s.age,
                address: s.address.clone(),
                student_id: s.student_id.clone(),
                grades: s.grades.clone(),
                courses: s.courses.clone(),
            };
            (s.student_id.clone(), entry)
        })
        .collect();

    let courses = store
        .courses()
        .map(|c| {
            let entry = CourseEntry {
                course_name: c.course_name.clone(),
                course_code: c.course_code.clone(),
                instructor: c.instructor.clone(),
                students: c.roster.clone(),
            };
            (c.course_code.clone(), entry)
        })
        .collect();

    SnapshotDocument { students, courses }
}

/// Rebuild a store from a document.
///
/// Students are materialized in full before any course is looked at, since
/// every roster entry must name a student that already exists. Any failure
/// discards everything built so far.
pub fn import(document: SnapshotDocument) -> Result<RecordStore> {
    // Phase 1: students, taken as stored
    let mut students = BTreeMap::new();
    for (key, entry) in document.students {
        if key != entry.student_id {
            return Err(Error::CorruptSnapshot(format!(
                "student entry '{}' carries student_id '{}'",
                key, entry.student_id
            )));
        }
        let mut student = Student::new(entry.student_id, entry.name, entry.age, entry.address);
        student.grades = entry.grades;
        student.courses = entry.courses;
        students.insert(key, student);
    }
    tracing::debug!(students = students.len(), "Snapshot students loaded");

    // Phase 2: courses, rosters resolved against phase 1
    let mut courses = BTreeMap::new();
    for (key, entry) in document.courses {
        if key != entry.course_code {
            return Err(Error::CorruptSnapshot(format!(
                "course entry '{}' carries course_code '{}'",
                key, entry.course_code
            )));
        }
        if let Some(missing) = entry.students.iter().find(|id| !students.contains_key(*id)) {
            return Err(Error::CorruptSnapshot(format!(
                "course '{}' lists unknown student '{}'",
                key, missing
            )));
        }
        let mut course = Course::new(entry.course_code, entry.course_name, entry.instructor);
        course.roster = entry.students;
        courses.insert(key, course);
    }
    tracing::debug!(courses = courses.len(), "Snapshot courses resolved");

    Ok(RecordStore::from_tables(students, courses))
}

/// Parse and import a JSON snapshot
pub fn from_json_str(json: &str) -> Result<RecordStore> {
    let document: SnapshotDocument =
        serde_json::from_str(json).map_err(|e| Error::CorruptSnapshot(e.to_string()))?;
    import(document)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated_store() -> RecordStore {
        let mut store = RecordStore::new();
        store.add_student("S1", "Ana", 20, "X St").unwrap();
        store.add_student("S2", "Ben", 22, "Y St").unwrap();
        store.add_course("C1", "Algo", "Dr. K").unwrap();
        store.add_course("C2", "Data", "Dr. M").unwrap();
        store.enroll("S1", "C1").unwrap();
        store.enroll("S2", "C1").unwrap();
        store.enroll("S1", "C2").unwrap();
        store.add_grade("S1", "C1", "A").unwrap();
        store
    }

    #[test]
    fn test_round_trip_preserves_store() {
        let store = populated_store();
        let restored = import(export(&store)).unwrap();
        assert_eq!(restored, store);

        let roster: Vec<_> = restored
            .roster("C1")
            .unwrap()
            .iter()
            .map(|s| s.student_id.as_str())
            .collect();
        assert_eq!(roster, vec!["S1", "S2"]);
        assert!(restored.check_links().is_empty());
    }

    #[test]
    fn test_course_entry_holds_ids_only() {
        let document = export(&populated_store());
        let c1 = &document.courses["C1"];
        assert_eq!(c1.students, vec!["S1".to_string(), "S2".to_string()]);

        let json = serde_json::to_value(&document).unwrap();
        assert_eq!(json["courses"]["C1"]["students"][0], "S1");
        assert_eq!(json["students"]["S1"]["grades"]["C1"], "A");
        assert_eq!(json["students"]["S1"]["courses"][1], "C2");
    }

    #[test]
    fn test_dangling_roster_entry_is_corrupt() {
        let json = r#"{
            "students": {},
            "courses": { "C1": {
                "course_name": "Algo", "course_code": "C1", "instructor": "Dr. K",
                "students": ["S404"]
            } }
        }"#;
        let err = from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::CorruptSnapshot(ref msg) if msg.contains("S404")));
    }

    #[test]
    fn test_missing_field_is_corrupt() {
        let json = r#"{ "students": { "S1": { "name": "Ana", "age": 20 } }, "courses": {} }"#;
        assert!(matches!(from_json_str(json), Err(Error::CorruptSnapshot(_))));
    }

    #[test]
    fn test_wrong_type_is_corrupt() {
        let json = r#"{ "students": { "S1": {
            "name": "Ana", "age": "twenty", "address": "X St", "student_id": "S1",
            "grades": {}, "courses": []
        } }, "courses": {} }"#;
        assert!(matches!(from_json_str(json), Err(Error::CorruptSnapshot(_))));
    }

    #[test]
    fn test_mismatched_key_is_corrupt() {
        let json = r#"{ "students": { "S1": {
            "name": "Ana", "age": 20, "address": "X St", "student_id": "S2",
            "grades": {}, "courses": []
        } }, "courses": {} }"#;
        assert!(matches!(from_json_str(json), Err(Error::CorruptSnapshot(_))));
    }

    #[test]
    fn test_student_course_codes_are_not_validated() {
        // Student-side codes are loaded as stored; only rosters are resolved.
        let json = r#"{ "students": { "S1": {
            "name": "Ana", "age": 20, "address": "X St", "student_id": "S1",
            "grades": { "C9": "B" }, "courses": ["C9"]
        } }, "courses": {} }"#;
        let store = from_json_str(json).unwrap();
        assert_eq!(store.get_student("S1").unwrap().courses, vec!["C9".to_string()]);
        assert_eq!(store.check_links().len(), 1);
    }
}
