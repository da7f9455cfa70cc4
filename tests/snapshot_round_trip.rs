use registrar::snapshot::{self, DEFAULT_SNAPSHOT_FILE};
use registrar::{Error, RecordStore, Reply, Session};

fn campus() -> RecordStore {
    let mut store = RecordStore::new();
    store.add_student("S1", "Ana", 20, "X St").unwrap();
    store.add_student("S2", "Ben", 23, "Y Ave").unwrap();
    store.add_student("S3", "Caro", 19, "Z Rd").unwrap();
    store.add_course("C1", "Algo", "Dr. K").unwrap();
    store.add_course("C2", "Databases", "Dr. M").unwrap();
    store.add_course("C3", "Compilers", "Dr. P").unwrap();

    for (student, course) in [("S1", "C1"), ("S2", "C1"), ("S1", "C2"), ("S3", "C2")] {
        store.enroll(student, course).unwrap();
    }
    store.add_grade("S1", "C1", "A").unwrap();
    store.add_grade("S3", "C2", "B-").unwrap();
    store
}

#[test]
fn round_trip_through_file_is_observationally_equal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_SNAPSHOT_FILE);

    let original = campus();
    snapshot::save(&original, &path).unwrap();
    let restored = snapshot::load(&path).unwrap();

    for student in original.students() {
        let other = restored.get_student(&student.student_id).unwrap();
        assert_eq!(other, student);
    }
    for course in original.courses() {
        let other = restored.get_course(&course.course_code).unwrap();
        assert_eq!(other, course);
        let ids: Vec<_> = restored
            .roster(&course.course_code)
            .unwrap()
            .iter()
            .map(|s| s.student_id.clone())
            .collect();
        assert_eq!(ids, course.roster);
    }
    assert!(restored.roster("C3").unwrap().is_empty());
    assert!(restored.check_links().is_empty());
}

#[test]
fn enrollment_survives_reload_in_both_directions() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("records.json");

    let mut session = Session::new(&path);
    session.add_student("Ana", 20, "X St", "S1").unwrap();
    session.add_course("Algo", "C1", "Dr. K").unwrap();
    session.enroll("S1", "C1").unwrap();
    session.add_grade("S1", "C1", "A").unwrap();
    session.save(None).unwrap();

    let (reopened, _) = Session::open(&path).unwrap();
    let student = reopened.store().get_student("S1").unwrap();
    assert!(student.is_enrolled_in("C1"));
    assert_eq!(student.grade_for("C1"), Some("A"));

    match reopened.course_details("C1").unwrap() {
        Reply::Course(view) => {
            assert_eq!(view.students.len(), 1);
            assert_eq!(view.students[0].student_id, "S1");
            assert_eq!(view.students[0].name, "Ana");
        }
        other => panic!("unexpected reply: {:?}", other),
    }
}

#[test]
fn hand_written_snapshot_in_documented_format_loads() {
    let json = r#"{
        "students": { "S1": {
            "name": "Ana", "age": 20, "address": "X St", "student_id": "S1",
            "grades": { "C1": "A" }, "courses": ["C1"]
        } },
        "courses": { "C1": {
            "course_name": "Algo", "course_code": "C1", "instructor": "Dr. K",
            "students": ["S1"]
        } }
    }"#;
    let store = snapshot::from_json_str(json).unwrap();
    assert_eq!(store.get_course("C1").unwrap().roster, vec!["S1".to_string()]);
    assert_eq!(store.roster("C1").unwrap()[0].name, "Ana");
}

#[test]
fn dangling_roster_reference_fails_whole_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    std::fs::write(
        &path,
        r#"{"students": {"S1": {"name": "Ana", "age": 20, "address": "X St", "student_id": "S1", "grades": {}, "courses": ["C1"]}},
            "courses": {"C1": {"course_name": "Algo", "course_code": "C1", "instructor": "Dr. K", "students": ["S1", "S2"]}}}"#,
    )
    .unwrap();

    assert!(matches!(snapshot::load(&path), Err(Error::CorruptSnapshot(_))));
    assert!(Session::open(&path).is_err());
}

#[test]
fn missing_snapshot_is_an_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("never-written.json");

    assert!(snapshot::load_if_exists(&path).unwrap().is_none());
    let (session, _) = Session::open(&path).unwrap();
    assert!(session.store().is_empty());
}
