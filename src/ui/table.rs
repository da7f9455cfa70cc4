use tabled::{settings::Style, Table, Tabled};

use crate::session::{ListingRow, RosterEntry, StudentView};

#[derive(Tabled)]
pub struct FieldRow {
    #[tabled(rename = "Field")]
    pub field: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

/// Two-column field/value table
#[derive(Default)]
pub struct TableBuilder {
    rows: Vec<FieldRow>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_row(&mut self, label: &str, value: &str) {
        self.rows.push(FieldRow {
            field: label.to_string(),
            value: value.to_string(),
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

#[derive(Tabled)]
struct GradeRow {
    #[tabled(rename = "Course")]
    course: String,
    #[tabled(rename = "Grade")]
    grade: String,
}

#[derive(Tabled)]
struct RosterRow {
    #[tabled(rename = "Student ID")]
    student_id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Grade")]
    grade: String,
}

#[derive(Tabled)]
struct KeyRow {
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Name")]
    label: String,
    #[tabled(rename = "Links")]
    count: usize,
}

/// One row per enrolled course, blank grade when none is recorded yet
pub fn grades_table(courses: &[String], grades: &std::collections::BTreeMap<String, String>) -> String {
    if courses.is_empty() {
        return String::new();
    }
    let rows: Vec<GradeRow> = courses
        .iter()
        .map(|code| GradeRow {
            course: code.clone(),
            grade: grades.get(code).cloned().unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn roster_table(entries: &[RosterEntry]) -> String {
    if entries.is_empty() {
        return String::new();
    }
    let rows: Vec<RosterRow> = entries
        .iter()
        .map(|e| RosterRow {
            student_id: e.student_id.clone(),
            name: e.name.clone(),
            grade: e.grade.clone().unwrap_or_else(|| "-".to_string()),
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

pub fn listing_table(rows: &[ListingRow]) -> String {
    if rows.is_empty() {
        return String::new();
    }
    let rows: Vec<KeyRow> = rows
        .iter()
        .map(|r| KeyRow {
            key: r.key.clone(),
            label: r.label.clone(),
            count: r.count,
        })
        .collect();
    Table::new(rows).with(Style::rounded()).to_string()
}

/// Person fields of a student as a field/value table
pub fn student_fields_table(student: &StudentView) -> String {
    let mut builder = TableBuilder::new();
    builder.add_row("Name", &student.name);
    builder.add_row("Age", &student.age.to_string());
    builder.add_row("Address", &student.address);
    builder.add_row("Student ID", &student.student_id);
    builder.build()
}
