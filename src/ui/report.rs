//! Console rendering of session replies

use crate::session::{CourseView, ListingView, Reply, StudentView};
use crate::store::StoreStats;
use crate::ui::{
    Icons, grades_table, listing_table, roster_table, section, student_fields_table, success,
    summary_row, theme, warn, Tone,
};

/// Print a reply the way the menu shows it
pub fn show_reply(reply: &Reply) {
    match reply {
        Reply::Message(text) => success(text),
        Reply::Student(view) => show_student(view),
        Reply::Course(view) => show_course(view),
        Reply::Listing(view) => show_listing(view),
        Reply::Stats(stats) => show_stats(stats),
        Reply::Issues(issues) => {
            if issues.is_empty() {
                success("All enrollments are consistent.");
            } else {
                for issue in issues {
                    warn(issue);
                }
            }
        }
    }
}

fn show_student(view: &StudentView) {
    section(&format!(" {} {} ", Icons::PERSON, view.name));
    println!("{}", student_fields_table(view));
    summary_row("Courses Enrolled:", &view.courses.join(", "));
    if !view.courses.is_empty() {
        println!("{}", grades_table(&view.courses, &view.grades));
    }
}

fn show_course(view: &CourseView) {
    section(&format!(" {} {} ", Icons::COURSE, view.course_name));
    summary_row("Course Code:", &theme().paint(Tone::Key, &view.course_code));
    summary_row("Instructor:", &view.instructor);
    if view.students.is_empty() {
        summary_row("Enrolled Students:", "none");
    } else {
        println!("{}", roster_table(&view.students));
    }
}

fn show_listing(view: &ListingView) {
    section(&format!(" {} Students ({}) ", Icons::PERSON, view.students.len()));
    println!("{}", listing_table(&view.students));
    section(&format!(" {} Courses ({}) ", Icons::COURSE, view.courses.len()));
    println!("{}", listing_table(&view.courses));
}

fn show_stats(stats: &StoreStats) {
    section(&format!(" {} Records ", Icons::STATS));
    summary_row("Students:", &stats.students.to_string());
    summary_row("Courses:", &stats.courses.to_string());
    summary_row("Enrollments:", &stats.enrollments.to_string());
    summary_row(
        "Grades:",
        &theme().paint(Tone::Grade, &stats.grades.to_string()),
    );
}
