//! Interactive numbered menu
//!
//! Reads one answer per line from any `BufRead`, so the same loop serves a
//! terminal and scripted input. End of input is treated like choosing Exit.

use std::io::BufRead;

use crate::session::{Reply, Session, describe_error};
use crate::ui;

const MENU_OPTIONS: &[(&str, &str)] = &[
    ("1", "Add Student"),
    ("2", "Add Course"),
    ("3", "Enroll in Course"),
    ("4", "Add Grade"),
    ("5", "Display Student Details"),
    ("6", "Display Course Details"),
    ("7", "Save Data"),
    ("8", "Load Data"),
    ("0", "Exit"),
];

/// Whether the loop keeps going after an action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Quit,
}

pub struct Menu<R> {
    session: Session,
    input: R,
    autosave: bool,
}

impl<R: BufRead> Menu<R> {
    pub fn new(session: Session, input: R, autosave: bool) -> Self {
        Self {
            session,
            input,
            autosave,
        }
    }

    pub fn into_session(self) -> Session {
        self.session
    }

    /// Run until Exit or end of input.
    ///
    /// Only a failed save at end of input escapes as an error; every other
    /// failure is shown and the menu continues.
    pub fn run(&mut self) -> anyhow::Result<()> {
        loop {
            print_menu();
            let Some(choice) = self.ask("Enter your choice:")? else {
                return self.finish_on_eof();
            };

            let step = match choice.trim() {
                "1" => self.add_student()?,
                "2" => self.add_course()?,
                "3" => self.enroll()?,
                "4" => self.add_grade()?,
                "5" => self.student_details()?,
                "6" => self.course_details()?,
                "7" => {
                    show(self.session.save(None));
                    Step::Continue
                }
                "8" => {
                    show(self.session.load(None));
                    Step::Continue
                }
                "0" => self.exit(),
                _ => {
                    ui::error("Invalid choice. Please try again.");
                    Step::Continue
                }
            };

            if step == Step::Quit {
                return Ok(());
            }
        }
    }

    fn add_student(&mut self) -> anyhow::Result<Step> {
        let Some(name) = self.ask("Enter name:")? else {
            return self.quit_on_eof();
        };
        let Some(age) = self.ask("Enter age:")? else {
            return self.quit_on_eof();
        };
        let Some(address) = self.ask("Enter address:")? else {
            return self.quit_on_eof();
        };
        let Some(student_id) = self.ask("Enter student ID:")? else {
            return self.quit_on_eof();
        };

        match age.trim().parse::<u32>() {
            Ok(age) => show(self.session.add_student(&name, age, &address, &student_id)),
            Err(_) => ui::error(&format!("Invalid age '{}': expected a whole number.", age.trim())),
        }
        Ok(Step::Continue)
    }

    fn add_course(&mut self) -> anyhow::Result<Step> {
        let Some(course_name) = self.ask("Enter course name:")? else {
            return self.quit_on_eof();
        };
        let Some(course_code) = self.ask("Enter course code:")? else {
            return self.quit_on_eof();
        };
        let Some(instructor) = self.ask("Enter instructor name:")? else {
            return self.quit_on_eof();
        };

        show(self.session.add_course(&course_name, &course_code, &instructor));
        Ok(Step::Continue)
    }

    fn enroll(&mut self) -> anyhow::Result<Step> {
        let Some(student_id) = self.ask("Enter student ID:")? else {
            return self.quit_on_eof();
        };
        let Some(course_code) = self.ask("Enter course code:")? else {
            return self.quit_on_eof();
        };

        show(self.session.enroll(&student_id, &course_code));
        Ok(Step::Continue)
    }

    fn add_grade(&mut self) -> anyhow::Result<Step> {
        let Some(student_id) = self.ask("Enter student ID:")? else {
            return self.quit_on_eof();
        };
        let Some(course_code) = self.ask("Enter course code:")? else {
            return self.quit_on_eof();
        };
        let Some(grade) = self.ask("Enter grade:")? else {
            return self.quit_on_eof();
        };

        show(self.session.add_grade(&student_id, &course_code, &grade));
        Ok(Step::Continue)
    }

    fn student_details(&mut self) -> anyhow::Result<Step> {
        let Some(student_id) = self.ask("Enter student ID:")? else {
            return self.quit_on_eof();
        };
        show(self.session.student_details(&student_id));
        Ok(Step::Continue)
    }

    fn course_details(&mut self) -> anyhow::Result<Step> {
        let Some(course_code) = self.ask("Enter course code:")? else {
            return self.quit_on_eof();
        };
        show(self.session.course_details(&course_code));
        Ok(Step::Continue)
    }

    /// A failed save keeps the menu open so the operator can retry.
    fn exit(&mut self) -> Step {
        match self.session.exit(self.autosave) {
            Ok(reply) => {
                ui::show_reply(&reply);
                Step::Quit
            }
            Err(e) => {
                ui::error(&describe_error(&e));
                Step::Continue
            }
        }
    }

    fn finish_on_eof(&mut self) -> anyhow::Result<()> {
        tracing::debug!("End of input, exiting menu");
        let reply = self.session.exit(self.autosave)?;
        ui::show_reply(&reply);
        Ok(())
    }

    fn quit_on_eof(&mut self) -> anyhow::Result<Step> {
        self.finish_on_eof()?;
        Ok(Step::Quit)
    }

    /// Prompt and read one line; `None` at end of input.
    fn ask(&mut self, label: &str) -> anyhow::Result<Option<String>> {
        ui::prompt(label);
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.trim_end_matches(['\r', '\n']).to_string();
        Ok(Some(answer))
    }
}

fn print_menu() {
    if crate::output::is_quiet() {
        return;
    }
    ui::section("==== Student Management System ====");
    for (key, label) in MENU_OPTIONS {
        println!("{}. {}", key, label);
    }
}

fn show(result: crate::Result<Reply>) {
    match result {
        Ok(reply) => ui::show_reply(&reply),
        Err(e) => ui::error(&describe_error(&e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_script(dir: &tempfile::TempDir, script: &str, autosave: bool) -> Session {
        let session = Session::new(dir.path().join("data.json"));
        let mut menu = Menu::new(session, Cursor::new(script.to_string()), autosave);
        menu.run().unwrap();
        menu.into_session()
    }

    #[test]
    fn test_scripted_session() {
        let dir = tempfile::tempdir().unwrap();
        let script = "1\nAna\n20\nX St\nS1\n\
                      2\nAlgo\nC1\nDr. K\n\
                      3\nS1\nC1\n\
                      4\nS1\nC1\nA\n\
                      5\nS1\n\
                      6\nC1\n\
                      0\n";
        let session = run_script(&dir, script, true);

        let student = session.store().get_student("S1").unwrap();
        assert_eq!(student.grade_for("C1"), Some("A"));
        assert!(session.store().get_course("C1").unwrap().has_student("S1"));
        assert!(dir.path().join("data.json").exists());
    }

    #[test]
    fn test_bad_age_and_bad_choice_keep_running() {
        let dir = tempfile::tempdir().unwrap();
        let script = "1\nAna\ntwenty\nX St\nS1\n9\n1\nAna\n20\nX St\nS1\n0\n";
        let session = run_script(&dir, script, false);

        assert_eq!(session.store().len_students(), 1);
        assert!(!dir.path().join("data.json").exists());
    }

    #[test]
    fn test_end_of_input_saves() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_script(&dir, "2\nAlgo\nC1\nDr. K\n", true);

        assert_eq!(session.store().len_courses(), 1);
        let saved = crate::snapshot::load(&dir.path().join("data.json")).unwrap();
        assert_eq!(&saved, session.store());
    }

    #[test]
    fn test_eof_mid_prompt_exits() {
        let dir = tempfile::tempdir().unwrap();
        let session = run_script(&dir, "1\nAna\n", false);
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_errors_do_not_mutate() {
        let dir = tempfile::tempdir().unwrap();
        let script = "3\nS2\nC1\n4\nS2\nC1\nA\n8\n0\n";
        let session = run_script(&dir, script, false);
        assert!(session.store().is_empty());
    }
}
