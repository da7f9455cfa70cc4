use crate::output::is_quiet;
use crate::ui::{Icons, Tone, theme};
use std::io::Write;

pub fn header(text: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::BOOKS, theme().paint(Tone::Title, text));
}

pub fn success(label: &str) {
    if is_quiet() {
        return;
    }
    println!("{} {}", Icons::CHECK, theme().paint(Tone::Done, label));
}

pub fn error(label: &str) {
    eprintln!("{} {}", Icons::CROSS, theme().paint(Tone::Failure, label));
}

pub fn warn(label: &str) {
    eprintln!("{} {}", Icons::WARN, theme().paint(Tone::Caution, label));
}

pub fn info(label: &str, value: &str) {
    if is_quiet() {
        return;
    }
    println!(
        "{} {}: {}",
        Icons::INFO,
        theme().paint(Tone::Label, label),
        value
    );
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", theme().paint(Tone::Title, title));
}

pub fn summary_row(label: &str, value: &str) {
    println!("  {} {}", theme().paint(Tone::Label, label), value);
}

/// Print a prompt without a newline so input lands on the same line
pub fn prompt(label: &str) {
    print!("{} ", theme().paint(Tone::Prompt, label));
    let _ = std::io::stdout().flush();
}
