pub mod icons;
pub mod output;
pub mod report;
pub mod table;
pub mod theme;

pub use icons::Icons;
pub use output::{error, header, info, prompt, section, success, summary_row, warn};
pub use report::show_reply;
pub use table::{TableBuilder, grades_table, listing_table, roster_table, student_fields_table};
pub use theme::{Theme, Tone, theme};
