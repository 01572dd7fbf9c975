pub mod json;
pub mod quiet;
pub mod text;

use std::io::Write;

use crate::report::Verdict;

pub trait Formatter {
    fn format_to(&self, verdicts: &[Verdict], out: &mut dyn Write);

    fn print(&self, verdicts: &[Verdict]) {
        let stdout = std::io::stdout();
        let mut lock = stdout.lock();
        self.format_to(verdicts, &mut lock);
    }
}

pub fn create_formatter(format: &str) -> Box<dyn Formatter> {
    match format {
        "json" => Box::new(json::JsonFormatter),
        "quiet" => Box::new(quiet::QuietFormatter),
        // "text" and any unknown value
        _ => Box::new(text::TextFormatter),
    }
}
