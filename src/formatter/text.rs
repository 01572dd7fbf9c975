use std::io::Write;

use crate::formatter::Formatter;
use crate::report::{Verdict, summary};

pub struct TextFormatter;

impl Formatter for TextFormatter {
    fn format_to(&self, verdicts: &[Verdict], out: &mut dyn Write) {
        for v in verdicts {
            let _ = writeln!(out, "{v}");
        }
        let _ = writeln!(out, "\n{}", summary(verdicts));
    }
}
