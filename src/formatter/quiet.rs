use std::io::Write;

use crate::formatter::Formatter;
use crate::report::{Verdict, summary};

/// Prints nothing when every input is valid; otherwise only the failures.
pub struct QuietFormatter;

impl Formatter for QuietFormatter {
    fn format_to(&self, verdicts: &[Verdict], out: &mut dyn Write) {
        if verdicts.iter().all(|v| v.valid) {
            return;
        }
        for v in verdicts.iter().filter(|v| !v.valid) {
            let _ = writeln!(out, "{v}");
        }
        let _ = writeln!(out, "\n{}", summary(verdicts));
    }
}
