use std::io::Write;

use serde::Serialize;

use crate::formatter::Formatter;
use crate::report::Verdict;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    metadata: Metadata,
    verdicts: Vec<JsonVerdict<'a>>,
}

#[derive(Serialize)]
struct Metadata {
    inputs_checked: usize,
    invalid_count: usize,
}

#[derive(Serialize)]
struct JsonVerdict<'a> {
    rule: &'a str,
    input: &'a str,
    valid: bool,
}

impl Formatter for JsonFormatter {
    fn format_to(&self, verdicts: &[Verdict], out: &mut dyn Write) {
        let output = JsonOutput {
            metadata: Metadata {
                inputs_checked: verdicts.len(),
                invalid_count: verdicts.iter().filter(|v| !v.valid).count(),
            },
            verdicts: verdicts
                .iter()
                .map(|v| JsonVerdict {
                    rule: &v.rule,
                    input: &v.input,
                    valid: v.valid,
                })
                .collect(),
        };
        if let Ok(json) = serde_json::to_string_pretty(&output) {
            let _ = writeln!(out, "{json}");
        }
    }
}
