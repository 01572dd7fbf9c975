use std::io::BufRead;

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::report::Verdict;
use crate::rule::Rule;

/// Check every input against `rule` in parallel. Verdicts keep input order.
pub fn check_inputs(rule: &Rule, inputs: &[String]) -> Result<Vec<Verdict>> {
    inputs
        .par_iter()
        .map(|input| -> Result<Verdict> {
            let valid = rule
                .check(input)
                .with_context(|| format!("rule `{}` failed on {input:?}", rule.name()))?;
            Ok(Verdict {
                rule: rule.name().to_string(),
                input: input.clone(),
                valid,
            })
        })
        .collect()
}

/// Read one input per line. Trailing `\r` is stripped; blank lines are skipped.
pub fn read_inputs(reader: impl BufRead) -> Result<Vec<String>> {
    let mut inputs = Vec::new();
    for line in reader.lines() {
        let line = line.context("failed to read input")?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if !line.is_empty() {
            inputs.push(line.to_string());
        }
    }
    Ok(inputs)
}
