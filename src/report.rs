use std::fmt;

/// Outcome of checking one input against one rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Verdict {
    pub rule: String,
    pub input: String,
    pub valid: bool,
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.valid {
            write!(f, "{}: ok", self.input)
        } else {
            write!(f, "{}: invalid ({})", self.input, self.rule)
        }
    }
}

/// `N inputs checked, M invalid`, with singular forms where they apply.
pub fn summary(verdicts: &[Verdict]) -> String {
    let invalid = verdicts.iter().filter(|v| !v.valid).count();
    let input_word = if verdicts.len() == 1 { "input" } else { "inputs" };
    format!("{} {input_word} checked, {invalid} invalid", verdicts.len())
}
