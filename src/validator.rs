use std::sync::LazyLock;

use crate::builder::PatternBuilder;
use crate::error::Result;

/// One or more word characters, anchored at both ends.
static USERNAME_PATTERN: LazyLock<PatternBuilder> = LazyLock::new(|| {
    lock(|b| b.start()?.word()?.one_or_more()?.end()).expect("username pattern is well-formed")
});

/// `word+ @ word+ . word+`, anchored at both ends.
static EMAIL_PATTERN: LazyLock<PatternBuilder> = LazyLock::new(|| {
    lock(|b| {
        b.start()?
            .word()?
            .one_or_more()?
            .literal("@")?
            .word()?
            .one_or_more()?
            .literal(".")?
            .word()?
            .one_or_more()?
            .end()
    })
    .expect("email pattern is well-formed")
});

/// Build a pattern once and wrap the compiled result, so later checks never
/// recompile.
pub(crate) fn lock(
    steps: impl FnOnce(&mut PatternBuilder) -> Result<&mut PatternBuilder>,
) -> Result<PatternBuilder> {
    let mut builder = PatternBuilder::new();
    steps(&mut builder)?;
    PatternBuilder::precompiled(builder.compile()?, builder.compile_options())
}

/// Checks for the two built-in input shapes.
pub struct CommonValidator;

impl CommonValidator {
    pub fn validate_username(username: &str) -> bool {
        full_match(username_pattern(), username)
    }

    pub fn validate_email(email: &str) -> bool {
        full_match(email_pattern(), email)
    }
}

/// Whole-input check against a pattern built by [`lock`]. Its anchored form
/// was compiled when it was locked, so `matches` has no error left to report.
fn full_match(pattern: &PatternBuilder, input: &str) -> bool {
    debug_assert!(pattern.is_locked());
    matches!(pattern.matches(input), Ok(true))
}

pub fn username_pattern() -> &'static PatternBuilder {
    &USERNAME_PATTERN
}

pub fn email_pattern() -> &'static PatternBuilder {
    &EMAIL_PATTERN
}
