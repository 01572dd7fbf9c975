pub mod registry;

use crate::builder::PatternBuilder;
use crate::error::Result;
use crate::validator;

/// One builder operation, as named in a config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Literal(String),
    Digit,
    NonDigit,
    Word,
    NonWord,
    Whitespace,
    NonWhitespace,
    AnyOf(String),
    AnyCharacterExcept(String),
    NoneOf(String),
    OneOrMore,
    ZeroOrMore,
    Optional,
    Exactly(u32),
    AtLeast(u32),
    Between(u32, u32),
    Start,
    End,
    WordBoundary,
    NonWordBoundary,
    Group(Vec<Step>),
    NonCapturingGroup(Vec<Step>),
    NamedGroup { name: String, steps: Vec<Step> },
}

impl Step {
    /// Look up an operation that takes no argument.
    pub fn from_name(name: &str) -> Option<Step> {
        let step = match name {
            "digit" => Step::Digit,
            "non_digit" => Step::NonDigit,
            "word" => Step::Word,
            "non_word" => Step::NonWord,
            "whitespace" => Step::Whitespace,
            "non_whitespace" => Step::NonWhitespace,
            "one_or_more" => Step::OneOrMore,
            "zero_or_more" => Step::ZeroOrMore,
            "optional" => Step::Optional,
            "start" => Step::Start,
            "end" => Step::End,
            "word_boundary" => Step::WordBoundary,
            "non_word_boundary" => Step::NonWordBoundary,
            _ => return None,
        };
        Some(step)
    }

    pub fn apply(&self, builder: &mut PatternBuilder) -> Result<()> {
        match self {
            Step::Literal(text) => builder.literal(text)?,
            Step::Digit => builder.digit()?,
            Step::NonDigit => builder.non_digit()?,
            Step::Word => builder.word()?,
            Step::NonWord => builder.non_word()?,
            Step::Whitespace => builder.whitespace()?,
            Step::NonWhitespace => builder.non_whitespace()?,
            Step::AnyOf(chars) => builder.any_of(chars)?,
            Step::AnyCharacterExcept(chars) => builder.any_character_except(chars)?,
            Step::NoneOf(chars) => builder.none_of(chars)?,
            Step::OneOrMore => builder.one_or_more()?,
            Step::ZeroOrMore => builder.zero_or_more()?,
            Step::Optional => builder.optional()?,
            Step::Exactly(n) => builder.exactly(*n)?,
            Step::AtLeast(n) => builder.at_least(*n)?,
            Step::Between(min, max) => builder.between(*min, *max)?,
            Step::Start => builder.start()?,
            Step::End => builder.end()?,
            Step::WordBoundary => builder.word_boundary()?,
            Step::NonWordBoundary => builder.non_word_boundary()?,
            Step::Group(steps) => builder.group(&assemble(steps)?)?,
            Step::NonCapturingGroup(steps) => builder.non_capturing_group(&assemble(steps)?)?,
            Step::NamedGroup { name, steps } => builder.named_group(name, &assemble(steps)?)?,
        };
        Ok(())
    }
}

/// Run `steps` against a fresh builder.
pub fn assemble(steps: &[Step]) -> Result<PatternBuilder> {
    let mut builder = PatternBuilder::new();
    for step in steps {
        step.apply(&mut builder)?;
    }
    Ok(builder)
}

/// A named pattern that inputs are checked against. The pattern is always locked.
#[derive(Debug, Clone)]
pub struct Rule {
    name: String,
    description: String,
    pattern: PatternBuilder,
}

impl Rule {
    pub fn new(name: impl Into<String>, description: impl Into<String>, pattern: PatternBuilder) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            pattern,
        }
    }

    pub fn from_steps(
        name: impl Into<String>,
        description: impl Into<String>,
        steps: &[Step],
        case_insensitive: bool,
    ) -> Result<Self> {
        let mut builder = assemble(steps)?;
        if case_insensitive {
            builder.case_insensitive()?;
        }
        let pattern = PatternBuilder::precompiled(builder.compile()?, builder.compile_options())?;
        Ok(Self::new(name, description, pattern))
    }

    pub fn username() -> Self {
        Self::new(
            "username",
            "one or more word characters",
            validator::username_pattern().clone(),
        )
    }

    pub fn email() -> Self {
        Self::new(
            "email",
            "word characters, @, word characters, dot, word characters",
            validator::email_pattern().clone(),
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn pattern(&self) -> &PatternBuilder {
        &self.pattern
    }

    pub fn check(&self, input: &str) -> Result<bool> {
        self.pattern.matches(input)
    }
}
