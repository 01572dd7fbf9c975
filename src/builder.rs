use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::{PatternError, Result};

/// Inline flag placed in front of the built text when case-insensitivity is on.
const CASE_INSENSITIVE_MARKER: &str = "(?i)";

/// Engine options a compiled regex was built with.
///
/// A `Regex` does not expose the options it was compiled with, so a locked
/// builder has to be told. Whole-input matching recompiles the source with
/// exactly these options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompileOptions {
    pub case_insensitive: bool,
    pub multi_line: bool,
    pub dot_matches_new_line: bool,
    pub ignore_whitespace: bool,
    pub swap_greed: bool,
    pub unicode: bool,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            case_insensitive: false,
            multi_line: false,
            dot_matches_new_line: false,
            ignore_whitespace: false,
            swap_greed: false,
            unicode: true,
        }
    }
}

impl CompileOptions {
    fn apply<'a>(&self, builder: &'a mut RegexBuilder) -> &'a mut RegexBuilder {
        builder
            .case_insensitive(self.case_insensitive)
            .multi_line(self.multi_line)
            .dot_matches_new_line(self.dot_matches_new_line)
            .ignore_whitespace(self.ignore_whitespace)
            .swap_greed(self.swap_greed)
            .unicode(self.unicode)
    }
}

#[derive(Debug, Clone)]
enum Mode {
    /// Fresh construction: fragments accumulate until a terminal operation.
    Mutable {
        fragments: Vec<String>,
        case_insensitive: bool,
    },
    /// Wraps an already-compiled pattern. `full` is its anchored form, built
    /// with the same `options`, used for whole-input matching.
    Locked {
        regex: Regex,
        full: Regex,
        options: CompileOptions,
    },
}

/// Assembles a regular-expression source string from named operations.
///
/// Every fragment operation appends to the pattern, except [`start`](Self::start),
/// which prepends `^`. Operations return `&mut Self` so calls chain:
///
/// ```
/// use fluent_regex::PatternBuilder;
///
/// let mut zip = PatternBuilder::new();
/// zip.start()?.digit()?.exactly(5)?.end()?;
/// assert_eq!(zip.build(), r"^\d{5}$");
/// assert!(zip.matches("12345")?);
/// # Ok::<(), fluent_regex::PatternError>(())
/// ```
///
/// A builder created with [`precompiled`](Self::precompiled) is locked: every
/// mutating call fails with [`PatternError::InvalidState`].
#[derive(Debug, Clone)]
pub struct PatternBuilder {
    mode: Mode,
}

impl Default for PatternBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternBuilder {
    pub fn new() -> Self {
        Self {
            mode: Mode::Mutable {
                fragments: Vec::new(),
                case_insensitive: false,
            },
        }
    }

    /// Wrap a compiled regex. The result never accepts further fragments.
    ///
    /// `options` must be the ones `regex` was built with; the anchored form
    /// used by [`matches`](Self::matches) is compiled once, here, with them.
    /// For a regex from [`compile`](Self::compile), pass
    /// [`compile_options`](Self::compile_options) of the same builder.
    pub fn precompiled(regex: Regex, options: CompileOptions) -> Result<Self> {
        let full = anchored(regex.as_str(), &options)?;
        Ok(Self {
            mode: Mode::Locked {
                regex,
                full,
                options,
            },
        })
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.mode, Mode::Locked { .. })
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.compile_options().case_insensitive
    }

    /// Options [`compile`](Self::compile) builds with.
    pub fn compile_options(&self) -> CompileOptions {
        match &self.mode {
            Mode::Mutable {
                case_insensitive, ..
            } => CompileOptions {
                case_insensitive: *case_insensitive,
                ..CompileOptions::default()
            },
            Mode::Locked { options, .. } => *options,
        }
    }

    /// Accumulated fragments in order. Empty for a locked builder.
    pub fn fragments(&self) -> &[String] {
        match &self.mode {
            Mode::Mutable { fragments, .. } => fragments.as_slice(),
            Mode::Locked { .. } => &[],
        }
    }

    fn fragments_mut(&mut self, operation: &'static str) -> Result<&mut Vec<String>> {
        match &mut self.mode {
            Mode::Mutable { fragments, .. } => Ok(fragments),
            Mode::Locked { .. } => Err(PatternError::InvalidState { operation }),
        }
    }

    fn push(&mut self, operation: &'static str, fragment: impl Into<String>) -> Result<&mut Self> {
        self.fragments_mut(operation)?.push(fragment.into());
        Ok(self)
    }

    /// Pattern text without the case-insensitivity marker. This is what a
    /// group embeds when the builder is used as a sub-pattern.
    fn body(&self) -> String {
        match &self.mode {
            Mode::Mutable { fragments, .. } => fragments.concat(),
            Mode::Locked { regex, .. } => regex.as_str().to_string(),
        }
    }

    // Literals and shorthand classes

    /// Append `text` with every regex metacharacter escaped.
    pub fn literal(&mut self, text: &str) -> Result<&mut Self> {
        self.push("literal", regex::escape(text))
    }

    pub fn digit(&mut self) -> Result<&mut Self> {
        self.push("digit", r"\d")
    }

    pub fn non_digit(&mut self) -> Result<&mut Self> {
        self.push("non_digit", r"\D")
    }

    pub fn word(&mut self) -> Result<&mut Self> {
        self.push("word", r"\w")
    }

    pub fn non_word(&mut self) -> Result<&mut Self> {
        self.push("non_word", r"\W")
    }

    pub fn whitespace(&mut self) -> Result<&mut Self> {
        self.push("whitespace", r"\s")
    }

    pub fn non_whitespace(&mut self) -> Result<&mut Self> {
        self.push("non_whitespace", r"\S")
    }

    // Character classes

    /// `[chars]`, with `chars` passed through unescaped.
    pub fn any_of(&mut self, chars: &str) -> Result<&mut Self> {
        self.push("any_of", format!("[{chars}]"))
    }

    /// `[^chars]` where `chars` is escaped as a literal run inside the class.
    pub fn any_character_except(&mut self, chars: &str) -> Result<&mut Self> {
        self.push(
            "any_character_except",
            format!("[^{}]", regex::escape(chars)),
        )
    }

    /// `[^chars]`, with `chars` passed through unescaped.
    pub fn none_of(&mut self, chars: &str) -> Result<&mut Self> {
        self.push("none_of", format!("[^{chars}]"))
    }

    // Quantifiers. Placement is not checked; they apply to whatever precedes them.

    pub fn one_or_more(&mut self) -> Result<&mut Self> {
        self.push("one_or_more", "+")
    }

    pub fn zero_or_more(&mut self) -> Result<&mut Self> {
        self.push("zero_or_more", "*")
    }

    pub fn optional(&mut self) -> Result<&mut Self> {
        self.push("optional", "?")
    }

    pub fn exactly(&mut self, times: u32) -> Result<&mut Self> {
        self.push("exactly", format!("{{{times}}}"))
    }

    pub fn at_least(&mut self, times: u32) -> Result<&mut Self> {
        self.push("at_least", format!("{{{times},}}"))
    }

    pub fn between(&mut self, min: u32, max: u32) -> Result<&mut Self> {
        self.push("between", format!("{{{min},{max}}}"))
    }

    // Anchors and boundaries

    /// Prepend `^`. Unlike every other operation this goes to the front of
    /// the pattern regardless of when it is called.
    pub fn start(&mut self) -> Result<&mut Self> {
        self.fragments_mut("start")?.insert(0, "^".to_string());
        Ok(self)
    }

    pub fn end(&mut self) -> Result<&mut Self> {
        self.push("end", "$")
    }

    pub fn word_boundary(&mut self) -> Result<&mut Self> {
        self.push("word_boundary", r"\b")
    }

    pub fn non_word_boundary(&mut self) -> Result<&mut Self> {
        self.push("non_word_boundary", r"\B")
    }

    // Groups. The sub-builder's case-insensitivity flag is not carried over.

    pub fn group(&mut self, sub: &PatternBuilder) -> Result<&mut Self> {
        let body = sub.body();
        self.push("group", format!("({body})"))
    }

    pub fn non_capturing_group(&mut self, sub: &PatternBuilder) -> Result<&mut Self> {
        let body = sub.body();
        self.push("non_capturing_group", format!("(?:{body})"))
    }

    /// `(?P<name>...)`. The name is not validated here; the engine rejects
    /// bad names at compile time.
    pub fn named_group(&mut self, name: &str, sub: &PatternBuilder) -> Result<&mut Self> {
        let body = sub.body();
        self.push("named_group", format!("(?P<{name}>{body})"))
    }

    // Modifiers

    /// Make the whole pattern case-insensitive. Idempotent.
    pub fn case_insensitive(&mut self) -> Result<&mut Self> {
        match &mut self.mode {
            Mode::Mutable {
                case_insensitive, ..
            } => {
                *case_insensitive = true;
                Ok(self)
            }
            Mode::Locked { .. } => Err(PatternError::InvalidState {
                operation: "case_insensitive",
            }),
        }
    }

    /// Drop all fragments. The case-insensitivity flag is kept.
    pub fn reset(&mut self) -> Result<&mut Self> {
        self.fragments_mut("reset")?.clear();
        Ok(self)
    }

    // Terminal operations

    /// The pattern source: `(?i)` if case-insensitive, then every fragment in order.
    /// For a locked builder, the wrapped regex's source.
    pub fn build(&self) -> String {
        match &self.mode {
            Mode::Mutable {
                fragments,
                case_insensitive,
            } => {
                let mut pattern = String::new();
                if *case_insensitive {
                    pattern.push_str(CASE_INSENSITIVE_MARKER);
                }
                for fragment in fragments {
                    pattern.push_str(fragment);
                }
                pattern
            }
            Mode::Locked { regex, .. } => regex.as_str().to_string(),
        }
    }

    /// Compile the current pattern. A locked builder hands back its own regex;
    /// a mutable one compiles afresh on every call.
    pub fn compile(&self) -> Result<Regex> {
        match &self.mode {
            Mode::Mutable { .. } => {
                let regex = self
                    .compile_options()
                    .apply(&mut RegexBuilder::new(&self.build()))
                    .build()?;
                Ok(regex)
            }
            Mode::Locked { regex, .. } => Ok(regex.clone()),
        }
    }

    /// True only if the pattern matches the entire input.
    pub fn matches(&self, input: &str) -> Result<bool> {
        match &self.mode {
            Mode::Mutable { .. } => {
                let regex = self.compile()?;
                let full = anchored(regex.as_str(), &self.compile_options())?;
                Ok(full.is_match(input))
            }
            Mode::Locked { full, .. } => Ok(full.is_match(input)),
        }
    }

    pub fn extract(&self) -> String {
        self.build()
    }

    /// Replace every non-overlapping match, leftmost first. `$name` and `${n}`
    /// in `replacement` expand to capture groups.
    pub fn replace_all(&self, input: &str, replacement: &str) -> Result<String> {
        let regex = self.compile()?;
        Ok(regex.replace_all(input, replacement).into_owned())
    }
}

impl fmt::Display for PatternBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.build())
    }
}

fn anchored(source: &str, options: &CompileOptions) -> Result<Regex> {
    // with `x` set, a trailing `#` comment would swallow the closing group
    let pattern = if options.ignore_whitespace {
        format!("\\A(?:{source}\n)\\z")
    } else {
        format!(r"\A(?:{source})\z")
    };
    let regex = options.apply(&mut RegexBuilder::new(&pattern)).build()?;
    Ok(regex)
}
