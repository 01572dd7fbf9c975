pub mod builder;
pub mod checker;
pub mod cli;
pub mod config;
pub mod error;
pub mod formatter;
pub mod report;
pub mod rule;
pub mod validator;

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::{Context, Result};

pub use builder::{CompileOptions, PatternBuilder};
pub use error::PatternError;
pub use validator::CommonValidator;

use checker::{check_inputs, read_inputs};
use cli::Args;
use config::load_config;
use formatter::create_formatter;
use rule::registry::RuleRegistry;

/// Run the checker. Returns the exit code: 0 = all valid, 1 = some invalid,
/// 2 = unknown rule.
pub fn run(args: Args) -> Result<i32> {
    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    execute(args, stdin.lock(), &mut stdout.lock())
}

/// [`run`] with explicit input and output streams. `input` is only read when
/// `--stdin` is set.
pub fn execute(args: Args, input: impl BufRead, out: &mut dyn Write) -> Result<i32> {
    let config_start = Instant::now();
    let config = load_config(args.config.as_deref())?;
    let registry = RuleRegistry::with_config(&config)?;
    let config_elapsed = config_start.elapsed();

    if args.debug {
        eprintln!("debug: config loading total: {config_elapsed:.0?}");
        match config.path() {
            Some(path) => eprintln!("debug: config loaded from: {}", path.display()),
            None => eprintln!("debug: no config file found"),
        }
        eprintln!("debug: {} rules registered", registry.len());
    }

    // --list-rules: print every rule and exit
    if args.list_rules {
        for rule in registry.rules() {
            writeln!(
                out,
                "{}\t{}\t{}",
                rule.name(),
                rule.pattern().extract(),
                rule.description()
            )?;
        }
        return Ok(0);
    }

    let Some(rule) = registry.get(&args.rule) else {
        eprintln!(
            "error: unknown rule `{}` (known: {})",
            args.rule,
            registry.names().join(", ")
        );
        return Ok(2);
    };

    if args.debug {
        eprintln!("debug: rule {} pattern: {}", rule.name(), rule.pattern().extract());
    }

    if args.print_pattern {
        writeln!(out, "{}", rule.pattern().extract())?;
        return Ok(0);
    }

    let mut inputs = args.inputs;
    if args.stdin {
        inputs.extend(read_inputs(input)?);
    }

    // --replace: rewrite inputs instead of validating them
    if let Some(ref replacement) = args.replace {
        for text in &inputs {
            let replaced = rule
                .pattern()
                .replace_all(text, replacement)
                .with_context(|| format!("rule `{}` failed on {text:?}", rule.name()))?;
            writeln!(out, "{replaced}")?;
        }
        return Ok(0);
    }

    let check_start = Instant::now();
    let verdicts = check_inputs(rule, &inputs)?;
    if args.debug {
        eprintln!(
            "debug: {} inputs checked in {:.0?}",
            verdicts.len(),
            check_start.elapsed()
        );
    }

    create_formatter(&args.format).format_to(&verdicts, out);

    if verdicts.iter().all(|v| v.valid) {
        Ok(0)
    } else {
        Ok(1)
    }
}
