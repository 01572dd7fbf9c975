use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug)]
#[command(
    name = "fluent-regex",
    version,
    about = "Check inputs against regex rules assembled with a fluent pattern builder"
)]
pub struct Args {
    /// Values to check
    pub inputs: Vec<String>,

    /// Rule to check inputs against
    #[arg(short, long, value_name = "NAME", default_value = "username")]
    pub rule: String,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text", value_parser = ["text", "json", "quiet"])]
    pub format: String,

    /// Also read inputs from stdin, one per line
    #[arg(long)]
    pub stdin: bool,

    /// List all rules with their patterns, then exit
    #[arg(long)]
    pub list_rules: bool,

    /// Print the selected rule's pattern, then exit
    #[arg(long)]
    pub print_pattern: bool,

    /// Print each input with every match of the rule's pattern replaced
    #[arg(long, value_name = "REPLACEMENT")]
    pub replace: Option<String>,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}
