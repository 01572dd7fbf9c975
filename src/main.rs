use std::process;

use clap::Parser;

use fluent_regex::cli::Args;

fn main() {
    let args = Args::parse();
    match fluent_regex::run(args) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e:#}");
            process::exit(3);
        }
    }
}
