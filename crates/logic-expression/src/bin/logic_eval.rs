//! `logic-eval` — evaluate a logic-expression program document.
//!
//! Usage:
//!   logic-eval [--coverage] [FILE]
//!
//! The document is read from FILE, or from stdin when FILE is omitted. By
//! default the strict evaluator runs and the resulting value is printed as
//! JSON. With `--coverage` a diagnostic pass runs instead and the display tree,
//! annotated with coverage, is printed together with any swallowed failures.
//!
//! Set `RUST_LOG=logic_expression=debug` to log diagnostic details to stderr.

use logic_expression::{Program, ProgramError};
use serde_json::json;
use std::io::{self, Read, Write};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut coverage = false;
    let mut file = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--coverage" => coverage = true,
            "-h" | "--help" => {
                println!("Usage: logic-eval [--coverage] [FILE]");
                return;
            }
            _ if file.is_none() => file = Some(arg),
            _ => {
                eprintln!("Unexpected argument: {arg}");
                std::process::exit(1);
            }
        }
    }

    match run(file.as_deref(), coverage) {
        Ok(output) => {
            let mut stdout = io::stdout();
            if let Err(e) = writeln!(stdout, "{output}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

fn run(file: Option<&str>, coverage: bool) -> Result<String, ProgramError> {
    let program = match file {
        Some(path) => Program::from_path(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            Program::from_json_str(&buf)?
        }
    };

    let output = if coverage {
        let (traced, tree) = program.coverage_tree();
        json!({
            "value": traced.value,
            "tree": tree,
            "failures": traced.failures,
        })
    } else {
        program.run()?
    };
    Ok(serde_json::to_string_pretty(&output)?)
}
