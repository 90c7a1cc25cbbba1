// src/main.rs
// Validate JSON files (or stdin) with the packed table.
// Usage:
//   cargo run -- a.json b.json
//   cat a.json | cargo run
//   JSNV_MAX_DEPTH=64 JSNV_CONCATENATED=1 cargo run -- stream.json

use std::{
    fs,
    io::{self, Read},
    process::ExitCode,
};

use anyhow::{Context, Result};
use jsnv::validator::{ValidatorOptions, tables::table, validate_reader};

fn check(label: &str, input: impl Read, opts: ValidatorOptions) -> Result<bool> {
    let verdict =
        validate_reader(table(), input, opts).with_context(|| format!("read {label}"))?;
    match verdict {
        Ok(s) => {
            println!(
                "{label}: ok ({} bytes, {} value(s), depth {})",
                s.bytes, s.values, s.max_depth_seen
            );
            Ok(true)
        }
        Err(e) => {
            println!("{label}: {e}");
            Ok(false)
        }
    }
}

fn run() -> Result<bool> {
    let opts = ValidatorOptions::from_env();
    log::debug!("options: {opts:?}");

    let paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        return check("<stdin>", io::stdin().lock(), opts);
    }

    let mut all_ok = true;
    for p in &paths {
        let f = fs::File::open(p).with_context(|| format!("open {p}"))?;
        all_ok &= check(p, f, opts)?;
    }
    Ok(all_ok)
}

fn main() -> ExitCode {
    env_logger::init();
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}
