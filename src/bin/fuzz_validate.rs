// src/bin/fuzz_validate.rs
// Generate random valid documents plus mutated copies, run them through the
// table validator and compare each verdict with serde_json.
//   FUZZ_ITERS=<n>    documents (default 200)
//   FUZZ_LEN=<bytes>  target size per document (default 256)
//   FUZZ_SEED=<u64>   (default 42)
//   FUZZ_MUTATE=<n>   mutated copies per document (default 4)
//   FUZZ_SAVE=1 and FUZZ_DIR=... save mismatching cases
//   FUZZ_INPUT=path   replay a single saved case

use std::{
    fs,
    path::{Path, PathBuf},
    time::Instant,
};

use jsnv::dev::{
    generator::{gen_valid_json, mutate},
    oracle::{Mismatch, Verdict, judge},
};
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;

fn env_u64(name: &str, default: u64) -> u64 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(default)
}

fn save_case(dir: &Path, seed: u64, n: usize, doc: &[u8]) -> PathBuf {
    let path = dir.join(format!("mismatch_s{seed}_{n}.json"));
    if let Err(e) = fs::write(&path, doc) {
        eprintln!("[save] failed to write {}: {e}", path.display());
    }
    path
}

fn main() {
    env_logger::init();

    if let Ok(path) = std::env::var("FUZZ_INPUT") {
        eprintln!("[replay] reading {path}");
        let doc = fs::read(&path).expect("failed to read FUZZ_INPUT");
        match judge(&doc).mismatch {
            None => eprintln!("[replay] verdicts agree"),
            Some(m) => {
                eprintln!("[replay] MISMATCH: ours={} serde={}", m.ours, m.serde);
                std::process::exit(1);
            }
        }
        return;
    }

    let iters = env_usize("FUZZ_ITERS", 200);
    let len = env_usize("FUZZ_LEN", 256);
    let seed = env_u64("FUZZ_SEED", 42);
    let mutations = env_usize("FUZZ_MUTATE", 4);
    let save_cases = std::env::var("FUZZ_SAVE").ok().as_deref() == Some("1");
    let out_dir = PathBuf::from(std::env::var("FUZZ_DIR").unwrap_or_else(|_| "fuzz-cases".into()));

    eprintln!("[fuzz] iters={iters} len={len} seed={seed} mutate={mutations}");

    // Generate serially so a seed always yields the same corpus.
    let t0 = Instant::now();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut corpus: Vec<Vec<u8>> = Vec::with_capacity(iters * (mutations + 1));
    for _ in 0..iters {
        let doc = gen_valid_json(&mut rng, len).into_bytes();
        for _ in 0..mutations {
            let edits = rng.random_range(1..=3);
            corpus.push(mutate(&mut rng, &doc, edits));
        }
        corpus.push(doc);
    }
    let total_bytes: usize = corpus.iter().map(Vec::len).sum();
    eprintln!(
        "[fuzz] generated {} docs ({} bytes) in {} ms",
        corpus.len(),
        total_bytes,
        t0.elapsed().as_millis()
    );

    let t1 = Instant::now();
    let verdicts: Vec<Verdict> = corpus.par_iter().map(|d| judge(d)).collect();
    let accepted = verdicts.iter().filter(|v| v.accepted).count();
    let mismatches: Vec<Mismatch> = verdicts.into_iter().filter_map(|v| v.mismatch).collect();
    eprintln!(
        "[fuzz] judged in {} ms: accepted={} rejected={} mismatches={}",
        t1.elapsed().as_millis(),
        accepted,
        corpus.len() - accepted,
        mismatches.len()
    );

    if mismatches.is_empty() {
        eprintln!("[fuzz] all verdicts matched serde_json ✅");
        return;
    }

    if save_cases {
        if let Err(e) = fs::create_dir_all(&out_dir) {
            eprintln!("error: failed to create {}: {e}", out_dir.display());
            std::process::exit(1);
        }
    }
    for (i, m) in mismatches.iter().take(10).enumerate() {
        eprintln!(
            "[fuzz] #{i}: ours={} | serde={} | doc={:?}",
            m.ours,
            m.serde,
            String::from_utf8_lossy(&m.doc)
        );
        if save_cases {
            let p = save_case(&out_dir, seed, i, &m.doc);
            eprintln!("[save] wrote {}", p.display());
        }
    }
    std::process::exit(1);
}
