// src/bin/gen_tables.rs
// Build the JSON validator table once and write it in every supported form.
// Usage:
//   cargo run --bin gen_tables                # writes into tables/
//   cargo run --bin gen_tables -- /path/out_dir

use std::{
    env, fs,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use jsnv::validator::tables::{
    ALL_STATES, Table, build_table,
    emit::{write_c_array, write_rust_array},
    load_table_bin_bytes, save_table_bin, save_table_json,
};

fn write_text(path: &Path, f: impl FnOnce(&mut BufWriter<fs::File>) -> std::io::Result<()>) -> Result<()> {
    let file = fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(file);
    f(&mut w).with_context(|| format!("write {}", path.display()))?;
    w.flush()?;
    Ok(())
}

fn log_stats(t: &Table) {
    let s = t.stats();
    println!(
        "[gen_tables] cells: invalid={} push={} set_next={} pop={} pop_decr={} | distinct words={}",
        s.invalid, s.push, s.set_next, s.pop, s.pop_decrement, s.distinct_words
    );
    for st in ALL_STATES {
        log::debug!(
            "[gen_tables] {:>20} ({:>7}): {:>3} accepted bytes",
            st.name(),
            st.category(),
            s.accepted_per_state[st.idx()]
        );
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = PathBuf::from(env::args().nth(1).unwrap_or_else(|| "tables".to_string()));
    fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir.display()))?;

    println!("[gen_tables] building JSON validator table…");
    let t = build_table();
    log_stats(&t);

    let bin = out_dir.join("jsnv_tables.bin");
    save_table_bin(&bin, &t)?;

    // reload check
    let reread = fs::read(&bin).with_context(|| format!("read {}", bin.display()))?;
    let back = load_table_bin_bytes(&reread)?;
    anyhow::ensure!(back == t, "binary table does not reload identically");

    save_table_json(&out_dir.join("jsnv_tables.json"), &t)?;
    write_text(&out_dir.join("jsnv_tables.h"), |w| {
        write_c_array(w, "jsnv_action_map", &t)
    })?;
    write_text(&out_dir.join("jsnv_tables.rs"), |w| {
        write_rust_array(w, "JSNV_ACTION_MAP", &t)
    })?;

    println!("[gen_tables] wrote {}/jsnv_tables.{{bin,json,h,rs}}", out_dir.display());
    Ok(())
}
