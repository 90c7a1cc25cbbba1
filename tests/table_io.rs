//! Persistence of the table: compact binary and JSON.

use std::fs;

use jsnv::validator::tables::{
    N_BYTES, N_STATES, State, build_table, load_table_bin_bytes, load_table_json_bytes,
    save_table_bin, save_table_json, table_to_bin_bytes,
};

fn scratch(name: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!("jsnv-tests-{}", std::process::id()));
    let _ = fs::create_dir_all(&dir);
    dir.join(name)
}

#[test]
fn binary_layout_and_reload() {
    let t = build_table();
    let bytes = table_to_bin_bytes(&t);
    assert_eq!(bytes.len(), 16 + N_STATES * N_BYTES * 2);
    assert_eq!(&bytes[..8], b"JSNVTB01");
    assert_eq!(&bytes[8..12], &32u32.to_le_bytes());
    assert_eq!(&bytes[12..16], &128u32.to_le_bytes());

    // root row, '"' -> push(root, string) = 0x0011, little endian
    let at = 16 + (State::Root.idx() * N_BYTES + b'"' as usize) * 2;
    assert_eq!(&bytes[at..at + 2], &[0x11, 0x00]);

    let back = load_table_bin_bytes(&bytes).expect("reload");
    assert!(back == t);
}

#[test]
fn binary_file_roundtrip() {
    let t = build_table();
    let p = scratch("table.bin");
    save_table_bin(&p, &t).unwrap();
    let back = load_table_bin_bytes(&fs::read(&p).unwrap()).unwrap();
    assert!(back == t);
}

#[test]
fn json_file_roundtrip() {
    let t = build_table();
    let p = scratch("table.json");
    save_table_json(&p, &t).unwrap();
    let data = fs::read(&p).unwrap();

    let v: serde_json::Value = serde_json::from_slice(&data).unwrap();
    assert_eq!(v["n_states"], 32);
    assert_eq!(v["n_bytes"], 128);
    assert_eq!(v["rows"].as_array().unwrap().len(), 32);
    assert_eq!(v["rows"][0][34], 0x11);

    let back = load_table_json_bytes(&data).unwrap();
    assert!(back == t);
}

#[test]
fn corrupt_binaries_are_rejected() {
    let good = table_to_bin_bytes(&build_table());

    let mut bad_magic = good.clone();
    bad_magic[0] = b'X';
    assert!(load_table_bin_bytes(&bad_magic).is_err());

    let mut bad_dims = good.clone();
    bad_dims[8] = 33;
    assert!(load_table_bin_bytes(&bad_dims).is_err());

    assert!(load_table_bin_bytes(&good[..good.len() - 1]).is_err());
    assert!(load_table_bin_bytes(&good[..10]).is_err());

    let mut trailing = good.clone();
    trailing.push(0);
    assert!(load_table_bin_bytes(&trailing).is_err());

    // unknown tag 7 in the first cell
    let mut bad_cell = good.clone();
    bad_cell[16] = 0x07;
    let err = load_table_bin_bytes(&bad_cell).unwrap_err();
    assert!(format!("{err:#}").contains("unknown action tag 7"), "{err:#}");
}

#[test]
fn corrupt_json_is_rejected() {
    assert!(load_table_json_bytes(b"{}").is_err());
    assert!(load_table_json_bytes(b"not json").is_err());

    let mut v = serde_json::json!({
        "n_states": 32,
        "n_bytes": 128,
        "rows": vec![vec![0u16; 128]; 32],
    });
    assert!(load_table_json_bytes(v.to_string().as_bytes()).is_ok());

    v["n_states"] = serde_json::json!(31);
    assert!(load_table_json_bytes(v.to_string().as_bytes()).is_err());

    v["n_states"] = serde_json::json!(32);
    v["rows"][3][3] = serde_json::json!(0x0013);
    assert!(load_table_json_bytes(v.to_string().as_bytes()).is_err());
}
