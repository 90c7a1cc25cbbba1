// src/validator/tables/io.rs
use std::{
    io::{BufWriter, Write},
    path::Path,
    time::Instant,
};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use super::{
    Table,
    action::Action,
    states::{N_BYTES, N_STATES, State},
};

// -------------------- JSON (de)serialization --------------------

#[serde_as]
#[derive(Serialize, Deserialize)]
struct TableDisk {
    n_states: u32,
    n_bytes: u32,
    #[serde_as(as = "[[_; N_BYTES]; N_STATES]")]
    rows: [[u16; N_BYTES]; N_STATES],
}

impl From<&Table> for TableDisk {
    fn from(t: &Table) -> Self {
        Self {
            n_states: N_STATES as u32,
            n_bytes: N_BYTES as u32,
            rows: t.rows,
        }
    }
}

impl TableDisk {
    fn into_table(self) -> Result<Table> {
        check_dims(self.n_states, self.n_bytes)?;
        let t = Table::from_rows(self.rows);
        check_cells(&t)?;
        Ok(t)
    }
}

pub fn save_table_json(path: &Path, t: &Table) -> Result<()> {
    let f = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer(&mut w, &TableDisk::from(t))?;
    w.flush()?;
    Ok(())
}

pub fn load_table_json_bytes(data: &[u8]) -> Result<Table> {
    let disk: TableDisk =
        serde_json::from_slice(data).context("failed to parse table JSON")?;
    disk.into_table()
}

// -------------------- Compact binary --------------------
//   magic: 8 bytes = "JSNVTB01"
//   u32:   n_states
//   u32:   n_bytes
//   u16:   rows[n_states][n_bytes], row-major

const BIN_MAGIC: &[u8; 8] = b"JSNVTB01";
const HEADER_LEN: usize = 8 + 4 + 4;
const BIN_LEN: usize = HEADER_LEN + N_STATES * N_BYTES * 2;

pub fn table_to_bin_bytes(t: &Table) -> Vec<u8> {
    let mut out = Vec::with_capacity(BIN_LEN);
    out.extend_from_slice(BIN_MAGIC);
    out.extend_from_slice(&(N_STATES as u32).to_le_bytes());
    out.extend_from_slice(&(N_BYTES as u32).to_le_bytes());
    for w in t.words() {
        out.extend_from_slice(&w.to_le_bytes());
    }
    out
}

pub fn save_table_bin(path: &Path, t: &Table) -> Result<()> {
    let instant = Instant::now();
    let f = std::fs::File::create(path)
        .with_context(|| format!("create {}", path.display()))?;
    let mut w = BufWriter::new(f);
    w.write_all(&table_to_bin_bytes(t))?;
    w.flush()?;
    log::debug!(
        "saved table to {} in {} us",
        path.display(),
        instant.elapsed().as_micros()
    );
    Ok(())
}

#[inline]
fn take_u32(buf: &mut &[u8]) -> Result<u32> {
    if buf.len() < 4 {
        bail!("truncated u32");
    }
    let mut le = [0u8; 4];
    le.copy_from_slice(&buf[..4]);
    *buf = &buf[4..];
    Ok(u32::from_le_bytes(le))
}

#[inline]
fn take_u16(buf: &mut &[u8]) -> Result<u16> {
    if buf.len() < 2 {
        bail!("truncated u16");
    }
    let mut le = [0u8; 2];
    le.copy_from_slice(&buf[..2]);
    *buf = &buf[2..];
    Ok(u16::from_le_bytes(le))
}

pub fn load_table_bin_bytes(mut data: &[u8]) -> Result<Table> {
    if data.len() < HEADER_LEN {
        bail!("table bin too short ({} bytes)", data.len());
    }
    if &data[..8] != BIN_MAGIC {
        bail!("bad magic in table .bin");
    }
    data = &data[8..];

    let n_states = take_u32(&mut data)?;
    let n_bytes = take_u32(&mut data)?;
    check_dims(n_states, n_bytes)?;

    let mut rows = [[0u16; N_BYTES]; N_STATES];
    for row in rows.iter_mut() {
        for cell in row.iter_mut() {
            *cell = take_u16(&mut data)?;
        }
    }
    if !data.is_empty() {
        log::warn!("{} trailing bytes after table data", data.len());
        bail!("trailing bytes after table data");
    }

    let t = Table::from_rows(rows);
    check_cells(&t)?;
    log::debug!("loaded table: {:?}", t.stats());
    Ok(t)
}

fn check_dims(n_states: u32, n_bytes: u32) -> Result<()> {
    if n_states as usize != N_STATES || n_bytes as usize != N_BYTES {
        bail!(
            "table has {}x{} cells but code expects {}x{}",
            n_states,
            n_bytes,
            N_STATES,
            N_BYTES
        );
    }
    Ok(())
}

fn check_cells(t: &Table) -> Result<()> {
    for (s, row) in t.rows.iter().enumerate() {
        for (b, &w) in row.iter().enumerate() {
            Action::unpack(w).with_context(|| {
                let state = State::from_index(s as u8).map_or("?", State::name);
                format!("bad cell [{state}][0x{b:02X}] = 0x{w:04x}")
            })?;
        }
    }
    Ok(())
}
