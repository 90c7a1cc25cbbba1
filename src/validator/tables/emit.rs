// src/validator/tables/emit.rs
// Array-literal text for embedding the table in a host program.

use std::io::{self, Write};

use super::{
    Table,
    states::{N_BYTES, N_STATES},
};

const PER_LINE: usize = 16;

fn write_cells<W: Write>(w: &mut W, t: &Table) -> io::Result<()> {
    let total = N_STATES * N_BYTES;
    for (i, word) in t.words().enumerate() {
        if i % PER_LINE == 0 {
            write!(w, "\n    ")?;
        }
        write!(w, "0x{word:04x}")?;
        if i + 1 != total {
            write!(w, ", ")?;
        }
    }
    Ok(())
}

/// `static const unsigned short NAME[32][128] = {...};`
pub fn write_c_array<W: Write>(w: &mut W, name: &str, t: &Table) -> io::Result<()> {
    write!(
        w,
        "static const unsigned short {name}[{N_STATES}][{N_BYTES}] = {{"
    )?;
    write_cells(w, t)?;
    writeln!(w, "}};")
}

/// `pub const NAME: [[u16; 128]; 32] = [...];`, one bracketed row per state.
pub fn write_rust_array<W: Write>(w: &mut W, name: &str, t: &Table) -> io::Result<()> {
    writeln!(w, "pub const {name}: [[u16; {N_BYTES}]; {N_STATES}] = [")?;
    for row in t.rows() {
        write!(w, "    [")?;
        for (i, word) in row.iter().enumerate() {
            if i % PER_LINE == 0 {
                write!(w, "\n        ")?;
            }
            write!(w, "0x{word:04x},")?;
            if (i + 1) % PER_LINE != 0 {
                write!(w, " ")?;
            }
        }
        writeln!(w, "\n    ],")?;
    }
    writeln!(w, "];")
}
