// src/validator/tables/mod.rs
pub mod action;
pub mod build;
pub mod emit;
pub mod io;
pub mod states;

use std::sync::OnceLock;

use hashbrown::HashSet;

pub use action::{Action, DecodeError};
pub use build::build_table;
pub use io::{
    load_table_bin_bytes, load_table_json_bytes, save_table_bin, save_table_json,
    table_to_bin_bytes,
};
pub use states::{ALL_STATES, Category, N_BYTES, N_STATES, State};

/// The packed transition table: one row per state, one cell per ASCII byte.
#[derive(Clone, PartialEq, Eq)]
pub struct Table {
    pub(crate) rows: [[u16; N_BYTES]; N_STATES],
}

impl Table {
    /// All cells `Invalid`.
    pub(crate) const fn empty() -> Self {
        Self {
            rows: [[0u16; N_BYTES]; N_STATES],
        }
    }

    pub fn from_rows(rows: [[u16; N_BYTES]; N_STATES]) -> Self {
        Self { rows }
    }

    /// `None` for bytes outside 0..128.
    #[inline]
    pub fn word(&self, state: State, byte: u8) -> Option<u16> {
        self.rows[state.idx()].get(byte as usize).copied()
    }

    #[inline]
    pub fn action(&self, state: State, byte: u8) -> Option<Result<Action, DecodeError>> {
        self.word(state, byte).map(Action::unpack)
    }

    pub fn rows(&self) -> &[[u16; N_BYTES]; N_STATES] {
        &self.rows
    }

    /// Row-major.
    pub fn words(&self) -> impl Iterator<Item = u16> + '_ {
        self.rows.iter().flat_map(|r| r.iter().copied())
    }

    pub fn stats(&self) -> TableStats {
        let mut per_tag = [0usize; 5];
        let mut undecodable = 0usize;
        let mut distinct = HashSet::new();
        let mut accepted_per_state = [0usize; N_STATES];

        for (s, row) in self.rows.iter().enumerate() {
            for &w in row {
                match Action::unpack(w) {
                    Ok(_) => per_tag[Action::tag_of(w) as usize] += 1,
                    Err(_) => undecodable += 1,
                }
                if w != 0 {
                    accepted_per_state[s] += 1;
                }
                distinct.insert(w);
            }
        }

        TableStats {
            invalid: per_tag[action::TAG_INVALID as usize],
            push: per_tag[action::TAG_PUSH as usize],
            set_next: per_tag[action::TAG_SET_NEXT as usize],
            pop: per_tag[action::TAG_POP as usize],
            pop_decrement: per_tag[action::TAG_POP_DECR as usize],
            undecodable,
            distinct_words: distinct.len(),
            accepted_per_state,
        }
    }
}

impl core::fmt::Debug for Table {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Table")
            .field("n_states", &N_STATES)
            .field("n_bytes", &N_BYTES)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableStats {
    pub invalid: usize,
    pub push: usize,
    pub set_next: usize,
    pub pop: usize,
    pub pop_decrement: usize,
    /// Cells `Action::unpack` rejects; zero for any table that loads.
    pub undecodable: usize,
    pub distinct_words: usize,
    pub accepted_per_state: [usize; N_STATES],
}

/// Process-wide table, built on first use.
pub fn table() -> &'static Table {
    static TABLE: OnceLock<Table> = OnceLock::new();
    TABLE.get_or_init(build_table)
}
