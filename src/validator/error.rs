// src/validator/error.rs
use thiserror::Error;

use super::tables::State;

fn show(b: &u8) -> String {
    let b = *b;
    if b.is_ascii_graphic() {
        format!("'{}'", b as char)
    } else {
        format!("0x{b:02X}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("unexpected byte {} at offset {offset} in state {state} ({})", show(.byte), .state.category())]
    InvalidTransition { offset: usize, byte: u8, state: State },

    #[error("unexpected end of input at offset {offset} in state {state} ({})", .state.category())]
    UnexpectedEnd { offset: usize, state: State },

    #[error("non-ASCII byte 0x{byte:02X} at offset {offset}")]
    NonAscii { offset: usize, byte: u8 },

    #[error("nesting deeper than {limit} at offset {offset}")]
    DepthExceeded { offset: usize, limit: usize },

    #[error("second top-level value at offset {offset}")]
    TrailingValue { offset: usize },

    #[error("empty document")]
    EmptyDocument,

    #[error("pop with empty stack at offset {offset} in state {state}")]
    StackUnderflow { offset: usize, state: State },

    #[error("undecodable cell 0x{word:04x} for byte {} in state {state} at offset {offset}", show(.byte))]
    CorruptCell {
        offset: usize,
        state: State,
        byte: u8,
        word: u16,
    },
}

impl ValidationError {
    pub fn offset(&self) -> Option<usize> {
        use ValidationError::*;
        match *self {
            InvalidTransition { offset, .. }
            | UnexpectedEnd { offset, .. }
            | NonAscii { offset, .. }
            | DepthExceeded { offset, .. }
            | TrailingValue { offset }
            | StackUnderflow { offset, .. }
            | CorruptCell { offset, .. } => Some(offset),
            EmptyDocument => None,
        }
    }

    /// State the driver was in, when there is one.
    pub fn state(&self) -> Option<State> {
        use ValidationError::*;
        match *self {
            InvalidTransition { state, .. }
            | UnexpectedEnd { state, .. }
            | StackUnderflow { state, .. }
            | CorruptCell { state, .. } => Some(state),
            _ => None,
        }
    }
}
