// src/validator/tables/action.rs
//
// Packed cell layout (u16):
//   bits 10..=15  push state (Push only)
//   bits  4..=9   next state (Push / SetNext)
//   bits  0..=3   tag

use thiserror::Error;

use super::states::State;

pub const TAG_INVALID: u16 = 0;
pub const TAG_PUSH: u16 = 1;
pub const TAG_SET_NEXT: u16 = 2;
pub const TAG_POP: u16 = 3;
pub const TAG_POP_DECR: u16 = 4;

pub const TAG_MASK: u16 = 0x000F;
pub const STATE_MASK: u16 = 0x003F;
pub const NEXT_SHIFT: u32 = 4;
pub const PUSH_SHIFT: u32 = 10;

/// What a driver does with the byte it is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Byte not accepted here.
    Invalid,
    /// Save `push` on the stack and continue in `next`.
    Push { push: State, next: State },
    /// Same-depth move.
    SetNext(State),
    /// Value complete; pop the return state and consume the byte.
    Pop,
    /// Value complete; pop the return state and hand it the same byte again.
    PopDecrement,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown action tag {0}")]
    UnknownTag(u8),
    #[error("state field {0} out of range")]
    StateOutOfRange(u8),
    #[error("stray state bits in word 0x{0:04x}")]
    StrayBits(u16),
}

#[inline]
pub const fn encode_push(push: State, next: State) -> u16 {
    ((push as u16) << PUSH_SHIFT) | ((next as u16) << NEXT_SHIFT) | TAG_PUSH
}

#[inline]
pub const fn encode_next(next: State) -> u16 {
    ((next as u16) << NEXT_SHIFT) | TAG_SET_NEXT
}

#[inline]
pub const fn encode_pop() -> u16 {
    TAG_POP
}

#[inline]
pub const fn encode_pop_decr() -> u16 {
    TAG_POP_DECR
}

impl Action {
    pub const fn pack(self) -> u16 {
        match self {
            Action::Invalid => TAG_INVALID,
            Action::Push { push, next } => encode_push(push, next),
            Action::SetNext(next) => encode_next(next),
            Action::Pop => encode_pop(),
            Action::PopDecrement => encode_pop_decr(),
        }
    }

    pub fn unpack(word: u16) -> Result<Action, DecodeError> {
        let tag = word & TAG_MASK;
        let next_bits = ((word >> NEXT_SHIFT) & STATE_MASK) as u8;
        let push_bits = ((word >> PUSH_SHIFT) & STATE_MASK) as u8;

        let state = |bits: u8| State::from_index(bits).ok_or(DecodeError::StateOutOfRange(bits));

        match tag {
            TAG_INVALID | TAG_POP | TAG_POP_DECR => {
                if word & !TAG_MASK != 0 {
                    return Err(DecodeError::StrayBits(word));
                }
                Ok(match tag {
                    TAG_INVALID => Action::Invalid,
                    TAG_POP => Action::Pop,
                    _ => Action::PopDecrement,
                })
            }
            TAG_PUSH => Ok(Action::Push {
                push: state(push_bits)?,
                next: state(next_bits)?,
            }),
            TAG_SET_NEXT => {
                if push_bits != 0 {
                    return Err(DecodeError::StrayBits(word));
                }
                Ok(Action::SetNext(state(next_bits)?))
            }
            other => Err(DecodeError::UnknownTag(other as u8)),
        }
    }

    /// Tag without decoding the state fields.
    #[inline]
    pub const fn tag_of(word: u16) -> u16 {
        word & TAG_MASK
    }
}
