//! Table-driven JSON syntax validation.
//!
//! [`validator::tables`] builds a 32 x 128 table of packed 16-bit actions that
//! recognizes JSON byte-by-byte with an external return stack;
//! [`validator::cpu`] walks that table.

pub mod dev;
pub mod validator;

pub use validator::{
    ValidationError, Validator, ValidatorOptions, is_valid,
    tables::{Action, State, Table, build_table, table},
    validate_bytes,
};
