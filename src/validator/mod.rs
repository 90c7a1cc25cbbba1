// src/validator/mod.rs
pub mod cpu;
pub mod error;
pub mod tables;

pub use cpu::{
    Summary, Validator, ValidatorOptions, is_valid, validate_bytes, validate_reader, validate_with,
};
pub use error::ValidationError;
