// src/dev/mod.rs
// Helpers shared by the fuzz binary and the integration tests.
pub mod generator;
pub mod oracle;
