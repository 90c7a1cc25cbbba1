// src/validator/cpu.rs
// Table-walking validator on CPU. Follows the consumer contract of the packed
// table exactly and serves as the oracle for anything else that consumes it.

use std::io::{self, Read};

use super::{
    error::ValidationError,
    tables::{Action, State, Table, table},
};

pub const DEFAULT_MAX_DEPTH: usize = 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidatorOptions {
    /// Upper bound on the return stack length.
    pub max_depth: usize,
    /// Accept a stream of top-level values instead of exactly one.
    pub allow_concatenated: bool,
}

impl Default for ValidatorOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_concatenated: false,
        }
    }
}

impl ValidatorOptions {
    /// `JSNV_MAX_DEPTH`, `JSNV_CONCATENATED=1`.
    pub fn from_env() -> Self {
        Self::from_vars(|k| std::env::var(k).ok())
    }

    /// Same as `from_env`, reading settings through `var`.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut o = Self::default();
        if let Some(s) = var("JSNV_MAX_DEPTH") {
            match s.trim().parse::<usize>() {
                Ok(d) => o.max_depth = d,
                Err(e) => log::warn!(
                    "ignoring JSNV_MAX_DEPTH={s:?} ({e}); using {}",
                    o.max_depth
                ),
            }
        }
        o.allow_concatenated = var("JSNV_CONCATENATED").as_deref() == Some("1");
        o
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub bytes: usize,
    pub values: usize,
    pub max_depth_seen: usize,
}

/// Streaming validator: feed chunks, then `finish`.
pub struct Validator<'t> {
    table: &'t Table,
    opts: ValidatorOptions,
    state: State,
    stack: Vec<State>,
    offset: usize,
    values: usize,
    max_depth_seen: usize,
    failed: Option<ValidationError>,
}

impl Validator<'static> {
    pub fn new() -> Self {
        Self::with_table(table(), ValidatorOptions::default())
    }
}

impl Default for Validator<'static> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'t> Validator<'t> {
    pub fn with_table(table: &'t Table, opts: ValidatorOptions) -> Self {
        Self {
            table,
            opts,
            state: State::Root,
            stack: Vec::new(),
            offset: 0,
            values: 0,
            max_depth_seen: 0,
            failed: None,
        }
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn feed(&mut self, chunk: &[u8]) -> Result<(), ValidationError> {
        if let Some(e) = &self.failed {
            return Err(e.clone());
        }
        for &b in chunk {
            if let Err(e) = self.step(b, false) {
                self.failed = Some(e.clone());
                return Err(e);
            }
            self.offset += 1;
        }
        Ok(())
    }

    /// Submits the end-of-input marker.
    pub fn finish(mut self) -> Result<Summary, ValidationError> {
        if let Some(e) = self.failed.take() {
            return Err(e);
        }
        self.step(0, true)?;
        if self.values == 0 {
            return Err(ValidationError::EmptyDocument);
        }
        Ok(Summary {
            bytes: self.offset,
            values: self.values,
            max_depth_seen: self.max_depth_seen,
        })
    }

    fn accepting(&self) -> bool {
        self.state == State::Root && self.stack.is_empty()
    }

    fn step(&mut self, byte: u8, at_end: bool) -> Result<(), ValidationError> {
        let offset = self.offset;
        if byte >= 0x80 {
            return Err(ValidationError::NonAscii { offset, byte });
        }

        // PopDecrement re-submits the byte; every pass shrinks the stack.
        loop {
            if at_end && self.accepting() {
                return Ok(());
            }

            let state = self.state;
            let word = self.table.rows[state.idx()][byte as usize];
            let action = Action::unpack(word).map_err(|_| ValidationError::CorruptCell {
                offset,
                state,
                byte,
                word,
            })?;

            match action {
                Action::Invalid if at_end => {
                    return Err(ValidationError::UnexpectedEnd { offset, state });
                }
                Action::Invalid => {
                    return Err(ValidationError::InvalidTransition {
                        offset,
                        byte,
                        state,
                    });
                }
                Action::Push { push, next } => {
                    if state == State::Root
                        && self.stack.is_empty()
                        && self.values > 0
                        && !self.opts.allow_concatenated
                    {
                        return Err(ValidationError::TrailingValue { offset });
                    }
                    if self.stack.len() >= self.opts.max_depth {
                        return Err(ValidationError::DepthExceeded {
                            offset,
                            limit: self.opts.max_depth,
                        });
                    }
                    self.stack.push(push);
                    self.max_depth_seen = self.max_depth_seen.max(self.stack.len());
                    self.state = next;
                    break;
                }
                Action::SetNext(next) => {
                    self.state = next;
                    break;
                }
                Action::Pop => {
                    self.pop(offset)?;
                    break;
                }
                Action::PopDecrement => {
                    self.pop(offset)?;
                }
            }
        }

        if at_end && !self.accepting() {
            return Err(ValidationError::UnexpectedEnd {
                offset,
                state: self.state,
            });
        }
        Ok(())
    }

    fn pop(&mut self, offset: usize) -> Result<(), ValidationError> {
        let Some(ret) = self.stack.pop() else {
            return Err(ValidationError::StackUnderflow {
                offset,
                state: self.state,
            });
        };
        self.state = ret;
        if self.stack.is_empty() {
            self.values += 1;
        }
        Ok(())
    }
}

/// Validates a complete document against the built-in table.
pub fn validate_bytes(input: &[u8]) -> Result<Summary, ValidationError> {
    validate_with(table(), input, ValidatorOptions::default())
}

pub fn validate_with(
    table: &Table,
    input: &[u8],
    opts: ValidatorOptions,
) -> Result<Summary, ValidationError> {
    let mut v = Validator::with_table(table, opts);
    v.feed(input)?;
    v.finish()
}

/// Bytes handed to the validator per read in `validate_reader`.
pub const READ_CHUNK: usize = 64 * 1024;

/// Streams `input` through a validator. The outer error is I/O only;
/// `Interrupted` reads are retried.
pub fn validate_reader<R: Read>(
    table: &Table,
    mut input: R,
    opts: ValidatorOptions,
) -> io::Result<Result<Summary, ValidationError>> {
    let mut v = Validator::with_table(table, opts);
    let mut buf = vec![0u8; READ_CHUNK];
    loop {
        let n = match input.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if let Err(e) = v.feed(&buf[..n]) {
            return Ok(Err(e));
        }
    }
    Ok(v.finish())
}

pub fn is_valid(input: &[u8]) -> bool {
    validate_bytes(input).is_ok()
}
