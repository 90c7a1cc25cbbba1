// src/dev/oracle.rs
// Cross-check of the table validator against serde_json's syntax check.

use crate::validator::{ValidatorOptions, tables::table, validate_with};

#[derive(Debug, Clone)]
pub struct Mismatch {
    pub doc: Vec<u8>,
    pub ours: String,
    pub serde: String,
}

/// What the table said about one document, and where serde_json disagreed.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub accepted: bool,
    pub mismatch: Option<Mismatch>,
}

pub fn serde_verdict(doc: &[u8]) -> Result<(), String> {
    serde_json::from_slice::<serde::de::IgnoredAny>(doc)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Validates `doc` once with the shared table and once with serde_json.
pub fn judge(doc: &[u8]) -> Verdict {
    let ours = validate_with(table(), doc, ValidatorOptions::default());
    let theirs = serde_verdict(doc);
    let accepted = ours.is_ok();
    if accepted == theirs.is_ok() {
        return Verdict {
            accepted,
            mismatch: None,
        };
    }
    let mismatch = Mismatch {
        doc: doc.to_vec(),
        ours: match ours {
            Ok(s) => format!("accepted {s:?}"),
            Err(e) => e.to_string(),
        },
        serde: match theirs {
            Ok(()) => "accepted".into(),
            Err(e) => e,
        },
    };
    Verdict {
        accepted,
        mismatch: Some(mismatch),
    }
}
