// src/dev/generator.rs
// Random JSON documents. Valid output stays inside what both the table and
// serde_json accept: ASCII only, no lone surrogate escapes, small exponents.

use rand::Rng;

const MAX_DEPTH: usize = 8;

/// One top-level array of at least `target_len` bytes.
pub fn gen_valid_json<R: Rng>(rng: &mut R, target_len: usize) -> String {
    let mut out = String::with_capacity(target_len + target_len / 8);
    push_ws(rng, &mut out);
    out.push('[');
    let mut first = true;
    while out.len() < target_len || first {
        if !first {
            push_ws(rng, &mut out);
            out.push(',');
        }
        push_ws(rng, &mut out);
        push_value(rng, &mut out, 1);
        first = false;
    }
    push_ws(rng, &mut out);
    out.push(']');
    push_ws(rng, &mut out);
    out
}

/// A single value of any kind, nested at most `MAX_DEPTH` deep.
pub fn gen_value<R: Rng>(rng: &mut R) -> String {
    let mut out = String::new();
    push_value(rng, &mut out, 0);
    out
}

fn push_value<R: Rng>(rng: &mut R, out: &mut String, depth: usize) {
    let roll = if depth >= MAX_DEPTH {
        rng.random_range(0u32..70)
    } else {
        rng.random_range(0u32..100)
    };
    match roll {
        0..=24 => push_string(rng, out),
        25..=49 => push_number(rng, out),
        50..=54 => out.push_str("true"),
        55..=59 => out.push_str("false"),
        60..=69 => out.push_str("null"),
        70..=84 => push_array(rng, out, depth + 1),
        85..=99 => push_object(rng, out, depth + 1),
        _ => unreachable!(),
    }
}

fn push_array<R: Rng>(rng: &mut R, out: &mut String, depth: usize) {
    out.push('[');
    let n = rng.random_range(0..=5);
    for i in 0..n {
        if i > 0 {
            out.push(',');
        }
        push_ws(rng, out);
        push_value(rng, out, depth);
        push_ws(rng, out);
    }
    if n == 0 {
        push_ws(rng, out);
    }
    out.push(']');
}

fn push_object<R: Rng>(rng: &mut R, out: &mut String, depth: usize) {
    out.push('{');
    let n = rng.random_range(0..=4);
    for i in 0..n {
        if i > 0 {
            out.push(',');
        }
        push_ws(rng, out);
        push_string(rng, out);
        push_ws(rng, out);
        out.push(':');
        push_ws(rng, out);
        push_value(rng, out, depth);
        push_ws(rng, out);
    }
    if n == 0 {
        push_ws(rng, out);
    }
    out.push('}');
}

fn push_string<R: Rng>(rng: &mut R, out: &mut String) {
    const PLAIN: &[u8] =
        b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789 !#$%&'()*+,-./:;<=>?@[]^_`{|}~";
    const ESCAPES: &[u8] = b"\"\\/bfnrt";
    // first digit kept below 'd' so no surrogate range is produced
    const HEX_FIRST: &[u8] = b"0123456789abcABC";
    const HEX: &[u8] = b"0123456789abcdefABCDEF";

    out.push('"');
    let len = rng.random_range(0..=12);
    for _ in 0..len {
        match rng.random_range(0u32..10) {
            0 => {
                out.push('\\');
                out.push(ESCAPES[rng.random_range(0..ESCAPES.len())] as char);
            }
            1 => {
                out.push_str("\\u");
                out.push(HEX_FIRST[rng.random_range(0..HEX_FIRST.len())] as char);
                for _ in 0..3 {
                    out.push(HEX[rng.random_range(0..HEX.len())] as char);
                }
            }
            _ => out.push(PLAIN[rng.random_range(0..PLAIN.len())] as char),
        }
    }
    out.push('"');
}

fn push_number<R: Rng>(rng: &mut R, out: &mut String) {
    if rng.random_bool(0.3) {
        out.push('-');
    }
    if rng.random_bool(0.2) {
        out.push('0');
    } else {
        out.push(char::from(b'1' + rng.random_range(0..9u8)));
        for _ in 0..rng.random_range(0..8) {
            push_digit(rng, out);
        }
    }
    if rng.random_bool(0.3) {
        out.push('.');
        for _ in 0..rng.random_range(1..=6) {
            push_digit(rng, out);
        }
    }
    if rng.random_bool(0.2) {
        out.push(if rng.random_bool(0.5) { 'e' } else { 'E' });
        match rng.random_range(0u32..3) {
            0 => out.push('+'),
            1 => out.push('-'),
            _ => {}
        }
        for _ in 0..rng.random_range(1..=2) {
            push_digit(rng, out);
        }
    }
}

fn push_digit<R: Rng>(rng: &mut R, out: &mut String) {
    out.push(char::from(b'0' + rng.random_range(0..10u8)));
}

fn push_ws<R: Rng>(rng: &mut R, out: &mut String) {
    if rng.random_bool(0.6) {
        return;
    }
    let opts: [char; 4] = [' ', '\t', '\r', '\n'];
    let len = rng.random_range(1..=3);
    for _ in 0..len {
        out.push(opts[rng.random_range(0..opts.len())]);
    }
}

/// Copy of `doc` with `edits` bytes overwritten by structural or random ASCII.
/// The replacement alphabet has no DEL and no hex letters `d`/`D`, so the
/// table and serde_json still judge the result the same way.
pub fn mutate<R: Rng>(rng: &mut R, doc: &[u8], edits: usize) -> Vec<u8> {
    const ALPH: &[u8] = b"{}[]:,\"\\ \t\n\r0123456789-+.eEtrufalsn xyz/\x00\x01\x1f";
    let mut out = doc.to_vec();
    if out.is_empty() {
        return out;
    }
    for _ in 0..edits {
        let i = rng.random_range(0..out.len());
        out[i] = ALPH[rng.random_range(0..ALPH.len())];
    }
    out
}
