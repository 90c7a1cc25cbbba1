// src/validator/tables/build.rs
use std::time::Instant;

use super::{
    Table,
    action::{encode_next, encode_pop, encode_pop_decr, encode_push},
    states::State::{self, *},
};

const WHITESPACE: &[u8] = b" \n\t\r";
const DIGITS: &[u8] = b"0123456789";
const DIGITS_1_9: &[u8] = b"123456789";
const HEX: &[u8] = b"0123456789abcdefABCDEF";
const SIMPLE_ESCAPES: &[u8] = b"\"\\/bfnrt";
/// Bytes that end a number and must be re-examined by the enclosing state.
/// `\0` stands for end of input.
const NUMBER_DELIMITERS: &[u8] = b"\0,]}";

/// Builder over an all-`Invalid` table. Every helper only ever writes cells.
struct Builder {
    t: Table,
}

impl Builder {
    fn new() -> Self {
        Self { t: Table::empty() }
    }

    fn set(&mut self, from: State, bytes: &[u8], word: u16) {
        for &b in bytes {
            self.t.rows[from.idx()][b as usize] = word;
        }
    }

    fn set_range(&mut self, from: State, lo: u8, hi: u8, word: u16) {
        for b in lo..=hi {
            self.t.rows[from.idx()][b as usize] = word;
        }
    }

    fn next(&mut self, from: State, bytes: &[u8], to: State) {
        self.set(from, bytes, encode_next(to));
    }

    /// Whitespace is consumed without moving.
    fn skip_ws(&mut self, s: State) {
        self.next(s, WHITESPACE, s);
    }

    /// Start of any value; `ret` is where control lands once it completes.
    fn value(&mut self, s: State, ret: State) {
        self.set(s, b"\"", encode_push(ret, String));
        self.set(s, b"t", encode_push(ret, TrueT));
        self.set(s, b"f", encode_push(ret, FalseF));
        self.set(s, b"n", encode_push(ret, NullN));
        self.set(s, b"-", encode_push(ret, NumberMinus));
        self.set(s, b"0", encode_push(ret, NumberZero));
        self.set(s, DIGITS_1_9, encode_push(ret, NumberInt));
        self.set(s, b"{", encode_push(ret, ObjectOpen));
        self.set(s, b"[", encode_push(ret, ArrayOpen));
    }

    /// Delimiters pop and get re-examined; whitespace pops and is consumed.
    fn number_end(&mut self, s: State) {
        self.set(s, NUMBER_DELIMITERS, encode_pop_decr());
        self.set(s, WHITESPACE, encode_pop());
    }

    fn literal(&mut self, chain: &[(State, u8, State)]) {
        for &(from, b, to) in chain {
            self.next(from, &[b], to);
        }
    }

    fn finish(self) -> Table {
        self.t
    }
}

pub fn build_table() -> Table {
    let t0 = Instant::now();
    let mut b = Builder::new();

    // root: exactly the value dispatch, returning to root
    b.skip_ws(Root);
    b.value(Root, Root);

    // true / false / null
    b.literal(&[(TrueT, b'r', TrueR), (TrueR, b'u', LiteralE)]);
    b.literal(&[
        (FalseF, b'a', FalseA),
        (FalseA, b'l', FalseL),
        (FalseL, b's', LiteralE),
    ]);
    b.set(LiteralE, b"e", encode_pop());
    b.literal(&[(NullN, b'u', NullU), (NullU, b'l', NullL)]);
    b.set(NullL, b"l", encode_pop());

    // strings
    b.set_range(String, 32, 126, encode_next(String));
    b.set(String, b"\"", encode_pop());
    b.next(String, b"\\", StringEscape);

    b.next(StringEscape, SIMPLE_ESCAPES, String);
    b.next(StringEscape, b"u", StringHex1);

    b.next(StringHex1, HEX, StringHex2);
    b.next(StringHex2, HEX, StringHex3);
    b.next(StringHex3, HEX, StringHex4);
    b.next(StringHex4, HEX, String);

    // arrays
    b.skip_ws(ArrayOpen);
    b.value(ArrayOpen, ArrayAfterValue);
    b.set(ArrayOpen, b"]", encode_pop());

    b.skip_ws(ArrayAfterComma);
    b.value(ArrayAfterComma, ArrayAfterValue);

    b.skip_ws(ArrayAfterValue);
    b.set(ArrayAfterValue, b"]", encode_pop());
    b.next(ArrayAfterValue, b",", ArrayAfterComma);

    // objects
    b.skip_ws(ObjectOpen);
    b.set(ObjectOpen, b"}", encode_pop());
    b.set(ObjectOpen, b"\"", encode_push(ObjectAfterKey, String));

    b.skip_ws(ObjectAfterKey);
    b.next(ObjectAfterKey, b":", ObjectAfterColon);

    b.skip_ws(ObjectAfterColon);
    b.value(ObjectAfterColon, ObjectAfterValue);

    b.skip_ws(ObjectAfterValue);
    b.set(ObjectAfterValue, b"}", encode_pop());
    b.next(ObjectAfterValue, b",", ObjectAfterComma);

    b.skip_ws(ObjectAfterComma);
    b.set(ObjectAfterComma, b"\"", encode_push(ObjectAfterKey, String));

    // numbers
    b.next(NumberMinus, b"0", NumberZero);
    b.next(NumberMinus, DIGITS_1_9, NumberInt);

    b.number_end(NumberInt);
    b.next(NumberInt, DIGITS, NumberInt);
    b.next(NumberInt, b".", NumberFracStart);
    b.next(NumberInt, b"eE", NumberExpStart);

    b.number_end(NumberZero);
    b.next(NumberZero, b".", NumberFracStart);
    b.next(NumberZero, b"eE", NumberExpStart);

    b.next(NumberFracStart, DIGITS, NumberFrac);

    b.number_end(NumberFrac);
    b.next(NumberFrac, DIGITS, NumberFrac);
    b.next(NumberFrac, b"eE", NumberExpStart);

    b.next(NumberExpStart, b"+-", NumberExpSign);
    b.next(NumberExpStart, DIGITS, NumberExp);

    b.next(NumberExpSign, DIGITS, NumberExp);

    b.number_end(NumberExp);
    b.next(NumberExp, DIGITS, NumberExp);

    let t = b.finish();
    log::debug!(
        "[tables] built {}x{} table in {} us",
        t.rows.len(),
        t.rows[0].len(),
        t0.elapsed().as_micros()
    );
    t
}
