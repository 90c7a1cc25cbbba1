//! Structural properties of the built table.

use jsnv::validator::tables::{
    ALL_STATES, Action, N_BYTES, N_STATES, State, Table, build_table, table,
};

const WS: &[u8] = b" \n\t\r";

fn act(s: State, b: u8) -> Action {
    table().action(s, b).expect("ascii byte").expect("decodable cell")
}

#[test]
fn every_cell_decodes() {
    let t = build_table();
    for &s in &ALL_STATES {
        for b in 0..N_BYTES as u8 {
            assert!(
                t.action(s, b).unwrap().is_ok(),
                "cell [{s}][{b}] does not decode"
            );
        }
    }
    assert_eq!(t.words().count(), N_STATES * N_BYTES);
}

#[test]
fn bytes_above_ascii_are_not_addressable() {
    let t = table();
    for b in 128u8..=255 {
        assert_eq!(t.word(State::String, b), None);
        assert!(t.action(State::Root, b).is_none());
    }
}

#[test]
fn construction_is_deterministic() {
    let a = build_table();
    let b = build_table();
    assert!(a == b);
    assert!(a.words().eq(b.words()));
    assert!(&a == table());
}

#[test]
fn state_indices_match_rows() {
    for (i, &s) in ALL_STATES.iter().enumerate() {
        assert_eq!(s.idx(), i);
        assert_eq!(State::from_index(i as u8), Some(s));
    }
    assert_eq!(State::from_index(32), None);
    assert_eq!(State::from_index(63), None);
}

#[test]
fn whitespace_is_idempotent_where_mapped() {
    let mut mapped = 0;
    for &s in &ALL_STATES {
        if !WS.iter().all(|&b| act(s, b) == Action::SetNext(s)) {
            continue;
        }
        mapped += 1;
        let mut cur = s;
        for &b in b" \n\t\r\r\t\n    \n" {
            match act(cur, b) {
                Action::SetNext(n) => cur = n,
                other => panic!("{s}: whitespace {b} gave {other:?}"),
            }
        }
        assert_eq!(cur, s);
    }
    // root + 3 array + 5 object states
    assert_eq!(mapped, 9);
}

#[test]
fn number_end_asymmetry() {
    for s in [
        State::NumberZero,
        State::NumberInt,
        State::NumberFrac,
        State::NumberExp,
    ] {
        for &b in b"\0,]}" {
            assert_eq!(act(s, b), Action::PopDecrement, "{s} on {b}");
        }
        for &b in WS {
            assert_eq!(act(s, b), Action::Pop, "{s} on {b}");
        }
    }
    for s in [
        State::NumberMinus,
        State::NumberFracStart,
        State::NumberExpStart,
        State::NumberExpSign,
    ] {
        for &b in b"\0,]} \n" {
            assert_eq!(act(s, b), Action::Invalid, "{s} must not end a number");
        }
    }
    assert_eq!(table().word(State::NumberInt, b','), Some(4));
    assert_eq!(table().word(State::NumberInt, b' '), Some(3));
}

/// Every cell of a number row: listed bytes map to the given action, the
/// rest of the row is `Invalid`.
fn assert_row(s: State, expect: &[(&[u8], Action)]) {
    for b in 0..N_BYTES as u8 {
        let want = expect
            .iter()
            .find(|(bytes, _)| bytes.contains(&b))
            .map_or(Action::Invalid, |&(_, a)| a);
        assert_eq!(act(s, b), want, "{s} on 0x{b:02x}");
    }
}

#[test]
fn number_rows() {
    use State::*;
    const DIGITS: &[u8] = b"0123456789";
    const END: &[u8] = b"\0,]}";

    assert_row(
        NumberMinus,
        &[
            (b"0", Action::SetNext(NumberZero)),
            (b"123456789", Action::SetNext(NumberInt)),
        ],
    );
    // a leading zero takes no further digits
    assert_row(
        NumberZero,
        &[
            (END, Action::PopDecrement),
            (WS, Action::Pop),
            (b".", Action::SetNext(NumberFracStart)),
            (b"eE", Action::SetNext(NumberExpStart)),
        ],
    );
    assert_row(
        NumberInt,
        &[
            (END, Action::PopDecrement),
            (WS, Action::Pop),
            (DIGITS, Action::SetNext(NumberInt)),
            (b".", Action::SetNext(NumberFracStart)),
            (b"eE", Action::SetNext(NumberExpStart)),
        ],
    );
    assert_row(NumberFracStart, &[(DIGITS, Action::SetNext(NumberFrac))]);
    assert_row(
        NumberFrac,
        &[
            (END, Action::PopDecrement),
            (WS, Action::Pop),
            (DIGITS, Action::SetNext(NumberFrac)),
            (b"eE", Action::SetNext(NumberExpStart)),
        ],
    );
    assert_row(
        NumberExpStart,
        &[
            (b"+-", Action::SetNext(NumberExpSign)),
            (DIGITS, Action::SetNext(NumberExp)),
        ],
    );
    assert_row(NumberExpSign, &[(DIGITS, Action::SetNext(NumberExp))]);
    assert_row(
        NumberExp,
        &[
            (END, Action::PopDecrement),
            (WS, Action::Pop),
            (DIGITS, Action::SetNext(NumberExp)),
        ],
    );
}

#[test]
fn value_dispatch_pushes_return_state() {
    let cases = [
        (State::Root, State::Root),
        (State::ArrayOpen, State::ArrayAfterValue),
        (State::ArrayAfterComma, State::ArrayAfterValue),
        (State::ObjectAfterColon, State::ObjectAfterValue),
    ];
    let entries = [
        (b'"', State::String),
        (b't', State::TrueT),
        (b'f', State::FalseF),
        (b'n', State::NullN),
        (b'-', State::NumberMinus),
        (b'0', State::NumberZero),
        (b'7', State::NumberInt),
        (b'{', State::ObjectOpen),
        (b'[', State::ArrayOpen),
    ];
    for (s, ret) in cases {
        for (b, next) in entries {
            assert_eq!(act(s, b), Action::Push { push: ret, next }, "{s} on {}", b as char);
        }
    }
}

#[test]
fn object_keys_must_be_strings() {
    for s in [State::ObjectOpen, State::ObjectAfterComma] {
        assert_eq!(
            act(s, b'"'),
            Action::Push {
                push: State::ObjectAfterKey,
                next: State::String
            }
        );
        for &b in b"tfn-0{[" {
            assert_eq!(act(s, b), Action::Invalid);
        }
    }
    assert_eq!(act(State::ObjectOpen, b'}'), Action::Pop);
    assert_eq!(act(State::ObjectAfterComma, b'}'), Action::Invalid);
    assert_eq!(act(State::ObjectAfterKey, b':'), Action::SetNext(State::ObjectAfterColon));
}

#[test]
fn trailing_commas_are_not_accepted() {
    assert_eq!(act(State::ArrayAfterComma, b']'), Action::Invalid);
    assert_eq!(act(State::ObjectAfterComma, b'}'), Action::Invalid);
    assert_eq!(act(State::ArrayAfterValue, b','), Action::SetNext(State::ArrayAfterComma));
    assert_eq!(act(State::ObjectAfterValue, b','), Action::SetNext(State::ObjectAfterComma));
}

#[test]
fn string_rows() {
    for b in 0u8..128 {
        let a = act(State::String, b);
        match b {
            b'"' => assert_eq!(a, Action::Pop),
            b'\\' => assert_eq!(a, Action::SetNext(State::StringEscape)),
            32..=126 => assert_eq!(a, Action::SetNext(State::String)),
            _ => assert_eq!(a, Action::Invalid, "byte {b}"),
        }
    }
    for &b in b"\"\\/bfnrt" {
        assert_eq!(act(State::StringEscape, b), Action::SetNext(State::String));
    }
    assert_eq!(act(State::StringEscape, b'u'), Action::SetNext(State::StringHex1));
    assert_eq!(act(State::StringEscape, b'x'), Action::Invalid);

    let chain = [
        (State::StringHex1, State::StringHex2),
        (State::StringHex2, State::StringHex3),
        (State::StringHex3, State::StringHex4),
        (State::StringHex4, State::String),
    ];
    for (from, to) in chain {
        for b in 0u8..128 {
            let want = if b.is_ascii_hexdigit() {
                Action::SetNext(to)
            } else {
                Action::Invalid
            };
            assert_eq!(act(from, b), want, "{from} on {b}");
        }
    }
}

#[test]
fn literal_chains_accept_one_byte_each() {
    let chain: &[(State, u8, Action)] = &[
        (State::TrueT, b'r', Action::SetNext(State::TrueR)),
        (State::TrueR, b'u', Action::SetNext(State::LiteralE)),
        (State::FalseF, b'a', Action::SetNext(State::FalseA)),
        (State::FalseA, b'l', Action::SetNext(State::FalseL)),
        (State::FalseL, b's', Action::SetNext(State::LiteralE)),
        (State::LiteralE, b'e', Action::Pop),
        (State::NullN, b'u', Action::SetNext(State::NullU)),
        (State::NullU, b'l', Action::SetNext(State::NullL)),
        (State::NullL, b'l', Action::Pop),
    ];
    for &(s, only, want) in chain {
        for b in 0u8..128 {
            let expect = if b == only { want } else { Action::Invalid };
            assert_eq!(act(s, b), expect, "{s} on {b}");
        }
    }
}

#[test]
fn pop_cells_carry_no_state_bits() {
    for w in table().words() {
        match Action::unpack(w).unwrap() {
            Action::Pop => assert_eq!(w, 3),
            Action::PopDecrement => assert_eq!(w, 4),
            Action::Invalid => assert_eq!(w, 0),
            _ => {}
        }
    }
}

#[test]
fn stats_add_up() {
    let s = table().stats();
    assert_eq!(s.undecodable, 0);
    assert_eq!(
        s.invalid + s.push + s.set_next + s.pop + s.pop_decrement,
        N_STATES * N_BYTES
    );
    // 4 value-dispatch states x 17 bytes + 2 key pushes
    assert_eq!(s.push, 4 * 17 + 2);
    // 4 number-end states x 4 delimiters
    assert_eq!(s.pop_decrement, 16);
    let accepted: usize = s.accepted_per_state.iter().sum();
    assert_eq!(accepted, N_STATES * N_BYTES - s.invalid);
    assert_eq!(s.accepted_per_state[State::NumberMinus.idx()], 10);
}

#[test]
fn stats_count_undecodable_cells() {
    let mut rows = *table().rows();
    rows[State::Root.idx()][b'x' as usize] = 0x0007; // unknown tag
    rows[State::Root.idx()][b'y' as usize] = 0x0013; // pop with a state field
    let foreign = Table::from_rows(rows);

    let s = foreign.stats();
    assert_eq!(s.undecodable, 2);
    assert_eq!(
        s.invalid + s.push + s.set_next + s.pop + s.pop_decrement + s.undecodable,
        N_STATES * N_BYTES
    );
    assert_eq!(s.pop, table().stats().pop);
}
