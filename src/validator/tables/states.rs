// src/validator/tables/states.rs

/// Grammar states. The discriminant is both the table row and the value
/// stored in the 6-bit state fields of a packed action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum State {
    // outer document level
    Root = 0,

    // strings
    String,       // inside "..."
    StringEscape, // after '\'
    StringHex1,   // after "\u", expecting 4 hex digits
    StringHex2,
    StringHex3,
    StringHex4,

    // arrays
    ArrayOpen,       // after '['
    ArrayAfterValue, // after an element
    ArrayAfterComma, // after ','

    // objects
    ObjectOpen,       // after '{'
    ObjectAfterKey,   // after the key string
    ObjectAfterColon, // after ':'
    ObjectAfterValue, // after a member value
    ObjectAfterComma, // after ','

    // true / false
    TrueT, // "true" after 't'
    TrueR, // "true" after 'r'
    FalseF,
    FalseA,
    FalseL,
    LiteralE, // "true" and "false" both end on 'e'

    // null
    NullN,
    NullU,
    NullL,

    // numbers
    NumberMinus,     // after '-'
    NumberZero,      // after a leading '0'
    NumberInt,       // integer digits
    NumberFracStart, // after '.'
    NumberFrac,      // fraction digits
    NumberExpStart,  // after 'e' / 'E'
    NumberExpSign,   // after the exponent sign
    NumberExp,       // exponent digits
}

pub const N_STATES: usize = 32;
/// Addressable input bytes per row; bytes >= 128 never reach the table.
pub const N_BYTES: usize = 128;

pub const ALL_STATES: [State; N_STATES] = [
    State::Root,
    State::String,
    State::StringEscape,
    State::StringHex1,
    State::StringHex2,
    State::StringHex3,
    State::StringHex4,
    State::ArrayOpen,
    State::ArrayAfterValue,
    State::ArrayAfterComma,
    State::ObjectOpen,
    State::ObjectAfterKey,
    State::ObjectAfterColon,
    State::ObjectAfterValue,
    State::ObjectAfterComma,
    State::TrueT,
    State::TrueR,
    State::FalseF,
    State::FalseA,
    State::FalseL,
    State::LiteralE,
    State::NullN,
    State::NullU,
    State::NullL,
    State::NumberMinus,
    State::NumberZero,
    State::NumberInt,
    State::NumberFracStart,
    State::NumberFrac,
    State::NumberExpStart,
    State::NumberExpSign,
    State::NumberExp,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Root,
    String,
    Array,
    Object,
    Literal,
    Number,
}

impl State {
    #[inline]
    pub const fn idx(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn from_index(i: u8) -> Option<State> {
        if (i as usize) < N_STATES {
            Some(ALL_STATES[i as usize])
        } else {
            None
        }
    }

    pub const fn category(self) -> Category {
        use State::*;
        match self {
            Root => Category::Root,
            String | StringEscape | StringHex1 | StringHex2 | StringHex3 | StringHex4 => {
                Category::String
            }
            ArrayOpen | ArrayAfterValue | ArrayAfterComma => Category::Array,
            ObjectOpen | ObjectAfterKey | ObjectAfterColon | ObjectAfterValue
            | ObjectAfterComma => Category::Object,
            TrueT | TrueR | FalseF | FalseA | FalseL | LiteralE | NullN | NullU | NullL => {
                Category::Literal
            }
            NumberMinus | NumberZero | NumberInt | NumberFracStart | NumberFrac
            | NumberExpStart | NumberExpSign | NumberExp => Category::Number,
        }
    }

    /// Name used in diagnostics.
    pub const fn name(self) -> &'static str {
        use State::*;
        match self {
            Root => "root",
            String => "string",
            StringEscape => "string-escape",
            StringHex1 => "string-hex-1",
            StringHex2 => "string-hex-2",
            StringHex3 => "string-hex-3",
            StringHex4 => "string-hex-4",
            ArrayOpen => "array-open",
            ArrayAfterValue => "array-after-value",
            ArrayAfterComma => "array-after-comma",
            ObjectOpen => "object-open",
            ObjectAfterKey => "object-after-key",
            ObjectAfterColon => "object-after-colon",
            ObjectAfterValue => "object-after-value",
            ObjectAfterComma => "object-after-comma",
            TrueT => "true-t",
            TrueR => "true-r",
            FalseF => "false-f",
            FalseA => "false-a",
            FalseL => "false-l",
            LiteralE => "literal-e",
            NullN => "null-n",
            NullU => "null-u",
            NullL => "null-l",
            NumberMinus => "number-minus",
            NumberZero => "number-zero",
            NumberInt => "number-int",
            NumberFracStart => "number-frac-start",
            NumberFrac => "number-frac",
            NumberExpStart => "number-exp-start",
            NumberExpSign => "number-exp-sign",
            NumberExp => "number-exp",
        }
    }
}

impl core::fmt::Display for State {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.name())
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Category::Root => "root",
            Category::String => "string",
            Category::Array => "array",
            Category::Object => "object",
            Category::Literal => "literal",
            Category::Number => "number",
        };
        f.pad(s)
    }
}
