// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The canonical text form of elements.
//!
//! Integers are written in a base between 2 and 36 using the digits `0-9` and lowercase letters
//! `a-z`. Composite elements (points, polynomial coefficients) are written as bracketed,
//! comma-separated lists which may nest. The point at infinity is written `O`.
//!
//! ```text
//! value    := integer | 'O' | '[' value (',' value)* ']'
//! integer  := digit-or-letter+   (valid symbols bounded by base)
//! ```
//!
//! Whitespace is allowed before and after the top-level value and immediately after a comma.
//! [decode] validates the whole input before anything is handed to the engine.

use crate::error::{PbcError, PbcResult};
use num_bigint::BigUint;
use std::iter::Peekable;
use std::str::CharIndices;

pub const MIN_BASE: u32 = 2;
pub const MAX_BASE: u32 = 36;

/// Deepest accepted nesting of lists.
const MAX_DEPTH: usize = 64;

/// Parsed text form of an element.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TextValue {
    Integer(BigUint),
    /// The point at infinity.
    Infinity,
    List(Vec<TextValue>),
}

fn check_base(base: u32) -> PbcResult<()> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(PbcError::BadVerb)
    }
}

/// Render `value` in the given base. Fails with [PbcError::BadVerb] if the base is not in
/// `2..=36`.
pub fn encode(value: &TextValue, base: u32) -> PbcResult<String> {
    check_base(base)?;
    let mut out = String::new();
    write_value(&mut out, value, base);
    Ok(out)
}

fn write_value(out: &mut String, value: &TextValue, base: u32) {
    match value {
        TextValue::Integer(n) => out.push_str(&n.to_str_radix(base)),
        TextValue::Infinity => out.push('O'),
        TextValue::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_value(out, item, base);
            }
            out.push(']');
        }
    }
}

/// Parse the text form. Fails with [PbcError::BadVerb] for an unsupported base and with
/// [PbcError::BadInput] for anything that does not match the grammar exactly.
pub fn decode(input: &str, base: u32) -> PbcResult<TextValue> {
    check_base(base)?;
    let mut parser = Parser {
        chars: input.char_indices().peekable(),
        input,
        base,
    };
    parser.skip_whitespace();
    let value = parser.value(0)?;
    parser.skip_whitespace();
    if parser.chars.peek().is_some() {
        return Err(PbcError::BadInput);
    }
    Ok(value)
}

/// Digits and lowercase letters below the base. Uppercase letters are never accepted.
fn is_symbol(c: char, base: u32) -> bool {
    !c.is_ascii_uppercase() && c.to_digit(base).is_some()
}

struct Parser<'a> {
    chars: Peekable<CharIndices<'a>>,
    input: &'a str,
    base: u32,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|(_, c)| c.is_whitespace()).is_some() {}
    }

    fn value(&mut self, depth: usize) -> PbcResult<TextValue> {
        match self.chars.peek().copied() {
            Some((_, '[')) if depth < MAX_DEPTH => {
                self.chars.next();
                self.list(depth + 1)
            }
            Some((_, 'O')) => {
                self.chars.next();
                Ok(TextValue::Infinity)
            }
            Some((start, c)) if is_symbol(c, self.base) => self.integer(start),
            _ => Err(PbcError::BadInput),
        }
    }

    fn integer(&mut self, start: usize) -> PbcResult<TextValue> {
        let base = self.base;
        let mut end = start;
        while let Some((i, c)) = self.chars.next_if(|&(_, c)| is_symbol(c, base)) {
            end = i + c.len_utf8();
        }
        BigUint::parse_bytes(self.input[start..end].as_bytes(), self.base)
            .map(TextValue::Integer)
            .ok_or(PbcError::BadInput)
    }

    fn list(&mut self, depth: usize) -> PbcResult<TextValue> {
        let mut items = vec![self.value(depth)?];
        loop {
            match self.chars.next() {
                Some((_, ',')) => {
                    self.skip_whitespace();
                    items.push(self.value(depth)?);
                }
                Some((_, ']')) => return Ok(TextValue::List(items)),
                _ => return Err(PbcError::BadInput),
            }
        }
    }
}
