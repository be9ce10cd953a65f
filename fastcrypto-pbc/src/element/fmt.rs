// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use super::{CheckTag, Element};
use crate::codec;
use crate::engine::FieldKind;
use crate::error::{PbcError, PbcResult};
use std::fmt::{self, Binary, Debug, Display, Formatter, LowerHex, Octal, UpperHex};

impl Element {
    /// The canonical text form in the given base, e.g. `[1a, 3]` for a point in base 16.
    pub fn to_string_radix(&self, base: u32) -> PbcResult<String> {
        codec::encode(&self.field.to_text(&self.value), base)
    }

    /// Parse the canonical text form. Fails with [PbcError::BadInput] if `s` is malformed or does
    /// not describe an element of this group, and with [PbcError::BadVerb] for an unsupported
    /// base.
    pub fn set_string(&mut self, s: &str, base: u32) -> PbcResult<&mut Self> {
        let text = codec::decode(s, base)?;
        self.value = self.field.from_text(&text).ok_or(PbcError::BadInput)?;
        Ok(self)
    }

    /// Writes the element coordinate by coordinate through [Element::item].
    fn write_items(&self, f: &mut Formatter<'_>, base: u32, upper: bool) -> fmt::Result {
        if self.is_empty() {
            if !matches!(self.field.kind(), FieldKind::Prime(_)) {
                return f.write_str("O");
            }
            let digits = self
                .field
                .to_mpz(&self.value)
                .to_bigint()
                .to_str_radix(base);
            return if upper {
                f.write_str(&digits.to_uppercase())
            } else {
                f.write_str(&digits)
            };
        }
        f.write_str("[")?;
        for i in 0..self.len() {
            if i > 0 {
                f.write_str(", ")?;
            }
            let item = self.item(i).map_err(|_| fmt::Error)?;
            item.write_items(f, base, upper)?;
        }
        f.write_str("]")
    }
}

impl Display for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let text = self.to_string_radix(10).map_err(|_| fmt::Error)?;
        f.write_str(&text)
    }
}

/// The metadata view: checked-ness, the kind of group and its identity.
impl Debug for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let tag = self.tag.unwrap_or_else(|| CheckTag::of(&self.field));
        f.debug_struct("Element")
            .field("checked", &self.is_checked())
            .field("integer", &tag.is_integer)
            .field("point", &tag.is_point)
            .field("field", &tag.field.as_u64())
            .field("pairing", &self.pairing)
            .field("value", &format_args!("{}", self))
            .finish()
    }
}

impl LowerHex for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_items(f, 16, false)
    }
}

impl UpperHex for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_items(f, 16, true)
    }
}

impl Octal for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_items(f, 8, false)
    }
}

impl Binary for Element {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.write_items(f, 2, false)
    }
}
