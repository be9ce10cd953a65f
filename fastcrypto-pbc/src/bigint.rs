// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Conversion between [BigInt] and the engine's sign-magnitude word integers.

use crate::engine::mpz::{Mpz, WORD_BITS};
use crate::error::{PbcError, PbcResult};
use num_bigint::{BigInt, Sign};
use std::mem::size_of;
use tracing::error;

const WORD_BYTES: usize = size_of::<usize>();

/// Convert to the engine representation. The sign is carried separately from the magnitude
/// words, and zero has no words.
pub(crate) fn to_native(value: &BigInt) -> Mpz {
    let (sign, magnitude) = value.to_bytes_le();
    let words = magnitude
        .chunks(WORD_BYTES)
        .map(|chunk| {
            let mut word = [0u8; WORD_BYTES];
            word[..chunk.len()].copy_from_slice(chunk);
            usize::from_le_bytes(word)
        })
        .collect::<Vec<_>>();
    Mpz::import(&words, sign == Sign::Minus)
}

/// Convert from the engine representation.
pub(crate) fn from_native(value: &Mpz) -> PbcResult<BigInt> {
    // The engine reports one bit for zero, which still rounds up to a single word.
    let mut words = vec![0usize; (value.size_in_bits() + WORD_BITS - 1) / WORD_BITS];
    let written = value.export(&mut words);
    if written > words.len() {
        error!(
            written,
            capacity = words.len(),
            "Integer export overflowed its buffer"
        );
        return Err(PbcError::InternalError);
    }
    let bytes = words[..written]
        .iter()
        .flat_map(|w| w.to_le_bytes())
        .collect::<Vec<_>>();
    let sign = if value.is_negative() {
        Sign::Minus
    } else {
        Sign::Plus
    };
    Ok(BigInt::from_bytes_le(sign, &bytes))
}
