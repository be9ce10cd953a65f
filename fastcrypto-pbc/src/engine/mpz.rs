// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The engine's native integer: a sign flag and a little-endian vector of machine words with no
//! trailing zero words. Zero has no words.

use num_bigint::{BigInt, BigUint, Sign};
use std::mem::size_of;

pub(crate) const WORD_BITS: usize = usize::BITS as usize;
const WORD_BYTES: usize = size_of::<usize>();

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Mpz {
    negative: bool,
    limbs: Vec<usize>,
}

impl Mpz {
    /// Import a magnitude given as little-endian words.
    pub fn import(words: &[usize], negative: bool) -> Self {
        let mut limbs = words.to_vec();
        while limbs.last() == Some(&0) {
            limbs.pop();
        }
        let negative = negative && !limbs.is_empty();
        Self { negative, limbs }
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Number of significant bits of the magnitude. As in GMP, zero has size 1.
    pub fn size_in_bits(&self) -> usize {
        match self.limbs.last() {
            None => 1,
            Some(top) => {
                (self.limbs.len() - 1) * WORD_BITS + (WORD_BITS - top.leading_zeros() as usize)
            }
        }
    }

    /// Write the magnitude into `out` as little-endian words, zero-filling the rest of `out`.
    /// Returns the number of words the magnitude occupies, which may exceed `out.len()`; in that
    /// case only the words that fit are written.
    pub fn export(&self, out: &mut [usize]) -> usize {
        for (i, word) in out.iter_mut().enumerate() {
            *word = self.limbs.get(i).copied().unwrap_or(0);
        }
        self.limbs.len()
    }

    pub(crate) fn from_biguint(value: &BigUint, negative: bool) -> Self {
        let words = value
            .to_bytes_le()
            .chunks(WORD_BYTES)
            .map(|chunk| {
                let mut buf = [0u8; WORD_BYTES];
                buf[..chunk.len()].copy_from_slice(chunk);
                usize::from_le_bytes(buf)
            })
            .collect::<Vec<_>>();
        Self::import(&words, negative)
    }

    pub(crate) fn from_i64(value: i64) -> Self {
        Self::from_biguint(&BigUint::from(value.unsigned_abs()), value < 0)
    }

    pub(crate) fn magnitude(&self) -> BigUint {
        let bytes = self
            .limbs
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect::<Vec<_>>();
        BigUint::from_bytes_le(&bytes)
    }

    pub(crate) fn to_bigint(&self) -> BigInt {
        let sign = if self.negative {
            Sign::Minus
        } else {
            Sign::Plus
        };
        BigInt::from_biguint(sign, self.magnitude())
    }
}
