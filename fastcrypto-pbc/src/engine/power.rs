// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Exponentiation with a precomputed table for a fixed base, and simultaneous multi-base
//! exponentiation. "Exponentiation" is repeated application of [Field::mul], so on curves these
//! compute scalar multiples.

use crate::engine::mpz::Mpz;
use crate::engine::{Field, Value};
use num_bigint::{BigInt, BigUint};
use num_traits::Signed;
use std::sync::Arc;

/// Number of bits per digit of the fixed window method.
const WINDOW_WIDTH: usize = 4;

/// `2^WINDOW_WIDTH` precomputed powers.
const CACHE_SIZE: usize = 1 << WINDOW_WIDTH;

/// Precomputed powers `base^0, ..., base^(CACHE_SIZE - 1)` of a fixed base. The table is a
/// snapshot: it does not follow later changes to the element it was created from.
#[derive(Clone, Debug)]
pub(crate) struct PowerTable {
    field: Arc<Field>,
    cache: Vec<Value>,
}

impl PowerTable {
    pub fn new(field: Arc<Field>, base: &Value) -> Option<Self> {
        let mut cache = Vec::with_capacity(CACHE_SIZE);
        cache.push(field.one());
        cache.push(base.clone());
        for i in 2..CACHE_SIZE {
            let next = field.mul(&cache[i - 1], base)?;
            cache.push(next);
        }
        Some(Self { field, cache })
    }

    fn pow(&self, exponent: &BigUint) -> Option<Value> {
        let digits = base_2w_expansion(exponent, WINDOW_WIDTH);
        let mut result = self.cache[*digits.last()?].clone();
        for digit in digits.iter().rev().skip(1) {
            for _ in 0..WINDOW_WIDTH {
                result = self.field.mul(&result, &result)?;
            }
            result = self.field.mul(&result, &self.cache[*digit])?;
        }
        Some(result)
    }

    pub fn pow_signed(&self, exponent: &BigInt) -> Option<Value> {
        let result = self.pow(exponent.magnitude())?;
        if exponent.is_negative() {
            self.field.invert(&result)
        } else {
            Some(result)
        }
    }

    pub fn pow_mpz(&self, exponent: &Mpz) -> Option<Value> {
        self.pow_signed(&exponent.to_bigint())
    }

    pub fn pow_zn(&self, exponent: &Value) -> Option<Value> {
        match exponent {
            Value::Int(e) => self.pow(e),
            _ => None,
        }
    }
}

/// The base `2^window_width` digits of `n` in little-endian order. Zero has the single digit 0.
fn base_2w_expansion(n: &BigUint, window_width: usize) -> Vec<usize> {
    let digits = (n.bits() as usize + window_width - 1) / window_width;
    (0..digits.max(1))
        .map(|d| {
            (0..window_width).fold(0usize, |digit, b| {
                digit | (usize::from(n.bit((d * window_width + b) as u64)) << b)
            })
        })
        .collect()
}

/// `prod bases[i]^exponents[i]` using a single chain of squarings (Straus' method). The result is
/// identical to multiplying the individual powers.
pub(crate) fn multi_pow(field: &Field, terms: &[(&Value, &BigInt)]) -> Option<Value> {
    let bases = terms
        .iter()
        .map(|(base, e)| {
            if e.is_negative() {
                field.invert(base)
            } else {
                Some((*base).clone())
            }
        })
        .collect::<Option<Vec<_>>>()?;

    // table[mask] is the product of the bases selected by the bits of mask.
    let mut table = vec![field.one(); 1 << terms.len()];
    for mask in 1..table.len() {
        let lowest = mask.trailing_zeros() as usize;
        table[mask] = field.mul(&table[mask & (mask - 1)], &bases[lowest])?;
    }

    let bits = terms.iter().map(|(_, e)| e.bits()).max().unwrap_or(0);
    let mut result = field.one();
    for i in (0..bits).rev() {
        result = field.mul(&result, &result)?;
        let mask = terms
            .iter()
            .enumerate()
            .filter(|(_, (_, e))| e.magnitude().bit(i))
            .fold(0usize, |mask, (j, _)| mask | (1 << j));
        if mask != 0 {
            result = field.mul(&result, &table[mask])?;
        }
    }
    Some(result)
}
