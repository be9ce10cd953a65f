// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Sources of randomness for [crate::element::Element::rand].
//!
//! The engine asks the source of its pairing for an integer in `[0, limit)` whenever it needs
//! randomness. A source is installed per pairing through [crate::config::PairingConfig]; pairings
//! created without one use [OsRandom].

use crate::error::{PbcError, PbcResult};
use num_bigint::{BigInt, BigUint, RandBigInt};
use num_traits::Signed;
use once_cell::sync::Lazy;
use rand::rngs::OsRng;
use rand::RngCore;
use std::fmt::Debug;
use std::io::Read;
use std::sync::{Arc, Mutex};

/// A source of uniformly random integers. Implementations may block.
pub trait RandomSource: Debug + Send + Sync {
    /// Return a uniformly random integer in `[0, limit)`. `limit` is positive.
    fn rand(&self, limit: &BigInt) -> PbcResult<BigInt>;
}

static DEFAULT_SOURCE: Lazy<Arc<dyn RandomSource>> = Lazy::new(|| Arc::new(OsRandom));

/// The source used by pairings that were not configured with one.
pub fn default_source() -> Arc<dyn RandomSource> {
    DEFAULT_SOURCE.clone()
}

fn positive_limit(limit: &BigInt) -> PbcResult<BigUint> {
    if !limit.is_positive() {
        return Err(PbcError::EntropyFailure);
    }
    Ok(limit.magnitude().clone())
}

/// The operating system's random number generator.
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn rand(&self, limit: &BigInt) -> PbcResult<BigInt> {
        let limit = positive_limit(limit)?;
        Ok(OsRng.gen_biguint_below(&limit).into())
    }
}

/// Wraps any [RngCore], e.g. a seeded `StdRng` for reproducible tests.
#[derive(Debug)]
pub struct RngRandom<R> {
    rng: Mutex<R>,
}

impl<R: RngCore> RngRandom<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng: Mutex::new(rng),
        }
    }
}

impl<R: RngCore + Debug + Send> RandomSource for RngRandom<R> {
    fn rand(&self, limit: &BigInt) -> PbcResult<BigInt> {
        let limit = positive_limit(limit)?;
        let mut rng = self.rng.lock().map_err(|_| PbcError::EntropyFailure)?;
        Ok(rng.gen_biguint_below(&limit).into())
    }
}

/// Reads random bytes from a stream such as `/dev/urandom` and turns them into integers by
/// rejection sampling. A failing or exhausted stream yields [PbcError::EntropyFailure].
#[derive(Debug)]
pub struct ReaderRandom<R> {
    reader: Mutex<R>,
}

impl<R: Read> ReaderRandom<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: Mutex::new(reader),
        }
    }
}

impl<R: Read + Debug + Send> RandomSource for ReaderRandom<R> {
    fn rand(&self, limit: &BigInt) -> PbcResult<BigInt> {
        let limit = positive_limit(limit)?;
        let max = &limit - 1u32;
        let bits = max.bits();
        if bits == 0 {
            return Ok(BigInt::from(0));
        }
        let mut bytes = vec![0u8; ((bits + 7) / 8) as usize];
        // Bits of the top byte that are kept.
        let top_bits = match bits % 8 {
            0 => 8,
            b => b,
        };

        let mut reader = self.reader.lock().map_err(|_| PbcError::EntropyFailure)?;
        loop {
            reader
                .read_exact(&mut bytes)
                .map_err(|_| PbcError::EntropyFailure)?;
            bytes[0] &= ((1u16 << top_bits) - 1) as u8;
            let candidate = BigUint::from_bytes_be(&bytes);
            if candidate < limit {
                return Ok(candidate.into());
            }
        }
    }
}
