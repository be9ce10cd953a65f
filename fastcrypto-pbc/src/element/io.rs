// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Conversion of elements to and from integers, hashes and bytes.

use super::Element;
use crate::bigint::{from_native, to_native};
use crate::engine::mpz::Mpz;
use crate::engine::{Field, Value};
use crate::error::{PbcError, PbcResult};
use digest::Digest;
use num_bigint::BigInt;
use tracing::error;

type Encoder = fn(&Field, &Value, &mut [u8]) -> usize;
type Decoder = fn(&Field, &[u8]) -> Option<Value>;

impl Element {
    /// The integer value of a Zr element.
    pub fn big_int(&self) -> PbcResult<BigInt> {
        self.check_integer()?;
        from_native(&self.field.to_mpz(&self.value))
    }

    /// Set a Zr element to `i mod r`.
    pub fn set_i32(&mut self, i: i32) -> PbcResult<&mut Self> {
        self.check_integer()?;
        let result = self.field.set_mpz(&Mpz::from_i64(i.into()));
        self.commit("set_i32", result)
    }

    /// Set a Zr element to `i mod r`.
    pub fn set_big(&mut self, i: &BigInt) -> PbcResult<&mut Self> {
        self.check_integer()?;
        let result = self.field.set_mpz(&to_native(i));
        self.commit("set_big", result)
    }

    /// Deterministically map `hash` to an element. The map is not invertible, and for groups the
    /// discrete logarithm of the result is unknown.
    pub fn set_from_hash(&mut self, hash: &[u8]) -> PbcResult<&mut Self> {
        self.value = self.field.from_hash(hash);
        Ok(self)
    }

    /// Hash `s` with `D`, then map the digest with [Self::set_from_hash].
    pub fn set_from_string_hash<D: Digest>(&mut self, s: &str) -> PbcResult<&mut Self> {
        let digest = D::digest(s.as_bytes());
        self.set_from_hash(digest.as_slice())
    }

    fn export(&self, len: usize, encode: Encoder) -> PbcResult<Vec<u8>> {
        let mut out = vec![0u8; len];
        let written = encode(&self.field, &self.value, &mut out);
        if written > out.len() {
            error!(written, capacity = out.len(), "Element export overflowed its buffer");
            return Err(PbcError::InternalError);
        }
        out.truncate(written);
        Ok(out)
    }

    fn import(&mut self, bytes: &[u8], decode: Decoder) -> PbcResult<&mut Self> {
        self.value = decode(&self.field, bytes).ok_or(PbcError::BadInput)?;
        Ok(self)
    }

    /// Length of [Self::to_bytes].
    pub fn bytes_len(&self) -> usize {
        self.field.length_in_bytes()
    }

    /// The raw encoding: big-endian field elements of fixed width. A point is `x || y`, with the
    /// point at infinity encoded as zeros.
    pub fn to_bytes(&self) -> PbcResult<Vec<u8>> {
        self.export(self.bytes_len(), Field::to_bytes)
    }

    /// Decode the raw encoding from the start of `bytes`. Fails with [PbcError::BadInput] if
    /// `bytes` is shorter than [Self::bytes_len].
    pub fn set_bytes(&mut self, bytes: &[u8]) -> PbcResult<&mut Self> {
        self.import(bytes, Field::from_bytes)
    }

    /// Length of [Self::to_x_bytes]. Zero for elements that are not curve points.
    pub fn x_bytes_len(&self) -> usize {
        self.field.length_in_bytes_x_only()
    }

    /// Only the x coordinate of a point. Decoding gives either the point or its negation.
    pub fn to_x_bytes(&self) -> PbcResult<Vec<u8>> {
        self.check_point()?;
        self.export(self.x_bytes_len(), Field::to_bytes_x_only)
    }

    /// Decode an x coordinate. Of the two points with this x coordinate, the one with the
    /// smaller y (`2y < q`) is chosen.
    pub fn set_x_bytes(&mut self, bytes: &[u8]) -> PbcResult<&mut Self> {
        self.check_point()?;
        self.import(bytes, Field::from_bytes_x_only)
    }

    /// Length of [Self::to_compressed_bytes]. Zero for elements that are not curve points.
    pub fn compressed_bytes_len(&self) -> usize {
        self.field.length_in_bytes_compressed()
    }

    /// The x coordinate of a point followed by one byte that is 1 iff the sign of y is positive.
    pub fn to_compressed_bytes(&self) -> PbcResult<Vec<u8>> {
        self.check_point()?;
        self.export(self.compressed_bytes_len(), Field::to_bytes_compressed)
    }

    pub fn set_compressed_bytes(&mut self, bytes: &[u8]) -> PbcResult<&mut Self> {
        self.check_point()?;
        self.import(bytes, Field::from_bytes_compressed)
    }
}
