// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::engine::fp::PrimeField;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// An element `re + im * i` of F_q[i] with `i^2 = -1`. This is a field since `q = 3 mod 4`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Fq2 {
    pub re: BigUint,
    pub im: BigUint,
}

impl Fq2 {
    pub fn new(re: BigUint, im: BigUint) -> Self {
        Self { re, im }
    }

    pub fn one() -> Self {
        Self::new(BigUint::one(), BigUint::zero())
    }

    pub fn is_one(&self) -> bool {
        self.re.is_one() && self.im.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }
}

/// Operations in F_q[i] over the base field `fq`.
impl PrimeField {
    pub fn fq2_reduce(&self, a: &Fq2) -> Fq2 {
        Fq2::new(self.reduce(&a.re), self.reduce(&a.im))
    }

    pub fn fq2_mul(&self, a: &Fq2, b: &Fq2) -> Fq2 {
        let re = self.sub(&self.mul(&a.re, &b.re), &self.mul(&a.im, &b.im));
        let im = self.add(&self.mul(&a.re, &b.im), &self.mul(&a.im, &b.re));
        Fq2::new(re, im)
    }

    pub fn fq2_square(&self, a: &Fq2) -> Fq2 {
        // (re + im)(re - im) + 2 re im i
        let re = self.mul(&self.add(&a.re, &a.im), &self.sub(&a.re, &a.im));
        let im = self.double(&self.mul(&a.re, &a.im));
        Fq2::new(re, im)
    }

    /// The Frobenius map `x -> x^q`, which is conjugation since `i^q = -i`.
    pub fn fq2_conj(&self, a: &Fq2) -> Fq2 {
        Fq2::new(self.reduce(&a.re), self.neg(&a.im))
    }

    pub fn fq2_norm(&self, a: &Fq2) -> BigUint {
        self.add(&self.square(&a.re), &self.square(&a.im))
    }

    pub fn fq2_inv(&self, a: &Fq2) -> Option<Fq2> {
        let n = self.inv(&self.fq2_norm(a))?;
        let c = self.fq2_conj(a);
        Some(Fq2::new(self.mul(&c.re, &n), self.mul(&c.im, &n)))
    }

    pub fn fq2_pow(&self, a: &Fq2, e: &BigUint) -> Fq2 {
        let mut result = Fq2::one();
        for i in (0..e.bits()).rev() {
            result = self.fq2_square(&result);
            if e.bit(i) {
                result = self.fq2_mul(&result, a);
            }
        }
        result
    }

    pub fn fq2_to_bytes(&self, a: &Fq2) -> Vec<u8> {
        let mut out = self.to_bytes(&a.re);
        out.extend(self.to_bytes(&a.im));
        out
    }

    /// Decode from `2 * byte_len` bytes. The caller checks the length.
    pub fn fq2_from_bytes(&self, bytes: &[u8]) -> Fq2 {
        let (re, im) = bytes.split_at(self.byte_len());
        Fq2::new(self.from_bytes(re), self.from_bytes(&im[..self.byte_len()]))
    }
}
