// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Arithmetic modulo an odd integer. Used both for the base field F_q of the curve and for the
//! exponent ring Z_r (which is composite for type A1 pairings).

use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, Zero};
use std::cmp::Ordering;
use std::mem::swap;
use std::ops::{RemAssign, ShrAssign};

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct PrimeField {
    modulus: BigUint,
    byte_len: usize,
}

impl PrimeField {
    pub fn new(modulus: BigUint) -> Self {
        let byte_len = ((modulus.bits() + 7) / 8) as usize;
        Self { modulus, byte_len }
    }

    pub fn modulus(&self) -> &BigUint {
        &self.modulus
    }

    /// Number of bytes in the fixed width big-endian encoding of an element.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    pub fn reduce(&self, a: &BigUint) -> BigUint {
        a % &self.modulus
    }

    pub fn reduce_signed(&self, a: &BigInt) -> BigUint {
        a.mod_floor(&BigInt::from(self.modulus.clone()))
            .into_parts()
            .1
    }

    pub fn add(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a + b) % &self.modulus
    }

    pub fn sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let a = self.reduce(a);
        let b = self.reduce(b);
        if a >= b {
            a - b
        } else {
            &self.modulus - b + a
        }
    }

    pub fn neg(&self, a: &BigUint) -> BigUint {
        let a = self.reduce(a);
        if a.is_zero() {
            a
        } else {
            &self.modulus - a
        }
    }

    pub fn mul(&self, a: &BigUint, b: &BigUint) -> BigUint {
        (a * b) % &self.modulus
    }

    pub fn square(&self, a: &BigUint) -> BigUint {
        self.mul(a, a)
    }

    pub fn double(&self, a: &BigUint) -> BigUint {
        self.add(a, a)
    }

    pub fn pow(&self, a: &BigUint, e: &BigUint) -> BigUint {
        a.modpow(e, &self.modulus)
    }

    /// Multiplicative inverse, or `None` if `a` shares a factor with the modulus.
    pub fn inv(&self, a: &BigUint) -> Option<BigUint> {
        let a = BigInt::from(self.reduce(a));
        let m = BigInt::from(self.modulus.clone());
        let gcd = a.extended_gcd(&m);
        if !gcd.gcd.is_one() {
            return None;
        }
        Some(self.reduce_signed(&gcd.x))
    }

    /// The Jacobi symbol (a/m). For a prime modulus this is the Legendre symbol.
    pub fn legendre(&self, a: &BigUint) -> i8 {
        jacobi(a, &self.modulus)
    }

    pub fn is_square(&self, a: &BigUint) -> bool {
        self.legendre(a) >= 0
    }

    /// A square root of `a`, or `None` if `a` is not a square. Which of the two roots is
    /// returned is unspecified; callers that need a canonical root use [Self::canonical_sqrt].
    pub fn sqrt(&self, a: &BigUint) -> Option<BigUint> {
        let a = self.reduce(a);
        if a.is_zero() {
            return Some(a);
        }
        if self.legendre(&a) != 1 {
            return None;
        }
        let x = modular_square_root(&a, &self.modulus)?;
        (self.square(&x) == a).then_some(x)
    }

    /// The square root of `a` lying in the lower half `[0, (p - 1) / 2]`.
    pub fn canonical_sqrt(&self, a: &BigUint) -> Option<BigUint> {
        let x = self.sqrt(a)?;
        Some(if self.sign(&x) < 0 { self.neg(&x) } else { x })
    }

    /// 0 for zero, 1 for the lower half of the residues and -1 for the upper half, so that
    /// `sign(-a) == -sign(a)`.
    pub fn sign(&self, a: &BigUint) -> i32 {
        let a = self.reduce(a);
        if a.is_zero() {
            return 0;
        }
        match (a << 1u32).cmp(&self.modulus) {
            Ordering::Less => 1,
            _ => -1,
        }
    }

    pub fn to_bytes(&self, a: &BigUint) -> Vec<u8> {
        let bytes = self.reduce(a).to_bytes_be();
        let mut out = vec![0u8; self.byte_len - bytes.len()];
        out.extend_from_slice(&bytes);
        out
    }

    pub fn from_bytes(&self, bytes: &[u8]) -> BigUint {
        self.reduce(&BigUint::from_bytes_be(bytes))
    }
}

/// Compute the Jacobi symbol (a/m) for odd m.
fn jacobi(a: &BigUint, m: &BigUint) -> i8 {
    if m.is_even() || m.is_zero() {
        return 0;
    }

    let mut a = a % m;
    let mut m = m.clone();
    let mut t = true;
    let mut m_2nd_bit = m.bit(1);

    while !a.is_zero() {
        // Shift a to the right until odd and let s be the number of shifts
        let s_odd = into_odd_part(&mut a) & 1 != 0;

        // m is 3 or 5 mod 8 iff exactly one of the second and third bits is set
        if s_odd && (m_2nd_bit ^ m.bit(2)) {
            t = !t;
        }

        swap(&mut a, &mut m);

        let a_2nd_bit = m_2nd_bit;
        m_2nd_bit = m.bit(1);

        // Both are 3 mod 4
        if a_2nd_bit && m_2nd_bit {
            t = !t;
        }
        a.rem_assign(&m);
    }

    if m.is_one() {
        return if t { 1 } else { -1 };
    }
    0
}

fn into_odd_part(a: &mut BigUint) -> u64 {
    let s = a.trailing_zeros().unwrap_or(0);
    a.shr_assign(s);
    s
}

/// Square root of a quadratic residue `a` modulo a prime `p = 3 mod 4`, which is `a^((p+1)/4)`.
/// Curve base fields are always of this form. Other moduli return `None`.
fn modular_square_root(a: &BigUint, p: &BigUint) -> Option<BigUint> {
    if p % 4u32 != BigUint::from(3u32) {
        return None;
    }
    Some(a.modpow(&((p + 1u32) >> 2), p))
}
