// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Discrete logarithms in small groups. Both algorithms run in time exponential in the bit length
//! of the order and are only meant for tests and toy parameters.

use crate::engine::fp::PrimeField;
use crate::engine::{Field, Value};
use num_bigint::{BigUint, RandBigInt};
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};
use rand::rngs::StdRng;
use rand::SeedableRng;

const MAX_RESTARTS: u64 = 16;

/// Largest number of candidate solutions tried after a collision.
const MAX_CANDIDATES: u64 = 1 << 16;

/// Find `k` in `[0, order)` with `g^k = h` by trying every exponent.
pub(crate) fn brute_force(field: &Field, g: &Value, h: &Value, order: &BigUint) -> Option<BigUint> {
    let mut acc = field.one();
    let mut k = BigUint::zero();
    while &k < order {
        if acc == *h {
            return Some(k);
        }
        acc = field.mul(&acc, g)?;
        k += 1u32;
    }
    None
}

/// A point of the random walk, `x = g^a h^b`.
#[derive(Clone)]
struct Walk {
    x: Value,
    a: BigUint,
    b: BigUint,
}

struct Rho<'a> {
    field: &'a Field,
    g: &'a Value,
    h: &'a Value,
    exponents: PrimeField,
}

impl Rho<'_> {
    fn partition(&self, x: &Value) -> u64 {
        let mut bytes = vec![0u8; self.field.length_in_bytes()];
        self.field.to_bytes(x, &mut bytes);
        bytes
            .iter()
            .fold(0u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(*b)))
            % 3
    }

    fn step(&self, w: &Walk) -> Option<Walk> {
        let e = &self.exponents;
        Some(match self.partition(&w.x) {
            0 => Walk {
                x: self.field.mul(&w.x, self.h)?,
                a: w.a.clone(),
                b: e.add(&w.b, &1u32.into()),
            },
            1 => Walk {
                x: self.field.mul(&w.x, &w.x)?,
                a: e.double(&w.a),
                b: e.double(&w.b),
            },
            _ => Walk {
                x: self.field.mul(&w.x, self.g)?,
                a: e.add(&w.a, &1u32.into()),
                b: w.b.clone(),
            },
        })
    }

    fn start(&self, rng: &mut StdRng) -> Option<Walk> {
        let order = self.exponents.modulus();
        let a = rng.gen_biguint_below(order);
        let b = rng.gen_biguint_below(order);
        let x = self
            .field
            .mul(&self.field.pow(self.g, &a)?, &self.field.pow(self.h, &b)?)?;
        Some(Walk { x, a, b })
    }

    /// Given `g^a1 h^b1 = g^a2 h^b2`, solve `k (b2 - b1) = a1 - a2` modulo the order and return
    /// the first candidate that actually satisfies `g^k = h`.
    fn solve(&self, t: &Walk, u: &Walk) -> Option<BigUint> {
        let e = &self.exponents;
        let n = e.modulus();
        let db = e.sub(&u.b, &t.b);
        let da = e.sub(&t.a, &u.a);
        if db.is_zero() {
            return None;
        }
        let d = db.gcd(n);
        if !(&da % &d).is_zero() || d.to_u64()? > MAX_CANDIDATES {
            return None;
        }
        let reduced = PrimeField::new(n / &d);
        let k0 = reduced.mul(&(&da / &d), &reduced.inv(&(&db / &d))?);
        let stride = reduced.modulus().clone();
        let mut k = k0;
        for _ in 0..d.to_u64()? {
            if self.field.pow(self.g, &k)? == *self.h {
                return Some(k);
            }
            k += &stride;
        }
        None
    }
}

/// Find `k` with `g^k = h` using Pollard's rho method with Floyd cycle detection. Falls back to
/// [brute_force] if no collision yields a solution.
pub(crate) fn pollard_rho(field: &Field, g: &Value, h: &Value, order: &BigUint) -> Option<BigUint> {
    if order.is_zero() {
        return None;
    }
    let rho = Rho {
        field,
        g,
        h,
        exponents: PrimeField::new(order.clone()),
    };
    let max_steps = order.to_u64().map_or(u64::MAX, |n| n.saturating_mul(2) + 16);

    for attempt in 0..MAX_RESTARTS {
        let mut rng = StdRng::seed_from_u64(attempt);
        let mut tortoise = rho.start(&mut rng)?;
        let mut hare = tortoise.clone();
        for _ in 0..max_steps {
            tortoise = rho.step(&tortoise)?;
            hare = rho.step(&rho.step(&hare)?)?;
            if tortoise.x == hare.x {
                if let Some(k) = rho.solve(&tortoise, &hare) {
                    return Some(k);
                }
                break;
            }
        }
    }
    brute_force(field, g, h, order)
}
