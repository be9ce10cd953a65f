// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::engine::fp::PrimeField;
use num_bigint::BigUint;
use num_traits::{One, Zero};

/// A point on `y^2 = x^3 + x` in affine coordinates.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Point {
    Infinity,
    Affine { x: BigUint, y: BigUint },
}

impl Point {
    pub fn is_infinity(&self) -> bool {
        matches!(self, Point::Infinity)
    }
}

/// The order `order` subgroup of the supersingular curve `y^2 = x^3 + x` over F_q. The curve has
/// `q + 1 = order * cofactor` points.
#[derive(Clone, Debug)]
pub(crate) struct CurveGroup {
    pub fq: PrimeField,
    pub order: BigUint,
    pub cofactor: BigUint,
}

impl CurveGroup {
    pub fn new(q: BigUint, order: BigUint, cofactor: BigUint) -> Self {
        Self {
            fq: PrimeField::new(q),
            order,
            cofactor,
        }
    }

    fn rhs(&self, x: &BigUint) -> BigUint {
        let fq = &self.fq;
        fq.add(&fq.mul(&fq.square(x), x), x)
    }

    pub fn is_on_curve(&self, x: &BigUint, y: &BigUint) -> bool {
        self.fq.square(y) == self.rhs(x)
    }

    /// The point with the given x coordinate and the canonical y coordinate `2y < q`, if any.
    pub fn from_x(&self, x: &BigUint) -> Option<Point> {
        let x = self.fq.reduce(x);
        let y = self.fq.canonical_sqrt(&self.rhs(&x))?;
        Some(Point::Affine { x, y })
    }

    fn reduced(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: self.fq.reduce(x),
                y: self.fq.reduce(y),
            },
        }
    }

    pub fn neg(&self, p: &Point) -> Point {
        match p {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => Point::Affine {
                x: self.fq.reduce(x),
                y: self.fq.neg(y),
            },
        }
    }

    /// Slope of the tangent at `(x, y)`, or `None` if the tangent is vertical.
    pub fn tangent_slope(&self, x: &BigUint, y: &BigUint) -> Option<BigUint> {
        let fq = &self.fq;
        let numerator = fq.add(&fq.mul(&BigUint::from(3u32), &fq.square(x)), &BigUint::one());
        Some(fq.mul(&numerator, &fq.inv(&fq.double(y))?))
    }

    /// Slope of the chord through two points with distinct x coordinates.
    pub fn chord_slope(
        &self,
        (x1, y1): (&BigUint, &BigUint),
        (x2, y2): (&BigUint, &BigUint),
    ) -> Option<BigUint> {
        let fq = &self.fq;
        Some(fq.mul(&fq.sub(y2, y1), &fq.inv(&fq.sub(x2, x1))?))
    }

    fn with_slope(&self, slope: &BigUint, (x1, y1): (&BigUint, &BigUint), x2: &BigUint) -> Point {
        let fq = &self.fq;
        let x3 = fq.sub(&fq.sub(&fq.square(slope), x1), x2);
        let y3 = fq.sub(&fq.mul(slope, &fq.sub(x1, &x3)), y1);
        Point::Affine { x: x3, y: y3 }
    }

    pub fn double(&self, p: &Point) -> Point {
        match self.reduced(p) {
            Point::Infinity => Point::Infinity,
            Point::Affine { x, y } => match self.tangent_slope(&x, &y) {
                Some(slope) => self.with_slope(&slope, (&x, &y), &x),
                None => Point::Infinity,
            },
        }
    }

    pub fn add(&self, p: &Point, q: &Point) -> Point {
        match (self.reduced(p), self.reduced(q)) {
            (Point::Infinity, q) => q,
            (p, Point::Infinity) => p,
            (Point::Affine { x: x1, y: y1 }, Point::Affine { x: x2, y: y2 }) => {
                if x1 == x2 {
                    if y1 == y2 {
                        return self.double(&Point::Affine { x: x1, y: y1 });
                    }
                    return Point::Infinity;
                }
                match self.chord_slope((&x1, &y1), (&x2, &y2)) {
                    Some(slope) => self.with_slope(&slope, (&x1, &y1), &x2),
                    None => Point::Infinity,
                }
            }
        }
    }

    pub fn mul(&self, p: &Point, k: &BigUint) -> Point {
        let mut result = Point::Infinity;
        for i in (0..k.bits()).rev() {
            result = self.double(&result);
            if k.bit(i) {
                result = self.add(&result, p);
            }
        }
        result
    }

    pub fn clear_cofactor(&self, p: &Point) -> Point {
        self.mul(p, &self.cofactor)
    }

    pub fn sign(&self, p: &Point) -> i32 {
        match p {
            Point::Infinity => 0,
            Point::Affine { y, .. } => self.fq.sign(y),
        }
    }

    /// Deterministic map from bytes: try-and-increment on the x coordinate followed by cofactor
    /// clearing.
    pub fn from_hash(&self, data: &[u8]) -> Point {
        let mut x = self.fq.from_bytes(data);
        let mut attempts = BigUint::zero();
        while &attempts < self.fq.modulus() {
            if let Some(p) = self.from_x(&x) {
                return self.clear_cofactor(&p);
            }
            x = self.fq.add(&x, &BigUint::one());
            attempts += 1u32;
        }
        Point::Infinity
    }

    pub fn length_in_bytes(&self) -> usize {
        2 * self.fq.byte_len()
    }

    pub fn length_in_bytes_x_only(&self) -> usize {
        self.fq.byte_len()
    }

    pub fn length_in_bytes_compressed(&self) -> usize {
        self.fq.byte_len() + 1
    }

    /// `x || y`, with the point at infinity encoded as zeros.
    pub fn to_bytes(&self, p: &Point) -> Vec<u8> {
        match p {
            Point::Infinity => vec![0u8; self.length_in_bytes()],
            Point::Affine { x, y } => {
                let mut out = self.fq.to_bytes(x);
                out.extend(self.fq.to_bytes(y));
                out
            }
        }
    }

    /// Inverse of [Self::to_bytes]. Coordinates not on the curve decode to infinity.
    pub fn from_bytes(&self, bytes: &[u8]) -> Point {
        let len = self.fq.byte_len();
        let x = self.fq.from_bytes(&bytes[..len]);
        let y = self.fq.from_bytes(&bytes[len..2 * len]);
        if self.is_on_curve(&x, &y) && !(x.is_zero() && y.is_zero()) {
            Point::Affine { x, y }
        } else {
            Point::Infinity
        }
    }

    pub fn to_bytes_x_only(&self, p: &Point) -> Vec<u8> {
        match p {
            Point::Infinity => vec![0u8; self.length_in_bytes_x_only()],
            Point::Affine { x, .. } => self.fq.to_bytes(x),
        }
    }

    /// Picks the point with `2y < q`. A zero x coordinate, or one without a point above it,
    /// decodes to infinity.
    pub fn from_bytes_x_only(&self, bytes: &[u8]) -> Point {
        let x = self.fq.from_bytes(&bytes[..self.fq.byte_len()]);
        if x.is_zero() {
            return Point::Infinity;
        }
        self.from_x(&x).unwrap_or(Point::Infinity)
    }

    /// `x || flag` where the flag byte is 1 iff the sign of y is positive.
    pub fn to_bytes_compressed(&self, p: &Point) -> Vec<u8> {
        let mut out = self.to_bytes_x_only(p);
        out.push(u8::from(self.sign(p) > 0));
        out
    }

    pub fn from_bytes_compressed(&self, bytes: &[u8]) -> Point {
        let len = self.fq.byte_len();
        let p = self.from_bytes_x_only(&bytes[..len]);
        if bytes[len] == 1 {
            p
        } else {
            self.neg(&p)
        }
    }
}
