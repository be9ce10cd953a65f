// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Reduced Tate pairing on the supersingular curve `y^2 = x^3 + x` with the distortion map
//! `(x, y) -> (-x, i y)`.
//!
//! The Miller loop for a fixed first argument only depends on that argument, so it is split into
//! [miller_lines], which computes the line functions once, and [evaluate], which evaluates them
//! at a second argument. Vertical lines take values in F_q and are killed by the final
//! exponentiation, so they are never recorded.

use crate::engine::curve::{CurveGroup, Point};
use crate::engine::fp::PrimeField;
use crate::engine::fq2::Fq2;
use num_bigint::BigUint;

/// A non-vertical line `y = slope * x + c` through a multiple `T` of the first argument. At the
/// distorted point `(-x_Q, i y_Q)` the line function `y - y_T - slope * (x - x_T)` takes the value
/// `slope * x_Q + offset + i y_Q` where `offset = slope * x_T - y_T`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Line {
    slope: BigUint,
    offset: BigUint,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum MillerStep {
    /// Square the accumulator, then multiply by the tangent line (if any).
    Double(Option<Line>),
    /// Multiply the accumulator by the chord line (if any).
    Add(Option<Line>),
}

fn line(curve: &CurveGroup, slope: BigUint, x: &BigUint, y: &BigUint) -> Line {
    let offset = curve.fq.sub(&curve.fq.mul(&slope, x), y);
    Line { slope, offset }
}

/// Line functions of the Miller loop computing `f_{n,P}` where `n = curve.order`.
pub(crate) fn miller_lines(curve: &CurveGroup, p: &Point) -> Vec<MillerStep> {
    let (px, py) = match p {
        Point::Infinity => return Vec::new(),
        Point::Affine { x, y } => (curve.fq.reduce(x), curve.fq.reduce(y)),
    };
    let order = &curve.order;
    let mut steps = Vec::with_capacity(2 * order.bits() as usize);
    let mut t = Point::Affine {
        x: px.clone(),
        y: py.clone(),
    };

    for i in (0..order.bits().saturating_sub(1)).rev() {
        let tangent = match &t {
            Point::Affine { x, y } => curve
                .tangent_slope(x, y)
                .map(|slope| line(curve, slope, x, y)),
            Point::Infinity => None,
        };
        steps.push(MillerStep::Double(tangent));
        t = curve.double(&t);

        if order.bit(i) {
            let chord = match &t {
                Point::Affine { x, y } if *x == px && *y == py => curve
                    .tangent_slope(x, y)
                    .map(|slope| line(curve, slope, x, y)),
                Point::Affine { x, y } if *x != px => curve
                    .chord_slope((x, y), (&px, &py))
                    .map(|slope| line(curve, slope, x, y)),
                _ => None,
            };
            steps.push(MillerStep::Add(chord));
            t = curve.add(&t, p);
        }
    }
    steps
}

fn line_value(fq: &PrimeField, line: &Line, qx: &BigUint, qy: &BigUint) -> Fq2 {
    Fq2::new(fq.add(&fq.mul(&line.slope, qx), &line.offset), qy.clone())
}

/// Evaluate the recorded Miller loop at the distorted image of `q`.
pub(crate) fn evaluate(fq: &PrimeField, steps: &[MillerStep], q: &Point) -> Fq2 {
    let (qx, qy) = match q {
        Point::Infinity => return Fq2::one(),
        Point::Affine { x, y } => (fq.reduce(x), fq.reduce(y)),
    };
    let mut f = Fq2::one();
    for step in steps {
        let line = match step {
            MillerStep::Double(line) => {
                f = fq.fq2_square(&f);
                line
            }
            MillerStep::Add(line) => line,
        };
        if let Some(line) = line {
            f = fq.fq2_mul(&f, &line_value(fq, line, &qx, &qy));
        }
    }
    f
}

/// Raise `f` to `(q^2 - 1) / n = (q - 1) * cofactor`. Since `f^q` is the conjugate of `f`, the
/// first factor is `conj(f) / f`.
pub(crate) fn final_exponentiation(fq: &PrimeField, f: &Fq2, cofactor: &BigUint) -> Fq2 {
    match fq.fq2_inv(f) {
        Some(inv) => fq.fq2_pow(&fq.fq2_mul(&fq.fq2_conj(f), &inv), cofactor),
        None => Fq2::one(),
    }
}

pub(crate) fn pairing(curve: &CurveGroup, p: &Point, q: &Point) -> Fq2 {
    let f = evaluate(&curve.fq, &miller_lines(curve, p), q);
    final_exponentiation(&curve.fq, &f, &curve.cofactor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilinearity_on_toy_curve() {
        let curve = CurveGroup::new(83u32.into(), 7u32.into(), 12u32.into());
        let p = (1u32..83)
            .filter_map(|x| curve.from_x(&x.into()))
            .map(|p| curve.clear_cofactor(&p))
            .find(|p| !p.is_infinity())
            .unwrap();

        let e = pairing(&curve, &p, &p);
        assert!(!e.is_one());
        assert!(curve.fq.fq2_pow(&e, &7u32.into()).is_one());

        for a in 1u32..7 {
            for b in 1u32..7 {
                let pa = curve.mul(&p, &a.into());
                let pb = curve.mul(&p, &b.into());
                assert_eq!(
                    pairing(&curve, &pa, &pb),
                    curve.fq.fq2_pow(&e, &(a * b).into())
                );
            }
        }
        assert!(pairing(&curve, &Point::Infinity, &p).is_one());
        assert!(pairing(&curve, &p, &Point::Infinity).is_one());
    }
}
