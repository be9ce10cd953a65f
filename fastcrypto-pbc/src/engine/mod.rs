// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! The arithmetic engine behind the element handles.
//!
//! The engine works on opaque [Value]s living in a [Field]. It performs no compatibility checks:
//! an operation on values from the wrong kind of field returns `None`, and values from a field of
//! the right kind but a different modulus produce meaningless (but well-defined) results. All
//! checking is the job of the facade in [crate::element].

pub(crate) mod curve;
pub(crate) mod dlog;
pub(crate) mod fp;
pub(crate) mod fq2;
pub(crate) mod mpz;
pub(crate) mod power;
pub(crate) mod tate;

use crate::codec::TextValue;
use crate::engine::curve::{CurveGroup, Point};
use crate::engine::fp::PrimeField;
use crate::engine::fq2::Fq2;
use crate::engine::mpz::Mpz;
use crate::error::{PbcError, PbcResult};
use crate::random::RandomSource;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Signed, Zero};
use std::cmp::Ordering;
use std::sync::atomic::{self, AtomicU64};
use std::sync::Arc;

/// Random curve points are drawn by sampling x coordinates. A source that fails this often to hit
/// a point is not producing entropy.
const MAX_POINT_SAMPLES: usize = 1024;

static NEXT_FIELD_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a field. Two fields compare equal iff they are the same allocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct FieldId(u64);

impl FieldId {
    fn fresh() -> Self {
        FieldId(NEXT_FIELD_ID.fetch_add(1, atomic::Ordering::Relaxed))
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) enum Value {
    Int(BigUint),
    Point(Point),
    Quad(Fq2),
}

/// The order `order` subgroup of the multiplicative group of F_q[i].
#[derive(Clone, Debug)]
pub(crate) struct GtGroup {
    pub fq: PrimeField,
    pub order: BigUint,
    pub cofactor: BigUint,
}

impl GtGroup {
    /// Map an arbitrary element of F_q[i] into the subgroup.
    fn project(&self, z: &Fq2) -> Fq2 {
        tate::final_exponentiation(&self.fq, z, &self.cofactor)
    }
}

#[derive(Debug)]
pub(crate) enum FieldKind {
    Prime(PrimeField),
    Curve { curve: CurveGroup, base: Arc<Field> },
    Gt { group: GtGroup, base: Arc<Field> },
}

#[derive(Debug)]
pub(crate) struct Field {
    id: FieldId,
    kind: FieldKind,
}

pub(crate) fn draw(source: &dyn RandomSource, limit: &BigUint) -> PbcResult<BigUint> {
    let r = source.rand(&BigInt::from(limit.clone()))?;
    if r.is_negative() || r.magnitude() >= limit {
        return Ok(r.magnitude() % limit);
    }
    Ok(r.into_parts().1)
}

impl Field {
    pub fn new(kind: FieldKind) -> Arc<Self> {
        Arc::new(Self {
            id: FieldId::fresh(),
            kind,
        })
    }

    pub fn id(&self) -> FieldId {
        self.id
    }

    pub fn kind(&self) -> &FieldKind {
        &self.kind
    }

    pub fn is_curve(&self) -> bool {
        matches!(self.kind, FieldKind::Curve { .. })
    }

    /// The modulus of a ring or the order of a group.
    pub fn order(&self) -> &BigUint {
        match &self.kind {
            FieldKind::Prime(f) => f.modulus(),
            FieldKind::Curve { curve, .. } => &curve.order,
            FieldKind::Gt { group, .. } => &group.order,
        }
    }

    pub fn zero(&self) -> Value {
        match &self.kind {
            FieldKind::Prime(_) => Value::Int(BigUint::zero()),
            FieldKind::Curve { .. } => Value::Point(Point::Infinity),
            FieldKind::Gt { .. } => Value::Quad(Fq2::one()),
        }
    }

    pub fn one(&self) -> Value {
        match &self.kind {
            FieldKind::Prime(_) => Value::Int(BigUint::one()),
            _ => self.zero(),
        }
    }

    pub fn set_mpz(&self, z: &Mpz) -> Option<Value> {
        match &self.kind {
            FieldKind::Prime(f) => Some(Value::Int(f.reduce_signed(&z.to_bigint()))),
            _ => None,
        }
    }

    /// The integer value of a ring element. Group elements have no integer value and export zero.
    pub fn to_mpz(&self, a: &Value) -> Mpz {
        match (&self.kind, a) {
            (FieldKind::Prime(f), Value::Int(a)) => Mpz::from_biguint(&f.reduce(a), false),
            _ => Mpz::default(),
        }
    }

    /// The ring addition, or the group law for groups.
    pub fn add(&self, a: &Value, b: &Value) -> Option<Value> {
        match (&self.kind, a, b) {
            (FieldKind::Prime(f), Value::Int(a), Value::Int(b)) => Some(Value::Int(f.add(a, b))),
            (FieldKind::Curve { curve, .. }, Value::Point(a), Value::Point(b)) => {
                Some(Value::Point(curve.add(a, b)))
            }
            (FieldKind::Gt { group, .. }, Value::Quad(a), Value::Quad(b)) => {
                Some(Value::Quad(group.fq.fq2_mul(a, b)))
            }
            _ => None,
        }
    }

    pub fn neg(&self, a: &Value) -> Option<Value> {
        match (&self.kind, a) {
            (FieldKind::Prime(f), Value::Int(a)) => Some(Value::Int(f.neg(a))),
            (FieldKind::Curve { curve, .. }, Value::Point(a)) => Some(Value::Point(curve.neg(a))),
            (FieldKind::Gt { group, .. }, Value::Quad(a)) => {
                group.fq.fq2_inv(a).map(Value::Quad)
            }
            _ => None,
        }
    }

    pub fn sub(&self, a: &Value, b: &Value) -> Option<Value> {
        self.add(a, &self.neg(b)?)
    }

    /// The ring multiplication, or the group law for groups.
    pub fn mul(&self, a: &Value, b: &Value) -> Option<Value> {
        match (&self.kind, a, b) {
            (FieldKind::Prime(f), Value::Int(a), Value::Int(b)) => Some(Value::Int(f.mul(a, b))),
            _ => self.add(a, b),
        }
    }

    pub fn invert(&self, a: &Value) -> Option<Value> {
        match (&self.kind, a) {
            (FieldKind::Prime(f), Value::Int(a)) => f.inv(a).map(Value::Int),
            _ => self.neg(a),
        }
    }

    pub fn div(&self, a: &Value, b: &Value) -> Option<Value> {
        self.mul(a, &self.invert(b)?)
    }

    pub fn double(&self, a: &Value) -> Option<Value> {
        match (&self.kind, a) {
            (FieldKind::Curve { curve, .. }, Value::Point(a)) => {
                Some(Value::Point(curve.double(a)))
            }
            _ => self.add(a, a),
        }
    }

    pub fn square(&self, a: &Value) -> Option<Value> {
        match (&self.kind, a) {
            (FieldKind::Gt { group, .. }, Value::Quad(a)) => {
                Some(Value::Quad(group.fq.fq2_square(a)))
            }
            _ => self.mul(a, a),
        }
    }

    pub fn halve(&self, a: &Value) -> Option<Value> {
        match &self.kind {
            FieldKind::Prime(f) => {
                self.mul(a, &Value::Int(f.inv(&BigUint::from(2u32))?))
            }
            _ => self.pow(a, &((self.order() + 1u32) >> 1)),
        }
    }

    /// Repeated application of the multiplication: `a^e` in rings and GT, `e * a` on curves.
    pub fn pow(&self, a: &Value, e: &BigUint) -> Option<Value> {
        match (&self.kind, a) {
            (FieldKind::Prime(f), Value::Int(a)) => Some(Value::Int(f.pow(a, e))),
            (FieldKind::Curve { curve, .. }, Value::Point(a)) => {
                Some(Value::Point(curve.mul(a, e)))
            }
            (FieldKind::Gt { group, .. }, Value::Quad(a)) => {
                Some(Value::Quad(group.fq.fq2_pow(a, e)))
            }
            _ => None,
        }
    }

    pub fn pow_signed(&self, a: &Value, e: &BigInt) -> Option<Value> {
        if e.is_negative() {
            self.pow(&self.invert(a)?, e.magnitude())
        } else {
            self.pow(a, e.magnitude())
        }
    }

    pub fn pow_mpz(&self, a: &Value, e: &Mpz) -> Option<Value> {
        self.pow_signed(a, &e.to_bigint())
    }

    pub fn pow_zn(&self, a: &Value, e: &Value) -> Option<Value> {
        match e {
            Value::Int(e) => self.pow(a, e),
            _ => None,
        }
    }

    /// `i * a` in rings. In groups this is the group law applied `i` times, so `a^i`.
    pub fn mul_mpz(&self, a: &Value, i: &Mpz) -> Option<Value> {
        match &self.kind {
            FieldKind::Prime(f) => {
                self.mul(a, &Value::Int(f.reduce_signed(&i.to_bigint())))
            }
            _ => self.pow_mpz(a, i),
        }
    }

    pub fn mul_zn(&self, a: &Value, i: &Value) -> Option<Value> {
        match &self.kind {
            FieldKind::Prime(_) => self.mul(a, i),
            _ => self.pow_zn(a, i),
        }
    }

    pub fn is0(&self, a: &Value) -> bool {
        *a == self.zero()
    }

    pub fn is1(&self, a: &Value) -> bool {
        *a == self.one()
    }

    pub fn is_square(&self, a: &Value) -> bool {
        match (&self.kind, a) {
            (FieldKind::Prime(f), Value::Int(a)) => f.is_square(a),
            _ => true,
        }
    }

    pub fn sign(&self, a: &Value) -> i32 {
        match (&self.kind, a) {
            (FieldKind::Prime(f), Value::Int(a)) => f.sign(a),
            (FieldKind::Curve { curve, .. }, Value::Point(a)) => curve.sign(a),
            (FieldKind::Gt { group, .. }, Value::Quad(a)) => group.fq.sign(&a.im),
            _ => 0,
        }
    }

    /// Zero iff equal. Ring elements are ordered as integers, group elements only compare
    /// for equality.
    pub fn cmp(&self, a: &Value, b: &Value) -> i32 {
        match (&self.kind, a, b) {
            (FieldKind::Prime(f), Value::Int(a), Value::Int(b)) => {
                match f.reduce(a).cmp(&f.reduce(b)) {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                }
            }
            _ => i32::from(a != b),
        }
    }

    pub fn from_hash(&self, data: &[u8]) -> Value {
        match &self.kind {
            FieldKind::Prime(f) => Value::Int(f.from_bytes(data)),
            FieldKind::Curve { curve, .. } => Value::Point(curve.from_hash(data)),
            FieldKind::Gt { group, .. } => {
                let z = Fq2::new(group.fq.from_bytes(data), BigUint::one());
                Value::Quad(group.project(&z))
            }
        }
    }

    pub fn random(&self, source: &dyn RandomSource) -> PbcResult<Value> {
        match &self.kind {
            FieldKind::Prime(f) => Ok(Value::Int(draw(source, f.modulus())?)),
            FieldKind::Curve { curve, .. } => {
                for _ in 0..MAX_POINT_SAMPLES {
                    let x = draw(source, curve.fq.modulus())?;
                    if let Some(p) = curve.from_x(&x) {
                        let p = if draw(source, &BigUint::from(2u32))?.is_one() {
                            curve.neg(&p)
                        } else {
                            p
                        };
                        return Ok(Value::Point(curve.clear_cofactor(&p)));
                    }
                }
                Err(PbcError::EntropyFailure)
            }
            FieldKind::Gt { group, .. } => {
                let re = draw(source, group.fq.modulus())?;
                let im = draw(source, group.fq.modulus())?;
                Ok(Value::Quad(group.project(&Fq2::new(re, im))))
            }
        }
    }

    pub fn item_count(&self, a: &Value) -> usize {
        match (&self.kind, a) {
            (FieldKind::Curve { .. }, Value::Point(Point::Affine { .. })) => 2,
            (FieldKind::Gt { .. }, Value::Quad(_)) => 2,
            _ => 0,
        }
    }

    /// The `i`-th coordinate or coefficient together with the field it lives in.
    pub fn item(&self, a: &Value, i: usize) -> Option<(Arc<Field>, Value)> {
        let (base, coordinates) = match (&self.kind, a) {
            (FieldKind::Curve { base, .. }, Value::Point(Point::Affine { x, y })) => (base, [x, y]),
            (FieldKind::Gt { base, .. }, Value::Quad(z)) => (base, [&z.re, &z.im]),
            _ => return None,
        };
        let c = coordinates.get(i)?;
        Some((base.clone(), Value::Int((*c).clone())))
    }

    pub fn length_in_bytes(&self) -> usize {
        match &self.kind {
            FieldKind::Prime(f) => f.byte_len(),
            FieldKind::Curve { curve, .. } => curve.length_in_bytes(),
            FieldKind::Gt { group, .. } => 2 * group.fq.byte_len(),
        }
    }

    pub fn length_in_bytes_x_only(&self) -> usize {
        match &self.kind {
            FieldKind::Curve { curve, .. } => curve.length_in_bytes_x_only(),
            _ => 0,
        }
    }

    pub fn length_in_bytes_compressed(&self) -> usize {
        match &self.kind {
            FieldKind::Curve { curve, .. } => curve.length_in_bytes_compressed(),
            _ => 0,
        }
    }

    fn encode(&self, a: &Value) -> Vec<u8> {
        match (&self.kind, a) {
            (FieldKind::Prime(f), Value::Int(a)) => f.to_bytes(a),
            (FieldKind::Curve { curve, .. }, Value::Point(a)) => curve.to_bytes(a),
            (FieldKind::Gt { group, .. }, Value::Quad(a)) => group.fq.fq2_to_bytes(a),
            _ => self.encode(&self.zero()),
        }
    }

    /// Write the raw encoding of `a` into `out` and return the number of bytes the encoding takes.
    /// Bytes that do not fit are dropped.
    pub fn to_bytes(&self, a: &Value, out: &mut [u8]) -> usize {
        copy_truncated(&self.encode(a), out)
    }

    pub fn to_bytes_x_only(&self, a: &Value, out: &mut [u8]) -> usize {
        match (&self.kind, a) {
            (FieldKind::Curve { curve, .. }, Value::Point(a)) => {
                copy_truncated(&curve.to_bytes_x_only(a), out)
            }
            _ => 0,
        }
    }

    pub fn to_bytes_compressed(&self, a: &Value, out: &mut [u8]) -> usize {
        match (&self.kind, a) {
            (FieldKind::Curve { curve, .. }, Value::Point(a)) => {
                copy_truncated(&curve.to_bytes_compressed(a), out)
            }
            _ => 0,
        }
    }

    /// Decode the raw encoding. Returns `None` if `bytes` is too short.
    pub fn from_bytes(&self, bytes: &[u8]) -> Option<Value> {
        if bytes.len() < self.length_in_bytes() {
            return None;
        }
        Some(match &self.kind {
            FieldKind::Prime(f) => Value::Int(f.from_bytes(&bytes[..f.byte_len()])),
            FieldKind::Curve { curve, .. } => Value::Point(curve.from_bytes(bytes)),
            FieldKind::Gt { group, .. } => Value::Quad(group.fq.fq2_from_bytes(bytes)),
        })
    }

    pub fn from_bytes_x_only(&self, bytes: &[u8]) -> Option<Value> {
        match &self.kind {
            FieldKind::Curve { curve, .. } if bytes.len() >= curve.length_in_bytes_x_only() => {
                Some(Value::Point(curve.from_bytes_x_only(bytes)))
            }
            _ => None,
        }
    }

    pub fn from_bytes_compressed(&self, bytes: &[u8]) -> Option<Value> {
        match &self.kind {
            FieldKind::Curve { curve, .. }
                if bytes.len() >= curve.length_in_bytes_compressed() =>
            {
                Some(Value::Point(curve.from_bytes_compressed(bytes)))
            }
            _ => None,
        }
    }

    pub fn to_text(&self, a: &Value) -> TextValue {
        match (&self.kind, a) {
            (FieldKind::Prime(f), Value::Int(a)) => TextValue::Integer(f.reduce(a)),
            (FieldKind::Curve { .. }, Value::Point(Point::Infinity)) => TextValue::Infinity,
            (FieldKind::Curve { .. }, Value::Point(Point::Affine { x, y })) => TextValue::List(
                vec![TextValue::Integer(x.clone()), TextValue::Integer(y.clone())],
            ),
            (FieldKind::Gt { .. }, Value::Quad(z)) => TextValue::List(vec![
                TextValue::Integer(z.re.clone()),
                TextValue::Integer(z.im.clone()),
            ]),
            _ => self.to_text(&self.zero()),
        }
    }

    /// Parse a text tree. Returns `None` if its shape does not fit the field or a point is not
    /// on the curve.
    pub fn from_text(&self, text: &TextValue) -> Option<Value> {
        match (&self.kind, text) {
            (FieldKind::Prime(f), TextValue::Integer(n)) => Some(Value::Int(f.reduce(n))),
            (FieldKind::Curve { .. }, TextValue::Infinity) => Some(Value::Point(Point::Infinity)),
            (FieldKind::Curve { curve, .. }, TextValue::List(items)) => {
                match items.as_slice() {
                    [TextValue::Integer(x), TextValue::Integer(y)] => {
                        let (x, y) = (curve.fq.reduce(x), curve.fq.reduce(y));
                        curve
                            .is_on_curve(&x, &y)
                            .then_some(Value::Point(Point::Affine { x, y }))
                    }
                    _ => None,
                }
            }
            (FieldKind::Gt { group, .. }, TextValue::List(items)) => match items.as_slice() {
                [TextValue::Integer(re), TextValue::Integer(im)] => Some(Value::Quad(
                    group.fq.fq2_reduce(&Fq2::new(re.clone(), im.clone())),
                )),
                _ => None,
            },
            _ => None,
        }
    }
}

fn copy_truncated(encoding: &[u8], out: &mut [u8]) -> usize {
    let n = encoding.len().min(out.len());
    out[..n].copy_from_slice(&encoding[..n]);
    encoding.len()
}

/// The fields of one pairing together with the pairing map.
#[derive(Debug)]
pub(crate) struct Context {
    pub fq: Arc<Field>,
    pub g1: Arc<Field>,
    pub g2: Arc<Field>,
    pub gt: Arc<Field>,
    pub zr: Arc<Field>,
    curve: CurveGroup,
}

impl Context {
    /// A symmetric pairing on `y^2 = x^3 + x` over F_q with groups of order `order`, where
    /// `q + 1 = order * cofactor`.
    pub fn new_symmetric(q: BigUint, order: BigUint, cofactor: BigUint) -> Self {
        let curve = CurveGroup::new(q.clone(), order.clone(), cofactor.clone());
        let fq = Field::new(FieldKind::Prime(PrimeField::new(q.clone())));
        let g1 = Field::new(FieldKind::Curve {
            curve: curve.clone(),
            base: fq.clone(),
        });
        let gt = Field::new(FieldKind::Gt {
            group: GtGroup {
                fq: PrimeField::new(q),
                order: order.clone(),
                cofactor,
            },
            base: fq.clone(),
        });
        let zr = Field::new(FieldKind::Prime(PrimeField::new(order)));
        Self {
            fq,
            g2: g1.clone(),
            g1,
            gt,
            zr,
            curve,
        }
    }

    pub fn is_symmetric(&self) -> bool {
        Arc::ptr_eq(&self.g1, &self.g2)
    }

    pub fn pair(&self, p: &Value, q: &Value) -> Option<Value> {
        self.prod_pair(&[(p, q)])
    }

    /// `prod e(p_i, q_i)` with a single final exponentiation.
    pub fn prod_pair(&self, pairs: &[(&Value, &Value)]) -> Option<Value> {
        let fq = &self.curve.fq;
        let mut f = Fq2::one();
        for (p, q) in pairs {
            match (p, q) {
                (Value::Point(p), Value::Point(q)) => {
                    let lines = tate::miller_lines(&self.curve, p);
                    f = fq.fq2_mul(&f, &tate::evaluate(fq, &lines, q));
                }
                _ => return None,
            }
        }
        Some(Value::Quad(tate::final_exponentiation(
            fq,
            &f,
            &self.curve.cofactor,
        )))
    }

    pub fn prepare_pairer(&self, p: &Value) -> Option<PairerTable> {
        match p {
            Value::Point(p) => Some(PairerTable {
                lines: tate::miller_lines(&self.curve, p),
            }),
            _ => None,
        }
    }

    pub fn pairer_apply(&self, table: &PairerTable, q: &Value) -> Option<Value> {
        match q {
            Value::Point(q) => {
                let f = tate::evaluate(&self.curve.fq, &table.lines, q);
                Some(Value::Quad(tate::final_exponentiation(
                    &self.curve.fq,
                    &f,
                    &self.curve.cofactor,
                )))
            }
            _ => None,
        }
    }
}

/// Miller loop lines for a fixed first pairing argument.
#[derive(Clone, Debug)]
pub(crate) struct PairerTable {
    lines: Vec<tate::MillerStep>,
}
