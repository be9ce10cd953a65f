// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use super::Element;
use crate::bigint::to_native;
use crate::engine::mpz::Mpz;
use crate::engine::power::multi_pow;
use crate::engine::{Field, Value};
use crate::error::PbcResult;
use num_bigint::BigInt;
use std::cmp::Ordering;

type UnaryOp = fn(&Field, &Value) -> Option<Value>;
type BinaryOp = fn(&Field, &Value, &Value) -> Option<Value>;

/// Exponents carried by Zr elements.
fn zn_exponents(exponents: &[&Element]) -> Option<Vec<BigInt>> {
    exponents
        .iter()
        .map(|e| match &e.value {
            Value::Int(n) => Some(BigInt::from(n.clone())),
            _ => None,
        })
        .collect()
}

impl Element {
    fn unary(&mut self, name: &'static str, x: &Element, op: UnaryOp) -> PbcResult<&mut Self> {
        self.check_compatible(x)?;
        let result = op(&self.field, &x.value);
        self.commit(name, result)
    }

    fn binary(
        &mut self,
        name: &'static str,
        x: &Element,
        y: &Element,
        op: BinaryOp,
    ) -> PbcResult<&mut Self> {
        self.check_all_compatible(&[x, y])?;
        let result = op(&self.field, &x.value, &y.value);
        self.commit(name, result)
    }

    fn then_unary(&mut self, name: &'static str, op: UnaryOp) -> PbcResult<&mut Self> {
        let result = op(&self.field, &self.value);
        self.commit(name, result)
    }

    fn then_binary(
        &mut self,
        name: &'static str,
        y: &Element,
        op: BinaryOp,
    ) -> PbcResult<&mut Self> {
        self.check_compatible(y)?;
        let result = op(&self.field, &self.value, &y.value);
        self.commit(name, result)
    }

    /// Set to zero, or to the identity in groups.
    pub fn set0(&mut self) -> PbcResult<&mut Self> {
        self.value = self.field.zero();
        Ok(self)
    }

    /// Set to one, or to the identity in groups.
    pub fn set1(&mut self) -> PbcResult<&mut Self> {
        self.value = self.field.one();
        Ok(self)
    }

    /// Copy the value of `x`.
    pub fn set(&mut self, x: &Element) -> PbcResult<&mut Self> {
        self.check_compatible(x)?;
        self.value = x.value.clone();
        Ok(self)
    }

    /// Set to a uniformly random value using the random source of the pairing. Fails with
    /// [crate::error::PbcError::EntropyFailure] if the source fails.
    pub fn rand(&mut self) -> PbcResult<&mut Self> {
        self.value = self.field.random(self.pairing.random_source())?;
        Ok(self)
    }

    /// Compare with `x`. Zr elements are ordered as integers in `[0, r)`. Group elements are
    /// either [Ordering::Equal] or [Ordering::Greater].
    pub fn compare(&self, x: &Element) -> PbcResult<Ordering> {
        self.check_compatible(x)?;
        Ok(self.field.cmp(&self.value, &x.value).cmp(&0))
    }

    pub fn equals(&self, x: &Element) -> PbcResult<bool> {
        Ok(self.compare(x)? == Ordering::Equal)
    }

    /// True for zero, or for the identity in groups.
    pub fn is0(&self) -> bool {
        self.field.is0(&self.value)
    }

    /// True for one, or for the identity in groups.
    pub fn is1(&self) -> bool {
        self.field.is1(&self.value)
    }

    /// True if the element is a square. Every element of a group of odd order is.
    pub fn is_square(&self) -> bool {
        self.field.is_square(&self.value)
    }

    /// 0 for zero. Otherwise 1 or -1, such that an element and its negation have opposite signs.
    pub fn sign(&self) -> i32 {
        self.field.sign(&self.value)
    }

    /// `x + y`, the group law in groups.
    pub fn add(&mut self, x: &Element, y: &Element) -> PbcResult<&mut Self> {
        self.binary("add", x, y, Field::add)
    }

    pub fn sub(&mut self, x: &Element, y: &Element) -> PbcResult<&mut Self> {
        self.binary("sub", x, y, Field::sub)
    }

    /// `x * y`, the group law in groups.
    pub fn mul(&mut self, x: &Element, y: &Element) -> PbcResult<&mut Self> {
        self.binary("mul", x, y, Field::mul)
    }

    /// `x * i` in Zr. In groups, the group law applied `i` times, i.e. `x^i`.
    pub fn mul_big(&mut self, x: &Element, i: &BigInt) -> PbcResult<&mut Self> {
        self.check_compatible(x)?;
        let result = self.field.mul_mpz(&x.value, &to_native(i));
        self.commit("mul_big", result)
    }

    pub fn mul_i32(&mut self, x: &Element, i: i32) -> PbcResult<&mut Self> {
        self.check_compatible(x)?;
        let result = self.field.mul_mpz(&x.value, &Mpz::from_i64(i.into()));
        self.commit("mul_i32", result)
    }

    /// Like [Self::mul_big] with the integer taken from the Zr element `i`.
    pub fn mul_zn(&mut self, x: &Element, i: &Element) -> PbcResult<&mut Self> {
        self.check_compatible(x)?;
        self.check_integer_operand(i)?;
        let result = self.field.mul_zn(&x.value, &i.value);
        self.commit("mul_zn", result)
    }

    /// `x * y^-1`.
    pub fn div(&mut self, x: &Element, y: &Element) -> PbcResult<&mut Self> {
        self.binary("div", x, y, Field::div)
    }

    pub fn double(&mut self, x: &Element) -> PbcResult<&mut Self> {
        self.unary("double", x, Field::double)
    }

    /// The unique `y` with `y + y = x`.
    pub fn halve(&mut self, x: &Element) -> PbcResult<&mut Self> {
        self.unary("halve", x, Field::halve)
    }

    pub fn square(&mut self, x: &Element) -> PbcResult<&mut Self> {
        self.unary("square", x, Field::square)
    }

    pub fn neg(&mut self, x: &Element) -> PbcResult<&mut Self> {
        self.unary("neg", x, Field::neg)
    }

    /// The multiplicative inverse in Zr, the group inverse in groups. Inverting zero is an
    /// illegal operation.
    pub fn invert(&mut self, x: &Element) -> PbcResult<&mut Self> {
        self.unary("invert", x, Field::invert)
    }

    /// `x^i`. Negative exponents invert.
    pub fn pow_big(&mut self, x: &Element, i: &BigInt) -> PbcResult<&mut Self> {
        self.check_compatible(x)?;
        let result = self.field.pow_mpz(&x.value, &to_native(i));
        self.commit("pow_big", result)
    }

    pub fn pow_zn(&mut self, x: &Element, i: &Element) -> PbcResult<&mut Self> {
        self.check_compatible(x)?;
        self.check_integer_operand(i)?;
        let result = self.field.pow_zn(&x.value, &i.value);
        self.commit("pow_zn", result)
    }

    /// `x^i * y^j`, computed with a single chain of squarings.
    pub fn pow2_big(
        &mut self,
        x: &Element,
        i: &BigInt,
        y: &Element,
        j: &BigInt,
    ) -> PbcResult<&mut Self> {
        self.check_all_compatible(&[x, y])?;
        let result = multi_pow(&self.field, &[(&x.value, i), (&y.value, j)]);
        self.commit("pow2_big", result)
    }

    pub fn pow2_zn(
        &mut self,
        x: &Element,
        i: &Element,
        y: &Element,
        j: &Element,
    ) -> PbcResult<&mut Self> {
        self.check_all_compatible(&[x, y])?;
        self.check_integer_operand(i)?;
        self.check_integer_operand(j)?;
        let result = zn_exponents(&[i, j])
            .and_then(|e| multi_pow(&self.field, &[(&x.value, &e[0]), (&y.value, &e[1])]));
        self.commit("pow2_zn", result)
    }

    /// `x^i * y^j * z^k`, computed with a single chain of squarings.
    #[allow(clippy::too_many_arguments)]
    pub fn pow3_big(
        &mut self,
        x: &Element,
        i: &BigInt,
        y: &Element,
        j: &BigInt,
        z: &Element,
        k: &BigInt,
    ) -> PbcResult<&mut Self> {
        self.check_all_compatible(&[x, y, z])?;
        let result = multi_pow(&self.field, &[(&x.value, i), (&y.value, j), (&z.value, k)]);
        self.commit("pow3_big", result)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn pow3_zn(
        &mut self,
        x: &Element,
        i: &Element,
        y: &Element,
        j: &Element,
        z: &Element,
        k: &Element,
    ) -> PbcResult<&mut Self> {
        self.check_all_compatible(&[x, y, z])?;
        for exponent in [i, j, k] {
            self.check_integer_operand(exponent)?;
        }
        let result = zn_exponents(&[i, j, k]).and_then(|e| {
            multi_pow(
                &self.field,
                &[(&x.value, &e[0]), (&y.value, &e[1]), (&z.value, &e[2])],
            )
        });
        self.commit("pow3_zn", result)
    }

    /// `self = self + y`.
    pub fn then_add(&mut self, y: &Element) -> PbcResult<&mut Self> {
        self.then_binary("add", y, Field::add)
    }

    pub fn then_sub(&mut self, y: &Element) -> PbcResult<&mut Self> {
        self.then_binary("sub", y, Field::sub)
    }

    pub fn then_mul(&mut self, y: &Element) -> PbcResult<&mut Self> {
        self.then_binary("mul", y, Field::mul)
    }

    pub fn then_mul_big(&mut self, i: &BigInt) -> PbcResult<&mut Self> {
        let result = self.field.mul_mpz(&self.value, &to_native(i));
        self.commit("mul_big", result)
    }

    pub fn then_mul_i32(&mut self, i: i32) -> PbcResult<&mut Self> {
        let result = self.field.mul_mpz(&self.value, &Mpz::from_i64(i.into()));
        self.commit("mul_i32", result)
    }

    pub fn then_mul_zn(&mut self, i: &Element) -> PbcResult<&mut Self> {
        self.check_integer_operand(i)?;
        let result = self.field.mul_zn(&self.value, &i.value);
        self.commit("mul_zn", result)
    }

    pub fn then_div(&mut self, y: &Element) -> PbcResult<&mut Self> {
        self.then_binary("div", y, Field::div)
    }

    pub fn then_double(&mut self) -> PbcResult<&mut Self> {
        self.then_unary("double", Field::double)
    }

    pub fn then_halve(&mut self) -> PbcResult<&mut Self> {
        self.then_unary("halve", Field::halve)
    }

    pub fn then_square(&mut self) -> PbcResult<&mut Self> {
        self.then_unary("square", Field::square)
    }

    pub fn then_neg(&mut self) -> PbcResult<&mut Self> {
        self.then_unary("neg", Field::neg)
    }

    pub fn then_invert(&mut self) -> PbcResult<&mut Self> {
        self.then_unary("invert", Field::invert)
    }

    pub fn then_pow_big(&mut self, i: &BigInt) -> PbcResult<&mut Self> {
        let result = self.field.pow_mpz(&self.value, &to_native(i));
        self.commit("pow_big", result)
    }

    pub fn then_pow_zn(&mut self, i: &Element) -> PbcResult<&mut Self> {
        self.check_integer_operand(i)?;
        let result = self.field.pow_zn(&self.value, &i.value);
        self.commit("pow_zn", result)
    }
}
