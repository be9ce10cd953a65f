// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use super::Element;
use crate::engine::dlog::{brute_force, pollard_rho};
use crate::engine::mpz::Mpz;
use crate::engine::{Field, Value};
use crate::error::{PbcError, PbcResult};
use crate::pairing::FieldType;
use itertools::Itertools;
use num_bigint::{BigInt, BigUint};

type DiscreteLog = fn(&Field, &Value, &Value, &BigUint) -> Option<BigUint>;

impl Element {
    /// `e(x, y)` for `x` in G1, `y` in G2. This element must be in GT.
    pub fn pair(&mut self, x: &Element, y: &Element) -> PbcResult<&mut Self> {
        self.check_in(FieldType::GT)?;
        self.check_operand_in(x, FieldType::G1)?;
        self.check_operand_in(y, FieldType::G2)?;
        let result = self.pairing.context().pair(&x.value, &y.value);
        self.commit("pair", result)
    }

    /// `prod e(x_i, y_i)` over the pairs `x_0, y_0, x_1, y_1, ...`. Fails with
    /// [PbcError::BadPairList] if the number of elements is odd. The empty product is the
    /// identity.
    pub fn prod_pair(&mut self, elements: &[&Element]) -> PbcResult<&mut Self> {
        if elements.len() % 2 != 0 {
            return Err(PbcError::BadPairList);
        }
        let (x, y): (Vec<&Element>, Vec<&Element>) = elements.iter().copied().tuples().unzip();
        self.prod_pair_slice(&x, &y)
    }

    /// `prod e(x[i], y[i])`. Fails with [PbcError::BadPairList] if the slices have different
    /// lengths.
    pub fn prod_pair_slice(&mut self, x: &[&Element], y: &[&Element]) -> PbcResult<&mut Self> {
        if x.len() != y.len() {
            return Err(PbcError::BadPairList);
        }
        self.check_in(FieldType::GT)?;
        for (xi, yi) in x.iter().zip(y) {
            self.check_operand_in(xi, FieldType::G1)?;
            self.check_operand_in(yi, FieldType::G2)?;
        }
        let pairs = x
            .iter()
            .zip(y)
            .map(|(xi, yi)| (&xi.value, &yi.value))
            .collect::<Vec<_>>();
        let result = self.pairing.context().prod_pair(&pairs);
        self.commit("prod_pair", result)
    }

    fn discrete_log(
        &mut self,
        name: &'static str,
        g: &Element,
        h: &Element,
        solve: DiscreteLog,
    ) -> PbcResult<&mut Self> {
        self.check_integer()?;
        if self.is_checked() {
            if !g.is_checked() {
                return Err(PbcError::UncheckedOperation);
            }
            g.check_compatible(h)?;
        }
        let result = solve(&g.field, &g.value, &h.value, g.field.order())
            .and_then(|k| self.field.set_mpz(&Mpz::from_biguint(&k, false)));
        self.commit(name, result)
    }

    /// Set this Zr element to `k` with `g^k = h` by trying every exponent. Takes time linear in
    /// the group order. Fails with [PbcError::IllegalOperation] if there is no solution.
    pub fn brute_force_dl(&mut self, g: &Element, h: &Element) -> PbcResult<&mut Self> {
        self.discrete_log("brute_force_dl", g, h, brute_force)
    }

    /// Like [Self::brute_force_dl] using Pollard's rho method. Expected time is the square root
    /// of the group order, but there is no bound.
    pub fn pollard_rho_dl(&mut self, g: &Element, h: &Element) -> PbcResult<&mut Self> {
        self.discrete_log("pollard_rho_dl", g, h, pollard_rho)
    }

    /// Number of coordinates (curve points) or coefficients (GT). Zero for Zr and the point at
    /// infinity.
    pub fn len(&self) -> usize {
        self.field.item_count(&self.value)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A copy of the `i`-th coordinate or coefficient, with the same checked-ness as this element.
    pub fn item(&self, i: usize) -> PbcResult<Element> {
        if self.is_checked() && i >= self.len() {
            return Err(PbcError::OutOfRange);
        }
        let (field, value) = self
            .field
            .item(&self.value, i)
            .ok_or(PbcError::OutOfRange)?;
        let mut item = Element::in_field(self.pairing.clone(), field, self.is_checked());
        item.value = value;
        Ok(item)
    }

    /// The x coordinate of a curve point.
    pub fn x(&self) -> PbcResult<BigInt> {
        self.check_point()?;
        self.item(0)?.big_int()
    }

    /// The y coordinate of a curve point.
    pub fn y(&self) -> PbcResult<BigInt> {
        self.check_point()?;
        self.item(1)?.big_int()
    }
}
