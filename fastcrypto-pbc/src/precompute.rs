// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Precomputation for repeated exponentiation of a fixed base ([Power]) and repeated pairing with
//! a fixed first argument ([Pairer]).
//!
//! Both take a snapshot of their source element when created. Changing the source element
//! afterwards does not change the results:
//!
//! ```
//! # use fastcrypto_pbc::pairing::Pairing;
//! # use num_bigint::BigInt;
//! let pairing: Pairing = "type a\nq 83\nh 12\nr 7\nexp2 3\nexp1 1\nsign1 -1\nsign0 1\n"
//!     .parse()
//!     .unwrap();
//! let mut base = pairing.new_zr();
//! base.set_i32(2).unwrap();
//! let power = base.prepare_power().unwrap();
//! base.set_i32(3).unwrap();
//!
//! let mut result = pairing.new_zr();
//! power.pow_big(&mut result, &BigInt::from(3)).unwrap();
//! assert_eq!(result.big_int().unwrap(), BigInt::from(1)); // 2^3 mod 7
//! ```

use crate::bigint::to_native;
use crate::element::Element;
use crate::engine::power::PowerTable;
use crate::engine::PairerTable;
use crate::error::{PbcError, PbcResult};
use crate::pairing::FieldType;
use num_bigint::BigInt;
use tracing::trace;

/// A fixed base with a table of its small powers.
#[derive(Debug)]
pub struct Power {
    source: Element,
    table: PowerTable,
}

impl Power {
    /// Set `target` to `source^i`.
    pub fn pow_big<'a>(&self, target: &'a mut Element, i: &BigInt) -> PbcResult<&'a mut Element> {
        target.check_compatible(&self.source)?;
        let result = self.table.pow_mpz(&to_native(i));
        target.commit("power_big", result)
    }

    /// Set `target` to `source^i` for a Zr element `i`.
    pub fn pow_zn<'a>(&self, target: &'a mut Element, i: &Element) -> PbcResult<&'a mut Element> {
        target.check_compatible(&self.source)?;
        target.check_integer_operand(i)?;
        let result = self.table.pow_zn(&i.value);
        target.commit("power_zn", result)
    }

    /// The base as it was when the table was built.
    pub fn source(&self) -> &Element {
        &self.source
    }
}

impl Drop for Power {
    fn drop(&mut self) {
        trace!("Releasing power table");
    }
}

/// A fixed first pairing argument with its precomputed Miller loop.
#[derive(Debug)]
pub struct Pairer {
    source: Element,
    table: PairerTable,
}

impl Pairer {
    /// Set `target` to `e(source, y)`. A checked target requires the source to be a checked
    /// element of G1 of the target's pairing, and `y` a checked element of its G2.
    pub fn pair<'a>(&self, target: &'a mut Element, y: &Element) -> PbcResult<&'a mut Element> {
        target.check_in(FieldType::GT)?;
        target.check_operand_in(&self.source, FieldType::G1)?;
        target.check_operand_in(y, FieldType::G2)?;
        let result = self.source.pairing.context().pairer_apply(&self.table, &y.value);
        target.commit("pairer_pair", result)
    }

    /// The first argument as it was when the pairer was built.
    pub fn source(&self) -> &Element {
        &self.source
    }
}

impl Drop for Pairer {
    fn drop(&mut self) {
        trace!("Releasing pairer");
    }
}

impl Element {
    /// Precompute powers of the current value.
    pub fn prepare_power(&self) -> PbcResult<Power> {
        let table =
            PowerTable::new(self.field.clone(), &self.value).ok_or(PbcError::IllegalOperation)?;
        Ok(Power {
            source: self.clone(),
            table,
        })
    }

    /// `self = power.source()^i`.
    pub fn power_big(&mut self, power: &Power, i: &BigInt) -> PbcResult<&mut Self> {
        power.pow_big(self, i)
    }

    pub fn power_zn(&mut self, power: &Power, i: &Element) -> PbcResult<&mut Self> {
        power.pow_zn(self, i)
    }

    /// Precompute the Miller loop for pairings with this element as first argument. If the
    /// element is checked it must be in G1.
    pub fn prepare_pairer(&self) -> PbcResult<Pairer> {
        self.check_in(FieldType::G1)?;
        let table = self
            .pairing
            .context()
            .prepare_pairer(&self.value)
            .ok_or(PbcError::IllegalOperation)?;
        Ok(Pairer {
            source: self.clone(),
            table,
        })
    }

    /// `self = e(pairer.source(), y)`.
    pub fn pairer_pair(&mut self, pairer: &Pairer, y: &Element) -> PbcResult<&mut Self> {
        pairer.pair(self, y)
    }
}
