// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Element handles.
//!
//! An [Element] is a mutable value in one of G1, G2, GT or Zr of a [Pairing]. Operations write
//! their result into the element they are called on and return it again, so they chain:
//!
//! ```
//! # use fastcrypto_pbc::pairing::Pairing;
//! let pairing: Pairing = "type a\nq 83\nh 12\nr 7\nexp2 3\nexp1 1\nsign1 -1\nsign0 1\n"
//!     .parse()
//!     .unwrap();
//! let mut a = pairing.new_zr();
//! let mut b = pairing.new_zr();
//! a.set_i32(3).unwrap();
//! b.set_i32(5).unwrap();
//! let mut sum = pairing.new_zr();
//! sum.add(&a, &b).unwrap().then_mul(&b).unwrap();
//! assert_eq!(sum.big_int().unwrap(), 5.into());
//! ```
//!
//! Elements created through [Pairing::new_g1] and friends are *checked*: before every operation
//! they verify that all operands are checked and belong to the same group, failing with
//! [PbcError::UncheckedOperation] or [PbcError::IncompatibleElements] otherwise. Elements created
//! with [Pairing::new_unchecked_element] skip all of this. Mixing them with elements of another
//! group gives meaningless values, never undefined behaviour.
//!
//! When the engine cannot perform an operation (e.g. inverting zero), a checked element fails
//! with [PbcError::IllegalOperation] while an unchecked element is set to zero.

mod arith;
mod fmt;
mod io;
mod misc;

use crate::engine::{Field, FieldId, FieldKind, Value};
use crate::error::{PbcError, PbcResult};
use crate::pairing::{FieldType, Pairing};
use std::sync::Arc;
use tracing::{trace, warn};

/// Identity of the group a checked element belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct CheckTag {
    field: FieldId,
    is_integer: bool,
    is_point: bool,
}

impl CheckTag {
    fn of(field: &Field) -> Self {
        Self {
            field: field.id(),
            is_integer: matches!(field.kind(), FieldKind::Prime(_)),
            is_point: field.is_curve(),
        }
    }
}

/// A value in one of the groups of a pairing. See the [module documentation](self).
#[derive(Clone)]
pub struct Element {
    pub(crate) pairing: Pairing,
    pub(crate) field: Arc<Field>,
    pub(crate) value: Value,
    tag: Option<CheckTag>,
}

impl Element {
    pub(crate) fn new_checked(pairing: &Pairing, field: FieldType) -> Self {
        Self::in_field(pairing.clone(), pairing.field(field).clone(), true)
    }

    pub(crate) fn new_unchecked(pairing: &Pairing, field: FieldType) -> Self {
        Self::in_field(pairing.clone(), pairing.field(field).clone(), false)
    }

    fn in_field(pairing: Pairing, field: Arc<Field>, checked: bool) -> Self {
        let value = field.zero();
        let tag = checked.then(|| CheckTag::of(&field));
        Self {
            pairing,
            field,
            value,
            tag,
        }
    }

    /// A new element in the same group and with the same checked-ness as this one, set to zero.
    pub fn new_field_element(&self) -> Self {
        Self::in_field(self.pairing.clone(), self.field.clone(), self.is_checked())
    }

    pub fn pairing(&self) -> &Pairing {
        &self.pairing
    }

    pub fn is_checked(&self) -> bool {
        self.tag.is_some()
    }

    /// Require `operand` to be checked and in the same group as this element, if this element is
    /// checked.
    pub(crate) fn check_compatible(&self, operand: &Element) -> PbcResult<()> {
        let Some(tag) = &self.tag else {
            return Ok(());
        };
        let other = operand.tag.as_ref().ok_or(PbcError::UncheckedOperation)?;
        if tag.field != other.field {
            return Err(PbcError::IncompatibleElements);
        }
        Ok(())
    }

    fn check_all_compatible(&self, operands: &[&Element]) -> PbcResult<()> {
        operands
            .iter()
            .try_for_each(|operand| self.check_compatible(operand))
    }

    /// Require this element to be an integer, if it is checked.
    fn check_integer(&self) -> PbcResult<()> {
        match &self.tag {
            Some(tag) if !tag.is_integer => Err(PbcError::IllegalOperation),
            _ => Ok(()),
        }
    }

    fn check_point(&self) -> PbcResult<()> {
        match &self.tag {
            Some(tag) if !tag.is_point => Err(PbcError::IllegalOperation),
            _ => Ok(()),
        }
    }

    /// Require an integer operand (an exponent or scalar), if this element is checked. The
    /// operand may come from any pairing.
    pub(crate) fn check_integer_operand(&self, operand: &Element) -> PbcResult<()> {
        if self.tag.is_none() {
            return Ok(());
        }
        match &operand.tag {
            None => Err(PbcError::UncheckedOperation),
            Some(tag) if !tag.is_integer => Err(PbcError::IllegalOperation),
            Some(_) => Ok(()),
        }
    }

    /// Require `operand` to be checked and in the given group of this element's pairing, if this
    /// element is checked.
    pub(crate) fn check_operand_in(&self, operand: &Element, field: FieldType) -> PbcResult<()> {
        if self.tag.is_none() {
            return Ok(());
        }
        let tag = operand.tag.as_ref().ok_or(PbcError::UncheckedOperation)?;
        if tag.field != self.pairing.field(field).id() {
            return Err(PbcError::IncompatibleElements);
        }
        Ok(())
    }

    pub(crate) fn check_in(&self, field: FieldType) -> PbcResult<()> {
        match &self.tag {
            Some(tag) if tag.field != self.pairing.field(field).id() => {
                Err(PbcError::IncompatibleElements)
            }
            _ => Ok(()),
        }
    }

    /// Store the result of an engine operation. `None` means the engine could not perform it.
    pub(crate) fn commit(
        &mut self,
        operation: &'static str,
        result: Option<Value>,
    ) -> PbcResult<&mut Self> {
        match result {
            Some(value) => self.value = value,
            None => {
                if self.pairing.engine_messages() {
                    warn!(
                        operation,
                        field = self.field.id().as_u64(),
                        "Engine rejected operation"
                    );
                }
                if self.is_checked() {
                    return Err(PbcError::IllegalOperation);
                }
                self.value = self.field.zero();
            }
        }
        Ok(self)
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        trace!(field = self.field.id().as_u64(), "Releasing element");
    }
}

impl PartialEq for Element {
    /// Elements that cannot be compared are not equal.
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}
