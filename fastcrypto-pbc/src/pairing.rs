// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::config::PairingConfig;
use crate::element::Element;
use crate::engine::{Context, Field};
use crate::error::{PbcError, PbcResult};
use crate::params::{PairingType, Params};
use crate::random::RandomSource;
use std::fmt::{Debug, Display, Formatter};
use std::io::Read;
use std::str::FromStr;
use std::sync::Arc;
use tracing::debug;

/// The four algebraic structures of a pairing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldType {
    G1,
    G2,
    GT,
    Zr,
}

impl TryFrom<i32> for FieldType {
    type Error = PbcError;

    fn try_from(tag: i32) -> Result<Self, Self::Error> {
        match tag {
            0 => Ok(FieldType::G1),
            1 => Ok(FieldType::G2),
            2 => Ok(FieldType::GT),
            3 => Ok(FieldType::Zr),
            _ => Err(PbcError::UnknownField),
        }
    }
}

impl FromStr for FieldType {
    type Err = PbcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "G1" => Ok(FieldType::G1),
            "G2" => Ok(FieldType::G2),
            "GT" => Ok(FieldType::GT),
            "Zr" => Ok(FieldType::Zr),
            _ => Err(PbcError::UnknownField),
        }
    }
}

impl Display for FieldType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Debug::fmt(self, f)
    }
}

struct PairingInner {
    context: Context,
    pairing_type: PairingType,
    config: PairingConfig,
}

impl Drop for PairingInner {
    fn drop(&mut self) {
        debug!(pairing_type = ?self.pairing_type, "Releasing pairing");
    }
}

/// A pairing instance: the groups G1, G2, GT of order r, the ring Zr, and the bilinear map
/// between them. This is a cheap, clonable handle. Every element keeps its pairing alive.
#[derive(Clone)]
pub struct Pairing {
    inner: Arc<PairingInner>,
}

impl Pairing {
    /// Create a pairing with the default configuration. The pairing copies what it needs from
    /// `params` and does not keep a reference to them.
    pub fn new(params: &Params) -> Self {
        Self::with_config(params, PairingConfig::default())
    }

    pub fn with_config(params: &Params, config: PairingConfig) -> Self {
        let curve = params.curve();
        let context =
            Context::new_symmetric(curve.q.clone(), curve.order.clone(), curve.cofactor.clone());
        debug!(
            pairing_type = ?curve.pairing_type,
            q_bits = curve.q.bits(),
            order_bits = curve.order.bits(),
            "Created pairing"
        );
        Self {
            inner: Arc::new(PairingInner {
                context,
                pairing_type: curve.pairing_type.clone(),
                config,
            }),
        }
    }

    /// Read parameters from a stream and create a pairing from them.
    pub fn from_reader<R: Read>(reader: R) -> PbcResult<Self> {
        Ok(Self::new(&Params::from_reader(reader)?))
    }

    /// True iff G1 and G2 are the same group.
    pub fn is_symmetric(&self) -> bool {
        self.context().is_symmetric()
    }

    pub fn g1_length(&self) -> usize {
        self.context().g1.length_in_bytes()
    }

    pub fn g1_x_length(&self) -> usize {
        self.context().g1.length_in_bytes_x_only()
    }

    pub fn g1_compressed_length(&self) -> usize {
        self.context().g1.length_in_bytes_compressed()
    }

    pub fn g2_length(&self) -> usize {
        self.context().g2.length_in_bytes()
    }

    pub fn g2_x_length(&self) -> usize {
        self.context().g2.length_in_bytes_x_only()
    }

    pub fn g2_compressed_length(&self) -> usize {
        self.context().g2.length_in_bytes_compressed()
    }

    pub fn gt_length(&self) -> usize {
        self.context().gt.length_in_bytes()
    }

    pub fn zr_length(&self) -> usize {
        self.context().zr.length_in_bytes()
    }

    /// A checked element of G1 set to the identity.
    pub fn new_g1(&self) -> Element {
        Element::new_checked(self, FieldType::G1)
    }

    /// A checked element of G2 set to the identity.
    pub fn new_g2(&self) -> Element {
        Element::new_checked(self, FieldType::G2)
    }

    /// A checked element of GT set to the identity.
    pub fn new_gt(&self) -> Element {
        Element::new_checked(self, FieldType::GT)
    }

    /// A checked element of Zr set to zero.
    pub fn new_zr(&self) -> Element {
        Element::new_checked(self, FieldType::Zr)
    }

    /// An element that skips all compatibility checks. Mixing it with elements of other groups
    /// produces meaningless values.
    pub fn new_unchecked_element(&self, field: FieldType) -> Element {
        Element::new_unchecked(self, field)
    }

    /// Number of live handles (pairing clones, elements and precomputed objects) sharing this
    /// pairing.
    pub fn strong_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    pub(crate) fn context(&self) -> &Context {
        &self.inner.context
    }

    pub(crate) fn field(&self, field: FieldType) -> &Arc<Field> {
        let context = self.context();
        match field {
            FieldType::G1 => &context.g1,
            FieldType::G2 => &context.g2,
            FieldType::GT => &context.gt,
            FieldType::Zr => &context.zr,
        }
    }

    pub(crate) fn random_source(&self) -> &dyn RandomSource {
        self.inner.config.random.as_ref()
    }

    pub(crate) fn engine_messages(&self) -> bool {
        self.inner.config.engine_messages
    }

    pub(crate) fn ptr_eq(&self, other: &Pairing) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl FromStr for Pairing {
    type Err = PbcError;

    fn from_str(params: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(&params.parse()?))
    }
}

impl Debug for Pairing {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pairing")
            .field("type", &self.inner.pairing_type)
            .field("addr", &Arc::as_ptr(&self.inner))
            .finish()
    }
}
