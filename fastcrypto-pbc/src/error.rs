// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Collection of errors returned by the pairing facade.
//!
//! Every error is reported at the point of detection and the current operation is abandoned.
//! [PbcError::InvalidParameters] and [PbcError::NoSuitableCurve] are expected to be handled by
//! ordinary control flow. The remaining variants indicate a programming error or a failing
//! environment.

use thiserror::Error;

pub type PbcResult<T> = Result<T, PbcError>;

/// Collection of errors returned by the pairing facade.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum PbcError {
    /// The pairing parameters could not be parsed or are inconsistent.
    #[error("Invalid pairing parameters")]
    InvalidParameters,

    /// No curve satisfying the requested constraints was found.
    #[error("No suitable curves were found")]
    NoSuitableCurve,

    /// An unchecked element was requested in a field the pairing does not have.
    #[error("Unchecked element initialized in unknown field")]
    UnknownField,

    /// The operation makes no sense for elements of this type.
    #[error("Operation is illegal for elements of this type")]
    IllegalOperation,

    /// A checked element received an unchecked operand.
    #[error("Unchecked element passed to checked operation")]
    UncheckedOperation,

    /// Operands belong to different groups or to different pairings.
    #[error("Elements are from incompatible fields or pairings")]
    IncompatibleElements,

    /// The arguments of a product of pairings do not form pairs.
    #[error("Pairing product list is in an invalid format")]
    BadPairList,

    /// Malformed element input during decoding.
    #[error("Invalid element format during scan")]
    BadInput,

    /// Unsupported base or format selector.
    #[error("Invalid verb specified for scan")]
    BadVerb,

    /// Sub-element index out of bounds.
    #[error("Index out of range")]
    OutOfRange,

    /// The random source failed to produce a value.
    #[error("Error while reading from entropy source")]
    EntropyFailure,

    /// The engine wrote past the end of a buffer.
    #[error("A severe internal error has lead to possible memory corruption")]
    InternalError,

    /// Reading or writing an external stream failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for PbcError {
    fn from(e: std::io::Error) -> Self {
        PbcError::Io(e.to_string())
    }
}
