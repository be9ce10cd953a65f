// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Pairing parameters in the line-oriented `key value` text format of PBC.
//!
//! Two pairing types are supported, both symmetric pairings on `y^2 = x^3 + x`:
//!
//! * `type a`: a prime order `r` subgroup of the curve over F_q with `q + 1 = h * r`. The keys
//!   are `q`, `h`, `r` and optionally `exp2`, `exp1`, `sign1`, `sign0` describing `r` as
//!   `2^exp2 + sign1 * 2^exp1 + sign0`.
//! * `type a1`: a composite order `n` group over F_p with `p + 1 = l * n`. The keys are `p`, `n`
//!   and `l`.
//!
//! Asymmetric types (`d`, `e`, `f`, `g`) and any other type fail with
//! [PbcError::InvalidParameters]. Every pairing is therefore symmetric, and G1 and G2 are the
//! same group.
//!
//! The text is kept as given and written back verbatim.

use crate::error::{PbcError, PbcResult};
use crate::pairing::Pairing;
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_prime::nt_funcs::is_prime;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::{Display, Formatter};
use std::io::{Read, Write};
use std::str::FromStr;

#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum PairingType {
    A,
    A1,
}

/// Curve data extracted from the parameter text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct CurveParams {
    pub pairing_type: PairingType,
    /// Characteristic of the base field.
    pub q: BigUint,
    /// Order of G1, G2, GT and modulus of Zr.
    pub order: BigUint,
    /// `(q + 1) / order`.
    pub cofactor: BigUint,
}

/// Parsed and validated pairing parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Params {
    text: String,
    curve: CurveParams,
}

impl Params {
    /// Read the parameter text from a stream.
    pub fn from_reader<R: Read>(mut reader: R) -> PbcResult<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        text.parse()
    }

    /// Write the parameter text exactly as it was given. Returns the number of bytes written.
    pub fn write_to<W: Write>(&self, mut writer: W) -> PbcResult<usize> {
        writer.write_all(self.text.as_bytes())?;
        Ok(self.text.len())
    }

    pub fn new_pairing(&self) -> Pairing {
        Pairing::new(self)
    }

    pub(crate) fn curve(&self) -> &CurveParams {
        &self.curve
    }
}

impl Display for Params {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}

impl FromStr for Params {
    type Err = PbcError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let entries = parse_entries(text)?;
        let curve = match entries.get("type").map(String::as_str) {
            Some("a") => type_a(&entries)?,
            Some("a1") => type_a1(&entries)?,
            _ => return Err(PbcError::InvalidParameters),
        };
        Ok(Self {
            text: text.to_string(),
            curve,
        })
    }
}

impl TryFrom<String> for Params {
    type Error = PbcError;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        text.parse()
    }
}

impl From<Params> for String {
    fn from(params: Params) -> Self {
        params.text
    }
}

fn parse_entries(text: &str) -> PbcResult<HashMap<String, String>> {
    let mut entries = HashMap::new();
    for line in text.lines() {
        let mut tokens = line.split_whitespace();
        let Some(key) = tokens.next() else {
            continue;
        };
        let value = tokens.next().ok_or(PbcError::InvalidParameters)?;
        if tokens.next().is_some() {
            return Err(PbcError::InvalidParameters);
        }
        entries.insert(key.to_string(), value.to_string());
    }
    Ok(entries)
}

fn integer<T: FromStr>(entries: &HashMap<String, String>, key: &str) -> PbcResult<T> {
    entries
        .get(key)
        .ok_or(PbcError::InvalidParameters)?
        .parse()
        .map_err(|_| PbcError::InvalidParameters)
}

fn optional_integer<T: FromStr>(
    entries: &HashMap<String, String>,
    key: &str,
) -> PbcResult<Option<T>> {
    entries.contains_key(key).then(|| integer(entries, key)).transpose()
}

/// Checks shared by both types: `q` is a prime congruent to 3 mod 4, `q + 1 = order * cofactor`
/// and the embedding degree is 2.
fn check_curve(q: &BigUint, order: &BigUint, cofactor: &BigUint) -> PbcResult<()> {
    let valid = q.bits() > 2
        && q % 4u32 == BigUint::from(3u32)
        && is_prime(q, None).probably()
        && order > &BigUint::one()
        && order.is_odd()
        && order * cofactor == q + 1u32
        && !(q - 1u32).is_multiple_of(order);
    if valid {
        Ok(())
    } else {
        Err(PbcError::InvalidParameters)
    }
}

fn type_a(entries: &HashMap<String, String>) -> PbcResult<CurveParams> {
    let q: BigUint = integer(entries, "q")?;
    let h: BigUint = integer(entries, "h")?;
    let r: BigUint = integer(entries, "r")?;
    check_curve(&q, &r, &h)?;
    if !is_prime(&r, None).probably() {
        return Err(PbcError::InvalidParameters);
    }

    let exp2: Option<u32> = optional_integer(entries, "exp2")?;
    let exp1: Option<u32> = optional_integer(entries, "exp1")?;
    let sign1: Option<i32> = optional_integer(entries, "sign1")?;
    let sign0: Option<i32> = optional_integer(entries, "sign0")?;
    if let (Some(exp2), Some(exp1), Some(sign1), Some(sign0)) = (exp2, exp1, sign1, sign0) {
        let solinas =
            (BigInt::one() << exp2) + BigInt::from(sign1) * (BigInt::one() << exp1) + sign0;
        if solinas != BigInt::from(r.clone()) {
            return Err(PbcError::InvalidParameters);
        }
    }

    Ok(CurveParams {
        pairing_type: PairingType::A,
        q,
        order: r,
        cofactor: h,
    })
}

fn type_a1(entries: &HashMap<String, String>) -> PbcResult<CurveParams> {
    let p: BigUint = integer(entries, "p")?;
    let n: BigUint = integer(entries, "n")?;
    let l: BigUint = integer(entries, "l")?;
    if n.is_zero() {
        return Err(PbcError::InvalidParameters);
    }
    check_curve(&p, &n, &l)?;
    Ok(CurveParams {
        pairing_type: PairingType::A1,
        q: p,
        order: n,
        cofactor: l,
    })
}
