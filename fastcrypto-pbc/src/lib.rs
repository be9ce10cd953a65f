// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0
#![warn(
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    rust_2021_compatibility
)]

//! Typed elements of symmetric pairing groups.
//!
//! A [pairing::Pairing] is created from PBC style [params::Params] and owns the groups G1, G2,
//! GT of prime order r and the ring Zr. It hands out [element::Element]s, which are mutable
//! handles that write the result of every operation into themselves:
//!
//! ```
//! use fastcrypto_pbc::pairing::Pairing;
//! use num_bigint::BigInt;
//!
//! let pairing: Pairing = "type a\nq 4025338979\nh 6279780\nr 641\nexp2 9\nexp1 7\nsign1 1\nsign0 1\n"
//!     .parse()
//!     .unwrap();
//! let mut g = pairing.new_g1();
//! g.set_from_hash(b"generator").unwrap();
//! let mut g_a = pairing.new_g1();
//! g_a.pow_big(&g, &BigInt::from(5)).unwrap();
//!
//! let mut lhs = pairing.new_gt();
//! lhs.pair(&g_a, &g).unwrap();
//! let mut rhs = pairing.new_gt();
//! rhs.pair(&g, &g).unwrap().then_pow_big(&BigInt::from(5)).unwrap();
//! assert_eq!(lhs, rhs);
//! ```

pub mod codec;
pub mod config;
pub mod element;
pub mod error;
pub mod pairing;
pub mod params;
pub mod precompute;
pub mod random;

pub(crate) mod bigint;
pub(crate) mod engine;

pub use element::Element;
pub use error::{PbcError, PbcResult};
pub use pairing::{FieldType, Pairing};
pub use params::Params;

#[cfg(test)]
#[path = "tests/test_helpers.rs"]
pub mod test_helpers;

#[cfg(test)]
#[path = "tests/bigint_tests.rs"]
pub mod bigint_tests;

#[cfg(test)]
#[path = "tests/codec_tests.rs"]
pub mod codec_tests;

#[cfg(test)]
#[path = "tests/params_tests.rs"]
pub mod params_tests;

#[cfg(test)]
#[path = "tests/pairing_tests.rs"]
pub mod pairing_tests;

#[cfg(test)]
#[path = "tests/element_tests.rs"]
pub mod element_tests;

#[cfg(test)]
#[path = "tests/serialization_tests.rs"]
pub mod serialization_tests;

#[cfg(test)]
#[path = "tests/precompute_tests.rs"]
pub mod precompute_tests;

#[cfg(test)]
#[path = "tests/random_tests.rs"]
pub mod random_tests;

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
pub mod protocol_tests;
