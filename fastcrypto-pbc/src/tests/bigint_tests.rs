// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::bigint::{from_native, to_native};
use crate::engine::mpz::WORD_BITS;
use num_bigint::{BigInt, Sign};
use num_traits::{One, Zero};
use proptest::collection;
use proptest::prelude::*;

#[test]
fn test_zero_has_no_words() {
    let zero = to_native(&BigInt::zero());
    assert!(!zero.is_negative());
    assert_eq!(zero.export(&mut []), 0);
    assert_eq!(from_native(&zero).unwrap(), BigInt::zero());
}

#[test]
fn test_sign_is_kept_apart_from_magnitude() {
    let x = BigInt::from(-12345);
    let native = to_native(&x);
    assert!(native.is_negative());
    let mut words = [0usize; 1];
    assert_eq!(native.export(&mut words), 1);
    assert_eq!(words[0], 12345);
    assert_eq!(from_native(&native).unwrap(), x);
}

#[test]
fn test_word_boundaries() {
    for bits in [WORD_BITS - 1, WORD_BITS, WORD_BITS + 1, 3 * WORD_BITS] {
        let x = (BigInt::one() << bits) - 1;
        assert_eq!(from_native(&to_native(&x)).unwrap(), x);
        let y = BigInt::one() << bits;
        assert_eq!(from_native(&to_native(&y)).unwrap(), y);
        assert_eq!(from_native(&to_native(&-&y)).unwrap(), -y);
    }
}

#[test]
fn test_export_into_short_buffer_does_not_overflow() {
    let x = BigInt::one() << (2 * WORD_BITS);
    let native = to_native(&x);
    let mut words = [7usize; 1];
    assert_eq!(native.export(&mut words), 3);
    assert_eq!(words, [0]);
}

proptest! {
    #[test]
    fn test_roundtrip(negative in any::<bool>(), bytes in collection::vec(any::<u8>(), 0..100)) {
        let sign = if negative { Sign::Minus } else { Sign::Plus };
        let x = BigInt::from_bytes_le(sign, &bytes);
        prop_assert_eq!(from_native(&to_native(&x)).unwrap(), x);
    }

    #[test]
    fn test_roundtrip_i64(x in any::<i64>()) {
        let x = BigInt::from(x);
        prop_assert_eq!(from_native(&to_native(&x)).unwrap(), x);
    }
}
