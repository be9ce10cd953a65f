// Copyright (c) 2022, Mysten Labs, Inc.
// SPDX-License-Identifier: Apache-2.0

use crate::element::Element;
use crate::error::PbcError;
use crate::pairing::{FieldType, Pairing};
use crate::test_helpers::*;
use num_bigint::BigInt;
use proptest::prelude::*;
use sha2::Sha256;
use sha3::Sha3_256;
use std::cmp::Ordering;

fn big(i: i64) -> BigInt {
    BigInt::from(i)
}

fn g1_power(pairing: &Pairing, g: &Element, k: i64) -> Element {
    let mut p = pairing.new_g1();
    p.pow_big(g, &big(k)).unwrap();
    p
}

#[test]
fn test_addition_in_toy_group() {
    let pairing = pairing(TOY_PARAMS);
    let a = zr(&pairing, 3);
    let b = zr(&pairing, 5);
    let mut target = pairing.new_zr();
    target.add(&a, &b).unwrap();
    assert_eq!(target.big_int().unwrap(), big(1));
    assert!(target.is1());
}

#[test]
fn test_chaining() {
    let pairing = pairing(TOY_PARAMS);
    let a = zr(&pairing, 3);
    let b = zr(&pairing, 5);
    let mut target = pairing.new_zr();
    // ((3 + 5) * 5 - 3)^2 = 4 mod 7
    target
        .add(&a, &b)
        .unwrap()
        .then_mul(&b)
        .unwrap()
        .then_sub(&a)
        .unwrap()
        .then_square()
        .unwrap();
    assert_eq!(target.big_int().unwrap(), big(4));
}

/// Runs an operation once with a fresh target and once in place on a copy of `x`, and compares.
macro_rules! assert_in_place {
    ($pairing:expr, $x:expr, |$t:ident| $explicit:expr, |$u:ident| $in_place:expr) => {{
        let mut $t = $pairing.new_zr();
        $explicit.unwrap();
        let mut $u = $x.clone();
        $in_place.unwrap();
        assert_eq!($u, $t);
    }};
}

#[test]
fn test_then_variants_agree_with_explicit_target() {
    let pairing = pairing(SMALL_PARAMS);
    let x = zr(&pairing, 123);
    let y = zr(&pairing, 456);
    let i = zr(&pairing, 77);
    let minus_nine = big(-9);

    assert_in_place!(pairing, x, |t| t.add(&x, &y), |u| u.then_add(&y));
    assert_in_place!(pairing, x, |t| t.sub(&x, &y), |u| u.then_sub(&y));
    assert_in_place!(pairing, x, |t| t.mul(&x, &y), |u| u.then_mul(&y));
    assert_in_place!(pairing, x, |t| t.div(&x, &y), |u| u.then_div(&y));
    assert_in_place!(pairing, x, |t| t.double(&x), |u| u.then_double());
    assert_in_place!(pairing, x, |t| t.halve(&x), |u| u.then_halve());
    assert_in_place!(pairing, x, |t| t.square(&x), |u| u.then_square());
    assert_in_place!(pairing, x, |t| t.neg(&x), |u| u.then_neg());
    assert_in_place!(pairing, x, |t| t.invert(&x), |u| u.then_invert());
    assert_in_place!(pairing, x, |t| t.mul_zn(&x, &i), |u| u.then_mul_zn(&i));
    assert_in_place!(pairing, x, |t| t.pow_zn(&x, &i), |u| u.then_pow_zn(&i));
    assert_in_place!(
        pairing,
        x,
        |t| t.mul_big(&x, &minus_nine),
        |u| u.then_mul_big(&minus_nine)
    );
    assert_in_place!(pairing, x, |t| t.mul_i32(&x, 1000), |u| u.then_mul_i32(1000));
    assert_in_place!(
        pairing,
        x,
        |t| t.pow_big(&x, &minus_nine),
        |u| u.then_pow_big(&minus_nine)
    );
}

#[test]
fn test_unchecked_operand_is_rejected() {
    let pairing = pairing(SMALL_PARAMS);
    let checked = zr(&pairing, 1);
    let mut unchecked = pairing.new_unchecked_element(FieldType::Zr);
    unchecked.set_i32(2).unwrap();

    let mut target = pairing.new_zr();
    assert_eq!(
        target.add(&checked, &unchecked).unwrap_err(),
        PbcError::UncheckedOperation
    );
    assert_eq!(
        target.then_mul(&unchecked).unwrap_err(),
        PbcError::UncheckedOperation
    );
    assert_eq!(
        target.compare(&unchecked).unwrap_err(),
        PbcError::UncheckedOperation
    );

    // An unchecked target does not check its operands.
    let mut unchecked_target = pairing.new_unchecked_element(FieldType::Zr);
    unchecked_target.add(&checked, &unchecked).unwrap();
    assert_eq!(unchecked_target.big_int().unwrap(), big(3));
}

#[test]
fn test_incompatible_elements_are_rejected() {
    let other = pairing(SMALL_PARAMS);
    let pairing = pairing(SMALL_PARAMS);

    let a = zr(&pairing, 1);
    let b = zr(&other, 1);
    let mut target = pairing.new_zr();
    assert_eq!(
        target.add(&a, &b).unwrap_err(),
        PbcError::IncompatibleElements
    );
    assert_ne!(a, b);

    let g = generator(&pairing);
    assert_eq!(
        target.add(&a, &g).unwrap_err(),
        PbcError::IncompatibleElements
    );
    let mut gt = pairing.new_gt();
    assert_eq!(gt.set(&g).unwrap_err(), PbcError::IncompatibleElements);
}

#[test]
fn test_integer_operands() {
    let other = pairing(TOY_PARAMS);
    let pairing = pairing(SMALL_PARAMS);
    let g = generator(&pairing);
    let mut target = pairing.new_g1();

    assert_eq!(
        target.mul_zn(&g, &g).unwrap_err(),
        PbcError::IllegalOperation
    );
    let unchecked = pairing.new_unchecked_element(FieldType::Zr);
    assert_eq!(
        target.pow_zn(&g, &unchecked).unwrap_err(),
        PbcError::UncheckedOperation
    );

    // Exponents may come from another pairing.
    target.pow_zn(&g, &zr(&other, 3)).unwrap();
    assert_eq!(target, g1_power(&pairing, &g, 3));

    assert_eq!(target.set_i32(1).unwrap_err(), PbcError::IllegalOperation);
    assert_eq!(
        target.set_big(&big(1)).unwrap_err(),
        PbcError::IllegalOperation
    );
    assert_eq!(target.big_int().unwrap_err(), PbcError::IllegalOperation);
}

#[test]
fn test_engine_failures() {
    let pairing = pairing(SMALL_PARAMS);
    let zero = pairing.new_zr();
    let mut checked = zr(&pairing, 5);
    assert_eq!(
        checked.invert(&zero).unwrap_err(),
        PbcError::IllegalOperation
    );
    assert_eq!(
        checked.div(&zr(&pairing, 1), &zero).unwrap_err(),
        PbcError::IllegalOperation
    );
    // A failed operation leaves the target untouched.
    assert_eq!(checked.big_int().unwrap(), big(5));

    let mut unchecked = pairing.new_unchecked_element(FieldType::Zr);
    unchecked.set_i32(5).unwrap();
    unchecked.invert(&zero).unwrap();
    assert!(unchecked.is0());

    // Unchecked group elements cannot hold integers.
    let mut point = pairing.new_unchecked_element(FieldType::G1);
    point.set_i32(5).unwrap();
    assert!(point.is0());
}

#[test]
fn test_compare() {
    let pairing = pairing(SMALL_PARAMS);
    let a = zr(&pairing, 3);
    let b = zr(&pairing, 5);
    assert_eq!(a.compare(&b).unwrap(), Ordering::Less);
    assert_eq!(b.compare(&a).unwrap(), Ordering::Greater);
    assert_eq!(a.compare(&zr(&pairing, 3)).unwrap(), Ordering::Equal);
    assert!(a.equals(&zr(&pairing, 644)).unwrap());

    let g = generator(&pairing);
    let h = g1_power(&pairing, &g, 2);
    assert_eq!(g.compare(&g.clone()).unwrap(), Ordering::Equal);
    assert_eq!(g.compare(&h).unwrap(), Ordering::Greater);
    assert_eq!(h.compare(&g).unwrap(), Ordering::Greater);
}

#[test]
fn test_predicates() {
    let pairing = pairing(SMALL_PARAMS);

    let zero = pairing.new_zr();
    assert!(zero.is0() && !zero.is1());
    assert_eq!(zero.sign(), 0);
    let one = zr(&pairing, 1);
    assert!(one.is1() && !one.is0());

    // For groups zero and one are both the identity.
    for identity in [pairing.new_g1(), pairing.new_gt()] {
        assert!(identity.is0() && identity.is1());
    }
    let g = generator(&pairing);
    assert!(!g.is0() && !g.is1());

    // Squares modulo 641.
    assert!(zr(&pairing, 4).is_square());
    assert!(zr(&pairing, 0).is_square());
    let squares = (1..641).filter(|i| zr(&pairing, *i).is_square()).count();
    assert_eq!(squares, 320);
}

#[test]
fn test_sign() {
    let pairing = pairing(SMALL_PARAMS);
    let g = generator(&pairing);
    let gt = gt_generator(&pairing);
    for x in [zr(&pairing, 1), zr(&pairing, 320), zr(&pairing, 321), g, gt] {
        let mut neg = x.new_field_element();
        neg.neg(&x).unwrap();
        assert_ne!(x.sign(), 0);
        assert_eq!(x.sign(), -neg.sign());
    }
    assert_eq!(zr(&pairing, 320).sign(), 1);
    assert_eq!(zr(&pairing, 321).sign(), -1);
}

#[test]
fn test_group_conventions() {
    let pairing = pairing(SMALL_PARAMS);

    // On curves, mul is the group law and pow is scalar multiplication.
    let g = generator(&pairing);
    let mut sum = pairing.new_g1();
    sum.add(&g, &g).unwrap();
    let mut product = pairing.new_g1();
    product.mul(&g, &g).unwrap();
    let mut doubled = pairing.new_g1();
    doubled.double(&g).unwrap();
    assert_eq!(sum, product);
    assert_eq!(sum, doubled);
    assert_eq!(sum, g1_power(&pairing, &g, 2));
    let mut order = pairing.new_g1();
    order.mul_i32(&g, 641).unwrap();
    assert!(order.is0());

    // GT is multiplicative: add multiplies and neg inverts.
    let e = gt_generator(&pairing);
    let mut added = pairing.new_gt();
    added.add(&e, &e).unwrap();
    let mut squared = pairing.new_gt();
    squared.square(&e).unwrap();
    assert_eq!(added, squared);
    let mut neg = pairing.new_gt();
    neg.neg(&e).unwrap();
    let mut inv = pairing.new_gt();
    inv.invert(&e).unwrap();
    assert_eq!(neg, inv);
    assert!(neg.then_mul(&e).unwrap().is1());
}

#[test]
fn test_halve() {
    let pairing = pairing(SMALL_PARAMS);
    for x in [
        zr(&pairing, 7),
        generator(&pairing),
        gt_generator(&pairing),
    ] {
        let mut half = x.new_field_element();
        half.halve(&x).unwrap();
        half.then_double().unwrap();
        assert_eq!(half, x);
    }
}

#[test]
fn test_multi_exponentiation() {
    let pairing = pairing(SMALL_PARAMS);
    let x = generator(&pairing);
    let y = g1_power(&pairing, &x, 17);
    let z = g1_power(&pairing, &x, 600);
    let (i, j, k) = (big(-45), big(1000), big(3));

    let mut expected = pairing.new_g1();
    expected.pow_big(&x, &i).unwrap();
    let mut term = pairing.new_g1();
    term.pow_big(&y, &j).unwrap();
    expected.then_mul(&term).unwrap();

    let mut pow2 = pairing.new_g1();
    pow2.pow2_big(&x, &i, &y, &j).unwrap();
    assert_eq!(pow2, expected);

    term.pow_big(&z, &k).unwrap();
    expected.then_mul(&term).unwrap();
    let mut pow3 = pairing.new_g1();
    pow3.pow3_big(&x, &i, &y, &j, &z, &k).unwrap();
    assert_eq!(pow3, expected);

    // The same with Zr exponents.
    let (zi, zj, zk) = (zr(&pairing, -45), zr(&pairing, 1000), zr(&pairing, 3));
    let mut pow3_zn = pairing.new_g1();
    pow3_zn.pow3_zn(&x, &zi, &y, &zj, &z, &zk).unwrap();
    assert_eq!(pow3_zn, expected);
    let mut pow2_zn = pairing.new_g1();
    pow2_zn.pow2_zn(&x, &zi, &y, &zj).unwrap();
    assert_eq!(pow2_zn, pow2);

    assert_eq!(
        pow2_zn.pow2_zn(&x, &zi, &y, &x).unwrap_err(),
        PbcError::IllegalOperation
    );
}

#[test]
fn test_pairing_is_bilinear() {
    let pairing = pairing(SMALL_PARAMS);
    let g = generator(&pairing);
    let e = gt_generator(&pairing);
    assert!(!e.is1());

    for (a, b) in [(1, 1), (2, 3), (640, 5), (100, -7)] {
        let ga = g1_power(&pairing, &g, a);
        let gb = g1_power(&pairing, &g, b);
        let mut lhs = pairing.new_gt();
        lhs.pair(&ga, &gb).unwrap();
        let mut rhs = pairing.new_gt();
        rhs.pow_big(&e, &big(a * b)).unwrap();
        assert_eq!(lhs, rhs);
    }

    // Pairing with the identity gives the identity.
    let mut target = pairing.new_gt();
    target.pair(&pairing.new_g1(), &g).unwrap();
    assert!(target.is1());
}

#[test]
fn test_pair_checks_groups() {
    let other = pairing(SMALL_PARAMS);
    let pairing = pairing(SMALL_PARAMS);
    let g = generator(&pairing);

    let mut not_gt = pairing.new_g1();
    assert_eq!(
        not_gt.pair(&g, &g).unwrap_err(),
        PbcError::IncompatibleElements
    );
    let mut target = pairing.new_gt();
    assert_eq!(
        target.pair(&zr(&pairing, 1), &g).unwrap_err(),
        PbcError::IncompatibleElements
    );
    assert_eq!(
        target.pair(&g, &generator(&other)).unwrap_err(),
        PbcError::IncompatibleElements
    );
    let unchecked = pairing.new_unchecked_element(FieldType::G1);
    assert_eq!(
        target.pair(&g, &unchecked).unwrap_err(),
        PbcError::UncheckedOperation
    );
}

#[test]
fn test_product_of_pairings() {
    let pairing = pairing(SMALL_PARAMS);
    let g = generator(&pairing);
    let x = [g1_power(&pairing, &g, 2), g1_power(&pairing, &g, 5)];
    let y = [g1_power(&pairing, &g, 7), g1_power(&pairing, &g, 11)];

    // 2 * 7 + 5 * 11 = 69
    let mut expected = pairing.new_gt();
    expected.pow_big(&gt_generator(&pairing), &big(69)).unwrap();

    let mut product = pairing.new_gt();
    product.prod_pair(&[&x[0], &y[0], &x[1], &y[1]]).unwrap();
    assert_eq!(product, expected);

    let mut from_slices = pairing.new_gt();
    from_slices
        .prod_pair_slice(&[&x[0], &x[1]], &[&y[0], &y[1]])
        .unwrap();
    assert_eq!(from_slices, expected);

    assert_eq!(
        product.prod_pair(&[&x[0], &y[0], &x[1]]).unwrap_err(),
        PbcError::BadPairList
    );
    assert_eq!(
        product.prod_pair_slice(&[&x[0], &x[1]], &[&y[0]]).unwrap_err(),
        PbcError::BadPairList
    );

    // Every element is checked, not only the first pair.
    let zr = zr(&pairing, 1);
    assert_eq!(
        product.prod_pair(&[&x[0], &y[0], &x[1], &zr]).unwrap_err(),
        PbcError::IncompatibleElements
    );

    product.prod_pair(&[]).unwrap();
    assert!(product.is1());
}

#[test]
fn test_discrete_log() {
    let pairing = pairing(SMALL_PARAMS);
    let g = generator(&pairing);
    let e = gt_generator(&pairing);
    for k in [0, 1, 2, 321, 640] {
        let h = g1_power(&pairing, &g, k);
        let mut brute = pairing.new_zr();
        brute.brute_force_dl(&g, &h).unwrap();
        assert_eq!(brute.big_int().unwrap(), big(k));
        let mut rho = pairing.new_zr();
        rho.pollard_rho_dl(&g, &h).unwrap();
        assert_eq!(rho.big_int().unwrap(), big(k));

        let mut h = pairing.new_gt();
        h.pow_big(&e, &big(k)).unwrap();
        rho.pollard_rho_dl(&e, &h).unwrap();
        assert_eq!(rho.big_int().unwrap(), big(k));
    }

    let mut target = pairing.new_g1();
    assert_eq!(
        target.brute_force_dl(&g, &g).unwrap_err(),
        PbcError::IllegalOperation
    );
    let mut target = pairing.new_zr();
    assert_eq!(
        target.pollard_rho_dl(&g, &e).unwrap_err(),
        PbcError::IncompatibleElements
    );
}

#[test]
fn test_discrete_log_in_composite_order_group() {
    let pairing = pairing(A1_PARAMS);
    // A generator of the whole group of order 35.
    let g = (0u32..)
        .map(|i| {
            let mut g = pairing.new_g1();
            g.set_from_hash(&i.to_be_bytes()).unwrap();
            g
        })
        .find(|g| {
            let mut g5 = pairing.new_g1();
            let mut g7 = pairing.new_g1();
            g5.mul_i32(g, 5).unwrap();
            g7.mul_i32(g, 7).unwrap();
            !g5.is0() && !g7.is0()
        })
        .unwrap();

    for k in [3, 10, 14, 34] {
        let h = g1_power(&pairing, &g, k);
        let mut rho = pairing.new_zr();
        rho.pollard_rho_dl(&g, &h).unwrap();
        assert_eq!(rho.big_int().unwrap(), big(k));
    }

    // 7g generates a subgroup of order 5 which does not contain g.
    let g7 = g1_power(&pairing, &g, 7);
    let mut target = pairing.new_zr();
    assert_eq!(
        target.brute_force_dl(&g7, &g).unwrap_err(),
        PbcError::IllegalOperation
    );
}

#[test]
fn test_items() {
    let pairing = pairing(SMALL_PARAMS);

    let scalar = zr(&pairing, 5);
    assert_eq!(scalar.len(), 0);
    assert!(scalar.is_empty());
    assert_eq!(scalar.item(0).unwrap_err(), PbcError::OutOfRange);

    let identity = pairing.new_g1();
    assert!(identity.is_empty());
    assert_eq!(identity.x().unwrap_err(), PbcError::OutOfRange);

    let g = generator(&pairing);
    assert_eq!(g.len(), 2);
    let x = g.item(0).unwrap();
    let y = g.item(1).unwrap();
    assert!(x.is_checked());
    assert_eq!(x.len(), 0);
    assert_eq!(x.big_int().unwrap(), g.x().unwrap());
    assert_eq!(y.big_int().unwrap(), g.y().unwrap());
    assert_eq!(g.item(2).unwrap_err(), PbcError::OutOfRange);

    // Coordinates live in the base field, not in Zr.
    let mut sum = x.new_field_element();
    sum.add(&x, &y).unwrap();
    assert_eq!(
        sum.add(&x, &zr(&pairing, 1)).unwrap_err(),
        PbcError::IncompatibleElements
    );

    let gt = gt_generator(&pairing);
    assert_eq!(gt.len(), 2);
    assert!(gt.item(1).is_ok());
    assert_eq!(gt.x().unwrap_err(), PbcError::IllegalOperation);
    assert_eq!(scalar.y().unwrap_err(), PbcError::IllegalOperation);

    let mut unchecked = pairing.new_unchecked_element(FieldType::G1);
    unchecked.set(&g).unwrap();
    assert!(!unchecked.item(0).unwrap().is_checked());
    assert_eq!(unchecked.item(5).unwrap_err(), PbcError::OutOfRange);
}

#[test]
fn test_hash_to_group() {
    let pairing = pairing(A512_PARAMS);
    let mut a = pairing.new_g1();
    a.set_from_string_hash::<Sha256>("hello").unwrap();
    let mut b = pairing.new_g1();
    b.set_from_string_hash::<Sha256>("hello").unwrap();
    assert_eq!(a, b);
    assert!(!a.is0());
    b.set_from_string_hash::<Sha3_256>("hello").unwrap();
    assert_ne!(a, b);
    b.set_from_string_hash::<Sha256>("world").unwrap();
    assert_ne!(a, b);

    // The image is in the group of order r.
    let r: BigInt = "730750818665451621361119245571504901405976559617"
        .parse()
        .unwrap();
    a.then_mul_big(&r).unwrap();
    assert!(a.is0());

    let mut z = pairing.new_zr();
    z.set_from_hash(&[0xff; 32]).unwrap();
    assert!(z.big_int().unwrap() < r);
}

#[test]
fn test_new_field_element() {
    let pairing = pairing(SMALL_PARAMS);
    let g = generator(&pairing);
    let mut fresh = g.new_field_element();
    assert!(fresh.is0());
    assert!(fresh.is_checked());
    fresh.set(&g).unwrap();
    assert_eq!(fresh, g);

    let unchecked = pairing.new_unchecked_element(FieldType::GT);
    assert!(!unchecked.new_field_element().is_checked());
}

#[test]
fn test_formatting() {
    let pairing = pairing(TOY_PARAMS);
    let a = zr(&pairing, 6);
    assert_eq!(a.to_string(), "6");
    assert_eq!(format!("{:b}", a), "110");

    let identity = pairing.new_g1();
    assert_eq!(identity.to_string(), "O");

    let g = generator(&pairing);
    let (x, y) = (g.x().unwrap(), g.y().unwrap());
    assert_eq!(g.to_string(), format!("[{}, {}]", x, y));
    assert_eq!(format!("{:x}", g), format!("[{:x}, {:x}]", x, y));
    assert_eq!(format!("{:X}", g), format!("[{:X}, {:X}]", x, y));
    assert_eq!(format!("{:o}", g), format!("[{:o}, {:o}]", x, y));
    assert_eq!(
        g.to_string_radix(16).unwrap(),
        format!("[{:x}, {:x}]", x, y)
    );

    let debug = format!("{:?}", g);
    assert!(debug.contains("checked: true"));
    assert!(debug.contains("point: true"));
    assert!(debug.contains("integer: false"));
}

#[test]
fn test_text_roundtrip() {
    let pairing = pairing(SMALL_PARAMS);
    for x in [
        zr(&pairing, 600),
        pairing.new_g1(),
        generator(&pairing),
        gt_generator(&pairing),
    ] {
        for base in [2, 10, 16, 36] {
            let text = x.to_string_radix(base).unwrap();
            let mut y = x.new_field_element();
            y.set_string(&text, base).unwrap();
            assert_eq!(y, x);
        }
    }

    let mut g = pairing.new_g1();
    assert_eq!(g.set_string("[1, 2]", 10).unwrap_err(), PbcError::BadInput);
    assert_eq!(g.set_string("5", 10).unwrap_err(), PbcError::BadInput);
    assert_eq!(g.set_string("[1,]", 10).unwrap_err(), PbcError::BadInput);
    assert_eq!(g.set_string("O", 37).unwrap_err(), PbcError::BadVerb);
    let mut z = pairing.new_zr();
    assert_eq!(z.set_string("[1, 2]", 10).unwrap_err(), PbcError::BadInput);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn test_add_then_sub(a in any::<i32>(), b in any::<i32>()) {
        let pairing = pairing(SMALL_PARAMS);
        let g = generator(&pairing);
        for (x, y) in [
            (zr(&pairing, a), zr(&pairing, b)),
            (g1_power(&pairing, &g, a.into()), g1_power(&pairing, &g, b.into())),
        ] {
            let mut sum = x.new_field_element();
            sum.add(&x, &y).unwrap();
            sum.then_sub(&y).unwrap();
            prop_assert_eq!(&sum, &x);
        }
    }

    #[test]
    fn test_div_then_mul(a in any::<i32>(), b in 1i32..641) {
        let pairing = pairing(SMALL_PARAMS);
        let x = zr(&pairing, a);
        let y = zr(&pairing, b);
        let mut quotient = pairing.new_zr();
        quotient.div(&x, &y).unwrap().then_mul(&y).unwrap();
        prop_assert_eq!(quotient, x);
    }
}
