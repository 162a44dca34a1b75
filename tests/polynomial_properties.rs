use std::collections::BTreeMap;

use proptest::prelude::*;

use polyterm::{parse_polynomial, Coeff, PolyError, Polynomial};

/// Polynomials in `x` of degree below 6 with small integer coefficients.
fn arb_poly() -> impl Strategy<Value = Polynomial> {
    prop::collection::btree_map(0u32..6, -9i64..=9, 1..6)
        .prop_filter_map("all terms cancelled", |terms| Polynomial::new('x', terms).ok())
}

fn arb_nonzero_poly() -> impl Strategy<Value = Polynomial> {
    arb_poly().prop_filter("zero polynomial", |p| !p.is_zero())
}

/// Non-constant polynomials with single-digit coefficients, the ones whose
/// rendering parses back.
fn arb_renderable_poly() -> impl Strategy<Value = Polynomial> {
    let digit = prop_oneof![-9i64..=-1, 1i64..=9];
    prop::collection::btree_map(0u32..8, digit, 1..5)
        .prop_filter("constant", |terms| terms.keys().any(|&exp| exp > 0))
        .prop_map(|terms| Polynomial::new('x', terms).unwrap())
}

// ===== Addition properties =====

proptest! {
    #[test]
    fn addition_commutative(a in arb_poly(), b in arb_poly()) {
        prop_assert_eq!(a.checked_add(&b).unwrap(), b.checked_add(&a).unwrap());
    }
}

proptest! {
    #[test]
    fn addition_associative(a in arb_poly(), b in arb_poly(), c in arb_poly()) {
        let left = a.checked_add(&b).unwrap().checked_add(&c).unwrap();
        let right = a.checked_add(&b.checked_add(&c).unwrap()).unwrap();
        prop_assert_eq!(left, right);
    }
}

proptest! {
    #[test]
    fn additive_identity(a in arb_poly()) {
        let zero = Polynomial::zero('x');
        prop_assert_eq!(a.checked_add(&zero).unwrap(), a.clone());
        prop_assert_eq!(zero.checked_add(&a).unwrap(), a);
    }
}

// ===== Subtraction properties =====

proptest! {
    #[test]
    fn subtraction_definition(a in arb_poly(), b in arb_poly()) {
        prop_assert_eq!(a.checked_sub(&b).unwrap(), a.checked_add(&-&b).unwrap());
    }
}

proptest! {
    #[test]
    fn subtraction_self_is_zero(a in arb_poly()) {
        let d = a.checked_sub(&a).unwrap();
        prop_assert!(d.is_zero());
        prop_assert_eq!(d.to_string(), "0");
    }
}

// ===== Multiplication properties =====

proptest! {
    #[test]
    fn multiplication_commutative(a in arb_poly(), b in arb_poly()) {
        prop_assert_eq!(a.checked_mul(&b).unwrap(), b.checked_mul(&a).unwrap());
    }
}

proptest! {
    #[test]
    fn multiplication_degree(a in arb_nonzero_poly(), b in arb_nonzero_poly()) {
        let product = a.checked_mul(&b).unwrap();
        prop_assert_eq!(product.degree(), a.degree() + b.degree());
    }
}

proptest! {
    #[test]
    fn scalar_multiplication_commutes(a in arb_poly(), k in -20i64..20) {
        prop_assert_eq!(a.clone() * k, k * a);
    }
}

proptest! {
    #[test]
    fn scalar_matches_constant_product(a in arb_poly(), k in -20i64..20) {
        let constant = Polynomial::constant('x', k);
        prop_assert_eq!(a.clone() * k, a.checked_mul(&constant).unwrap());
    }
}

// ===== Distributivity =====

proptest! {
    #[test]
    fn left_distributive(a in arb_poly(), b in arb_poly(), c in arb_poly()) {
        let left = a.checked_mul(&b.checked_add(&c).unwrap()).unwrap();
        let right = a
            .checked_mul(&b)
            .unwrap()
            .checked_add(&a.checked_mul(&c).unwrap())
            .unwrap();
        prop_assert_eq!(left, right);
    }
}

// ===== Exponentiation =====

proptest! {
    #[test]
    fn pow_zero_and_one_return_base(a in arb_poly()) {
        prop_assert_eq!(a.pow(0), a.clone());
        prop_assert_eq!(a.pow(1), a);
    }
}

proptest! {
    #[test]
    fn pow_adds_exponents(a in arb_poly(), m in 1u32..4, n in 1u32..4) {
        prop_assert_eq!(a.pow(m).checked_mul(&a.pow(n)).unwrap(), a.pow(m + n));
    }
}

// ===== Division properties =====

proptest! {
    #[test]
    fn division_identity(a in arb_poly(), b in arb_nonzero_poly()) {
        prop_assume!(b.degree() <= a.degree());
        let (q, r) = a.div_rem(&b).unwrap();
        let rebuilt = b.checked_mul(&q).unwrap().checked_add(&r).unwrap();
        prop_assert_eq!(rebuilt, a);
    }
}

proptest! {
    #[test]
    fn remainder_degree_below_divisor(a in arb_poly(), b in arb_nonzero_poly()) {
        prop_assume!(!b.is_constant());
        let r = a.checked_rem(&b).unwrap();
        prop_assert!(r.is_zero() || r.degree() < b.degree());
    }
}

proptest! {
    #[test]
    fn division_of_product(a in arb_poly(), b in arb_nonzero_poly()) {
        let product = a.checked_mul(&b).unwrap();
        let (q, r) = product.div_rem(&b).unwrap();
        prop_assert_eq!(q, a);
        prop_assert!(r.is_zero());
    }
}

#[test]
fn division_by_zero_polynomial() {
    let p = Polynomial::new('x', [(2, 1), (0, 1)]).unwrap();
    assert_eq!(
        p.div_rem(&Polynomial::zero('x')),
        Err(PolyError::DivisionByZero)
    );
}

// ===== Evaluation =====

proptest! {
    #[test]
    fn evaluation_respects_addition(a in arb_poly(), b in arb_poly(), n in -5i64..5) {
        let sum = a.checked_add(&b).unwrap();
        prop_assert_eq!(sum.eval_at(n), a.eval_at(n) + b.eval_at(n));
    }
}

proptest! {
    #[test]
    fn evaluation_respects_multiplication(a in arb_poly(), b in arb_poly(), n in -5i64..5) {
        let product = a.checked_mul(&b).unwrap();
        prop_assert_eq!(product.eval_at(n), a.eval_at(n) * b.eval_at(n));
    }
}

// ===== Derivative =====

proptest! {
    #[test]
    fn derivative_of_constant_is_zero(k in -100i64..100) {
        prop_assert!(Polynomial::constant('x', k).derivative().is_zero());
    }
}

proptest! {
    #[test]
    fn derivative_is_linear(a in arb_poly(), b in arb_poly()) {
        let left = a.checked_add(&b).unwrap().derivative();
        let right = a.derivative().checked_add(&b.derivative()).unwrap();
        prop_assert_eq!(left, right);
    }
}

proptest! {
    #[test]
    fn derivative_product_rule(a in arb_poly(), b in arb_poly()) {
        let left = a.checked_mul(&b).unwrap().derivative();
        let right = a
            .derivative()
            .checked_mul(&b)
            .unwrap()
            .checked_add(&a.checked_mul(&b.derivative()).unwrap())
            .unwrap();
        prop_assert_eq!(left, right);
    }
}

// ===== Parsing and rendering =====

proptest! {
    #[test]
    fn parse_inverts_render(a in arb_renderable_poly()) {
        let text = a.to_string();
        prop_assert_eq!(parse_polynomial(&text).unwrap(), a);
    }
}

proptest! {
    #[test]
    fn parse_ignores_term_order(a in arb_renderable_poly()) {
        // Render ascending instead of descending.
        let ascending: String = a
            .terms()
            .iter()
            .map(|(&exp, c)| format!("{:+}x^{}", c.to_integer(), exp))
            .collect();
        prop_assert_eq!(parse_polynomial(&ascending).unwrap(), a);
    }
}

// ===== Scenarios =====

#[test]
fn scenario_linear() {
    let p = parse_polynomial("4x-3").unwrap();
    assert_eq!(
        p.terms(),
        &BTreeMap::from([
            (1, Coeff::from_integer(4.into())),
            (0, Coeff::from_integer((-3).into())),
        ])
    );
    assert_eq!(p.to_string(), "4x-3");
}

#[test]
fn scenario_other_variable() {
    let p = parse_polynomial("35p^2+2p-24").unwrap();
    assert_eq!(p, Polynomial::new('p', [(2, 35), (1, 2), (0, -24)]).unwrap());
}

#[test]
fn scenario_square() {
    let p = Polynomial::new('x', [(1, 1), (0, 1)]).unwrap();
    let expected = Polynomial::new('x', [(2, 1), (1, 2), (0, 1)]).unwrap();
    assert_eq!(p.checked_mul(&p).unwrap(), expected);
}

#[test]
fn scenario_eval() {
    let p = Polynomial::new('x', [(2, 1), (1, 2), (0, 1)]).unwrap();
    assert_eq!(p.eval_at(4), Coeff::from_integer(25.into()));
}

#[test]
fn scenario_derivative() {
    let p = Polynomial::new('x', [(2, 1), (1, 1), (0, 1)]).unwrap();
    let expected = Polynomial::new('x', [(1, 2), (0, 1)]).unwrap();
    assert_eq!(p.derivative(), expected);
}

#[test]
fn scenario_self_division() {
    let p = parse_polynomial("x+4").unwrap();
    let q = p.checked_div(&p).unwrap();
    assert!(q.is_constant());
    assert_eq!(q.to_string(), "1");
}

#[test]
fn scenario_negative_linear_term() {
    let p1 = parse_polynomial("7n - 5n^4+6n^3").unwrap();
    let p2 = parse_polynomial("3n^3-2n^4+8n").unwrap();
    assert_eq!(p1.checked_sub(&p2).unwrap().to_string(), "-3n^4+3n^3-n");
}

#[test]
fn scenario_constants_in_different_variables() {
    let p1 = Polynomial::constant('x', 5);
    let p2 = Polynomial::constant('y', 5);
    assert_eq!(p1, p2);
    assert_ne!(Polynomial::constant('x', 1), p2);
}
