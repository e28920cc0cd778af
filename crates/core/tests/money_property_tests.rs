//! Property-based tests for the money and commission primitives.
//!
//! These verify the numeric guarantees the settlement ledger depends on,
//! using the `proptest` crate for random test case generation.

use proptest::prelude::*;
use engezna_core::money::{
    calculate_commission, net_balance, refund_commission_reduction, settlement_direction,
    sum_money, Locale, Money, SettlementDirection,
};

// =============================================================================
// Generators
// =============================================================================

/// Piaster amounts small enough that sums of a whole test vector stay far
/// from the i64 range.
fn arb_piasters() -> impl Strategy<Value = i64> {
    -1_000_000_000i64..1_000_000_000
}

fn arb_money() -> impl Strategy<Value = Money> {
    arb_piasters().prop_map(Money::from_piasters)
}

fn arb_money_vec(max_len: usize) -> impl Strategy<Value = Vec<Money>> {
    proptest::collection::vec(arb_money(), 0..=max_len)
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Adding and subtracting exact minor-unit values is pure integer
    /// arithmetic: no floating-point drift, ever.
    #[test]
    fn prop_add_subtract_match_integer_arithmetic(a in arb_piasters(), b in arb_piasters()) {
        let sum = Money::from_piasters(a) + Money::from_piasters(b);
        prop_assert_eq!(sum.to_piasters(), a + b);

        let difference = Money::from_piasters(a) - Money::from_piasters(b);
        prop_assert_eq!(difference.to_piasters(), a - b);
    }

    /// Summing a whole fact list equals the integer sum of its parts,
    /// regardless of order.
    #[test]
    fn prop_sum_money_is_order_independent(amounts in arb_money_vec(50)) {
        let expected: i64 = amounts.iter().map(|m| m.to_piasters()).sum();
        prop_assert_eq!(sum_money(amounts.iter().copied()).to_piasters(), expected);

        let mut reversed = amounts.clone();
        reversed.reverse();
        prop_assert_eq!(sum_money(reversed).to_piasters(), expected);
    }

    /// Commission is never negative, even when the discount exceeds the
    /// subtotal.
    #[test]
    fn prop_commission_never_negative(
        subtotal in 0i64..1_000_000_00,
        discount in 0i64..2_000_000_00,
        rate in 0.0f64..100.0,
    ) {
        let commission = calculate_commission(
            Money::from_piasters(subtotal),
            Money::from_piasters(discount),
            rate,
        );
        prop_assert!(!commission.is_negative());
    }

    /// A refund never claws back more commission than was charged, and a
    /// zero order base claws back nothing.
    #[test]
    fn prop_refund_reduction_is_bounded(
        base in 1i64..1_000_000_00,
        refund_fraction in 0.0f64..=1.0,
        commission in 0i64..1_000_000_00,
    ) {
        let order_base = Money::from_piasters(base);
        let refund = order_base.multiply(refund_fraction);
        let original = Money::from_piasters(commission);

        let reduction = refund_commission_reduction(refund, order_base, original);
        prop_assert!(!reduction.is_negative());
        // Allow the single piaster of rounding the proportional formula
        // can introduce at the boundary.
        prop_assert!(reduction.to_piasters() <= original.to_piasters() + 1);

        let degenerate = refund_commission_reduction(refund, Money::zero(), original);
        prop_assert_eq!(degenerate, Money::zero());
    }

    /// Net balance is the exact difference of the two obligations.
    #[test]
    fn prop_net_balance_is_exact(online in arb_piasters(), cod in arb_piasters()) {
        let balance = net_balance(Money::from_piasters(online), Money::from_piasters(cod));
        prop_assert_eq!(balance.to_piasters(), online - cod);
    }

    /// The deadband classifies exactly: |balance| <= 50 piasters is
    /// balanced, above is platform-pays, below is provider-pays.
    #[test]
    fn prop_direction_respects_deadband(piasters in arb_piasters()) {
        let direction = settlement_direction(Money::from_piasters(piasters));
        let expected = if piasters > 50 {
            SettlementDirection::PlatformPaysProvider
        } else if piasters < -50 {
            SettlementDirection::ProviderPaysPlatform
        } else {
            SettlementDirection::Balanced
        };
        prop_assert_eq!(direction, expected);
    }

    /// Formatting is read-only: the stored value survives any number of
    /// format calls, and re-parsing the fixed-point form round-trips.
    #[test]
    fn prop_formatting_has_no_side_effects(money in arb_money()) {
        let before = money.to_piasters();
        let _ = money.format(Locale::Ar);
        let _ = money.format(Locale::En);
        let _ = money.format_with_separators(Locale::Ar);
        let _ = money.format_short(Locale::En);
        prop_assert_eq!(money.to_piasters(), before);

        let reparsed: Money = money.to_fixed(2).parse().unwrap();
        prop_assert_eq!(reparsed, money);
    }
}
