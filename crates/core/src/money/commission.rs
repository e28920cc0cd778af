//! Commission and settlement-balance arithmetic.
//!
//! Two independent payment flows meet here: cash orders are collected by
//! the provider (who then owes the platform its commission), while online
//! orders are collected by the platform (which then owes the provider a
//! payout). Reconciling the two produces a single net transfer per
//! provider.

use serde::{Deserialize, Serialize};

use super::money_model::Money;
use crate::constants::SETTLEMENT_DIRECTION_THRESHOLD_PIASTERS;

/// Who pays whom for a settlement period.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementDirection {
    PlatformPaysProvider,
    ProviderPaysPlatform,
    #[default]
    Balanced,
}

impl SettlementDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementDirection::PlatformPaysProvider => "platform_pays_provider",
            SettlementDirection::ProviderPaysPlatform => "provider_pays_platform",
            SettlementDirection::Balanced => "balanced",
        }
    }

    /// Looks up a direction from its storage key.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "platform_pays_provider" => Some(SettlementDirection::PlatformPaysProvider),
            "provider_pays_platform" => Some(SettlementDirection::ProviderPaysPlatform),
            "balanced" => Some(SettlementDirection::Balanced),
            _ => None,
        }
    }

    pub fn needs_payment(&self) -> bool {
        !matches!(self, SettlementDirection::Balanced)
    }
}

/// Commission on an order: `(subtotal - discount).max(0) * rate%`.
///
/// The rate applies after the discount, and a discount larger than the
/// subtotal never produces a negative commission.
pub fn calculate_commission(subtotal: Money, discount: Money, rate_percent: f64) -> Money {
    let base = (subtotal - discount).non_negative();
    base.percent(rate_percent)
}

/// Commission clawed back when part of an order is refunded.
///
/// The reduction is proportional to the refunded share of the
/// commissionable base. A zero base is a degenerate upstream condition,
/// not an error: the reduction is simply zero.
pub fn refund_commission_reduction(
    refund_amount: Money,
    order_base: Money,
    original_commission: Money,
) -> Money {
    if order_base.is_zero() {
        return Money::zero();
    }
    let refund_fraction = refund_amount.to_pounds() / order_base.to_pounds();
    original_commission.multiply(refund_fraction)
}

/// Net transfer between the two payout obligations.
///
/// Positive means the platform owes the provider; negative means the
/// provider owes the platform.
pub fn net_balance(online_payout_owed: Money, cod_commission_owed: Money) -> Money {
    online_payout_owed - cod_commission_owed
}

/// Classifies a net balance, treating anything within
/// ±[`SETTLEMENT_DIRECTION_THRESHOLD_PIASTERS`] as balanced.
pub fn settlement_direction(net_balance: Money) -> SettlementDirection {
    let threshold = Money::from_piasters(SETTLEMENT_DIRECTION_THRESHOLD_PIASTERS);
    if net_balance > threshold {
        SettlementDirection::PlatformPaysProvider
    } else if net_balance < threshold.negate() {
        SettlementDirection::ProviderPaysPlatform
    } else {
        SettlementDirection::Balanced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pounds(amount: f64) -> Money {
        Money::from_pounds(amount)
    }

    #[test]
    fn commission_applies_rate_after_discount() {
        let commission = calculate_commission(pounds(200.0), pounds(50.0), 7.0);
        assert_eq!(commission, pounds(10.50));
    }

    #[test]
    fn commission_never_negative_when_discount_exceeds_subtotal() {
        let commission = calculate_commission(pounds(30.0), pounds(100.0), 7.0);
        assert_eq!(commission, Money::zero());
    }

    #[test]
    fn grace_period_discount_equals_theoretical_commission() {
        // A provider in grace period is charged nothing; the waived amount
        // is the full theoretical commission.
        let theoretical = calculate_commission(pounds(200.0), Money::zero(), 7.0);
        let actual = Money::zero();
        assert_eq!(theoretical, pounds(14.0));
        assert_eq!(theoretical - actual, pounds(14.0));
    }

    #[test]
    fn refund_reduction_is_proportional() {
        // 50% refunded -> 50% of the commission is clawed back.
        let reduction = refund_commission_reduction(pounds(100.0), pounds(200.0), pounds(14.0));
        assert_eq!(reduction, pounds(7.0));
        assert_eq!(pounds(14.0) - reduction, pounds(7.0));
    }

    #[test]
    fn refund_reduction_on_zero_base_is_zero() {
        let reduction = refund_commission_reduction(pounds(100.0), Money::zero(), pounds(14.0));
        assert_eq!(reduction, Money::zero());
    }

    #[test]
    fn refund_reduction_never_exceeds_original_commission() {
        let reduction = refund_commission_reduction(pounds(200.0), pounds(200.0), pounds(14.0));
        assert_eq!(reduction, pounds(14.0));
    }

    #[test]
    fn net_balance_sign_convention() {
        assert!(net_balance(pounds(100.0), pounds(40.0)).is_positive());
        assert!(net_balance(pounds(40.0), pounds(100.0)).is_negative());
        assert!(net_balance(pounds(50.0), pounds(50.0)).is_zero());
    }

    #[test]
    fn direction_deadband_boundaries() {
        assert_eq!(
            settlement_direction(pounds(0.49)),
            SettlementDirection::Balanced
        );
        assert_eq!(
            settlement_direction(pounds(0.50)),
            SettlementDirection::Balanced
        );
        assert_eq!(
            settlement_direction(pounds(0.51)),
            SettlementDirection::PlatformPaysProvider
        );
        assert_eq!(
            settlement_direction(pounds(-0.49)),
            SettlementDirection::Balanced
        );
        assert_eq!(
            settlement_direction(pounds(-0.51)),
            SettlementDirection::ProviderPaysPlatform
        );
    }

    #[test]
    fn direction_keys_round_trip() {
        for direction in [
            SettlementDirection::PlatformPaysProvider,
            SettlementDirection::ProviderPaysPlatform,
            SettlementDirection::Balanced,
        ] {
            assert_eq!(SettlementDirection::from_key(direction.as_str()), Some(direction));
        }
        assert_eq!(SettlementDirection::from_key("sideways"), None);
    }
}
