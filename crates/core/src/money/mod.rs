//! Money module - fixed-point monetary values and commission math.

mod commission;
mod money_model;

#[cfg(test)]
mod money_model_tests;

// Re-export the public interface
pub use commission::{
    calculate_commission, net_balance, refund_commission_reduction, settlement_direction,
    SettlementDirection,
};
pub use money_model::{sum_money, Locale, Money};

pub(crate) use money_model::to_eastern_numerals;
