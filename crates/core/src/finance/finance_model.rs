//! Typed models for the financial settlement engine view and its summaries.
//!
//! The `*Row` structs are anti-corruption DTOs mirroring the upstream
//! aggregated views field for field: every monetary column is an optional
//! raw decimal, every count is optional. Mapping into the typed domain
//! structs converts nulls to zero [`Money`] immediately, so `None` never
//! reaches arithmetic.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::finance::settlement_model::SettlementStatus;
use crate::money::{Locale, Money, SettlementDirection};

/// Bilingual display name as stored upstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub ar: String,
    pub en: String,
}

impl LocalizedName {
    pub fn new(ar: impl Into<String>, en: impl Into<String>) -> Self {
        LocalizedName {
            ar: ar.into(),
            en: en.into(),
        }
    }

    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::Ar => &self.ar,
            Locale::En => &self.en,
        }
    }
}

/// Raw per-provider row from the upstream settlement engine view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialEngineRow {
    pub provider_id: String,
    pub provider_name_ar: Option<String>,
    pub provider_name_en: Option<String>,
    pub governorate_id: Option<String>,
    pub city_id: Option<String>,
    pub commission_rate: Option<f64>,

    pub total_orders: Option<i64>,
    pub cod_orders_count: Option<i64>,
    pub online_orders_count: Option<i64>,
    pub eligible_orders_count: Option<i64>,
    pub held_orders_count: Option<i64>,
    pub settled_orders_count: Option<i64>,

    pub gross_revenue: Option<f64>,
    pub cod_gross_revenue: Option<f64>,
    pub online_gross_revenue: Option<f64>,

    pub total_delivery_fees: Option<f64>,
    pub cod_delivery_fees: Option<f64>,
    pub online_delivery_fees: Option<f64>,

    pub theoretical_commission: Option<f64>,
    pub actual_commission: Option<f64>,
    pub total_grace_period_discount: Option<f64>,

    pub total_refunds: Option<f64>,
    pub total_refund_commission_reduction: Option<f64>,
    pub refund_percentage: Option<f64>,

    pub cod_commission_owed: Option<f64>,
    pub online_payout_owed: Option<f64>,
    pub net_balance: Option<f64>,
    pub settlement_direction: Option<String>,

    pub is_in_grace_period: Option<bool>,
    pub grace_period_days_remaining: Option<i64>,
    pub grace_period_end: Option<NaiveDate>,
}

/// One provider's financial facts for the aggregation period, fully typed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialEngineRecord {
    pub provider_id: String,
    pub provider_name: LocalizedName,
    pub governorate_id: Option<String>,
    pub city_id: Option<String>,
    pub commission_rate: f64,

    pub total_orders: i64,
    pub cod_orders_count: i64,
    pub online_orders_count: i64,
    pub eligible_orders_count: i64,
    pub held_orders_count: i64,
    pub settled_orders_count: i64,

    pub gross_revenue: Money,
    pub cod_gross_revenue: Money,
    pub online_gross_revenue: Money,

    pub total_delivery_fees: Money,
    pub cod_delivery_fees: Money,
    pub online_delivery_fees: Money,

    pub theoretical_commission: Money,
    pub actual_commission: Money,
    pub total_grace_period_discount: Money,

    pub total_refunds: Money,
    pub total_refund_commission_reduction: Money,
    pub refund_percentage: f64,

    pub cod_commission_owed: Money,
    pub online_payout_owed: Money,
    pub net_balance: Money,
    pub settlement_direction: SettlementDirection,

    pub is_in_grace_period: bool,
    pub grace_period_days_remaining: i64,
    pub grace_period_end: Option<NaiveDate>,
}

impl From<FinancialEngineRow> for FinancialEngineRecord {
    fn from(row: FinancialEngineRow) -> Self {
        FinancialEngineRecord {
            provider_id: row.provider_id,
            provider_name: LocalizedName {
                ar: row.provider_name_ar.unwrap_or_default(),
                en: row.provider_name_en.unwrap_or_default(),
            },
            governorate_id: row.governorate_id,
            city_id: row.city_id,
            commission_rate: row.commission_rate.unwrap_or(0.0),

            total_orders: row.total_orders.unwrap_or(0),
            cod_orders_count: row.cod_orders_count.unwrap_or(0),
            online_orders_count: row.online_orders_count.unwrap_or(0),
            eligible_orders_count: row.eligible_orders_count.unwrap_or(0),
            held_orders_count: row.held_orders_count.unwrap_or(0),
            settled_orders_count: row.settled_orders_count.unwrap_or(0),

            gross_revenue: Money::from_database(row.gross_revenue),
            cod_gross_revenue: Money::from_database(row.cod_gross_revenue),
            online_gross_revenue: Money::from_database(row.online_gross_revenue),

            total_delivery_fees: Money::from_database(row.total_delivery_fees),
            cod_delivery_fees: Money::from_database(row.cod_delivery_fees),
            online_delivery_fees: Money::from_database(row.online_delivery_fees),

            theoretical_commission: Money::from_database(row.theoretical_commission),
            actual_commission: Money::from_database(row.actual_commission),
            total_grace_period_discount: Money::from_database(row.total_grace_period_discount),

            total_refunds: Money::from_database(row.total_refunds),
            total_refund_commission_reduction: Money::from_database(
                row.total_refund_commission_reduction,
            ),
            refund_percentage: row.refund_percentage.unwrap_or(0.0) * 100.0,

            cod_commission_owed: Money::from_database(row.cod_commission_owed),
            online_payout_owed: Money::from_database(row.online_payout_owed),
            net_balance: Money::from_database(row.net_balance),
            settlement_direction: row
                .settlement_direction
                .as_deref()
                .and_then(SettlementDirection::from_key)
                .unwrap_or_default(),

            is_in_grace_period: row.is_in_grace_period.unwrap_or(false),
            grace_period_days_remaining: row.grace_period_days_remaining.unwrap_or(0),
            grace_period_end: row.grace_period_end,
        }
    }
}

// ---------------------------------------------------------------------------
// Summary shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCounts {
    pub total: i64,
    pub cod: i64,
    pub online: i64,
    pub eligible: i64,
    pub on_hold: i64,
    pub settled: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueBreakdown {
    pub gross: Money,
    pub cod: Money,
    pub online: Money,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommissionBreakdown {
    /// What the platform would earn without the grace period.
    pub theoretical: Money,
    /// What is actually charged.
    pub actual: Money,
    pub grace_period_discount: Money,
    pub rate: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryFeeBreakdown {
    pub total: Money,
    pub cod: Money,
    pub online: Money,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundBreakdown {
    pub total: Money,
    pub commission_reduction: Money,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementFigures {
    /// Provider owes platform (commission on cash orders).
    pub cod_commission_owed: Money,
    /// Platform owes provider (collected online revenue minus commission).
    pub online_payout_owed: Money,
    /// Positive = platform pays provider.
    pub net_balance: Money,
    pub direction: SettlementDirection,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GracePeriodStatus {
    pub is_active: bool,
    pub days_remaining: i64,
    pub end_date: Option<NaiveDate>,
}

/// Summary for a single provider (provider dashboard).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderFinancialSummary {
    pub provider_id: String,
    pub provider_name: LocalizedName,
    pub orders: OrderCounts,
    pub revenue: RevenueBreakdown,
    pub commission: CommissionBreakdown,
    pub delivery_fees: DeliveryFeeBreakdown,
    pub refunds: RefundBreakdown,
    pub settlement: SettlementFigures,
    pub grace_period: GracePeriodStatus,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodTotals {
    pub orders: i64,
    pub revenue: Money,
    pub commission_owed: Money,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineTotals {
    pub orders: i64,
    pub revenue: Money,
    pub payout_owed: Money,
}

/// Platform-wide summary (admin dashboard).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminFinancialSummary {
    pub total_providers: i64,
    pub total_orders: i64,
    pub total_revenue: Money,
    pub total_delivery_fees: Money,

    pub total_theoretical_commission: Money,
    pub total_actual_commission: Money,
    pub total_grace_period_discount: Money,

    pub total_refunds: Money,

    pub cod: CodTotals,
    pub online: OnlineTotals,

    pub total_net_balance: Money,
    pub providers_to_pay: i64,
    pub providers_to_collect: i64,
    pub providers_balanced: i64,

    pub eligible_orders: i64,
    pub held_orders: i64,
    pub settled_orders: i64,
}

/// Raw row from the upstream platform-wide summary view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminSummaryRow {
    pub total_providers: Option<i64>,
    pub total_orders: Option<i64>,
    pub total_revenue: Option<f64>,
    pub total_delivery_fees: Option<f64>,
    pub total_theoretical_commission: Option<f64>,
    pub total_actual_commission: Option<f64>,
    pub total_grace_period_discount: Option<f64>,
    pub total_refunds: Option<f64>,
    pub total_cod_orders: Option<i64>,
    pub total_cod_revenue: Option<f64>,
    pub total_cod_commission_owed: Option<f64>,
    pub total_online_orders: Option<i64>,
    pub total_online_revenue: Option<f64>,
    pub total_online_payout_owed: Option<f64>,
    pub total_net_balance: Option<f64>,
    pub providers_to_pay: Option<i64>,
    pub providers_to_collect: Option<i64>,
    pub providers_balanced: Option<i64>,
    pub total_eligible_orders: Option<i64>,
    pub total_held_orders: Option<i64>,
    pub total_settled_orders: Option<i64>,
}

impl From<AdminSummaryRow> for AdminFinancialSummary {
    fn from(row: AdminSummaryRow) -> Self {
        AdminFinancialSummary {
            total_providers: row.total_providers.unwrap_or(0),
            total_orders: row.total_orders.unwrap_or(0),
            total_revenue: Money::from_database(row.total_revenue),
            total_delivery_fees: Money::from_database(row.total_delivery_fees),
            total_theoretical_commission: Money::from_database(row.total_theoretical_commission),
            total_actual_commission: Money::from_database(row.total_actual_commission),
            total_grace_period_discount: Money::from_database(row.total_grace_period_discount),
            total_refunds: Money::from_database(row.total_refunds),
            cod: CodTotals {
                orders: row.total_cod_orders.unwrap_or(0),
                revenue: Money::from_database(row.total_cod_revenue),
                commission_owed: Money::from_database(row.total_cod_commission_owed),
            },
            online: OnlineTotals {
                orders: row.total_online_orders.unwrap_or(0),
                revenue: Money::from_database(row.total_online_revenue),
                payout_owed: Money::from_database(row.total_online_payout_owed),
            },
            total_net_balance: Money::from_database(row.total_net_balance),
            providers_to_pay: row.providers_to_pay.unwrap_or(0),
            providers_to_collect: row.providers_to_collect.unwrap_or(0),
            providers_balanced: row.providers_balanced.unwrap_or(0),
            eligible_orders: row.total_eligible_orders.unwrap_or(0),
            held_orders: row.total_held_orders.unwrap_or(0),
            settled_orders: row.total_settled_orders.unwrap_or(0),
        }
    }
}

/// Per-governorate summary (regional admin dashboard).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionalFinancialSummary {
    pub governorate_id: String,
    pub governorate_name: LocalizedName,
    pub providers_count: i64,
    pub total_orders: i64,
    pub cod_orders: i64,
    pub online_orders: i64,
    pub gross_revenue: Money,
    pub total_commission: Money,
    pub net_balance: Money,
    pub providers_to_pay: i64,
    pub providers_to_collect: i64,
}

/// Raw row from the upstream per-governorate summary view.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionalSummaryRow {
    pub governorate_id: String,
    pub governorate_name_ar: Option<String>,
    pub governorate_name_en: Option<String>,
    pub providers_count: Option<i64>,
    pub total_orders: Option<i64>,
    pub cod_orders: Option<i64>,
    pub online_orders: Option<i64>,
    pub gross_revenue: Option<f64>,
    pub total_commission: Option<f64>,
    pub net_balance: Option<f64>,
    pub providers_to_pay: Option<i64>,
    pub providers_to_collect: Option<i64>,
}

impl From<RegionalSummaryRow> for RegionalFinancialSummary {
    fn from(row: RegionalSummaryRow) -> Self {
        RegionalFinancialSummary {
            governorate_id: row.governorate_id,
            governorate_name: LocalizedName {
                ar: row.governorate_name_ar.unwrap_or_default(),
                en: row.governorate_name_en.unwrap_or_default(),
            },
            providers_count: row.providers_count.unwrap_or(0),
            total_orders: row.total_orders.unwrap_or(0),
            cod_orders: row.cod_orders.unwrap_or(0),
            online_orders: row.online_orders.unwrap_or(0),
            gross_revenue: Money::from_database(row.gross_revenue),
            total_commission: Money::from_database(row.total_commission),
            net_balance: Money::from_database(row.net_balance),
            providers_to_pay: row.providers_to_pay.unwrap_or(0),
            providers_to_collect: row.providers_to_collect.unwrap_or(0),
        }
    }
}

// ---------------------------------------------------------------------------
// Filters and composed queries
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialDateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Caller-supplied filters. These compose with the service's own scope via
/// logical AND; they can narrow the scope but never widen it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FinancialFilters {
    pub date_range: Option<FinancialDateRange>,
    pub governorate_id: Option<String>,
    pub city_id: Option<String>,
    pub provider_id: Option<String>,
    pub status: Vec<SettlementStatus>,
}

/// Fully-composed query the repository executes against the engine view.
/// All populated fields are ANDed together.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineQuery {
    pub provider_id: Option<String>,
    pub governorate_id: Option<String>,
    pub city_id: Option<String>,
    /// Scope restriction for regional admins; rows outside these
    /// governorates are excluded even when `governorate_id` is unset.
    pub governorate_ids: Option<Vec<String>>,
}

/// Composed query for the per-governorate summary view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionalQuery {
    pub governorate_id: Option<String>,
    pub governorate_ids: Option<Vec<String>>,
}

/// Composed query over persisted settlement records.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettlementQuery {
    pub provider_id: Option<String>,
    /// Resolved provider-id list for region scoping; `Some(vec![])` matches
    /// nothing.
    pub provider_ids: Option<Vec<String>>,
    pub status: Vec<SettlementStatus>,
    pub period_range: Option<FinancialDateRange>,
}
