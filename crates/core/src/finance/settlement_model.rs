//! Persisted settlement records, payments, and the audit trail.
//!
//! Settlement rows are historical snapshots created by the upstream
//! settlement-generation job; this core reads them and records payments
//! against them, but never recomputes them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::finance::finance_model::LocalizedName;
use crate::money::{Money, SettlementDirection};

/// Settlement lifecycle.
///
/// `pending -> partially_paid -> paid` through recorded payments;
/// `pending -> overdue` is time-based; `disputed` and `waived` are
/// administrative terminal states.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettlementStatus {
    #[default]
    Pending,
    PartiallyPaid,
    Paid,
    Overdue,
    Disputed,
    Waived,
}

impl SettlementStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SettlementStatus::Pending => "pending",
            SettlementStatus::PartiallyPaid => "partially_paid",
            SettlementStatus::Paid => "paid",
            SettlementStatus::Overdue => "overdue",
            SettlementStatus::Disputed => "disputed",
            SettlementStatus::Waived => "waived",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "pending" => Some(SettlementStatus::Pending),
            "partially_paid" => Some(SettlementStatus::PartiallyPaid),
            "paid" => Some(SettlementStatus::Paid),
            "overdue" => Some(SettlementStatus::Overdue),
            "disputed" => Some(SettlementStatus::Disputed),
            "waived" => Some(SettlementStatus::Waived),
            _ => None,
        }
    }

    /// Terminal states accept no further payments.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            SettlementStatus::Paid | SettlementStatus::Disputed | SettlementStatus::Waived
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    Wallet,
    BankTransfer,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::Wallet => "wallet",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "cash" => Some(PaymentMethod::Cash),
            "card" => Some(PaymentMethod::Card),
            "wallet" => Some(PaymentMethod::Wallet),
            "bank_transfer" => Some(PaymentMethod::BankTransfer),
            _ => None,
        }
    }
}

/// Raw settlement row as persisted upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementRow {
    pub id: String,
    pub provider_id: String,
    pub provider_name_ar: Option<String>,
    pub provider_name_en: Option<String>,

    pub period_start: NaiveDate,
    pub period_end: NaiveDate,

    pub total_orders: Option<i64>,
    pub gross_revenue: Option<f64>,
    pub platform_commission: Option<f64>,
    pub delivery_fees_collected: Option<f64>,
    pub net_amount_due: Option<f64>,

    pub cod_orders_count: Option<i64>,
    pub cod_gross_revenue: Option<f64>,
    pub cod_commission_owed: Option<f64>,

    pub online_orders_count: Option<i64>,
    pub online_gross_revenue: Option<f64>,
    pub online_platform_commission: Option<f64>,
    pub online_payout_owed: Option<f64>,

    pub net_balance: Option<f64>,
    pub settlement_direction: Option<String>,

    pub status: Option<String>,
    pub amount_paid: Option<f64>,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,

    pub due_date: NaiveDate,
    pub is_overdue: Option<bool>,
    pub overdue_days: Option<i64>,

    pub notes: Option<String>,
    pub admin_notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub processed_by: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodSettlementBreakdown {
    pub orders_count: i64,
    pub gross_revenue: Money,
    pub commission_owed: Money,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineSettlementBreakdown {
    pub orders_count: i64,
    pub gross_revenue: Money,
    pub platform_commission: Money,
    pub payout_owed: Money,
}

/// One provider's settlement for one period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub id: String,
    pub provider_id: String,
    pub provider_name: Option<LocalizedName>,

    pub period_start: NaiveDate,
    pub period_end: NaiveDate,

    pub total_orders: i64,
    pub gross_revenue: Money,
    pub platform_commission: Money,
    pub delivery_fees_collected: Money,
    pub net_amount_due: Money,

    pub cod: CodSettlementBreakdown,
    pub online: OnlineSettlementBreakdown,

    pub net_balance: Money,
    pub settlement_direction: SettlementDirection,

    pub status: SettlementStatus,
    pub amount_paid: Money,
    pub payment_date: Option<DateTime<Utc>>,
    pub payment_method: Option<String>,
    pub payment_reference: Option<String>,

    pub due_date: NaiveDate,
    pub is_overdue: bool,
    pub overdue_days: i64,

    pub notes: Option<String>,
    pub admin_notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Option<String>,
    pub processed_by: Option<String>,
}

impl Settlement {
    pub fn is_paid(&self) -> bool {
        self.status == SettlementStatus::Paid
    }

    pub fn past_due(&self) -> bool {
        self.status == SettlementStatus::Overdue || self.is_overdue
    }

    /// Amount still owed after recorded payments, never negative.
    pub fn remaining_balance(&self) -> Money {
        (self.net_amount_due - self.amount_paid).non_negative()
    }

    /// First eight characters of the id, uppercased, as shown on reports.
    pub fn short_id(&self) -> String {
        self.id.chars().take(8).collect::<String>().to_uppercase()
    }
}

impl From<SettlementRow> for Settlement {
    fn from(row: SettlementRow) -> Self {
        let provider_name = match (row.provider_name_ar, row.provider_name_en) {
            (None, None) => None,
            (ar, en) => Some(LocalizedName {
                ar: ar.unwrap_or_default(),
                en: en.unwrap_or_default(),
            }),
        };
        Settlement {
            id: row.id,
            provider_id: row.provider_id,
            provider_name,
            period_start: row.period_start,
            period_end: row.period_end,
            total_orders: row.total_orders.unwrap_or(0),
            gross_revenue: Money::from_database(row.gross_revenue),
            platform_commission: Money::from_database(row.platform_commission),
            delivery_fees_collected: Money::from_database(row.delivery_fees_collected),
            net_amount_due: Money::from_database(row.net_amount_due),
            cod: CodSettlementBreakdown {
                orders_count: row.cod_orders_count.unwrap_or(0),
                gross_revenue: Money::from_database(row.cod_gross_revenue),
                commission_owed: Money::from_database(row.cod_commission_owed),
            },
            online: OnlineSettlementBreakdown {
                orders_count: row.online_orders_count.unwrap_or(0),
                gross_revenue: Money::from_database(row.online_gross_revenue),
                platform_commission: Money::from_database(row.online_platform_commission),
                payout_owed: Money::from_database(row.online_payout_owed),
            },
            net_balance: Money::from_database(row.net_balance),
            settlement_direction: row
                .settlement_direction
                .as_deref()
                .and_then(SettlementDirection::from_key)
                .unwrap_or_default(),
            status: row
                .status
                .as_deref()
                .and_then(SettlementStatus::from_key)
                .unwrap_or_default(),
            amount_paid: Money::from_database(row.amount_paid),
            payment_date: row.payment_date,
            payment_method: row.payment_method,
            payment_reference: row.payment_reference,
            due_date: row.due_date,
            is_overdue: row.is_overdue.unwrap_or(false),
            overdue_days: row.overdue_days.unwrap_or(0),
            notes: row.notes,
            admin_notes: row.admin_notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
            created_by: row.created_by,
            processed_by: row.processed_by,
        }
    }
}

/// Payment applied against a settlement. Applying it atomically is the
/// persistence layer's contract; this core only carries the input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementPayment {
    pub settlement_id: String,
    pub amount: Money,
    pub payment_method: PaymentMethod,
    pub payment_reference: Option<String>,
    pub processed_by: Option<String>,
    pub notes: Option<String>,
}

/// Actions recorded in the settlement audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Create,
    UpdateStatus,
    RecordPayment,
    RecordPartialPayment,
    VoidPayment,
    DisputeOpened,
    DisputeResolved,
    AddOrder,
    RemoveOrder,
    HoldOrder,
    ReleaseOrder,
    AdjustCommission,
    Waive,
    Delete,
    /// Forward-compatibility fallback for actions this build predates.
    #[serde(other)]
    Unknown,
}

impl AuditAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            AuditAction::Create => "create",
            AuditAction::UpdateStatus => "update_status",
            AuditAction::RecordPayment => "record_payment",
            AuditAction::RecordPartialPayment => "record_partial_payment",
            AuditAction::VoidPayment => "void_payment",
            AuditAction::DisputeOpened => "dispute_opened",
            AuditAction::DisputeResolved => "dispute_resolved",
            AuditAction::AddOrder => "add_order",
            AuditAction::RemoveOrder => "remove_order",
            AuditAction::HoldOrder => "hold_order",
            AuditAction::ReleaseOrder => "release_order",
            AuditAction::AdjustCommission => "adjust_commission",
            AuditAction::Waive => "waive",
            AuditAction::Delete => "delete",
            AuditAction::Unknown => "unknown",
        }
    }
}

/// Raw audit-log row as persisted upstream. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettlementAuditRow {
    pub id: String,
    pub settlement_id: Option<String>,
    pub order_id: Option<String>,
    pub action: AuditAction,

    pub admin_id: Option<String>,
    pub admin_name: Option<String>,
    pub admin_role: Option<String>,

    pub performed_at: DateTime<Utc>,

    pub old_value: Option<Value>,
    pub new_value: Option<Value>,

    pub payment_reference: Option<String>,
    pub payment_method: Option<String>,
    pub amount: Option<f64>,

    pub reason: Option<String>,
    pub notes: Option<String>,
}

/// One audit-trail entry, typed for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementAuditEntry {
    pub id: String,
    pub settlement_id: Option<String>,
    pub order_id: Option<String>,
    pub action: AuditAction,
    pub admin_id: Option<String>,
    pub admin_name: Option<String>,
    pub admin_role: Option<String>,
    pub performed_at: DateTime<Utc>,
    pub old_value: Option<Value>,
    pub new_value: Option<Value>,
    pub payment_reference: Option<String>,
    pub payment_method: Option<String>,
    pub amount: Option<Money>,
    pub reason: Option<String>,
    pub notes: Option<String>,
}

impl From<SettlementAuditRow> for SettlementAuditEntry {
    fn from(row: SettlementAuditRow) -> Self {
        SettlementAuditEntry {
            id: row.id,
            settlement_id: row.settlement_id,
            order_id: row.order_id,
            action: row.action,
            admin_id: row.admin_id,
            admin_name: row.admin_name,
            admin_role: row.admin_role,
            performed_at: row.performed_at,
            old_value: row.old_value,
            new_value: row.new_value,
            payment_reference: row.payment_reference,
            payment_method: row.payment_method,
            amount: row.amount.map(|a| Money::from_database(Some(a))),
            reason: row.reason,
            notes: row.notes,
        }
    }
}
