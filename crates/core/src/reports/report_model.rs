//! Export bundle and options for settlement reports.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::finance::{LocalizedName, PaymentMethod, Settlement, SettlementAuditEntry};
use crate::money::{Locale, Money};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateFormat {
    #[default]
    Short,
    Long,
}

/// Rendering options for report and CSV generation.
///
/// `generated_at` is an explicit input rather than a wall-clock read so
/// that generation stays a pure function: identical data and options
/// produce byte-identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportOptions {
    pub locale: Locale,
    pub include_orders: bool,
    pub include_audit_log: bool,
    pub date_format: DateFormat,
    pub generated_at: DateTime<Utc>,
}

impl ExportOptions {
    pub fn new(locale: Locale, generated_at: DateTime<Utc>) -> Self {
        ExportOptions {
            locale,
            include_orders: true,
            include_audit_log: false,
            date_format: DateFormat::Short,
            generated_at,
        }
    }
}

/// One order line in the report's included-orders table.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderExportRow {
    pub id: String,
    pub order_number: String,
    pub total: Money,
    pub commission: Money,
    pub payment_method: PaymentMethod,
    pub created_at: DateTime<Utc>,
}

/// Everything a settlement report can include: the settlement itself plus
/// optional order and audit detail.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementExportData {
    pub settlement: Settlement,
    pub provider_name: Option<LocalizedName>,
    pub orders: Option<Vec<OrderExportRow>>,
    pub audit_log: Option<Vec<SettlementAuditEntry>>,
}
