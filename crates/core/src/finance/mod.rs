//! Finance module - settlement aggregation, records, and data-access traits.

mod finance_model;
mod finance_service;
mod finance_traits;
mod settlement_model;


// Re-export the public interface
pub use finance_model::{
    AdminFinancialSummary, AdminSummaryRow, CodTotals, CommissionBreakdown, DeliveryFeeBreakdown,
    EngineQuery, FinancialDateRange, FinancialEngineRecord, FinancialEngineRow, FinancialFilters,
    GracePeriodStatus, LocalizedName, OnlineTotals, OrderCounts, ProviderFinancialSummary,
    RefundBreakdown, RegionalFinancialSummary, RegionalQuery, RegionalSummaryRow, RevenueBreakdown,
    SettlementFigures, SettlementQuery,
};
pub use finance_service::{FinanceScope, FinanceService};
pub use finance_traits::{FinanceRepositoryTrait, FinanceServiceTrait};
pub use settlement_model::{
    AuditAction, CodSettlementBreakdown, OnlineSettlementBreakdown, PaymentMethod, Settlement,
    SettlementAuditEntry, SettlementAuditRow, SettlementPayment, SettlementRow, SettlementStatus,
};
