//! Finance repository and service traits.
//!
//! These traits define the contract for settlement data access without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::finance_model::{
    AdminFinancialSummary, AdminSummaryRow, EngineQuery, FinancialEngineRecord, FinancialEngineRow,
    FinancialFilters, ProviderFinancialSummary, RegionalFinancialSummary, RegionalQuery,
    RegionalSummaryRow, SettlementQuery,
};
use super::settlement_model::{
    Settlement, SettlementAuditEntry, SettlementAuditRow, SettlementPayment, SettlementRow,
};
use crate::errors::Result;
use crate::reports::SettlementExportData;

/// Trait defining the contract for settlement data access.
///
/// Implementations execute the already-composed queries against the
/// upstream views and tables; scope composition happens in the service.
/// All populated query fields must be combined with logical AND.
#[async_trait]
pub trait FinanceRepositoryTrait: Send + Sync {
    /// Fetches per-provider rows from the settlement engine view.
    async fn get_engine_rows(&self, query: &EngineQuery) -> Result<Vec<FinancialEngineRow>>;

    /// Fetches the precomputed platform-wide summary row.
    async fn get_platform_summary_row(&self) -> Result<AdminSummaryRow>;

    /// Fetches per-governorate summary rows.
    async fn get_regional_rows(&self, query: &RegionalQuery) -> Result<Vec<RegionalSummaryRow>>;

    /// Fetches persisted settlement records.
    async fn get_settlement_rows(&self, query: &SettlementQuery) -> Result<Vec<SettlementRow>>;

    /// Fetches a single settlement record.
    async fn get_settlement_row(&self, settlement_id: &str) -> Result<Option<SettlementRow>>;

    /// Applies a payment against a settlement.
    ///
    /// The implementation must be atomic: either the payment is fully
    /// recorded (amount, status transition, audit entry) or nothing is.
    async fn record_payment(&self, payment: &SettlementPayment) -> Result<()>;

    /// Fetches the audit trail for a settlement.
    async fn get_audit_rows(&self, settlement_id: &str) -> Result<Vec<SettlementAuditRow>>;

    /// Resolves the providers located in the given governorates.
    async fn get_provider_ids_in_governorates(
        &self,
        governorate_ids: &[String],
    ) -> Result<Vec<String>>;
}

/// Trait defining the public surface of the finance service.
///
/// Fetch failures are absorbed at this boundary: operations degrade to
/// empty lists, `None`, or all-zero summaries so dashboards stay
/// renderable under partial backend failure.
#[async_trait]
pub trait FinanceServiceTrait: Send + Sync {
    /// Returns the financial facts visible in this service's scope,
    /// further narrowed by the given filters.
    async fn get_financial_facts(
        &self,
        filters: Option<&FinancialFilters>,
    ) -> Vec<FinancialEngineRecord>;

    /// Platform-wide summary. Regional admins get a locally re-aggregated
    /// summary restricted to their governorates instead of the global
    /// precomputed one.
    async fn get_admin_summary(&self, filters: Option<&FinancialFilters>) -> AdminFinancialSummary;

    /// Summary for one provider, or `None` when the provider has no facts.
    ///
    /// Fails with a validation error when no provider id is given and the
    /// service is not provider-scoped.
    async fn get_provider_summary(
        &self,
        provider_id: Option<&str>,
    ) -> Result<Option<ProviderFinancialSummary>>;

    /// One summary per governorate in scope.
    async fn get_regional_summary(
        &self,
        filters: Option<&FinancialFilters>,
    ) -> Vec<RegionalFinancialSummary>;

    /// Persisted settlement records, most recent first.
    async fn get_settlements(&self, filters: Option<&FinancialFilters>) -> Vec<Settlement>;

    async fn get_settlement_by_id(&self, settlement_id: &str) -> Option<Settlement>;

    /// Records a payment. Returns `false` on failure instead of raising.
    async fn record_payment(&self, payment: &SettlementPayment) -> bool;

    /// Audit trail for a settlement, most recent first.
    async fn get_settlement_audit_log(&self, settlement_id: &str) -> Vec<SettlementAuditEntry>;

    /// Bundles a settlement with its audit trail for export. The two
    /// fetches are issued concurrently.
    async fn get_settlement_export_data(
        &self,
        settlement_id: &str,
        include_audit_log: bool,
    ) -> Option<SettlementExportData>;

    /// Clears the governorate -> provider-ids cache. Must be called after
    /// any mutation that changes provider-region membership.
    fn invalidate_cache(&self);
}
