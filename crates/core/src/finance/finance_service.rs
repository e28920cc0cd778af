//! Unified finance service for the admin and provider dashboards.
//!
//! The service projects raw settlement-engine rows into typed summaries,
//! retrieves persisted settlements and their audit trails, and records
//! payments. It is constructed per request with an explicit scope; the
//! scope is ANDed with caller-supplied filters, so filters can narrow what
//! a caller sees but never widen it.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use log::{debug, error};

use super::finance_model::{
    AdminFinancialSummary, CodTotals, CommissionBreakdown, DeliveryFeeBreakdown, EngineQuery,
    FinancialEngineRecord, FinancialFilters, GracePeriodStatus, OnlineTotals, OrderCounts,
    ProviderFinancialSummary, RefundBreakdown, RegionalFinancialSummary, RegionalQuery,
    RevenueBreakdown, SettlementFigures, SettlementQuery,
};
use super::finance_traits::{FinanceRepositoryTrait, FinanceServiceTrait};
use super::settlement_model::{
    Settlement, SettlementAuditEntry, SettlementPayment,
};
use crate::constants::PROVIDER_REGION_CACHE_TTL_SECONDS;
use crate::errors::{Error, Result};
use crate::money::{sum_money, SettlementDirection};
use crate::reports::SettlementExportData;
use crate::utils::{Clock, SystemClock};

/// Visibility boundary a service instance is constructed with.
///
/// A provider dashboard gets a provider-scoped instance; a regional admin
/// gets a governorate-scoped one. Instances are cheap and should be built
/// per request rather than shared across tenants, because the region
/// membership cache is keyed to the scope it was created with.
#[derive(Debug, Clone, Default)]
pub struct FinanceScope {
    pub provider_id: Option<String>,
    pub governorate_ids: Vec<String>,
    pub is_regional_admin: bool,
}

struct RegionProviderCache {
    provider_ids: Vec<String>,
    fetched_at: DateTime<Utc>,
}

pub struct FinanceService {
    repository: Arc<dyn FinanceRepositoryTrait>,
    scope: FinanceScope,
    clock: Arc<dyn Clock>,
    region_providers: RwLock<Option<RegionProviderCache>>,
}

impl FinanceService {
    pub fn new(
        repository: Arc<dyn FinanceRepositoryTrait>,
        scope: FinanceScope,
        clock: Arc<dyn Clock>,
    ) -> Self {
        FinanceService {
            repository,
            scope,
            clock,
            region_providers: RwLock::new(None),
        }
    }

    /// Service for the admin console, optionally restricted to a regional
    /// admin's governorates.
    pub fn new_admin(
        repository: Arc<dyn FinanceRepositoryTrait>,
        governorate_ids: Vec<String>,
        is_regional_admin: bool,
    ) -> Self {
        Self::new(
            repository,
            FinanceScope {
                provider_id: None,
                governorate_ids,
                is_regional_admin,
            },
            Arc::new(SystemClock),
        )
    }

    /// Service for a provider dashboard.
    pub fn new_provider(
        repository: Arc<dyn FinanceRepositoryTrait>,
        provider_id: impl Into<String>,
    ) -> Self {
        Self::new(
            repository,
            FinanceScope {
                provider_id: Some(provider_id.into()),
                governorate_ids: Vec::new(),
                is_regional_admin: false,
            },
            Arc::new(SystemClock),
        )
    }

    fn region_scoped(&self) -> bool {
        self.scope.is_regional_admin && !self.scope.governorate_ids.is_empty()
    }

    /// Composes the engine-view query from the scope and caller filters.
    /// `None` means the intersection is provably empty.
    fn engine_query(&self, filters: Option<&FinancialFilters>) -> Option<EngineQuery> {
        let mut query = EngineQuery::default();

        let requested_provider = filters.and_then(|f| f.provider_id.clone());
        query.provider_id = match (self.scope.provider_id.clone(), requested_provider) {
            (Some(scoped), Some(requested)) if scoped != requested => return None,
            (Some(scoped), _) => Some(scoped),
            (None, requested) => requested,
        };

        let requested_governorate = filters.and_then(|f| f.governorate_id.clone());
        if self.region_scoped() {
            if let Some(requested) = &requested_governorate {
                if !self.scope.governorate_ids.contains(requested) {
                    return None;
                }
            }
            query.governorate_ids = Some(self.scope.governorate_ids.clone());
        }
        query.governorate_id = requested_governorate;
        query.city_id = filters.and_then(|f| f.city_id.clone());
        Some(query)
    }

    fn regional_query(&self, filters: Option<&FinancialFilters>) -> Option<RegionalQuery> {
        let mut query = RegionalQuery::default();
        let requested_governorate = filters.and_then(|f| f.governorate_id.clone());
        if self.region_scoped() {
            if let Some(requested) = &requested_governorate {
                if !self.scope.governorate_ids.contains(requested) {
                    return None;
                }
            }
            query.governorate_ids = Some(self.scope.governorate_ids.clone());
        }
        query.governorate_id = requested_governorate;
        Some(query)
    }

    /// Providers in the scoped governorates, resolved through a cached
    /// lookup with a 5-minute TTL.
    async fn provider_ids_in_region(&self) -> Vec<String> {
        if self.scope.governorate_ids.is_empty() {
            return Vec::new();
        }
        let now = self.clock.now();
        {
            let cache = self.region_providers.read().unwrap();
            if let Some(entry) = cache.as_ref() {
                let age = now.signed_duration_since(entry.fetched_at);
                if age < Duration::seconds(PROVIDER_REGION_CACHE_TTL_SECONDS) {
                    return entry.provider_ids.clone();
                }
            }
        }

        match self
            .repository
            .get_provider_ids_in_governorates(&self.scope.governorate_ids)
            .await
        {
            Ok(provider_ids) => {
                let mut cache = self.region_providers.write().unwrap();
                *cache = Some(RegionProviderCache {
                    provider_ids: provider_ids.clone(),
                    fetched_at: now,
                });
                provider_ids
            }
            Err(e) => {
                error!("Failed to resolve providers in region: {e}");
                Vec::new()
            }
        }
    }

    fn map_to_provider_summary(record: FinancialEngineRecord) -> ProviderFinancialSummary {
        ProviderFinancialSummary {
            provider_id: record.provider_id,
            provider_name: record.provider_name,
            orders: OrderCounts {
                total: record.total_orders,
                cod: record.cod_orders_count,
                online: record.online_orders_count,
                eligible: record.eligible_orders_count,
                on_hold: record.held_orders_count,
                settled: record.settled_orders_count,
            },
            revenue: RevenueBreakdown {
                gross: record.gross_revenue,
                cod: record.cod_gross_revenue,
                online: record.online_gross_revenue,
            },
            commission: CommissionBreakdown {
                theoretical: record.theoretical_commission,
                actual: record.actual_commission,
                grace_period_discount: record.total_grace_period_discount,
                rate: record.commission_rate,
            },
            delivery_fees: DeliveryFeeBreakdown {
                total: record.total_delivery_fees,
                cod: record.cod_delivery_fees,
                online: record.online_delivery_fees,
            },
            refunds: RefundBreakdown {
                total: record.total_refunds,
                commission_reduction: record.total_refund_commission_reduction,
                percentage: record.refund_percentage,
            },
            settlement: SettlementFigures {
                cod_commission_owed: record.cod_commission_owed,
                online_payout_owed: record.online_payout_owed,
                net_balance: record.net_balance,
                direction: record.settlement_direction,
            },
            grace_period: GracePeriodStatus {
                is_active: record.is_in_grace_period,
                days_remaining: record.grace_period_days_remaining,
                end_date: record.grace_period_end,
            },
        }
    }

    /// Locally re-aggregates facts into an admin summary. Used for region
    /// scopes, where the global precomputed aggregate must not be trusted.
    fn aggregate_to_admin_summary(facts: &[FinancialEngineRecord]) -> AdminFinancialSummary {
        if facts.is_empty() {
            return AdminFinancialSummary::default();
        }

        let count_direction = |direction: SettlementDirection| {
            facts
                .iter()
                .filter(|f| f.settlement_direction == direction)
                .count() as i64
        };

        AdminFinancialSummary {
            total_providers: facts.len() as i64,
            total_orders: facts.iter().map(|f| f.total_orders).sum(),
            total_revenue: sum_money(facts.iter().map(|f| f.gross_revenue)),
            total_delivery_fees: sum_money(facts.iter().map(|f| f.total_delivery_fees)),
            total_theoretical_commission: sum_money(
                facts.iter().map(|f| f.theoretical_commission),
            ),
            total_actual_commission: sum_money(facts.iter().map(|f| f.actual_commission)),
            total_grace_period_discount: sum_money(
                facts.iter().map(|f| f.total_grace_period_discount),
            ),
            total_refunds: sum_money(facts.iter().map(|f| f.total_refunds)),
            cod: CodTotals {
                orders: facts.iter().map(|f| f.cod_orders_count).sum(),
                revenue: sum_money(facts.iter().map(|f| f.cod_gross_revenue)),
                commission_owed: sum_money(facts.iter().map(|f| f.cod_commission_owed)),
            },
            online: OnlineTotals {
                orders: facts.iter().map(|f| f.online_orders_count).sum(),
                revenue: sum_money(facts.iter().map(|f| f.online_gross_revenue)),
                payout_owed: sum_money(facts.iter().map(|f| f.online_payout_owed)),
            },
            total_net_balance: sum_money(facts.iter().map(|f| f.net_balance)),
            providers_to_pay: count_direction(SettlementDirection::PlatformPaysProvider),
            providers_to_collect: count_direction(SettlementDirection::ProviderPaysPlatform),
            providers_balanced: count_direction(SettlementDirection::Balanced),
            eligible_orders: facts.iter().map(|f| f.eligible_orders_count).sum(),
            held_orders: facts.iter().map(|f| f.held_orders_count).sum(),
            settled_orders: facts.iter().map(|f| f.settled_orders_count).sum(),
        }
    }
}

#[async_trait]
impl FinanceServiceTrait for FinanceService {
    async fn get_financial_facts(
        &self,
        filters: Option<&FinancialFilters>,
    ) -> Vec<FinancialEngineRecord> {
        let Some(query) = self.engine_query(filters) else {
            debug!("Requested filters fall outside the configured scope");
            return Vec::new();
        };
        match self.repository.get_engine_rows(&query).await {
            Ok(rows) => rows.into_iter().map(FinancialEngineRecord::from).collect(),
            Err(e) => {
                error!("Failed to fetch financial engine rows: {e}");
                Vec::new()
            }
        }
    }

    async fn get_admin_summary(&self, filters: Option<&FinancialFilters>) -> AdminFinancialSummary {
        if self.region_scoped() {
            let facts = self.get_financial_facts(filters).await;
            return Self::aggregate_to_admin_summary(&facts);
        }

        match self.repository.get_platform_summary_row().await {
            Ok(row) => AdminFinancialSummary::from(row),
            Err(e) => {
                error!("Failed to fetch admin summary: {e}");
                AdminFinancialSummary::default()
            }
        }
    }

    async fn get_provider_summary(
        &self,
        provider_id: Option<&str>,
    ) -> Result<Option<ProviderFinancialSummary>> {
        let target = provider_id
            .map(str::to_string)
            .or_else(|| self.scope.provider_id.clone())
            .ok_or_else(|| Error::validation("provider id is required"))?;

        let filters = FinancialFilters {
            provider_id: Some(target),
            ..Default::default()
        };
        let facts = self.get_financial_facts(Some(&filters)).await;
        Ok(facts.into_iter().next().map(Self::map_to_provider_summary))
    }

    async fn get_regional_summary(
        &self,
        filters: Option<&FinancialFilters>,
    ) -> Vec<RegionalFinancialSummary> {
        let Some(query) = self.regional_query(filters) else {
            debug!("Requested governorate falls outside the configured scope");
            return Vec::new();
        };
        match self.repository.get_regional_rows(&query).await {
            Ok(rows) => rows
                .into_iter()
                .map(RegionalFinancialSummary::from)
                .collect(),
            Err(e) => {
                error!("Failed to fetch regional summary: {e}");
                Vec::new()
            }
        }
    }

    async fn get_settlements(&self, filters: Option<&FinancialFilters>) -> Vec<Settlement> {
        let mut query = SettlementQuery {
            provider_id: self.scope.provider_id.clone(),
            ..Default::default()
        };

        if self.region_scoped() {
            let provider_ids = self.provider_ids_in_region().await;
            if provider_ids.is_empty() {
                debug!("Regional scope resolves to no providers");
                return Vec::new();
            }
            query.provider_ids = Some(provider_ids);
        }

        if let Some(filters) = filters {
            query.status = filters.status.clone();
            query.period_range = filters.date_range;
        }

        match self.repository.get_settlement_rows(&query).await {
            Ok(rows) => {
                let mut settlements: Vec<Settlement> =
                    rows.into_iter().map(Settlement::from).collect();
                settlements.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                settlements
            }
            Err(e) => {
                error!("Failed to fetch settlements: {e}");
                Vec::new()
            }
        }
    }

    async fn get_settlement_by_id(&self, settlement_id: &str) -> Option<Settlement> {
        match self.repository.get_settlement_row(settlement_id).await {
            Ok(row) => row.map(Settlement::from),
            Err(e) => {
                error!("Failed to fetch settlement {settlement_id}: {e}");
                None
            }
        }
    }

    async fn record_payment(&self, payment: &SettlementPayment) -> bool {
        match self.repository.record_payment(payment).await {
            Ok(()) => true,
            Err(e) => {
                error!(
                    "Failed to record payment for settlement {}: {e}",
                    payment.settlement_id
                );
                false
            }
        }
    }

    async fn get_settlement_audit_log(&self, settlement_id: &str) -> Vec<SettlementAuditEntry> {
        match self.repository.get_audit_rows(settlement_id).await {
            Ok(rows) => {
                let mut entries: Vec<SettlementAuditEntry> =
                    rows.into_iter().map(SettlementAuditEntry::from).collect();
                entries.sort_by(|a, b| b.performed_at.cmp(&a.performed_at));
                entries
            }
            Err(e) => {
                error!("Failed to fetch audit log for settlement {settlement_id}: {e}");
                Vec::new()
            }
        }
    }

    async fn get_settlement_export_data(
        &self,
        settlement_id: &str,
        include_audit_log: bool,
    ) -> Option<SettlementExportData> {
        let (settlement, audit_log) = futures::join!(
            self.get_settlement_by_id(settlement_id),
            async {
                if include_audit_log {
                    self.get_settlement_audit_log(settlement_id).await
                } else {
                    Vec::new()
                }
            }
        );

        let settlement = settlement?;
        Some(SettlementExportData {
            provider_name: settlement.provider_name.clone(),
            settlement,
            orders: None,
            audit_log: include_audit_log.then_some(audit_log),
        })
    }

    fn invalidate_cache(&self) {
        *self.region_providers.write().unwrap() = None;
    }
}
