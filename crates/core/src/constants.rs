/// Piasters per Egyptian pound.
pub const PIASTERS_PER_POUND: i64 = 100;

/// Net balances within this many piasters of zero are classified as
/// balanced, so rounding residue never generates a settlement action.
pub const SETTLEMENT_DIRECTION_THRESHOLD_PIASTERS: i64 = 50;

/// Time-to-live for the governorate -> provider-ids lookup cache.
pub const PROVIDER_REGION_CACHE_TTL_SECONDS: i64 = 300;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Currency label shown after formatted amounts.
pub const CURRENCY_LABEL_EN: &str = "EGP";
pub const CURRENCY_LABEL_AR: &str = "ج.م";

/// Platform name printed on exported reports.
pub const PLATFORM_NAME_EN: &str = "Engezna";
pub const PLATFORM_NAME_AR: &str = "إنجزنا";
