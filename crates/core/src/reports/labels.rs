//! Fixed bilingual label tables and deterministic date formatting.
//!
//! These lookups are compiled in and not editable at runtime, so exported
//! documents stay reproducible.

use chrono::{DateTime, Datelike, NaiveDate, Timelike, Utc};

use super::report_model::DateFormat;
use crate::finance::SettlementStatus;
use crate::money::{to_eastern_numerals, Locale, SettlementDirection};

/// All text labels used by the settlement report.
pub(crate) struct ReportLabels {
    pub title: &'static str,
    pub settlement_id: &'static str,
    pub provider: &'static str,
    pub period: &'static str,
    pub status: &'static str,
    pub direction: &'static str,
    pub created_at: &'static str,
    pub paid_at: &'static str,
    pub payment_method: &'static str,
    pub payment_reference: &'static str,

    pub financial_summary: &'static str,
    pub gross_revenue: &'static str,
    pub platform_commission: &'static str,
    pub net_payout: &'static str,
    pub net_balance: &'static str,
    pub total_orders: &'static str,

    pub cod_breakdown: &'static str,
    pub online_breakdown: &'static str,
    pub orders_count: &'static str,
    pub revenue: &'static str,
    pub commission_owed: &'static str,
    pub payout_owed: &'static str,

    pub orders_section: &'static str,
    pub order_number: &'static str,
    pub amount: &'static str,
    pub commission: &'static str,
    pub date: &'static str,

    pub audit_section: &'static str,
    pub action: &'static str,
    pub changed_by: &'static str,
    pub notes: &'static str,

    pub generated_at: &'static str,
}

static LABELS_AR: ReportLabels = ReportLabels {
    title: "تقرير التسوية",
    settlement_id: "رقم التسوية",
    provider: "المزود",
    period: "الفترة",
    status: "الحالة",
    direction: "الاتجاه",
    created_at: "تاريخ الإنشاء",
    paid_at: "تاريخ الدفع",
    payment_method: "طريقة الدفع",
    payment_reference: "مرجع الدفع",

    financial_summary: "الملخص المالي",
    gross_revenue: "إجمالي الإيرادات",
    platform_commission: "عمولة المنصة",
    net_payout: "صافي المزود",
    net_balance: "صافي الرصيد",
    total_orders: "عدد الطلبات",

    cod_breakdown: "الدفع عند الاستلام",
    online_breakdown: "الدفع الإلكتروني",
    orders_count: "عدد الطلبات",
    revenue: "الإيرادات",
    commission_owed: "العمولة المستحقة",
    payout_owed: "المستحق للمزود",

    orders_section: "الطلبات المضمنة",
    order_number: "رقم الطلب",
    amount: "المبلغ",
    commission: "العمولة",
    date: "التاريخ",

    audit_section: "سجل التغييرات",
    action: "الإجراء",
    changed_by: "بواسطة",
    notes: "ملاحظات",

    generated_at: "تم التصدير في",
};

static LABELS_EN: ReportLabels = ReportLabels {
    title: "Settlement Report",
    settlement_id: "Settlement ID",
    provider: "Provider",
    period: "Period",
    status: "Status",
    direction: "Direction",
    created_at: "Created At",
    paid_at: "Paid At",
    payment_method: "Payment Method",
    payment_reference: "Payment Reference",

    financial_summary: "Financial Summary",
    gross_revenue: "Gross Revenue",
    platform_commission: "Platform Commission",
    net_payout: "Net Payout",
    net_balance: "Net Balance",
    total_orders: "Total Orders",

    cod_breakdown: "Cash on Delivery",
    online_breakdown: "Online Payment",
    orders_count: "Orders Count",
    revenue: "Revenue",
    commission_owed: "Commission Owed",
    payout_owed: "Payout Owed",

    orders_section: "Included Orders",
    order_number: "Order #",
    amount: "Amount",
    commission: "Commission",
    date: "Date",

    audit_section: "Audit Trail",
    action: "Action",
    changed_by: "Changed By",
    notes: "Notes",

    generated_at: "Generated at",
};

pub(crate) fn report_labels(locale: Locale) -> &'static ReportLabels {
    match locale {
        Locale::Ar => &LABELS_AR,
        Locale::En => &LABELS_EN,
    }
}

/// CSV header row, in the fixed export column order.
pub(crate) fn csv_headers(locale: Locale) -> [&'static str; 12] {
    match locale {
        Locale::Ar => [
            "رقم التسوية",
            "المزود",
            "الفترة من",
            "الفترة إلى",
            "عدد الطلبات",
            "الإيرادات",
            "العمولة",
            "صافي المزود",
            "صافي الرصيد",
            "الاتجاه",
            "الحالة",
            "تاريخ الدفع",
        ],
        Locale::En => [
            "Settlement ID",
            "Provider",
            "Period Start",
            "Period End",
            "Orders",
            "Revenue",
            "Commission",
            "Net Payout",
            "Net Balance",
            "Direction",
            "Status",
            "Paid At",
        ],
    }
}

pub fn status_label(status: SettlementStatus, locale: Locale) -> &'static str {
    match (status, locale) {
        (SettlementStatus::Pending, Locale::Ar) => "معلق",
        (SettlementStatus::Pending, Locale::En) => "Pending",
        (SettlementStatus::PartiallyPaid, Locale::Ar) => "مدفوع جزئياً",
        (SettlementStatus::PartiallyPaid, Locale::En) => "Partially Paid",
        (SettlementStatus::Paid, Locale::Ar) => "مدفوع",
        (SettlementStatus::Paid, Locale::En) => "Paid",
        (SettlementStatus::Overdue, Locale::Ar) => "متأخر",
        (SettlementStatus::Overdue, Locale::En) => "Overdue",
        (SettlementStatus::Disputed, Locale::Ar) => "نزاع",
        (SettlementStatus::Disputed, Locale::En) => "Disputed",
        (SettlementStatus::Waived, Locale::Ar) => "معفى",
        (SettlementStatus::Waived, Locale::En) => "Waived",
    }
}

pub fn direction_label(direction: SettlementDirection, locale: Locale) -> &'static str {
    match (direction, locale) {
        (SettlementDirection::PlatformPaysProvider, Locale::Ar) => "المنصة تدفع للتاجر",
        (SettlementDirection::PlatformPaysProvider, Locale::En) => "Platform Pays Provider",
        (SettlementDirection::ProviderPaysPlatform, Locale::Ar) => "التاجر يدفع للمنصة",
        (SettlementDirection::ProviderPaysPlatform, Locale::En) => "Provider Pays Platform",
        (SettlementDirection::Balanced, Locale::Ar) => "متوازن",
        (SettlementDirection::Balanced, Locale::En) => "Balanced",
    }
}

/// Cash vs online label for the orders table.
pub(crate) fn cash_or_online_label(is_cash: bool, locale: Locale) -> &'static str {
    match (is_cash, locale) {
        (true, Locale::Ar) => "نقدي",
        (true, Locale::En) => "Cash",
        (false, Locale::Ar) => "إلكتروني",
        (false, Locale::En) => "Online",
    }
}

const MONTHS_EN_SHORT: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

const MONTHS_EN_LONG: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const MONTHS_AR: [&str; 12] = [
    "يناير",
    "فبراير",
    "مارس",
    "أبريل",
    "مايو",
    "يونيو",
    "يوليو",
    "أغسطس",
    "سبتمبر",
    "أكتوبر",
    "نوفمبر",
    "ديسمبر",
];

fn month_name(month: u32, locale: Locale, format: DateFormat) -> &'static str {
    let index = month.saturating_sub(1) as usize;
    match locale {
        Locale::Ar => MONTHS_AR.get(index).copied().unwrap_or(""),
        Locale::En => match format {
            DateFormat::Short => MONTHS_EN_SHORT.get(index).copied().unwrap_or(""),
            DateFormat::Long => MONTHS_EN_LONG.get(index).copied().unwrap_or(""),
        },
    }
}

/// Deterministic date display: `Aug 7, 2026` / `٧ أغسطس ٢٠٢٦`.
pub(crate) fn format_date(date: NaiveDate, locale: Locale, format: DateFormat) -> String {
    let month = month_name(date.month(), locale, format);
    match locale {
        Locale::Ar => to_eastern_numerals(&format!("{} {} {}", date.day(), month, date.year())),
        Locale::En => format!("{} {}, {}", month, date.day(), date.year()),
    }
}

/// Date-time display; the long format appends `HH:MM`.
pub(crate) fn format_datetime(
    timestamp: DateTime<Utc>,
    locale: Locale,
    format: DateFormat,
) -> String {
    let date_part = format_date(timestamp.date_naive(), locale, format);
    match format {
        DateFormat::Short => date_part,
        DateFormat::Long => {
            let time = format!("{:02}:{:02}", timestamp.hour(), timestamp.minute());
            match locale {
                Locale::Ar => format!("{} {}", date_part, to_eastern_numerals(&time)),
                Locale::En => format!("{} {}", date_part, time),
            }
        }
    }
}
