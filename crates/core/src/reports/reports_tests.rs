use chrono::{NaiveDate, TimeZone, Utc};

use super::csv_export::{csv_export_filename, settlements_to_csv};
use super::html_report::render_settlement_html;
use super::labels::{direction_label, format_date, status_label};
use super::report_model::{DateFormat, ExportOptions, OrderExportRow, SettlementExportData};
use crate::finance::{
    AuditAction, CodSettlementBreakdown, LocalizedName, OnlineSettlementBreakdown, PaymentMethod,
    Settlement, SettlementAuditEntry, SettlementStatus,
};
use crate::money::{Locale, Money, SettlementDirection};

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

fn sample_settlement(id: &str, gross_revenue: f64, status: SettlementStatus) -> Settlement {
    Settlement {
        id: id.to_string(),
        provider_id: "provider-1".to_string(),
        provider_name: Some(LocalizedName::new("مطعم النيل", "Nile Restaurant")),
        period_start: date(2025, 1, 1),
        period_end: date(2025, 1, 31),
        total_orders: 42,
        gross_revenue: Money::from_pounds(gross_revenue),
        platform_commission: Money::from_pounds(70.0),
        delivery_fees_collected: Money::from_pounds(120.0),
        net_amount_due: Money::from_pounds(gross_revenue - 70.0),
        cod: CodSettlementBreakdown {
            orders_count: 30,
            gross_revenue: Money::from_pounds(600.0),
            commission_owed: Money::from_pounds(42.0),
        },
        online: OnlineSettlementBreakdown {
            orders_count: 12,
            gross_revenue: Money::from_pounds(400.0),
            platform_commission: Money::from_pounds(28.0),
            payout_owed: Money::from_pounds(372.0),
        },
        net_balance: Money::from_pounds(330.0),
        settlement_direction: SettlementDirection::PlatformPaysProvider,
        status,
        amount_paid: Money::zero(),
        payment_date: None,
        payment_method: None,
        payment_reference: None,
        due_date: date(2025, 2, 14),
        is_overdue: false,
        overdue_days: 0,
        notes: None,
        admin_notes: None,
        created_at: Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap(),
        updated_at: Utc.with_ymd_and_hms(2025, 2, 1, 9, 0, 0).unwrap(),
        created_by: None,
        processed_by: None,
    }
}

fn export_options(locale: Locale) -> ExportOptions {
    ExportOptions::new(locale, Utc.with_ymd_and_hms(2025, 2, 2, 10, 30, 0).unwrap())
}

#[test]
fn csv_starts_with_bom_and_quotes_fields() {
    let settlements = vec![sample_settlement("abc12345-6789", 1000.0, SettlementStatus::Pending)];
    let bytes = settlements_to_csv(&settlements, Locale::En).unwrap();

    assert_eq!(&bytes[..3], b"\xEF\xBB\xBF");
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();
    assert!(text.starts_with("\"Settlement ID\",\"Provider\""));
    assert!(text.contains("\"ABC12345\""));
    assert!(text.contains("\"1000.00\""));
}

#[test]
fn csv_round_trips_field_values() {
    let first = sample_settlement("abc12345-6789", 1000.0, SettlementStatus::Pending);
    let mut second = sample_settlement("def67890-1234", 850.50, SettlementStatus::Paid);
    second.payment_date = Some(Utc.with_ymd_and_hms(2025, 2, 10, 12, 0, 0).unwrap());

    let settlements = vec![first, second.clone()];
    let bytes = settlements_to_csv(&settlements, Locale::En).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(&bytes[3..]);
    let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(records.len(), 2);

    let row = &records[1];
    assert_eq!(&row[0], second.short_id().as_str());
    assert_eq!(&row[1], "Nile Restaurant");
    assert_eq!(&row[2], "Jan 1, 2025");
    assert_eq!(&row[3], "Jan 31, 2025");
    assert_eq!(&row[4], "42");
    assert_eq!(&row[5], second.gross_revenue.to_fixed(2));
    assert_eq!(&row[6], second.platform_commission.to_fixed(2));
    assert_eq!(&row[7], second.net_amount_due.to_fixed(2));
    assert_eq!(&row[8], second.net_balance.to_fixed(2));
    assert_eq!(&row[9], "Platform Pays Provider");
    assert_eq!(&row[10], "Paid");
    assert_eq!(&row[11], "Feb 10, 2025");
}

#[test]
fn csv_localizes_headers_and_labels() {
    let settlements = vec![sample_settlement("abc12345-6789", 1000.0, SettlementStatus::Overdue)];
    let bytes = settlements_to_csv(&settlements, Locale::Ar).unwrap();
    let text = String::from_utf8(bytes[3..].to_vec()).unwrap();

    assert!(text.contains("رقم التسوية"));
    assert!(text.contains("متأخر"));
    assert!(text.contains("المنصة تدفع للتاجر"));
    assert!(text.contains("مطعم النيل"));
}

#[test]
fn csv_filename_uses_iso_date() {
    assert_eq!(
        csv_export_filename(date(2025, 2, 2)),
        "settlements-2025-02-02.csv"
    );
}

#[test]
fn html_is_deterministic() {
    let data = SettlementExportData {
        settlement: sample_settlement("abc12345-6789", 1000.0, SettlementStatus::Pending),
        provider_name: Some(LocalizedName::new("مطعم النيل", "Nile Restaurant")),
        orders: None,
        audit_log: None,
    };
    let options = export_options(Locale::En);

    let first = render_settlement_html(&data, &options);
    let second = render_settlement_html(&data, &options);
    assert_eq!(first, second);
}

#[test]
fn html_renders_localized_document() {
    let data = SettlementExportData {
        settlement: sample_settlement("abc12345-6789", 1000.0, SettlementStatus::Pending),
        provider_name: Some(LocalizedName::new("مطعم النيل", "Nile Restaurant")),
        orders: None,
        audit_log: None,
    };

    let arabic = render_settlement_html(&data, &export_options(Locale::Ar));
    assert!(arabic.contains("dir=\"rtl\""));
    assert!(arabic.contains("تقرير التسوية"));
    assert!(arabic.contains("مطعم النيل"));
    assert!(arabic.contains(direction_label(
        SettlementDirection::PlatformPaysProvider,
        Locale::Ar
    )));

    let english = render_settlement_html(&data, &export_options(Locale::En));
    assert!(english.contains("dir=\"ltr\""));
    assert!(english.contains("ABC12345"));
    assert!(english.contains("Nile Restaurant"));
    assert!(english.contains(&data.settlement.gross_revenue.format_western(Locale::En)));
    assert!(english.contains(status_label(SettlementStatus::Pending, Locale::En)));
}

#[test]
fn html_orders_and_audit_sections_are_optional() {
    let order = OrderExportRow {
        id: "order-1".to_string(),
        order_number: "ENG-1001".to_string(),
        total: Money::from_pounds(150.0),
        commission: Money::from_pounds(10.50),
        payment_method: PaymentMethod::Cash,
        created_at: Utc.with_ymd_and_hms(2025, 1, 5, 14, 0, 0).unwrap(),
    };
    let audit = SettlementAuditEntry {
        id: "audit-1".to_string(),
        settlement_id: Some("abc12345-6789".to_string()),
        order_id: None,
        action: AuditAction::RecordPayment,
        admin_id: None,
        admin_name: Some("Admin".to_string()),
        admin_role: None,
        performed_at: Utc.with_ymd_and_hms(2025, 2, 10, 12, 0, 0).unwrap(),
        old_value: None,
        new_value: None,
        payment_reference: Some("TRX-1".to_string()),
        payment_method: Some("bank_transfer".to_string()),
        amount: Some(Money::from_pounds(930.0)),
        reason: None,
        notes: Some("first installment".to_string()),
    };
    let data = SettlementExportData {
        settlement: sample_settlement("abc12345-6789", 1000.0, SettlementStatus::PartiallyPaid),
        provider_name: None,
        orders: Some(vec![order]),
        audit_log: Some(vec![audit]),
    };

    let mut options = export_options(Locale::En);
    let without_audit = render_settlement_html(&data, &options);
    assert!(without_audit.contains("ENG-1001"));
    assert!(without_audit.contains("Cash"));
    assert!(!without_audit.contains("Audit Trail"));

    options.include_audit_log = true;
    options.include_orders = false;
    let with_audit = render_settlement_html(&data, &options);
    assert!(with_audit.contains("Audit Trail"));
    assert!(with_audit.contains("record_payment"));
    assert!(with_audit.contains("first installment"));
    assert!(!with_audit.contains("ENG-1001"));
}

#[test]
fn html_escapes_free_text() {
    let mut settlement = sample_settlement("abc12345-6789", 1000.0, SettlementStatus::Paid);
    settlement.payment_date = Some(Utc.with_ymd_and_hms(2025, 2, 10, 12, 0, 0).unwrap());
    settlement.payment_reference = Some("<script>alert(1)</script>".to_string());
    let data = SettlementExportData {
        settlement,
        provider_name: Some(LocalizedName::new("مطعم", "A & B <Grill>")),
        orders: None,
        audit_log: None,
    };

    let html = render_settlement_html(&data, &export_options(Locale::En));
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(html.contains("A &amp; B &lt;Grill&gt;"));
}

#[test]
fn arabic_dates_use_eastern_numerals() {
    assert_eq!(
        format_date(date(2025, 1, 31), Locale::Ar, DateFormat::Short),
        "٣١ يناير ٢٠٢٥"
    );
    assert_eq!(
        format_date(date(2025, 1, 31), Locale::En, DateFormat::Short),
        "Jan 31, 2025"
    );
    assert_eq!(
        format_date(date(2025, 1, 31), Locale::En, DateFormat::Long),
        "January 31, 2025"
    );
}
