//! Printable settlement report.
//!
//! Generation is a pure function of the export bundle and options: the
//! same inputs always produce the same bytes, which keeps exported
//! financial documents reproducible. Triggering a browser print or
//! download is the host application's concern, not this module's.

use chrono::Datelike;

use super::labels::{
    cash_or_online_label, direction_label, format_date, format_datetime, report_labels,
    status_label,
};
use super::report_model::{DateFormat, ExportOptions, OrderExportRow, SettlementExportData};
use crate::constants::{PLATFORM_NAME_AR, PLATFORM_NAME_EN};
use crate::finance::{PaymentMethod, Settlement, SettlementAuditEntry};
use crate::money::Locale;

const REPORT_STYLE: &str = r#"
    * { margin: 0; padding: 0; box-sizing: border-box; }
    body {
      font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
      font-size: 12px;
      line-height: 1.5;
      color: #1e293b;
      padding: 20px;
    }
    .header {
      display: flex;
      justify-content: space-between;
      align-items: center;
      border-bottom: 2px solid #009DE0;
      padding-bottom: 15px;
      margin-bottom: 20px;
    }
    .logo { font-size: 24px; font-weight: bold; color: #009DE0; }
    .title { font-size: 18px; color: #1e293b; }
    .info-grid {
      display: grid;
      grid-template-columns: repeat(3, 1fr);
      gap: 15px;
      margin-bottom: 20px;
    }
    .info-box {
      background: #f8fafc;
      border: 1px solid #e2e8f0;
      border-radius: 8px;
      padding: 12px;
    }
    .info-label { color: #64748b; font-size: 10px; text-transform: uppercase; margin-bottom: 4px; }
    .info-value { font-weight: 600; color: #1e293b; }
    .section { margin-bottom: 20px; }
    .section-title {
      font-size: 14px;
      font-weight: 600;
      border-bottom: 1px solid #e2e8f0;
      padding-bottom: 8px;
      margin-bottom: 12px;
    }
    .breakdown-grid { display: grid; grid-template-columns: repeat(2, 1fr); gap: 15px; }
    .breakdown-box { border-radius: 8px; padding: 12px; }
    .breakdown-cod { background: #fef3c7; border: 1px solid #fbbf24; }
    .breakdown-online { background: #dbeafe; border: 1px solid #3b82f6; }
    .breakdown-title { font-weight: 600; margin-bottom: 8px; }
    .breakdown-row { display: flex; justify-content: space-between; margin-bottom: 4px; }
    .breakdown-total { font-weight: bold; border-top: 1px solid currentColor; padding-top: 4px; margin-top: 4px; }
    .summary-grid { display: grid; grid-template-columns: repeat(4, 1fr); gap: 10px; }
    .summary-box { background: #f1f5f9; border-radius: 8px; padding: 12px; text-align: center; }
    .summary-value { font-size: 16px; font-weight: bold; }
    .summary-value.positive { color: #16a34a; }
    .summary-value.negative { color: #dc2626; }
    .summary-label { font-size: 10px; color: #64748b; }
    .result-box {
      background: linear-gradient(135deg, #009DE0, #0080b8);
      color: white;
      border-radius: 8px;
      padding: 15px;
      text-align: center;
      margin-top: 15px;
    }
    .result-label { font-size: 12px; opacity: 0.9; }
    .result-value { font-size: 24px; font-weight: bold; }
    .result-direction { font-size: 11px; opacity: 0.8; }
    table { width: 100%; border-collapse: collapse; margin-top: 10px; }
    th, td { border: 1px solid #e2e8f0; padding: 8px; }
    th { background: #f1f5f9; font-weight: 600; font-size: 10px; text-transform: uppercase; }
    .status-badge {
      display: inline-block;
      padding: 4px 8px;
      border-radius: 9999px;
      font-size: 10px;
      font-weight: 500;
    }
    .status-paid { background: #dcfce7; color: #166534; }
    .status-pending { background: #fef9c3; color: #854d0e; }
    .status-overdue { background: #fee2e2; color: #991b1b; }
    .footer {
      margin-top: 30px;
      padding-top: 15px;
      border-top: 1px solid #e2e8f0;
      text-align: center;
      color: #64748b;
      font-size: 10px;
    }
    @media print { body { padding: 0; } .no-print { display: none; } }
"#;

/// Renders a settlement report as a self-contained HTML document suitable
/// for printing or save-as-PDF.
pub fn render_settlement_html(data: &SettlementExportData, options: &ExportOptions) -> String {
    let settlement = &data.settlement;
    let locale = options.locale;
    let labels = report_labels(locale);
    let is_rtl = locale == Locale::Ar;
    let dir = if is_rtl { "rtl" } else { "ltr" };
    let align = if is_rtl { "right" } else { "left" };
    let platform = match locale {
        Locale::Ar => PLATFORM_NAME_AR,
        Locale::En => PLATFORM_NAME_EN,
    };
    let provider_name = data
        .provider_name
        .as_ref()
        .map(|name| escape_html(name.get(locale)))
        .unwrap_or_else(|| "-".to_string());

    let mut html = String::with_capacity(16 * 1024);
    html.push_str("<!DOCTYPE html>\n");
    html.push_str(&format!(
        "<html lang=\"{}\" dir=\"{}\">\n<head>\n<meta charset=\"UTF-8\">\n",
        locale_tag(locale),
        dir
    ));
    html.push_str(&format!(
        "<title>{} - {}</title>\n",
        labels.title,
        settlement.short_id()
    ));
    html.push_str("<style>\n");
    html.push_str(&format!("    body {{ direction: {}; }}\n", dir));
    html.push_str(&format!("    th, td {{ text-align: {}; }}\n", align));
    html.push_str(REPORT_STYLE);
    html.push_str("</style>\n</head>\n<body>\n");

    html.push_str(&format!(
        "<div class=\"header\">\n  <div class=\"logo\">{}</div>\n  <div class=\"title\">{}</div>\n</div>\n",
        platform, labels.title
    ));

    render_info_grid(&mut html, settlement, &provider_name, options);
    render_summary(&mut html, settlement, options);
    render_breakdown(&mut html, settlement, options);

    if settlement.payment_date.is_some() {
        render_payment_block(&mut html, settlement, options);
    }

    if options.include_orders {
        if let Some(orders) = data.orders.as_deref().filter(|o| !o.is_empty()) {
            render_orders_table(&mut html, orders, options);
        }
    }

    if options.include_audit_log {
        if let Some(audit_log) = data.audit_log.as_deref().filter(|a| !a.is_empty()) {
            render_audit_table(&mut html, audit_log, options);
        }
    }

    html.push_str(&format!(
        "<div class=\"footer\">\n  <p>{}: {}</p>\n  <p>{} &copy; {}</p>\n</div>\n",
        labels.generated_at,
        format_datetime(options.generated_at, locale, DateFormat::Long),
        platform,
        options.generated_at.year()
    ));
    html.push_str("</body>\n</html>\n");
    html
}

fn render_info_grid(
    html: &mut String,
    settlement: &Settlement,
    provider_name: &str,
    options: &ExportOptions,
) {
    let labels = report_labels(options.locale);
    let period = format!(
        "{} - {}",
        format_date(settlement.period_start, options.locale, options.date_format),
        format_date(settlement.period_end, options.locale, options.date_format)
    );
    let status_badge = format!(
        "<span class=\"status-badge status-{}\">{}</span>",
        settlement.status.as_str(),
        status_label(settlement.status, options.locale)
    );

    html.push_str("<div class=\"info-grid\">\n");
    info_box(html, labels.settlement_id, &settlement.short_id());
    info_box(html, labels.provider, provider_name);
    info_box(html, labels.period, &period);
    info_box(html, labels.status, &status_badge);
    info_box(
        html,
        labels.direction,
        direction_label(settlement.settlement_direction, options.locale),
    );
    info_box(
        html,
        labels.created_at,
        &format_datetime(settlement.created_at, options.locale, DateFormat::Long),
    );
    html.push_str("</div>\n");
}

fn render_summary(html: &mut String, settlement: &Settlement, options: &ExportOptions) {
    let labels = report_labels(options.locale);
    html.push_str(&format!(
        "<div class=\"section\">\n<div class=\"section-title\">{}</div>\n<div class=\"summary-grid\">\n",
        labels.financial_summary
    ));
    summary_box(
        html,
        &settlement.gross_revenue.format_western(options.locale),
        labels.gross_revenue,
        "",
    );
    summary_box(
        html,
        &format!(
            "-{}",
            settlement.platform_commission.format_western(options.locale)
        ),
        labels.platform_commission,
        " negative",
    );
    summary_box(
        html,
        &settlement.net_amount_due.format_western(options.locale),
        labels.net_payout,
        " positive",
    );
    summary_box(
        html,
        &settlement.total_orders.to_string(),
        labels.total_orders,
        "",
    );
    html.push_str("</div>\n</div>\n");
}

fn render_breakdown(html: &mut String, settlement: &Settlement, options: &ExportOptions) {
    let labels = report_labels(options.locale);
    let locale = options.locale;

    html.push_str("<div class=\"section\">\n<div class=\"breakdown-grid\">\n");

    html.push_str(&format!(
        "<div class=\"breakdown-box breakdown-cod\">\n<div class=\"breakdown-title\">{}</div>\n",
        labels.cod_breakdown
    ));
    breakdown_row(html, labels.orders_count, &settlement.cod.orders_count.to_string(), false);
    breakdown_row(
        html,
        labels.revenue,
        &settlement.cod.gross_revenue.format_western(locale),
        false,
    );
    breakdown_row(
        html,
        labels.commission_owed,
        &settlement.cod.commission_owed.format_western(locale),
        true,
    );
    html.push_str("</div>\n");

    html.push_str(&format!(
        "<div class=\"breakdown-box breakdown-online\">\n<div class=\"breakdown-title\">{}</div>\n",
        labels.online_breakdown
    ));
    breakdown_row(
        html,
        labels.orders_count,
        &settlement.online.orders_count.to_string(),
        false,
    );
    breakdown_row(
        html,
        labels.revenue,
        &settlement.online.gross_revenue.format_western(locale),
        false,
    );
    breakdown_row(
        html,
        labels.payout_owed,
        &settlement.online.payout_owed.format_western(locale),
        true,
    );
    html.push_str("</div>\n</div>\n");

    html.push_str(&format!(
        "<div class=\"result-box\">\n  <div class=\"result-label\">{}</div>\n  <div class=\"result-value\">{}</div>\n  <div class=\"result-direction\">{}</div>\n</div>\n</div>\n",
        labels.net_balance,
        settlement.net_balance.abs().format_western(locale),
        direction_label(settlement.settlement_direction, locale)
    ));
}

fn render_payment_block(html: &mut String, settlement: &Settlement, options: &ExportOptions) {
    let labels = report_labels(options.locale);
    let paid_at = settlement
        .payment_date
        .map(|d| format_datetime(d, options.locale, DateFormat::Long))
        .unwrap_or_else(|| "-".to_string());
    let method = settlement
        .payment_method
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "-".to_string());
    let reference = settlement
        .payment_reference
        .as_deref()
        .map(escape_html)
        .unwrap_or_else(|| "-".to_string());

    html.push_str("<div class=\"info-grid\">\n");
    info_box(html, labels.paid_at, &paid_at);
    info_box(html, labels.payment_method, &method);
    info_box(html, labels.payment_reference, &reference);
    html.push_str("</div>\n");
}

fn render_orders_table(html: &mut String, orders: &[OrderExportRow], options: &ExportOptions) {
    let labels = report_labels(options.locale);
    html.push_str(&format!(
        "<div class=\"section\">\n<div class=\"section-title\">{} ({})</div>\n<table>\n<thead>\n<tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr>\n</thead>\n<tbody>\n",
        labels.orders_section,
        orders.len(),
        labels.order_number,
        labels.amount,
        labels.commission,
        labels.payment_method,
        labels.date
    ));
    for order in orders {
        let is_cash = order.payment_method == PaymentMethod::Cash;
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            escape_html(&order.order_number),
            order.total.format_western(options.locale),
            order.commission.format_western(options.locale),
            cash_or_online_label(is_cash, options.locale),
            format_datetime(order.created_at, options.locale, options.date_format)
        ));
    }
    html.push_str("</tbody>\n</table>\n</div>\n");
}

fn render_audit_table(
    html: &mut String,
    audit_log: &[SettlementAuditEntry],
    options: &ExportOptions,
) {
    let labels = report_labels(options.locale);
    html.push_str(&format!(
        "<div class=\"section\">\n<div class=\"section-title\">{}</div>\n<table>\n<thead>\n<tr><th>{}</th><th>{}</th><th>{}</th><th>{}</th></tr>\n</thead>\n<tbody>\n",
        labels.audit_section, labels.action, labels.changed_by, labels.notes, labels.date
    ));
    for entry in audit_log {
        let changed_by = entry
            .admin_name
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| "-".to_string());
        let notes = entry
            .notes
            .as_deref()
            .map(escape_html)
            .unwrap_or_else(|| "-".to_string());
        html.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            entry.action.as_str(),
            changed_by,
            notes,
            format_datetime(entry.performed_at, options.locale, DateFormat::Long)
        ));
    }
    html.push_str("</tbody>\n</table>\n</div>\n");
}

fn info_box(html: &mut String, label: &str, value: &str) {
    html.push_str(&format!(
        "  <div class=\"info-box\">\n    <div class=\"info-label\">{}</div>\n    <div class=\"info-value\">{}</div>\n  </div>\n",
        label, value
    ));
}

fn summary_box(html: &mut String, value: &str, label: &str, value_class: &str) {
    html.push_str(&format!(
        "  <div class=\"summary-box\">\n    <div class=\"summary-value{}\">{}</div>\n    <div class=\"summary-label\">{}</div>\n  </div>\n",
        value_class, value, label
    ));
}

fn breakdown_row(html: &mut String, label: &str, value: &str, total: bool) {
    let class = if total {
        "breakdown-row breakdown-total"
    } else {
        "breakdown-row"
    };
    html.push_str(&format!(
        "<div class=\"{}\"><span>{}</span><span>{}</span></div>\n",
        class, label, value
    ));
}

fn locale_tag(locale: Locale) -> &'static str {
    match locale {
        Locale::Ar => "ar",
        Locale::En => "en",
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
