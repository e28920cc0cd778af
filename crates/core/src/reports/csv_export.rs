//! CSV export for bulk settlement lists.
//!
//! Output is UTF-8 with a byte-order-mark prefix so spreadsheet tools
//! render Arabic text correctly, with every field quoted and the header
//! row and status/direction labels localized through the fixed tables in
//! [`super::labels`].

use chrono::NaiveDate;
use csv::{QuoteStyle, WriterBuilder};

use super::labels::{csv_headers, direction_label, format_date, format_datetime, status_label};
use super::report_model::DateFormat;
use crate::errors::{Error, Result};
use crate::finance::Settlement;
use crate::money::Locale;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Serializes settlements into a localized CSV document, one row per
/// settlement in the fixed export column order.
pub fn settlements_to_csv(settlements: &[Settlement], locale: Locale) -> Result<Vec<u8>> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(csv_headers(locale))?;

    for settlement in settlements {
        let provider = settlement
            .provider_name
            .as_ref()
            .map(|name| name.get(locale).to_string())
            .unwrap_or_default();
        let payment_date = settlement
            .payment_date
            .map(|date| format_datetime(date, locale, DateFormat::Short))
            .unwrap_or_default();

        writer.write_record(&[
            settlement.short_id(),
            provider,
            format_date(settlement.period_start, locale, DateFormat::Short),
            format_date(settlement.period_end, locale, DateFormat::Short),
            settlement.total_orders.to_string(),
            settlement.gross_revenue.to_fixed(2),
            settlement.platform_commission.to_fixed(2),
            settlement.net_amount_due.to_fixed(2),
            settlement.net_balance.to_fixed(2),
            direction_label(settlement.settlement_direction, locale).to_string(),
            status_label(settlement.status, locale).to_string(),
            payment_date,
        ])?;
    }

    let body = writer
        .into_inner()
        .map_err(|e| Error::Report(e.to_string()))?;

    let mut document = Vec::with_capacity(UTF8_BOM.len() + body.len());
    document.extend_from_slice(UTF8_BOM);
    document.extend_from_slice(&body);
    Ok(document)
}

/// File name for a settlement export generated on the given date.
pub fn csv_export_filename(date: NaiveDate) -> String {
    format!("settlements-{}.csv", date.format("%Y-%m-%d"))
}
