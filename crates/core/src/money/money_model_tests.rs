use super::money_model::{sum_money, Locale, Money};
use crate::errors::{Error, MoneyError};

#[test]
fn addition_has_no_floating_drift() {
    let total = Money::from_pounds(0.10) + Money::from_pounds(0.20);
    assert_eq!(total, Money::from_pounds(0.30));
    assert_eq!(total.to_piasters(), 30);
    assert_eq!(total.to_pounds(), 0.30);
}

#[test]
fn construction_rounds_to_nearest_piaster() {
    assert_eq!(Money::from_pounds(10.994).to_piasters(), 1099);
    assert_eq!(Money::from_pounds(10.996).to_piasters(), 1100);
    assert_eq!(Money::from_pounds(-10.996).to_piasters(), -1100);
}

#[test]
fn malformed_input_coerces_to_zero() {
    assert_eq!("not a number".parse::<Money>().unwrap(), Money::zero());
    assert_eq!("".parse::<Money>().unwrap(), Money::zero());
    assert_eq!(Money::from_pounds(f64::NAN), Money::zero());
    assert_eq!(Money::from_database(None), Money::zero());
    assert_eq!(Money::from_database(Some(12.34)).to_piasters(), 1234);
}

#[test]
fn string_parsing_matches_numeric_construction() {
    assert_eq!("100.50".parse::<Money>().unwrap(), Money::from_pounds(100.50));
    assert_eq!(" 7.07 ".parse::<Money>().unwrap().to_piasters(), 707);
    assert_eq!("-3.5".parse::<Money>().unwrap().to_piasters(), -350);
}

#[test]
fn multiply_rounds_half_away_from_zero() {
    // 25 piasters * 0.5 = 12.5 piasters -> 13
    assert_eq!(Money::from_piasters(25).multiply(0.5).to_piasters(), 13);
    assert_eq!(Money::from_piasters(-25).multiply(0.5).to_piasters(), -13);
    // rounding happens per operation, not at the end of a chain
    let chained = Money::from_piasters(25).multiply(0.5).multiply(2.0);
    assert_eq!(chained.to_piasters(), 26);
}

#[test]
fn percent_of_subtotal() {
    assert_eq!(Money::from_pounds(200.0).percent(7.0), Money::from_pounds(14.0));
    assert_eq!(Money::from_pounds(150.55).percent(10.0).to_piasters(), 1506);
}

#[test]
fn divide_by_zero_fails() {
    let result = Money::from_pounds(10.0).divide(0.0);
    assert!(matches!(
        result,
        Err(Error::Money(MoneyError::DivisionByZero))
    ));
}

#[test]
fn divide_rounds_to_nearest_piaster() {
    let third = Money::from_pounds(10.0).divide(3.0).unwrap();
    assert_eq!(third.to_piasters(), 333);
}

#[test]
fn clamps_and_sign_helpers() {
    assert_eq!(Money::from_pounds(-5.0).non_negative(), Money::zero());
    assert_eq!(Money::from_pounds(5.0).non_negative(), Money::from_pounds(5.0));
    assert_eq!(Money::from_pounds(-5.0).abs(), Money::from_pounds(5.0));
    assert_eq!(-Money::from_pounds(5.0), Money::from_pounds(-5.0));
    assert!(Money::from_pounds(0.01).is_positive());
    assert!(Money::from_pounds(-0.01).is_negative());
    assert!(Money::zero().is_zero());
    assert_eq!(
        Money::from_pounds(3.0).max(Money::from_pounds(7.0)),
        Money::from_pounds(7.0)
    );
    assert_eq!(
        Money::from_pounds(3.0).min(Money::from_pounds(7.0)),
        Money::from_pounds(3.0)
    );
}

#[test]
fn to_fixed_pads_and_rounds() {
    assert_eq!(Money::from_pounds(10.5).to_fixed(2), "10.50");
    assert_eq!(Money::from_piasters(1055).to_fixed(1), "10.6");
    assert_eq!(Money::from_pounds(10.99).to_fixed(3), "10.990");
    assert_eq!(Money::zero().to_fixed(2), "0.00");
}

#[test]
fn format_uses_locale_numerals() {
    let amount = Money::from_pounds(10.54);
    assert_eq!(amount.format(Locale::En), "10.54 EGP");
    assert_eq!(amount.format(Locale::Ar), "١٠.٥٤ ج.م");
    assert_eq!(amount.format_western(Locale::Ar), "10.54 ج.م");

    assert_eq!(Money::zero().format(Locale::En), "0.00 EGP");
    assert_eq!(Money::zero().format(Locale::Ar), "٠.٠٠ ج.م");
    assert_eq!(Money::from_pounds(0.01).format(Locale::En), "0.01 EGP");
    assert_eq!(Money::from_pounds(100.50).format(Locale::Ar), "١٠٠.٥٠ ج.م");
}

#[test]
fn format_is_side_effect_free() {
    let amount = Money::from_pounds(1234567.89);
    for _ in 0..3 {
        let _ = amount.format(Locale::Ar);
        let _ = amount.format_with_separators(Locale::En);
        let _ = amount.format_short(Locale::En);
    }
    assert_eq!(amount.to_pounds(), 1234567.89);
    assert_eq!(amount.to_piasters(), 123456789);
}

#[test]
fn format_with_separators_groups_thousands() {
    assert_eq!(
        Money::from_pounds(1234567.89).format_with_separators(Locale::En),
        "1,234,567.89 EGP"
    );
    assert_eq!(
        Money::from_pounds(100.50).format_with_separators(Locale::En),
        "100.50 EGP"
    );
    assert_eq!(
        Money::from_pounds(-1234.56).format_with_separators(Locale::En),
        "-1,234.56 EGP"
    );
    assert_eq!(
        Money::from_pounds(1234.56).format_with_separators(Locale::Ar),
        "١٬٢٣٤٫٥٦ ج.م"
    );
}

#[test]
fn format_short_abbreviates() {
    assert_eq!(Money::from_pounds(1500.0).format_short(Locale::En), "1.5K EGP");
    assert_eq!(
        Money::from_pounds(2_300_000.0).format_short(Locale::En),
        "2.3M EGP"
    );
    assert_eq!(Money::from_pounds(999.99).format_short(Locale::En), "999.99 EGP");
    assert_eq!(Money::from_pounds(1500.0).format_short(Locale::Ar), "1.5ك ج.م");
}

#[test]
fn sum_money_folds_exactly() {
    let amounts = vec![
        Money::from_pounds(0.10),
        Money::from_pounds(0.20),
        Money::from_pounds(0.30),
    ];
    assert_eq!(sum_money(amounts), Money::from_pounds(0.60));
    assert_eq!(sum_money(Vec::new()), Money::zero());
}

#[test]
fn serde_round_trips_as_pounds() {
    let amount = Money::from_pounds(100.50);
    let json = serde_json::to_string(&amount).unwrap();
    assert_eq!(json, "100.5");
    let back: Money = serde_json::from_str(&json).unwrap();
    assert_eq!(back, amount);

    let from_string: Money = serde_json::from_str("\"12.34\"").unwrap();
    assert_eq!(from_string.to_piasters(), 1234);
    let from_garbage: Money = serde_json::from_str("\"n/a\"").unwrap();
    assert_eq!(from_garbage, Money::zero());
    let from_null: Money = serde_json::from_str("null").unwrap();
    assert_eq!(from_null, Money::zero());
}

#[test]
fn display_is_fixed_point() {
    assert_eq!(Money::from_pounds(10.5).to_string(), "10.50");
    assert_eq!(Money::from_pounds(-0.05).to_string(), "-0.05");
}
