use std::ops::RangeInclusive;

use chrono::{Datelike, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use super::error::SchemaError;
use super::schema::{FieldKind, FieldRule, Schema};
use super::types::{FieldValue, FormattedRecord, InvoiceRecord, ValueKind, VatMode};

/// Validate a record against the e-URA schema and format every field.
///
/// Fields are checked in declaration order and the first problem aborts
/// the whole call. Absent optional fields take their declared default
/// without a type check.
pub fn validate_and_format(record: &InvoiceRecord) -> Result<FormattedRecord, SchemaError> {
    Schema::eura().validate_and_format(record)
}

impl Schema {
    /// Validate and format `record` against this schema.
    ///
    /// See [`validate_and_format`].
    pub fn validate_and_format(&self, record: &InvoiceRecord) -> Result<FormattedRecord, SchemaError> {
        let mut out = Vec::with_capacity(self.rules().len());
        for rule in self.rules() {
            let formatted = match record.get(rule.field) {
                Some(value) => format_value(rule, value)?,
                None if rule.required => {
                    return Err(SchemaError::MissingField { field: rule.field });
                }
                None => rule.default_formatted(),
            };
            out.push(formatted);
        }
        Ok(FormattedRecord::from_ordered(out))
    }
}

fn format_value(rule: &FieldRule, value: &FieldValue) -> Result<String, SchemaError> {
    match (&rule.kind, value) {
        (FieldKind::Text { .. }, FieldValue::Text(s)) => Ok(s.clone()),
        (FieldKind::Number { .. }, FieldValue::Number(n)) => Ok(format_amount(*n)),
        (FieldKind::Date { .. }, FieldValue::Date(d)) => {
            if !PAYLOAD_YEARS.contains(&d.year()) {
                return Err(SchemaError::DateOutOfRange {
                    field: rule.field,
                    year: d.year(),
                });
            }
            Ok(format_date(*d))
        }
        (FieldKind::Enum { values, .. }, value) => match enum_member(values, value) {
            Some(mode) => Ok(mode.code().to_string()),
            None => Err(SchemaError::InvalidEnum {
                field: rule.field,
                value: value.to_string(),
            }),
        },
        (kind, value) => Err(SchemaError::Type {
            field: rule.field,
            expected: expected_kind(kind),
            actual: value.kind(),
        }),
    }
}

/// Exact numeric match against the legal codes; text is never coerced.
fn enum_member(values: &[VatMode], value: &FieldValue) -> Option<VatMode> {
    let FieldValue::Number(n) = value else {
        return None;
    };
    values
        .iter()
        .copied()
        .find(|mode| Decimal::from(mode.code()) == *n)
}

fn expected_kind(kind: &FieldKind) -> ValueKind {
    match kind {
        FieldKind::Text { .. } => ValueKind::Text,
        FieldKind::Number { .. } | FieldKind::Enum { .. } => ValueKind::Number,
        FieldKind::Date { .. } => ValueKind::Date,
    }
}

/// Format an amount with exactly two decimal places (`#0.00`).
///
/// Rounds half away from zero: 0.005 becomes 0.01 and -1.005 becomes
/// -1.01. Anything that rounds to zero prints as `0.00`.
pub fn format_amount(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    if rounded.is_zero() {
        return "0.00".to_string();
    }
    format!("{:.2}", rounded)
}

/// Years that fit the four-digit `YYYY` part of a payload date.
pub const PAYLOAD_YEARS: RangeInclusive<i32> = 0..=9999;

/// Format a date as `DDMMYYYY` with no separators.
///
/// Only dates with a year in [`PAYLOAD_YEARS`] produce eight digits;
/// validation rejects the rest before formatting.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d%m%Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Field;
    use rust_decimal_macros::dec;

    #[test]
    fn format_amount_pads() {
        assert_eq!(format_amount(dec!(800)), "800.00");
        assert_eq!(format_amount(dec!(0)), "0.00");
        assert_eq!(format_amount(dec!(12.5)), "12.50");
    }

    #[test]
    fn format_amount_rounds_half_away_from_zero() {
        assert_eq!(format_amount(dec!(0.005)), "0.01");
        assert_eq!(format_amount(dec!(0.015)), "0.02");
        assert_eq!(format_amount(dec!(0.025)), "0.03");
        assert_eq!(format_amount(dec!(2.675)), "2.68");
        assert_eq!(format_amount(dec!(0.0049)), "0.00");
        assert_eq!(format_amount(dec!(-1.005)), "-1.01");
    }

    #[test]
    fn format_amount_never_negative_zero() {
        assert_eq!(format_amount(dec!(-0.001)), "0.00");
    }

    #[test]
    fn format_date_ddmmyyyy() {
        let d = NaiveDate::from_ymd_opt(2016, 2, 3).unwrap();
        assert_eq!(format_date(d), "03022016");
        let d = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_date(d), "31122024");
    }

    #[test]
    fn date_year_range_edges() {
        let rule = Schema::eura().rule(Field::InvoiceDate).unwrap();
        let last = NaiveDate::from_ymd_opt(9999, 12, 31).unwrap();
        assert_eq!(format_value(rule, &FieldValue::Date(last)).unwrap(), "31129999");
        let first = NaiveDate::from_ymd_opt(0, 1, 1).unwrap();
        assert_eq!(format_value(rule, &FieldValue::Date(first)).unwrap(), "01010000");

        let too_late = NaiveDate::from_ymd_opt(10000, 2, 3).unwrap();
        assert_eq!(
            format_value(rule, &FieldValue::Date(too_late)).unwrap_err(),
            SchemaError::DateOutOfRange {
                field: Field::InvoiceDate,
                year: 10000,
            }
        );
        let negative = NaiveDate::from_ymd_opt(-5, 2, 3).unwrap();
        assert!(matches!(
            format_value(rule, &FieldValue::Date(negative)),
            Err(SchemaError::DateOutOfRange { year: -5, .. })
        ));
    }

    #[test]
    fn enum_accepts_equal_decimal_scale() {
        assert_eq!(
            enum_member(&VatMode::ALL, &FieldValue::Number(dec!(3.0))),
            Some(VatMode::NonTaxPayer)
        );
        assert_eq!(enum_member(&VatMode::ALL, &FieldValue::Number(dec!(2.5))), None);
        assert_eq!(enum_member(&VatMode::ALL, &FieldValue::from("3")), None);
    }

    #[test]
    fn type_error_carries_expected_and_actual() {
        let rule = Schema::eura().rule(Field::TotalAmount).unwrap();
        let err = format_value(rule, &FieldValue::from("800")).unwrap_err();
        assert_eq!(
            err,
            SchemaError::Type {
                field: Field::TotalAmount,
                expected: ValueKind::Number,
                actual: ValueKind::Text,
            }
        );
        assert_eq!(
            err.to_string(),
            "invalid type for total_amount: expected number, got string"
        );
    }
}
