//! The e-URA field schema.
//!
//! One [`FieldRule`] per [`Field`], declared once for the whole process and
//! shared read-only by every validation call.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;

use super::error::SchemaError;
use super::types::{Field, FieldValue, InvoiceRecord, VatMode};
use super::validation::{PAYLOAD_YEARS, format_amount, format_date};

/// Kind of a field together with its kind-specific data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldKind {
    /// Free text, passed through unchanged.
    Text { default: &'static str },
    /// Amount, formatted with two decimal places.
    Number { default: Decimal },
    /// Calendar date, formatted `DDMMYYYY`.
    Date { default: NaiveDate },
    /// Closed set of VAT modes, written as the numeric code.
    Enum {
        values: &'static [VatMode],
        default: VatMode,
    },
}

impl FieldKind {
    /// Tag name of the kind, as used in error messages.
    pub fn tag(&self) -> &'static str {
        match self {
            Self::Text { .. } => "string",
            Self::Number { .. } => "number",
            Self::Date { .. } => "date",
            Self::Enum { .. } => "enum",
        }
    }
}

/// Validation rule for a single field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    pub field: Field,
    /// Absence of a required field is a hard error.
    pub required: bool,
    pub kind: FieldKind,
}

impl FieldRule {
    fn text(field: Field, required: bool) -> Self {
        Self {
            field,
            required,
            kind: FieldKind::Text { default: "" },
        }
    }

    fn number(field: Field) -> Self {
        Self {
            field,
            required: true,
            kind: FieldKind::Number {
                default: Decimal::ZERO,
            },
        }
    }

    fn date(field: Field, required: bool) -> Self {
        Self {
            field,
            required,
            // NaiveDate's default is 1970-01-01.
            kind: FieldKind::Date {
                default: NaiveDate::default(),
            },
        }
    }

    /// The declared default as an unformatted value.
    pub fn default_value(&self) -> FieldValue {
        match &self.kind {
            FieldKind::Text { default } => FieldValue::from(*default),
            FieldKind::Number { default } => FieldValue::Number(*default),
            FieldKind::Date { default } => FieldValue::Date(*default),
            FieldKind::Enum { default, .. } => FieldValue::from(*default),
        }
    }

    /// The declared default in its final payload form.
    pub fn default_formatted(&self) -> String {
        match &self.kind {
            FieldKind::Text { default } => (*default).to_string(),
            FieldKind::Number { default } => format_amount(*default),
            FieldKind::Date { default } => format_date(*default),
            FieldKind::Enum { default, .. } => default.code().to_string(),
        }
    }
}

/// Ordered table of field rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    rules: Vec<FieldRule>,
}

static EURA_SCHEMA: LazyLock<Schema> = LazyLock::new(Schema::build_eura);

impl Schema {
    /// The e-URA schema, shared by the whole process.
    pub fn eura() -> &'static Schema {
        &EURA_SCHEMA
    }

    fn build_eura() -> Self {
        let rules = vec![
            FieldRule::text(Field::MerchantName, false),
            FieldRule::text(Field::MerchantOib, true),
            FieldRule::text(Field::MerchantIban, false),
            FieldRule::text(Field::ReferenceNumber, false),
            FieldRule {
                field: Field::VatMode,
                required: true,
                kind: FieldKind::Enum {
                    values: &VatMode::ALL,
                    default: VatMode::AtInvoice,
                },
            },
            FieldRule::text(Field::BuyerName, false),
            FieldRule::text(Field::BuyerOib, true),
            FieldRule::date(Field::InvoiceDate, true),
            FieldRule::text(Field::InvoiceNumber, true),
            FieldRule::date(Field::DeliveryDate, false),
            FieldRule::number(Field::TotalAmount),
            FieldRule::number(Field::VatBase5),
            FieldRule::number(Field::VatBase13),
            FieldRule::number(Field::VatBase25),
            FieldRule::number(Field::VatAmount5),
            FieldRule::number(Field::VatAmount13),
            FieldRule::number(Field::VatAmount25),
            FieldRule::number(Field::VatNa),
            FieldRule::number(Field::VatFreed),
        ];
        let schema = Self { rules };
        debug_assert!(schema.verify().is_ok());
        schema
    }

    /// Assemble a schema from explicit rules.
    ///
    /// The table is [`verify`](Self::verify)-ed here, so every `Schema`
    /// lays out its formatted values in declaration order.
    pub fn from_rules(rules: Vec<FieldRule>) -> Result<Self, SchemaError> {
        let schema = Self { rules };
        schema.verify()?;
        Ok(schema)
    }

    /// Check the table's self-consistency: one rule per field, in
    /// declaration order, date defaults with four-digit years, and every
    /// enum default inside its legal set.
    pub fn verify(&self) -> Result<(), SchemaError> {
        if self.rules.len() != Field::COUNT {
            let missing = Field::ALL
                .into_iter()
                .find(|field| self.rule(*field).is_none())
                .unwrap_or(Field::VatFreed);
            return Err(SchemaError::UnknownKind {
                field: missing,
                kind: format!("table has {} rules", self.rules.len()),
            });
        }

        for (rule, field) in self.rules.iter().zip(Field::ALL) {
            if rule.field != field {
                return Err(SchemaError::UnknownKind {
                    field,
                    kind: format!("rule for {} declared out of order", rule.field),
                });
            }
            match &rule.kind {
                FieldKind::Enum { values, default } if !values.contains(default) => {
                    return Err(SchemaError::UnknownKind {
                        field,
                        kind: format!("enum default {} outside legal set", default.code()),
                    });
                }
                FieldKind::Date { default } if !PAYLOAD_YEARS.contains(&default.year()) => {
                    return Err(SchemaError::UnknownKind {
                        field,
                        kind: format!("date default {default} outside payload years"),
                    });
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Rules in declaration order.
    pub fn rules(&self) -> &[FieldRule] {
        &self.rules
    }

    pub fn rule(&self, field: Field) -> Option<&FieldRule> {
        self.rules.iter().find(|rule| rule.field == field)
    }

    /// Look up a rule by snake_case field name.
    pub fn rule_by_name(&self, name: &str) -> Result<&FieldRule, SchemaError> {
        let field = name.parse::<Field>()?;
        self.rule(field)
            .ok_or_else(|| SchemaError::UnknownField(name.to_string()))
    }

    /// Fields that must be present in every record.
    pub fn required_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules
            .iter()
            .filter(|rule| rule.required)
            .map(|rule| rule.field)
    }

    /// Fields that fall back to their default when absent.
    pub fn optional_fields(&self) -> impl Iterator<Item = Field> + '_ {
        self.rules
            .iter()
            .filter(|rule| !rule.required)
            .map(|rule| rule.field)
    }

    /// A record with every field set to its declared default.
    ///
    /// Handy as a base for partial overrides. Not validated.
    pub fn default_record(&self) -> InvoiceRecord {
        let mut record = InvoiceRecord::new();
        for rule in &self.rules {
            record.set(rule.field, rule.default_value());
        }
        record
    }
}

/// A record holding every e-URA default, see [`Schema::default_record`].
pub fn default_record() -> InvoiceRecord {
    Schema::eura().default_record()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eura_schema_is_consistent() {
        assert!(Schema::eura().verify().is_ok());
        assert_eq!(Schema::eura().rules().len(), Field::COUNT);
    }

    #[test]
    fn five_optional_fields() {
        let optional: Vec<_> = Schema::eura().optional_fields().collect();
        assert_eq!(
            optional,
            vec![
                Field::MerchantName,
                Field::MerchantIban,
                Field::ReferenceNumber,
                Field::BuyerName,
                Field::DeliveryDate,
            ]
        );
        assert_eq!(Schema::eura().required_fields().count(), 14);
    }

    #[test]
    fn default_placeholders() {
        let schema = Schema::eura();
        let date = schema.rule(Field::InvoiceDate).unwrap();
        assert_eq!(date.default_formatted(), "01011970");
        let amount = schema.rule(Field::VatFreed).unwrap();
        assert_eq!(amount.default_formatted(), "0.00");
        let mode = schema.rule(Field::VatMode).unwrap();
        assert_eq!(mode.default_formatted(), "1");
        let name = schema.rule(Field::MerchantName).unwrap();
        assert_eq!(name.default_formatted(), "");
    }

    #[test]
    fn lookup_by_name() {
        let rule = Schema::eura().rule_by_name("vat_base_13").unwrap();
        assert_eq!(rule.field, Field::VatBase13);
        assert_eq!(rule.kind.tag(), "number");
        assert!(matches!(
            Schema::eura().rule_by_name("vat_exempt"),
            Err(SchemaError::UnknownField(name)) if name == "vat_exempt"
        ));
    }

    #[test]
    fn verify_rejects_enum_default_outside_set() {
        let mut rules = Schema::eura().rules().to_vec();
        rules[Field::VatMode.index()].kind = FieldKind::Enum {
            values: &[VatMode::AtPayment],
            default: VatMode::AtInvoice,
        };
        let err = Schema::from_rules(rules).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnknownKind { field: Field::VatMode, .. }
        ));
    }

    #[test]
    fn verify_rejects_missing_rule() {
        let mut rules = Schema::eura().rules().to_vec();
        rules.remove(Field::BuyerOib.index());
        let err = Schema::from_rules(rules).unwrap_err();
        assert_eq!(err.field(), Some(Field::BuyerOib));
    }

    #[test]
    fn from_rules_rejects_swapped_rules() {
        let mut rules = Schema::eura().rules().to_vec();
        rules.swap(0, 1);
        let err = Schema::from_rules(rules).unwrap_err();
        assert!(matches!(
            err,
            SchemaError::UnknownKind { field: Field::MerchantName, .. }
        ));
    }

    #[test]
    fn from_rules_rejects_extra_rule() {
        let mut rules = Schema::eura().rules().to_vec();
        rules.push(rules[0].clone());
        assert!(matches!(
            Schema::from_rules(rules),
            Err(SchemaError::UnknownKind { .. })
        ));
    }

    #[test]
    fn from_rules_rejects_five_digit_date_default() {
        let mut rules = Schema::eura().rules().to_vec();
        rules[Field::DeliveryDate.index()].kind = FieldKind::Date {
            default: NaiveDate::from_ymd_opt(10000, 1, 1).unwrap(),
        };
        let err = Schema::from_rules(rules).unwrap_err();
        assert_eq!(err.field(), Some(Field::DeliveryDate));
    }

    #[test]
    fn from_rules_accepts_eura_table() {
        let schema = Schema::from_rules(Schema::eura().rules().to_vec()).unwrap();
        assert_eq!(&schema, Schema::eura());
    }

    #[test]
    fn default_record_covers_every_field() {
        let record = default_record();
        assert_eq!(record.len(), Field::COUNT);
        assert_eq!(
            record.get(Field::DeliveryDate),
            Some(&FieldValue::Date(NaiveDate::from_ymd_opt(1970, 1, 1).unwrap()))
        );
        assert_eq!(
            record.get(Field::VatMode),
            Some(&FieldValue::Number(Decimal::ONE))
        );
    }
}
