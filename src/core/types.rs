use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::SchemaError;

/// A field of the e-URA QR record, in schema declaration order.
///
/// The declaration order is also the wire order of the payload, so the
/// derived `Ord` sorts fields the way they are serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Field {
    /// Naziv prodavatelja.
    #[serde(rename = "merchant_name")]
    MerchantName,
    /// OIB prodavatelja.
    #[serde(rename = "merchant_oib")]
    MerchantOib,
    /// IBAN prodavatelja.
    #[serde(rename = "merchant_iban")]
    MerchantIban,
    /// Poziv na broj.
    #[serde(rename = "reference_number")]
    ReferenceNumber,
    /// Obračun PDV-a, see [`VatMode`].
    #[serde(rename = "vat_mode")]
    VatMode,
    /// Naziv kupca.
    #[serde(rename = "buyer_name")]
    BuyerName,
    /// OIB kupca.
    #[serde(rename = "buyer_oib")]
    BuyerOib,
    /// Datum računa.
    #[serde(rename = "invoice_date")]
    InvoiceDate,
    /// Broj računa.
    #[serde(rename = "invoice_number")]
    InvoiceNumber,
    /// Datum dospijeća računa.
    #[serde(rename = "delivery_date")]
    DeliveryDate,
    /// Ukupan iznos računa.
    #[serde(rename = "total_amount")]
    TotalAmount,
    /// Osnovica za PDV 5%.
    #[serde(rename = "vat_base_5")]
    VatBase5,
    /// Osnovica za PDV 13%.
    #[serde(rename = "vat_base_13")]
    VatBase13,
    /// Osnovica za PDV 25%.
    #[serde(rename = "vat_base_25")]
    VatBase25,
    /// Iznos PDV-a po stopi 5%.
    #[serde(rename = "vat_amount_5")]
    VatAmount5,
    /// Iznos PDV-a po stopi 13%.
    #[serde(rename = "vat_amount_13")]
    VatAmount13,
    /// Iznos PDV-a po stopi 25%.
    #[serde(rename = "vat_amount_25")]
    VatAmount25,
    /// Ne podliježe PDV-u.
    #[serde(rename = "vat_na")]
    VatNa,
    /// Oslobođeno PDV-a.
    #[serde(rename = "vat_freed")]
    VatFreed,
}

impl Field {
    /// Number of schema fields.
    pub const COUNT: usize = 19;

    /// All fields in declaration (and wire) order.
    pub const ALL: [Field; Field::COUNT] = [
        Field::MerchantName,
        Field::MerchantOib,
        Field::MerchantIban,
        Field::ReferenceNumber,
        Field::VatMode,
        Field::BuyerName,
        Field::BuyerOib,
        Field::InvoiceDate,
        Field::InvoiceNumber,
        Field::DeliveryDate,
        Field::TotalAmount,
        Field::VatBase5,
        Field::VatBase13,
        Field::VatBase25,
        Field::VatAmount5,
        Field::VatAmount13,
        Field::VatAmount25,
        Field::VatNa,
        Field::VatFreed,
    ];

    /// The snake_case name used as record key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MerchantName => "merchant_name",
            Self::MerchantOib => "merchant_oib",
            Self::MerchantIban => "merchant_iban",
            Self::ReferenceNumber => "reference_number",
            Self::VatMode => "vat_mode",
            Self::BuyerName => "buyer_name",
            Self::BuyerOib => "buyer_oib",
            Self::InvoiceDate => "invoice_date",
            Self::InvoiceNumber => "invoice_number",
            Self::DeliveryDate => "delivery_date",
            Self::TotalAmount => "total_amount",
            Self::VatBase5 => "vat_base_5",
            Self::VatBase13 => "vat_base_13",
            Self::VatBase25 => "vat_base_25",
            Self::VatAmount5 => "vat_amount_5",
            Self::VatAmount13 => "vat_amount_13",
            Self::VatAmount25 => "vat_amount_25",
            Self::VatNa => "vat_na",
            Self::VatFreed => "vat_freed",
        }
    }

    /// Zero-based position in declaration order.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| SchemaError::UnknownField(s.to_string()))
    }
}

/// Basis on which VAT is accounted (Obračun PDV-a).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VatMode {
    /// Po fakturi: VAT due at invoicing.
    AtInvoice = 1,
    /// Po naplati: VAT due at payment.
    AtPayment = 2,
    /// Nije obveznik PDV-a: seller is not VAT registered.
    NonTaxPayer = 3,
}

impl VatMode {
    /// All modes, ordered by code.
    pub const ALL: [VatMode; 3] = [Self::AtInvoice, Self::AtPayment, Self::NonTaxPayer];

    /// Numeric code written to the payload.
    pub fn code(self) -> u8 {
        self as u8
    }

    /// Look up a mode by its numeric code.
    pub fn from_code(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.code() == code)
    }
}

/// Runtime kind of a [`FieldValue`], or the kind a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Number,
    Date,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "string",
            Self::Number => "number",
            Self::Date => "date",
        })
    }
}

/// An unformatted value supplied for a record field.
///
/// Serialized externally tagged, so JSON values are wrapped in their kind:
/// `{"text": "123123123"}`, `{"number": "800.00"}` (amounts as strings),
/// `{"date": "2016-02-03"}`. A VAT mode is a number, e.g.
/// `"vat_mode": {"number": "3"}`; bare JSON values like `"vat_mode": 3`
/// are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(Decimal),
    Date(NaiveDate),
}

impl FieldValue {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Text(_) => ValueKind::Text,
            Self::Number(_) => ValueKind::Number,
            Self::Date(_) => ValueKind::Date,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Date(d) => write!(f, "{d}"),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Decimal> for FieldValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<u32> for FieldValue {
    fn from(value: u32) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<VatMode> for FieldValue {
    fn from(value: VatMode) -> Self {
        Self::Number(Decimal::from(value.code()))
    }
}

impl From<NaiveDate> for FieldValue {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

impl From<NaiveDateTime> for FieldValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Date(value.date())
    }
}

/// Takes the calendar date in the timestamp's own offset.
impl<Tz: TimeZone> From<DateTime<Tz>> for FieldValue {
    fn from(value: DateTime<Tz>) -> Self {
        Self::Date(value.date_naive())
    }
}

/// Raw e-URA record: field values keyed by field.
///
/// Absent keys are either defaulted or rejected during validation,
/// depending on the field's rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InvoiceRecord {
    values: BTreeMap<Field, FieldValue>,
}

impl InvoiceRecord {
    /// An empty record with no fields set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value.
    pub fn set(&mut self, field: Field, value: impl Into<FieldValue>) -> &mut Self {
        self.values.insert(field, value.into());
        self
    }

    /// Set a field by its snake_case name.
    pub fn set_named(
        &mut self,
        name: &str,
        value: impl Into<FieldValue>,
    ) -> Result<&mut Self, SchemaError> {
        let field = name.parse::<Field>()?;
        Ok(self.set(field, value))
    }

    /// Consuming variant of [`set`](Self::set).
    pub fn with(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: Field) -> Option<&FieldValue> {
        self.values.get(&field)
    }

    pub fn remove(&mut self, field: Field) -> Option<FieldValue> {
        self.values.remove(&field)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.values.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Set fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &FieldValue)> {
        self.values.iter().map(|(field, value)| (*field, value))
    }
}

/// A fully validated record with every field in its final string form.
///
/// Only produced by validation; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedRecord {
    values: Vec<String>,
}

impl FormattedRecord {
    /// Values must be given in declaration order, one per field.
    pub(crate) fn from_ordered(values: Vec<String>) -> Self {
        debug_assert_eq!(values.len(), Field::COUNT);
        Self { values }
    }

    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    /// Formatted values in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .zip(self.values.iter().map(String::as_str))
    }
}
