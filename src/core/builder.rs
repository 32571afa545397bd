use chrono::NaiveDate;
use rust_decimal::Decimal;

use super::error::SchemaError;
use super::payload::format_qr_data;
use super::types::{Field, FieldValue, InvoiceRecord, VatMode};

/// Builder for e-URA invoice records.
///
/// ```
/// use eura_qr::core::*;
/// use rust_decimal_macros::dec;
/// use chrono::NaiveDate;
///
/// let payload = InvoiceRecordBuilder::new()
///     .merchant_oib("123123123")
///     .buyer_oib("2424242423")
///     .vat_mode(VatMode::NonTaxPayer)
///     .invoice_date(NaiveDate::from_ymd_opt(2016, 2, 10).unwrap())
///     .invoice_number("4/1/1")
///     .total_amount(dec!(800))
///     .vat_freed(dec!(800))
///     .zero_vat_breakdown()
///     .format()
///     .unwrap();
///
/// assert!(payload.starts_with("www.e-URA.hr\n01\n"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InvoiceRecordBuilder {
    record: InvoiceRecord,
}

impl InvoiceRecordBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing record, e.g. [`default_record`](super::default_record).
    pub fn from_record(record: InvoiceRecord) -> Self {
        Self { record }
    }

    /// Set any field to a raw value.
    pub fn field(mut self, field: Field, value: impl Into<FieldValue>) -> Self {
        self.record.set(field, value);
        self
    }

    pub fn merchant_name(self, name: impl Into<String>) -> Self {
        self.field(Field::MerchantName, name.into())
    }

    pub fn merchant_oib(self, oib: impl Into<String>) -> Self {
        self.field(Field::MerchantOib, oib.into())
    }

    pub fn merchant_iban(self, iban: impl Into<String>) -> Self {
        self.field(Field::MerchantIban, iban.into())
    }

    pub fn reference_number(self, reference: impl Into<String>) -> Self {
        self.field(Field::ReferenceNumber, reference.into())
    }

    pub fn vat_mode(self, mode: VatMode) -> Self {
        self.field(Field::VatMode, mode)
    }

    pub fn buyer_name(self, name: impl Into<String>) -> Self {
        self.field(Field::BuyerName, name.into())
    }

    pub fn buyer_oib(self, oib: impl Into<String>) -> Self {
        self.field(Field::BuyerOib, oib.into())
    }

    pub fn invoice_date(self, date: NaiveDate) -> Self {
        self.field(Field::InvoiceDate, date)
    }

    pub fn invoice_number(self, number: impl Into<String>) -> Self {
        self.field(Field::InvoiceNumber, number.into())
    }

    pub fn delivery_date(self, date: NaiveDate) -> Self {
        self.field(Field::DeliveryDate, date)
    }

    pub fn total_amount(self, amount: Decimal) -> Self {
        self.field(Field::TotalAmount, amount)
    }

    pub fn vat_base_5(self, amount: Decimal) -> Self {
        self.field(Field::VatBase5, amount)
    }

    pub fn vat_base_13(self, amount: Decimal) -> Self {
        self.field(Field::VatBase13, amount)
    }

    pub fn vat_base_25(self, amount: Decimal) -> Self {
        self.field(Field::VatBase25, amount)
    }

    pub fn vat_amount_5(self, amount: Decimal) -> Self {
        self.field(Field::VatAmount5, amount)
    }

    pub fn vat_amount_13(self, amount: Decimal) -> Self {
        self.field(Field::VatAmount13, amount)
    }

    pub fn vat_amount_25(self, amount: Decimal) -> Self {
        self.field(Field::VatAmount25, amount)
    }

    pub fn vat_na(self, amount: Decimal) -> Self {
        self.field(Field::VatNa, amount)
    }

    pub fn vat_freed(self, amount: Decimal) -> Self {
        self.field(Field::VatFreed, amount)
    }

    /// Set every VAT base and amount field not yet present to zero.
    pub fn zero_vat_breakdown(mut self) -> Self {
        for field in [
            Field::VatBase5,
            Field::VatBase13,
            Field::VatBase25,
            Field::VatAmount5,
            Field::VatAmount13,
            Field::VatAmount25,
            Field::VatNa,
            Field::VatFreed,
        ] {
            if !self.record.contains(field) {
                self.record.set(field, Decimal::ZERO);
            }
        }
        self
    }

    /// The record as built, without validation.
    pub fn build(self) -> InvoiceRecord {
        self.record
    }

    /// Validate and serialize the record into an e-URA payload.
    pub fn format(self) -> Result<String, SchemaError> {
        format_qr_data(&self.record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn zero_breakdown_keeps_explicit_values() {
        let record = InvoiceRecordBuilder::new()
            .vat_freed(dec!(800))
            .zero_vat_breakdown()
            .build();
        assert_eq!(record.get(Field::VatFreed), Some(&FieldValue::Number(dec!(800))));
        assert_eq!(record.get(Field::VatNa), Some(&FieldValue::Number(dec!(0))));
        assert!(!record.contains(Field::TotalAmount));
    }

    #[test]
    fn vat_mode_stored_as_code() {
        let record = InvoiceRecordBuilder::new().vat_mode(VatMode::AtPayment).build();
        assert_eq!(record.get(Field::VatMode), Some(&FieldValue::Number(dec!(2))));
    }
}
