//! # eura-qr
//!
//! Croatian e-URA invoice QR payloads: schema validation, fixed-field
//! serialization, and URLs for rendering the payload as a QR image.
//!
//! All amounts use [`rust_decimal::Decimal`], never floating point.
//! The payload layout follows the e-URA data structure published at
//! <http://www.e-ura.hr/>.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::NaiveDate;
//! use eura_qr::core::*;
//! use rust_decimal_macros::dec;
//!
//! let record = InvoiceRecordBuilder::new()
//!     .merchant_name("Prodavac j.d.o.o.")
//!     .merchant_oib("123123123")
//!     .buyer_oib("2424242423")
//!     .vat_mode(VatMode::NonTaxPayer)
//!     .invoice_date(NaiveDate::from_ymd_opt(2016, 2, 10).unwrap())
//!     .invoice_number("4/1/1")
//!     .total_amount(dec!(800))
//!     .vat_freed(dec!(800))
//!     .zero_vat_breakdown()
//!     .build();
//!
//! let formatted = validate_and_format(&record).unwrap();
//! assert_eq!(formatted.get(Field::TotalAmount), "800.00");
//!
//! let payload = compose(&formatted);
//! assert_eq!(payload.split('\n').count(), PAYLOAD_LINES);
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `core` (default) | Schema, validation, payload serialization |
//! | `qr` | QR image URLs for an external rendering service |
//! | `all` | Everything |

#[cfg(feature = "core")]
pub mod core;

#[cfg(feature = "qr")]
pub mod qr;

// Re-export core types at crate root for convenience
#[cfg(feature = "core")]
pub use crate::core::*;
