//! e-URA QR payload serialization.
//!
//! Layout (one value per line, LF terminated):
//!
//! | Line | Content |
//! |------|---------|
//! | 1 | `www.e-URA.hr` header |
//! | 2 | document type, `01` for an invoice |
//! | 3-21 | the 19 schema fields in declaration order |
//! | 22 | constant `0.00` |
//! | 23 | empty (the payload ends with LF) |

use super::error::SchemaError;
use super::types::{FormattedRecord, InvoiceRecord};
use super::validation::validate_and_format;

/// First payload line (Zaglavlje).
pub const PAYLOAD_HEADER: &str = "www.e-URA.hr";

/// Document type code for an invoice (Vrsta dokumenta).
pub const DOCUMENT_TYPE_INVOICE: &str = "01";

/// Value after the last schema field. Not in the published layout, but
/// production scanners expect it.
pub const TRAILING_FIELD: &str = "0.00";

/// Lines in a payload split on LF, counting the empty one after the final LF.
pub const PAYLOAD_LINES: usize = 23;

/// Serialize a formatted record into the e-URA payload.
///
/// Field values are written verbatim. A text value containing LF will
/// shift the remaining lines.
pub fn compose(record: &FormattedRecord) -> String {
    let mut out = String::new();

    push_line(&mut out, PAYLOAD_HEADER);
    push_line(&mut out, DOCUMENT_TYPE_INVOICE);
    for (_, value) in record.iter() {
        push_line(&mut out, value);
    }
    push_line(&mut out, TRAILING_FIELD);

    out
}

/// Validate a raw record and serialize it.
pub fn format_qr_data(record: &InvoiceRecord) -> Result<String, SchemaError> {
    let formatted = validate_and_format(record)?;
    Ok(compose(&formatted))
}

fn push_line(out: &mut String, value: &str) {
    out.push_str(value);
    out.push('\n');
}
