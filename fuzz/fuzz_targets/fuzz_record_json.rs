#![no_main]

use eura_qr::core::{InvoiceRecord, format_qr_data};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Must not panic — errors are fine, panics are bugs.
    if let Ok(record) = serde_json::from_slice::<InvoiceRecord>(data) {
        let _ = format_qr_data(&record);
    }
});
