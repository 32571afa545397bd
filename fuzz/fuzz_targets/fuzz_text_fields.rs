#![no_main]

use eura_qr::core::*;
use eura_qr::qr::{QrImageConfig, qr_image_url};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let record = InvoiceRecordBuilder::from_record(default_record())
            .merchant_name(s)
            .buyer_name(s)
            .invoice_number(s)
            .build();
        // Text passes through verbatim; neither step may panic.
        let payload = format_qr_data(&record).expect("defaults are valid");
        if !s.contains('\n') {
            assert_eq!(payload.split('\n').count(), PAYLOAD_LINES);
        }
        let _ = qr_image_url(&payload, &QrImageConfig::default());
    }
});
