use chrono::Local;
use eura_qr::core::*;
use eura_qr::qr::*;
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")))
        .init();

    let today = Local::now().date_naive();

    // Seller not in the VAT system, whole amount exempt
    let record = InvoiceRecordBuilder::new()
        .merchant_name("Prodavac j.d.o.o.")
        .merchant_oib("123123123")
        .merchant_iban("HR5XXXXXXXXXXXXXXXXXXX")
        .reference_number("1-4-10")
        .vat_mode(VatMode::NonTaxPayer)
        .buyer_name("Kupac d.o.o.")
        .buyer_oib("2424242423")
        .invoice_date(today)
        .invoice_number("4/1/1")
        .delivery_date(today)
        .total_amount(dec!(800.0))
        .vat_freed(dec!(800.0))
        .zero_vat_breakdown()
        .build();

    match format_qr_data(&record) {
        Ok(payload) => {
            println!("=== Payload ===");
            print!("{payload}");
        }
        Err(e) => {
            println!("Rejected: {e}");
            return;
        }
    }

    let config = QrImageConfigBuilder::new().size(400, 400).build();
    match generate_qr_image_url(&record, &config) {
        Ok(url) => println!("\n=== QR image ===\n{url}"),
        Err(e) => println!("URL failed: {e}"),
    }

    // Missing buyer OIB is rejected before anything is serialized
    let mut incomplete = record.clone();
    incomplete.remove(Field::BuyerOib);
    if let Err(e) = format_qr_data(&incomplete) {
        println!("\n=== Validation error ===\n{e}");
    }
}
