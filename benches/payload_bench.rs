use chrono::NaiveDate;
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use rust_decimal_macros::dec;

use eura_qr::core::*;

fn bench_record() -> InvoiceRecord {
    InvoiceRecordBuilder::new()
        .merchant_name("Benchmark j.d.o.o.")
        .merchant_oib("123123123")
        .merchant_iban("HR1210010051863000160")
        .reference_number("1-4-10")
        .vat_mode(VatMode::AtInvoice)
        .buyer_name("Kupac d.o.o.")
        .buyer_oib("2424242423")
        .invoice_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap())
        .invoice_number("17/1/1")
        .delivery_date(NaiveDate::from_ymd_opt(2024, 7, 15).unwrap())
        .total_amount(dec!(1250.00))
        .vat_base_25(dec!(1000.00))
        .vat_amount_25(dec!(250.00))
        .zero_vat_breakdown()
        .build()
}

fn bench_validate(c: &mut Criterion) {
    let record = bench_record();
    c.bench_function("validate_and_format", |b| {
        b.iter(|| validate_and_format(black_box(&record)).unwrap())
    });
}

fn bench_compose(c: &mut Criterion) {
    let formatted = validate_and_format(&bench_record()).unwrap();
    c.bench_function("compose", |b| b.iter(|| compose(black_box(&formatted))));
}

fn bench_pipeline(c: &mut Criterion) {
    let record = bench_record();
    c.bench_function("format_qr_data", |b| {
        b.iter(|| format_qr_data(black_box(&record)).unwrap())
    });
}

criterion_group!(benches, bench_validate, bench_compose, bench_pipeline);
criterion_main!(benches);
