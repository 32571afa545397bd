//! QR image URLs for e-URA payloads.
//!
//! The QR bit matrix is rendered by an external chart service; this module
//! only builds the request URL.
//!
//! # Example
//!
//! ```
//! use eura_qr::core::*;
//! use eura_qr::qr::*;
//!
//! let url = generate_qr_image_url(&default_record(), &QrImageConfig::default()).unwrap();
//! assert!(url.starts_with("https://chart.googleapis.com/chart?cht=qr"));
//! ```

mod image_url;

pub use image_url::{
    DEFAULT_ENDPOINT, ErrorCorrection, QrImageConfig, QrImageConfigBuilder, QrUrlError,
    generate_qr_image_url, qr_image_url,
};
