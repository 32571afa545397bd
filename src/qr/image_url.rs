//! QR image URLs for an external chart-rendering service.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::core::{InvoiceRecord, SchemaError, format_qr_data};

/// Google Chart API endpoint accepting `cht=qr` requests.
pub const DEFAULT_ENDPOINT: &str = "https://chart.googleapis.com/chart";

/// QR error-correction level (`chld` parameter).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCorrection {
    /// ~7% recovery.
    L,
    /// ~15% recovery.
    #[default]
    M,
    /// ~25% recovery.
    Q,
    /// ~30% recovery.
    H,
}

impl ErrorCorrection {
    pub fn code(&self) -> &'static str {
        match self {
            Self::L => "L",
            Self::M => "M",
            Self::Q => "Q",
            Self::H => "H",
        }
    }
}

impl fmt::Display for ErrorCorrection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Errors while building a QR image URL.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QrUrlError {
    /// The record failed e-URA validation.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The configured endpoint is not an absolute URL.
    #[error("invalid QR endpoint {endpoint:?}: {source}")]
    Endpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// Width or height is zero.
    #[error("invalid QR image size {width}x{height}")]
    Size { width: u32, height: u32 },
}

/// Rendering parameters for the QR image service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrImageConfig {
    /// Base URL of the rendering service.
    pub endpoint: String,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    pub error_correction: ErrorCorrection,
}

impl Default for QrImageConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.into(),
            width: 300,
            height: 300,
            error_correction: ErrorCorrection::M,
        }
    }
}

/// Builder for [`QrImageConfig`].
///
/// # Example
///
/// ```
/// use eura_qr::qr::{ErrorCorrection, QrImageConfigBuilder};
///
/// let config = QrImageConfigBuilder::new()
///     .size(400, 400)
///     .error_correction(ErrorCorrection::H)
///     .build();
/// assert_eq!(config.width, 400);
/// ```
#[derive(Debug, Clone, Default)]
pub struct QrImageConfigBuilder {
    config: QrImageConfig,
}

impl QrImageConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different rendering service.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.config.endpoint = endpoint.into();
        self
    }

    /// Set image width and height in pixels.
    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.config.width = width;
        self.config.height = height;
        self
    }

    pub fn error_correction(mut self, level: ErrorCorrection) -> Self {
        self.config.error_correction = level;
        self
    }

    pub fn build(self) -> QrImageConfig {
        self.config
    }
}

/// Build the rendering-service URL that encodes `text` as a QR image.
///
/// Pure string construction; nothing is fetched.
pub fn qr_image_url(text: &str, config: &QrImageConfig) -> Result<String, QrUrlError> {
    if config.width == 0 || config.height == 0 {
        return Err(QrUrlError::Size {
            width: config.width,
            height: config.height,
        });
    }

    let mut url = Url::parse(&config.endpoint).map_err(|source| QrUrlError::Endpoint {
        endpoint: config.endpoint.clone(),
        source,
    })?;

    url.query_pairs_mut()
        .append_pair("cht", "qr")
        .append_pair("choe", "UTF-8")
        .append_pair("chld", config.error_correction.code())
        .append_pair("chs", &format!("{}x{}", config.width, config.height))
        .append_pair("chl", text);

    tracing::debug!(
        endpoint = %config.endpoint,
        width = config.width,
        height = config.height,
        ecl = %config.error_correction,
        text_len = text.len(),
        "built QR image URL"
    );

    Ok(url.into())
}

/// Validate and serialize `record`, then build its QR image URL.
pub fn generate_qr_image_url(
    record: &InvoiceRecord,
    config: &QrImageConfig,
) -> Result<String, QrUrlError> {
    let payload = format_qr_data(record).inspect_err(|e| {
        tracing::debug!(error = %e, "e-URA record rejected");
    })?;
    qr_image_url(&payload, config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = QrImageConfig::default();
        assert_eq!(config.width, 300);
        assert_eq!(config.height, 300);
        assert_eq!(config.error_correction, ErrorCorrection::M);
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn query_parameters_in_order() {
        let url = qr_image_url("abc", &QrImageConfig::default()).unwrap();
        assert_eq!(
            url,
            "https://chart.googleapis.com/chart?cht=qr&choe=UTF-8&chld=M&chs=300x300&chl=abc"
        );
    }

    #[test]
    fn text_is_form_encoded() {
        let url = qr_image_url("a b\n/1", &QrImageConfig::default()).unwrap();
        assert!(url.ends_with("&chl=a+b%0A%2F1"));
    }

    #[test]
    fn zero_size_rejected() {
        let config = QrImageConfigBuilder::new().size(0, 300).build();
        assert!(matches!(
            qr_image_url("x", &config),
            Err(QrUrlError::Size { width: 0, height: 300 })
        ));
    }

    #[test]
    fn relative_endpoint_rejected() {
        let config = QrImageConfigBuilder::new().endpoint("/chart").build();
        let err = qr_image_url("x", &config).unwrap_err();
        assert!(err.to_string().starts_with("invalid QR endpoint \"/chart\""));
    }
}
