//! # Application State
//!
//! The shared state holds the configuration and the OCR engine handle. The
//! engine is resolved exactly once, at startup; afterwards it is read-only and
//! shared across all in-flight requests.

use crate::config::AppConfig;
use labelcheck::OcrEngine;
use std::{path::Path, sync::Arc, time::Duration};

/// The shared application state, accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub ocr_engine: Arc<OcrEngine>,
}

/// Builds the shared application state from the configuration.
///
/// Capability resolution happens here and nowhere else: the preferred
/// Tesseract location from the config is checked first, then the `PATH`.
pub fn build_app_state(config: AppConfig) -> AppState {
    let ocr_engine = OcrEngine::resolve(
        Path::new(&config.tesseract_cmd),
        Duration::from_secs(config.ocr_timeout_secs),
    );

    AppState {
        config: Arc::new(config),
        ocr_engine: Arc::new(ocr_engine),
    }
}
