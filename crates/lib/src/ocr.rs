//! The OCR engine port.
//!
//! OCR is performed by the external `tesseract` executable, located once at
//! startup and invoked with the image piped over stdin. Every failure along
//! the way (missing decoder, missing executable, undecodable bytes, runtime
//! or timeout errors) degrades into a diagnostic string on the outcome; this
//! module never fails a request.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{info, warn};

/// Messages for the capability-absence layers of the extraction policy.
pub const NO_IMAGE_BYTES: &str = "no image bytes";
pub const DECODER_UNAVAILABLE: &str = "image decoder not available in runtime";
pub const ENGINE_UNAVAILABLE: &str = "tesseract not available in runtime";

/// The result of an OCR attempt. Exactly one side is meaningfully populated:
/// a successful extraction carries text and an empty error, a failed one
/// carries empty text and a diagnostic.
#[derive(Debug, Clone, PartialEq)]
pub struct OcrOutcome {
    pub text: String,
    pub error: String,
}

impl OcrOutcome {
    fn success(text: String) -> Self {
        Self {
            text,
            error: String::new(),
        }
    }

    fn failure(error: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            error: error.into(),
        }
    }
}

/// Handle to the external Tesseract executable.
///
/// Resolved once at startup and shared read-only across requests; see
/// [`OcrEngine::resolve`].
#[derive(Debug, Clone)]
pub struct OcrEngine {
    tesseract_cmd: Option<PathBuf>,
    timeout: Duration,
}

impl OcrEngine {
    /// Locates the Tesseract executable, preferring the configured location
    /// (a layer-style install such as `/opt/bin/tesseract`) before falling
    /// back to a `PATH` search. An engine resolved without an executable is
    /// still usable: every extraction reports [`ENGINE_UNAVAILABLE`].
    pub fn resolve(preferred: &Path, timeout: Duration) -> Self {
        let tesseract_cmd = if preferred.is_file() {
            Some(preferred.to_path_buf())
        } else {
            find_in_path("tesseract")
        };

        match &tesseract_cmd {
            Some(cmd) => info!("Resolved tesseract executable at {}", cmd.display()),
            None => warn!("No tesseract executable found; OCR extraction is degraded"),
        }

        Self {
            tesseract_cmd,
            timeout,
        }
    }

    /// An engine with no executable. Used by tests and by builds that opt out
    /// of OCR entirely.
    pub fn unavailable() -> Self {
        Self {
            tesseract_cmd: None,
            timeout: Duration::from_secs(5),
        }
    }

    pub fn is_available(&self) -> bool {
        self.tesseract_cmd.is_some()
    }

    /// The resolved executable path, if any.
    pub fn command_path(&self) -> Option<&Path> {
        self.tesseract_cmd.as_deref()
    }

    /// Attempts OCR extraction on raw image bytes.
    ///
    /// The policy layers are checked in order and each produces a distinct
    /// diagnostic: empty input, absent decoder, absent executable, bytes that
    /// do not decode as an image, and finally runtime failure of the
    /// executable itself.
    pub async fn extract_text(&self, image_bytes: &[u8]) -> OcrOutcome {
        if image_bytes.is_empty() {
            return OcrOutcome::failure(NO_IMAGE_BYTES);
        }
        if !cfg!(feature = "image-decoder") {
            return OcrOutcome::failure(DECODER_UNAVAILABLE);
        }
        let Some(cmd) = self.tesseract_cmd.clone() else {
            return OcrOutcome::failure(ENGINE_UNAVAILABLE);
        };

        self.decode_and_run(&cmd, image_bytes).await
    }

    #[cfg(feature = "image-decoder")]
    async fn decode_and_run(&self, cmd: &Path, image_bytes: &[u8]) -> OcrOutcome {
        let img = match image::load_from_memory(image_bytes) {
            Ok(img) => img,
            Err(e) => return OcrOutcome::failure(format!("failed to open image: {e}")),
        };

        match self.run_tesseract(cmd, img).await {
            Ok(text) => OcrOutcome::success(text),
            Err(e) => OcrOutcome::failure(e),
        }
    }

    // Unreachable without the decoder feature; extract_text bails out first.
    #[cfg(not(feature = "image-decoder"))]
    async fn decode_and_run(&self, _cmd: &Path, _image_bytes: &[u8]) -> OcrOutcome {
        OcrOutcome::failure(DECODER_UNAVAILABLE)
    }

    /// Runs `tesseract --version` bounded by the engine timeout and returns
    /// the first line of its output. Used by the diagnostics path.
    pub async fn version_line(&self) -> Result<String, String> {
        let Some(cmd) = &self.tesseract_cmd else {
            return Err(ENGINE_UNAVAILABLE.to_string());
        };

        let output = tokio::time::timeout(
            self.timeout,
            tokio::process::Command::new(cmd)
                .arg("--version")
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| format!("tesseract --version timed out after {:?}", self.timeout))?
        .map_err(|e| e.to_string())?;

        // Older Tesseract builds print the version banner to stderr.
        let banner = if output.stdout.is_empty() {
            &output.stderr
        } else {
            &output.stdout
        };
        Ok(String::from_utf8_lossy(banner)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string())
    }

    /// Feeds the decoded image to Tesseract as PNG over stdin and collects
    /// the extracted text from stdout.
    #[cfg(feature = "image-decoder")]
    async fn run_tesseract(
        &self,
        cmd: &Path,
        img: image::DynamicImage,
    ) -> Result<String, String> {
        use tokio::io::AsyncWriteExt;

        let mut png = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| e.to_string())?;

        let mut child = tokio::process::Command::new(cmd)
            .arg("stdin")
            .arg("stdout")
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| e.to_string())?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(&png).await.map_err(|e| e.to_string())?;
            // Dropping stdin closes the pipe so tesseract sees EOF.
        }

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| format!("tesseract timed out after {:?}", self.timeout))?
            .map_err(|e| e.to_string())?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stderr = stderr.trim();
            return Err(if stderr.is_empty() {
                format!("tesseract exited with {}", output.status)
            } else {
                stderr.to_string()
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// Searches the `PATH` environment variable for an executable, the way a
/// shell would.
fn find_in_path(name: &str) -> Option<PathBuf> {
    let path_var = std::env::var_os("PATH")?;
    std::env::split_paths(&path_var)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}
