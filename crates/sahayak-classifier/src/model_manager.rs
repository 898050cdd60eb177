// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model download manager for first-run ONNX embedding model setup.
//!
//! Downloads the all-MiniLM-L6-v2 INT8 quantized model from HuggingFace on
//! first run and caches it in the data directory. Custom models are never
//! downloaded; their files must already be present in the model directory.

use std::path::{Path, PathBuf};

use tracing::info;

use sahayak_core::error::SahayakError;

/// The model the downloader knows how to fetch.
pub const DEFAULT_MODEL_NAME: &str = "all-MiniLM-L6-v2";

/// URLs for default model files on HuggingFace.
const MODEL_URL: &str =
    "https://huggingface.co/onnx-community/all-MiniLM-L6-v2-ONNX/resolve/main/onnx/model_quantized.onnx";
const TOKENIZER_URL: &str =
    "https://huggingface.co/sentence-transformers/all-MiniLM-L6-v2/resolve/main/tokenizer.json";

/// Manages ONNX model download and path resolution.
pub struct ModelManager {
    data_dir: PathBuf,
    model_name: String,
}

impl ModelManager {
    /// Creates a new ModelManager rooted at the given data directory.
    pub fn new(data_dir: PathBuf, model_name: impl Into<String>) -> Self {
        Self {
            data_dir,
            model_name: model_name.into(),
        }
    }

    /// Returns the directory where model files are stored.
    pub fn model_dir(&self) -> PathBuf {
        self.data_dir.join("models").join(&self.model_name)
    }

    /// Returns the path to the ONNX model file.
    pub fn model_path(&self) -> PathBuf {
        self.model_dir().join("model.onnx")
    }

    /// Returns the path to the tokenizer.json file.
    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir().join("tokenizer.json")
    }

    /// Returns true if both model and tokenizer files exist.
    pub fn is_model_available(&self) -> bool {
        self.model_path().exists() && self.tokenizer_path().exists()
    }

    /// Ensures the model is downloaded and available.
    ///
    /// Downloads the default model from HuggingFace on first run; subsequent
    /// calls are no-ops. Non-default models must be provisioned manually.
    pub async fn ensure_model(&self) -> Result<PathBuf, SahayakError> {
        if self.is_model_available() {
            return Ok(self.model_path());
        }

        if self.model_name != DEFAULT_MODEL_NAME {
            return Err(SahayakError::Model(format!(
                "model files for `{}` not found; place model.onnx and tokenizer.json in {}",
                self.model_name,
                self.model_dir().display()
            )));
        }

        info!("embedding model not found, downloading from HuggingFace...");

        let model_dir = self.model_dir();
        tokio::fs::create_dir_all(&model_dir)
            .await
            .map_err(|e| SahayakError::Model(format!("failed to create model directory: {e}")))?;

        let files = [("model.onnx", MODEL_URL), ("tokenizer.json", TOKENIZER_URL)];

        for (filename, url) in &files {
            let dest = model_dir.join(filename);
            if dest.exists() {
                continue;
            }

            info!("downloading {filename}...");
            match download_file(url, &dest).await {
                Ok(size) => {
                    info!("downloaded {filename} ({size} bytes)");
                }
                Err(e) => {
                    // Clean up partial download
                    let _ = tokio::fs::remove_file(&dest).await;
                    return Err(e);
                }
            }
        }

        info!("embedding model ready at: {}", model_dir.display());
        Ok(self.model_path())
    }
}

/// Download a file from a URL to a local path.
async fn download_file(url: &str, dest: &Path) -> Result<usize, SahayakError> {
    let response = reqwest::get(url)
        .await
        .map_err(|e| SahayakError::Model(format!("failed to download {url}: {e}")))?;

    if !response.status().is_success() {
        return Err(SahayakError::Model(format!(
            "download failed with status {}: {url}",
            response.status()
        )));
    }

    let bytes = response
        .bytes()
        .await
        .map_err(|e| SahayakError::Model(format!("failed to read response body from {url}: {e}")))?;

    let size = bytes.len();
    tokio::fs::write(dest, &bytes)
        .await
        .map_err(|e| SahayakError::Model(format!("failed to write {}: {e}", dest.display())))?;

    Ok(size)
}
