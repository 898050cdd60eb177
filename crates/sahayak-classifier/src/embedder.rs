// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! ONNX embedding provider for local inference using all-MiniLM-L6-v2.
//!
//! Produces 384-dimensional sentence embeddings on CPU with zero external
//! API calls. Vectors come back un-normalized; the catalogs and the
//! orchestrator normalize immediately before any similarity comparison.

use std::path::Path;
use std::sync::Mutex;

use ndarray::Array2;
use ort::session::Session;
use ort::session::builder::GraphOptimizationLevel;
use ort::value::TensorRef;

use sahayak_core::embedding::TextEmbedder;
use sahayak_core::error::SahayakError;

/// Embedding dimensions for all-MiniLM-L6-v2.
pub const EMBEDDING_DIM: usize = 384;

fn embed_err(message: impl Into<String>) -> SahayakError {
    SahayakError::Embedding {
        message: message.into(),
        source: None,
    }
}

/// ONNX-based embedding provider.
///
/// Loads the quantized INT8 ONNX model and tokenizer from disk. All
/// inference runs on CPU with a single intra-op thread; the session is
/// serialized behind a `Mutex`, so concurrent classification calls queue
/// on the embedding step only.
pub struct OnnxEmbedder {
    /// ONNX Runtime session (not Send, wrapped in Mutex for safety).
    session: Mutex<Session>,
    /// HuggingFace tokenizer.
    tokenizer: tokenizers::Tokenizer,
}

// Safety: Session is accessed through Mutex which provides synchronization.
// The tokenizer is thread-safe for encoding operations.
unsafe impl Send for OnnxEmbedder {}
unsafe impl Sync for OnnxEmbedder {}

impl OnnxEmbedder {
    /// Creates a new ONNX embedder from model files on disk.
    ///
    /// Expects `tokenizer.json` next to the provided `model.onnx` path.
    /// Any load failure is fatal for the classifier as a whole.
    pub fn new(model_path: &Path) -> Result<Self, SahayakError> {
        let model_dir = model_path
            .parent()
            .ok_or_else(|| SahayakError::Model(format!(
                "invalid model path: {}",
                model_path.display()
            )))?;

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = tokenizers::Tokenizer::from_file(&tokenizer_path).map_err(|e| {
            SahayakError::Model(format!(
                "failed to load tokenizer from {}: {e}",
                tokenizer_path.display()
            ))
        })?;

        let session = Session::builder()
            .map_err(|e| SahayakError::Model(format!("failed to create ONNX session builder: {e}")))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| SahayakError::Model(format!("failed to set optimization level: {e}")))?
            .with_intra_threads(1)
            .map_err(|e| SahayakError::Model(format!("failed to set thread count: {e}")))?
            .commit_from_file(model_path)
            .map_err(|e| {
                SahayakError::Model(format!(
                    "failed to load ONNX model from {}: {e}",
                    model_path.display()
                ))
            })?;

        Ok(Self {
            session: Mutex::new(session),
            tokenizer,
        })
    }

    /// Embed a single text string, returning a 384-dim f32 vector.
    fn run_inference(&self, text: &str) -> Result<Vec<f32>, SahayakError> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| embed_err(format!("tokenization failed: {e}")))?;

        let input_ids: Vec<i64> = encoding.get_ids().iter().map(|&id| id as i64).collect();
        let attention_mask: Vec<i64> = encoding
            .get_attention_mask()
            .iter()
            .map(|&m| m as i64)
            .collect();
        let token_type_ids: Vec<i64> = encoding
            .get_type_ids()
            .iter()
            .map(|&t| t as i64)
            .collect();

        let seq_len = input_ids.len();

        let input_ids_array = Array2::from_shape_vec((1, seq_len), input_ids)
            .map_err(|e| embed_err(format!("failed to create input_ids tensor: {e}")))?;
        let attention_mask_array =
            Array2::from_shape_vec((1, seq_len), attention_mask.clone())
                .map_err(|e| embed_err(format!("failed to create attention_mask tensor: {e}")))?;
        let token_type_ids_array = Array2::from_shape_vec((1, seq_len), token_type_ids)
            .map_err(|e| embed_err(format!("failed to create token_type_ids tensor: {e}")))?;

        let mut session = self
            .session
            .lock()
            .map_err(|e| embed_err(format!("failed to lock ONNX session: {e}")))?;

        let input_ids_tensor = TensorRef::from_array_view(&input_ids_array)
            .map_err(|e| embed_err(format!("failed to create input_ids TensorRef: {e}")))?;
        let attention_mask_tensor = TensorRef::from_array_view(&attention_mask_array)
            .map_err(|e| embed_err(format!("failed to create attention_mask TensorRef: {e}")))?;
        let token_type_ids_tensor = TensorRef::from_array_view(&token_type_ids_array)
            .map_err(|e| embed_err(format!("failed to create token_type_ids TensorRef: {e}")))?;

        let outputs = session
            .run(ort::inputs![
                "input_ids" => input_ids_tensor,
                "attention_mask" => attention_mask_tensor,
                "token_type_ids" => token_type_ids_tensor
            ])
            .map_err(|e| embed_err(format!("ONNX inference failed: {e}")))?;

        // Extract output: shape [1, seq_len, 384]
        let (shape, data) = outputs[0]
            .try_extract_tensor::<f32>()
            .map_err(|e| embed_err(format!("failed to extract output tensor: {e}")))?;

        let hidden_size = shape[shape.len() - 1] as usize;
        Ok(mean_pool_with_attention(
            data,
            &attention_mask,
            seq_len,
            hidden_size,
        ))
    }
}

impl TextEmbedder for OnnxEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, SahayakError> {
        self.run_inference(text)
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIM
    }
}

/// Apply attention-masked mean pooling over token embeddings.
fn mean_pool_with_attention(
    embeddings: &[f32],
    attention_mask: &[i64],
    seq_len: usize,
    hidden_size: usize,
) -> Vec<f32> {
    let mut sum = vec![0.0f32; hidden_size];
    let mut count = 0.0f32;

    for i in 0..seq_len {
        if attention_mask[i] > 0 {
            for j in 0..hidden_size {
                sum[j] += embeddings[i * hidden_size + j];
            }
            count += 1.0;
        }
    }

    if count > 0.0 {
        for val in &mut sum {
            *val /= count;
        }
    }

    sum
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_pool_skips_padding_tokens() {
        // 2 tokens, hidden_size=3, first token masked out (padding)
        let embeddings = vec![
            9.0, 9.0, 9.0, // token 0 (padding)
            1.0, 2.0, 3.0, // token 1 (real)
        ];
        let attention_mask = vec![0, 1];
        let result = mean_pool_with_attention(&embeddings, &attention_mask, 2, 3);
        assert_eq!(result, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn mean_pool_averages_real_tokens() {
        // 3 tokens, hidden_size=2, all real
        let embeddings = vec![
            1.0, 2.0, // token 0
            3.0, 4.0, // token 1
            5.0, 6.0, // token 2
        ];
        let attention_mask = vec![1, 1, 1];
        let result = mean_pool_with_attention(&embeddings, &attention_mask, 3, 2);
        assert!((result[0] - 3.0).abs() < f32::EPSILON);
        assert!((result[1] - 4.0).abs() < f32::EPSILON);
    }

    #[test]
    fn mean_pool_all_masked_is_zero() {
        let embeddings = vec![1.0, 2.0, 3.0, 4.0];
        let attention_mask = vec![0, 0];
        let result = mean_pool_with_attention(&embeddings, &attention_mask, 2, 2);
        assert_eq!(result, vec![0.0, 0.0]);
    }

    // OnnxEmbedder::new requires actual model files on disk; loading and
    // inference are exercised by the binary against a downloaded model.
}
