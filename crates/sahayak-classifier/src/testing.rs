// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic embedding stub for unit tests.
//!
//! Maps each vocabulary word to its own axis; a text's vector has a 1 on
//! the axis of every vocabulary word it contains, and out-of-vocabulary
//! texts land on a dedicated final axis so they are orthogonal to every
//! catalog entry. This makes cosine scores exact, hand-checkable fractions.

use sahayak_core::embedding::TextEmbedder;
use sahayak_core::error::SahayakError;

pub struct AxisEmbedder {
    vocab: Vec<&'static str>,
}

impl AxisEmbedder {
    pub fn new(vocab: Vec<&'static str>) -> Self {
        Self { vocab }
    }

    /// Vocabulary covering the words used by the classifier test catalogs.
    pub fn telecom() -> Self {
        Self::new(vec![
            "network",
            "internet",
            "slow",
            "recharge",
            "balance",
            "data",
            "remaining",
        ])
    }
}

impl TextEmbedder for AxisEmbedder {
    fn embed(&self, text: &str) -> Result<Vec<f32>, SahayakError> {
        let lower = text.to_lowercase();
        let words: Vec<&str> = lower
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .collect();

        let mut vector = vec![0.0f32; self.vocab.len() + 1];
        for (axis, vocab_word) in self.vocab.iter().enumerate() {
            if words.contains(vocab_word) {
                vector[axis] = 1.0;
            }
        }

        // Out-of-vocabulary axis keeps the vector non-zero.
        if vector.iter().all(|v| *v == 0.0) {
            vector[self.vocab.len()] = 1.0;
        }

        Ok(vector)
    }

    fn dimensions(&self) -> usize {
        self.vocab.len() + 1
    }
}
