// SPDX-FileCopyrightText: 2026 Sahayak Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Query modules for the conversation and ticket record tables.

pub mod conversations;
pub mod records;
