//! SPDX-FileCopyrightText: © 2025 Cory Parent <goedelsoup+orasi@goedelsoup.io>
//! SPDX-License-Identifier: Apache-2.0
//!

//! JWT statistics

use chrono::{DateTime, Utc};
use serde::Serialize;

/// JWT statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct JwtStats {
    /// Number of tokens issued
    pub tokens_issued: u64,

    /// Number of tokens validated
    pub tokens_validated: u64,

    /// Number of validation failures
    pub validation_failures: u64,

    /// Last token issued
    pub last_token_issued: Option<DateTime<Utc>>,

    /// Last token validated
    pub last_token_validated: Option<DateTime<Utc>>,
}

impl JwtStats {
    /// Create new JWT statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment tokens issued count
    pub fn increment_tokens_issued(&mut self) {
        self.tokens_issued += 1;
        self.last_token_issued = Some(Utc::now());
    }

    /// Increment tokens validated count
    pub fn increment_tokens_validated(&mut self) {
        self.tokens_validated += 1;
        self.last_token_validated = Some(Utc::now());
    }

    /// Increment validation failures count
    pub fn increment_validation_failures(&mut self) {
        self.validation_failures += 1;
    }

    /// Get validation success rate
    pub fn validation_success_rate(&self) -> f64 {
        let total_validations = self.tokens_validated + self.validation_failures;
        if total_validations == 0 {
            0.0
        } else {
            self.tokens_validated as f64 / total_validations as f64
        }
    }
}
