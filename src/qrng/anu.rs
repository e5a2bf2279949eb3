//! ANU Quantum Random Number Generator backend
//!
//! Uses the Australian National University's QRNG API, which measures the
//! quantum fluctuations of the vacuum, to get truly random bytes.
//! API documentation: https://qrng.anu.edu.au/contact/api-documentation/
//!
//! Two tiers:
//! - Free: https://qrng.anu.edu.au/API/jsonI.php (rate limited)
//! - Paid: https://api.quantumnumbers.anu.edu.au (requires API key)
//!
//! If an API key is provided, the paid endpoint is used automatically.

use crate::constants::api::{ANU_FREE_URL, ANU_PAID_URL};
use crate::error::{Error, Result};
use crate::qrng::BitSource;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

const MAX_BLOCK_SIZE: usize = 1024; // Maximum bytes per request
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// ANU QRNG backend
#[derive(Debug)]
pub struct AnuBackend {
    api_key: Option<String>,
}

/// Which API tier is being used
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnuTier {
    Free,
    Paid,
}

/// ANU API success response for uint8 type
///
/// Example: `{"success": true, "type": "uint8", "length": "5", "data": [172, 216, 180, 138, 46]}`
#[derive(Debug, Deserialize)]
struct AnuResponse {
    success: bool,
    #[serde(default)]
    data: Option<Vec<u8>>,
    /// Present on error responses: `{"success": false, "message": "..."}`
    #[serde(default)]
    message: Option<String>,
}

impl AnuResponse {
    /// Extract exactly `expected` bytes or explain why not
    fn into_bytes(self, expected: usize) -> Result<Vec<u8>> {
        if !self.success {
            let msg = self.message.unwrap_or_else(|| "Unknown error".to_string());
            return Err(Error::EntropySource(format!("ANU API error: {}", msg)));
        }

        let data = self
            .data
            .ok_or_else(|| Error::EntropySource("ANU API returned no data".to_string()))?;

        if data.len() != expected {
            return Err(Error::EntropySource(format!(
                "ANU API returned {} bytes, expected {}",
                data.len(),
                expected
            )));
        }

        Ok(data)
    }
}

impl AnuBackend {
    /// Create a new ANU backend
    pub fn new() -> Self {
        Self { api_key: None }
    }

    /// Create a new ANU backend with an API key
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
        }
    }

    /// Get which API tier is being used
    pub fn tier(&self) -> AnuTier {
        match &self.api_key {
            Some(key) if !key.is_empty() => AnuTier::Paid,
            _ => AnuTier::Free,
        }
    }

    /// Request URL for a block of `count` bytes
    fn url(&self, count: usize) -> String {
        let base = match self.tier() {
            AnuTier::Paid => ANU_PAID_URL,
            AnuTier::Free => ANU_FREE_URL,
        };
        format!("{}?length={}&type=uint8", base, count)
    }

    /// Fetch one block of random bytes from the ANU API
    fn fetch_bytes(&self, count: usize) -> Result<Vec<u8>> {
        let count = count.min(MAX_BLOCK_SIZE);
        let url = self.url(count);
        debug!(count, tier = ?self.tier(), "requesting ANU block");

        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::EntropySource(format!("Failed to build HTTP client: {}", e)))?;

        let mut request = client.get(&url);

        // Paid endpoint uses header auth
        if let (AnuTier::Paid, Some(key)) = (self.tier(), &self.api_key) {
            request = request.header("x-api-key", key);
        }

        let response = request
            .send()
            .map_err(|e| Error::EntropySource(format!("ANU API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::EntropySource(format!(
                "ANU API returned status: {}",
                response.status()
            )));
        }

        let anu_response: AnuResponse = response
            .json()
            .map_err(|e| Error::EntropySource(format!("Failed to parse ANU response: {}", e)))?;

        anu_response.into_bytes(count)
    }
}

impl Default for AnuBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl BitSource for AnuBackend {
    fn name(&self) -> &'static str {
        "anu"
    }

    fn description(&self) -> &'static str {
        "Australian National University Quantum Random Number Generator"
    }

    fn bytes(&self, count: usize) -> Result<Vec<u8>> {
        let mut result = Vec::with_capacity(count);
        let mut remaining = count;

        // Large requests are split into API-sized blocks
        while remaining > 0 {
            let batch_size = remaining.min(MAX_BLOCK_SIZE);
            result.extend(self.fetch_bytes(batch_size)?);
            remaining -= batch_size;
        }

        Ok(result)
    }
}
