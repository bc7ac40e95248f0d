//! Trust Verification - Keyed Challenge-Response
//!
//! Device and fusion center each compute a feedback digest over their own
//! view of (observed data identifier, nonce, shared key). The verdict is
//! TRUSTED exactly when the digests match byte for byte; any divergence in
//! any hashed field flips the verdict with overwhelming probability under
//! the collision resistance of SHA-256.
//!
//! Nonce uniqueness per exchange is the caller's responsibility; the
//! protocol keeps no nonce ledger. A terminal exchange is never reused;
//! re-verification starts a fresh exchange with a fresh nonce.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{CoreError, CoreResult};


/// Field delimiter inside the digest preimage. Enforced absent from every
/// field so no two distinct (data, nonce, key) triples share an encoding.
const FIELD_DELIMITER: char = '|';

/// Hex characters in a rendered digest (256-bit SHA-256).
pub const DIGEST_HEX_LEN: usize = 64;

// ============================================================================
// FEEDBACK DIGEST
// ============================================================================

fn check_field(name: &str, value: &str) -> CoreResult<()> {
    if value.is_empty() {
        return Err(CoreError::Configuration(format!("{name} must not be empty")));
    }
    if value.contains(FIELD_DELIMITER) {
        return Err(CoreError::Configuration(format!(
            "{name} must not contain '{FIELD_DELIMITER}'"
        )));
    }
    Ok(())
}

/// Compute the keyed feedback digest H(data | nonce | key).
///
/// Deterministic and pure; the hex output is safe to log, exposing
/// neither the key nor the nonce.
pub fn compute_feedback(data_id: &str, nonce: &str, key: &str) -> CoreResult<String> {
    check_field("data_id", data_id)?;
    check_field("nonce", nonce)?;
    check_field("key", key)?;

    let combined = format!("{data_id}{FIELD_DELIMITER}{nonce}{FIELD_DELIMITER}{key}");

    let mut hasher = Sha256::new();
    hasher.update(combined.as_bytes());
    Ok(hex::encode(hasher.finalize()))
}

/// Single-use nonce helper. Callers may supply their own source as long
/// as values are never reused across exchanges.
pub fn fresh_nonce() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

// ============================================================================
// VERDICT
// ============================================================================

/// Outcome of a feedback comparison. A mismatch is a valid result, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Trusted,
    Anomalous,
}

/// Byte-for-byte digest comparison.
pub fn verify(device_digest: &str, expected_digest: &str) -> Verdict {
    if device_digest.as_bytes() == expected_digest.as_bytes() {
        Verdict::Trusted
    } else {
        Verdict::Anomalous
    }
}

// ============================================================================
// EXCHANGE STATE MACHINE
// ============================================================================

/// Protocol position of one verification exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExchangeState {
    AwaitingDeviceFeedback,
    AwaitingFusionFeedback,
    VerifiedTrusted,
    VerifiedAnomalous,
}

impl ExchangeState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ExchangeState::VerifiedTrusted | ExchangeState::VerifiedAnomalous
        )
    }
}

/// One-shot verification exchange.
///
/// Holds digests only (never the key or nonce), so the record is safe to
/// serialize into audit logs. Terminal states accept no further input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrustExchange {
    pub exchange_id: String,
    state: ExchangeState,
    device_digest: Option<String>,
    fusion_digest: Option<String>,
}

impl TrustExchange {
    pub fn new() -> Self {
        Self {
            exchange_id: uuid::Uuid::new_v4().to_string(),
            state: ExchangeState::AwaitingDeviceFeedback,
            device_digest: None,
            fusion_digest: None,
        }
    }

    pub fn state(&self) -> ExchangeState {
        self.state
    }

    /// Verdict once the exchange is terminal.
    pub fn verdict(&self) -> Option<Verdict> {
        match self.state {
            ExchangeState::VerifiedTrusted => Some(Verdict::Trusted),
            ExchangeState::VerifiedAnomalous => Some(Verdict::Anomalous),
            _ => None,
        }
    }

    /// Record the device-computed feedback digest.
    pub fn submit_device_feedback(&mut self, digest: String) -> CoreResult<()> {
        if self.state != ExchangeState::AwaitingDeviceFeedback {
            return Err(CoreError::ProtocolViolation(format!(
                "device feedback not accepted in state {:?}",
                self.state
            )));
        }

        self.device_digest = Some(digest);
        self.state = ExchangeState::AwaitingFusionFeedback;
        Ok(())
    }

    /// Record the fusion-expected digest, compare, and land in a terminal
    /// state. Returns the verdict.
    pub fn submit_fusion_feedback(&mut self, digest: String) -> CoreResult<Verdict> {
        if self.state != ExchangeState::AwaitingFusionFeedback {
            return Err(CoreError::ProtocolViolation(format!(
                "fusion feedback not accepted in state {:?}",
                self.state
            )));
        }
        let device_digest = self.device_digest.as_deref().ok_or_else(|| {
            CoreError::ProtocolViolation("device digest missing before comparison".to_string())
        })?;

        let verdict = verify(device_digest, &digest);
        self.fusion_digest = Some(digest);
        self.state = match verdict {
            Verdict::Trusted => ExchangeState::VerifiedTrusted,
            Verdict::Anomalous => ExchangeState::VerifiedAnomalous,
        };

        log::debug!(
            "Exchange {} verified: {:?}",
            self.exchange_id,
            verdict
        );
        Ok(verdict)
    }
}

impl Default for TrustExchange {
    fn default() -> Self {
        Self::new()
    }
}
