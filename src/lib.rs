//! IoT Link Security Core
//!
//! Two independent detectors over the same physical event:
//! - a statistical path: synthetic physical-layer signals (RSSI, CSI, ToF)
//!   scored by an ensemble classifier trained on labeled feature vectors;
//! - a cryptographic path: a keyed challenge-response check comparing the
//!   device's reported feedback digest against the fusion center's
//!   expected digest.
//!
//! Verdict fusion between the two paths belongs to the caller.

pub mod error;
pub mod logic;

pub use error::{CoreError, CoreResult};
