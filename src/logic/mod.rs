//! Logic Module - Detection Engines
//!
//! - `signal/` - Labeled synthetic signal generation (RSSI, CSI, ToF)
//! - `features/` - Feature adapter seam + training-corpus concatenation
//! - `model/` - Ensemble anomaly classifier (fit / predict / evaluate)
//! - `trust/` - Challenge-response trust verification
//! - `dataset/` - CSV dataset persistence

pub mod dataset;
pub mod features;
pub mod model;
pub mod signal;
pub mod trust;
