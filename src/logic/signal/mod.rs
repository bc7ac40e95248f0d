//! Signal Model - Labeled Synthetic Signal Generation
//!
//! Produces per-modality datasets under five latent behavior classes
//! (normal, spoofing, jamming, replay, eavesdropping), collapsed to a
//! binary label. Pure and seedable: no ambient randomness, no side
//! effects.

pub mod generator;
pub mod types;

#[cfg(test)]
mod tests;

pub use generator::{class_count, generate};
pub use types::{
    BehaviorClass, GeneratorConfig, Modality, SignalDataset, SignalSample, CSI_SUBCARRIERS,
    DEFAULT_SAMPLE_COUNT,
};
