//! Synthetic signal generation.
//!
//! One generative law per (modality, behavior class) pair. The laws are a
//! compatibility contract: downstream models are trained against exactly
//! these parameters.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal, Uniform};

use crate::error::{CoreError, CoreResult};
use super::types::{BehaviorClass, GeneratorConfig, Modality, SignalDataset, SignalSample};

// ============================================================================
// GENERATIVE LAWS
// ============================================================================

/// Per-value distribution for one (modality, class) pair.
#[derive(Debug, Clone, Copy)]
enum Law {
    Gaussian { mean: f32, sd: f32 },
    Uniform { low: f32, high: f32 },
}

/// The distribution table. CSI laws apply i.i.d. per subcarrier.
fn law(modality: Modality, class: BehaviorClass) -> Law {
    use BehaviorClass::*;
    match modality {
        Modality::Rssi => match class {
            Normal => Law::Gaussian { mean: -60.0, sd: 10.0 },
            Spoofing => Law::Gaussian { mean: -50.0, sd: 5.0 },
            Jamming => Law::Uniform { low: -100.0, high: -80.0 },
            Replay => Law::Gaussian { mean: -60.0, sd: 2.0 },
            Eavesdropping => Law::Gaussian { mean: -70.0, sd: 15.0 },
        },
        Modality::Tof => match class {
            Normal => Law::Gaussian { mean: 50.0, sd: 5.0 },
            Spoofing => Law::Gaussian { mean: 45.0, sd: 2.0 },
            Jamming => Law::Uniform { low: 0.0, high: 20.0 },
            Replay => Law::Gaussian { mean: 50.0, sd: 1.0 },
            Eavesdropping => Law::Gaussian { mean: 60.0, sd: 7.0 },
        },
        Modality::Csi => match class {
            Normal => Law::Gaussian { mean: 0.0, sd: 1.0 },
            Spoofing => Law::Gaussian { mean: 0.0, sd: 0.5 },
            Jamming => Law::Uniform { low: -2.0, high: 2.0 },
            // Replay draws ONE vector and repeats it across the class;
            // the vector itself comes from the normal-channel law.
            Replay => Law::Gaussian { mean: 0.0, sd: 1.0 },
            Eavesdropping => Law::Gaussian { mean: 0.0, sd: 1.5 },
        },
    }
}

enum LawSampler {
    Gaussian(Normal<f32>),
    Uniform(Uniform<f32>),
}

impl LawSampler {
    fn build(law: Law) -> CoreResult<Self> {
        match law {
            Law::Gaussian { mean, sd } => {
                let dist = Normal::new(mean, sd)
                    .map_err(|e| CoreError::Configuration(format!("bad gaussian law: {e}")))?;
                Ok(LawSampler::Gaussian(dist))
            }
            Law::Uniform { low, high } => Ok(LawSampler::Uniform(Uniform::new(low, high))),
        }
    }

    fn sample(&self, rng: &mut StdRng) -> f32 {
        match self {
            LawSampler::Gaussian(d) => d.sample(rng),
            LawSampler::Uniform(d) => d.sample(rng),
        }
    }

    fn sample_row(&self, rng: &mut StdRng, width: usize) -> Vec<f32> {
        (0..width).map(|_| self.sample(rng)).collect()
    }
}

// ============================================================================
// GENERATION
// ============================================================================

/// Number of rows emitted for one class: `floor(fraction * total)`.
///
/// No renormalization: the dataset may come up short of the requested
/// total. That truncation is part of the contract, not a defect.
pub fn class_count(class: BehaviorClass, total_count: usize) -> usize {
    (class.fraction() * total_count as f64).floor() as usize
}

/// Generate one labeled dataset for `modality`.
///
/// Rows are emitted class-by-class in `BehaviorClass::ALL` order, each
/// carrying its derived binary label. Deterministic for a fixed config.
pub fn generate(modality: Modality, config: &GeneratorConfig) -> CoreResult<SignalDataset> {
    if config.total_count == 0 {
        return Err(CoreError::Configuration(
            "total_count must be positive".to_string(),
        ));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let width = modality.value_width();
    let mut samples = Vec::with_capacity(config.total_count);

    for class in BehaviorClass::ALL {
        let count = class_count(class, config.total_count);
        let sampler = LawSampler::build(law(modality, class))?;

        if modality == Modality::Csi && class == BehaviorClass::Replay {
            // Literal replay attack: an identical CSI signature repeated
            // across every row of the class.
            let signature = sampler.sample_row(&mut rng, width);
            for _ in 0..count {
                samples.push(SignalSample {
                    class,
                    label: class.label(),
                    values: signature.clone(),
                });
            }
        } else {
            for _ in 0..count {
                samples.push(SignalSample {
                    class,
                    label: class.label(),
                    values: sampler.sample_row(&mut rng, width),
                });
            }
        }
    }

    log::debug!(
        "Generated {} {} rows (requested {}, seed {})",
        samples.len(),
        modality.as_str(),
        config.total_count,
        config.seed
    );

    Ok(SignalDataset { modality, samples })
}
