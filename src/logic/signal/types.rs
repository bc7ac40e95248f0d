use serde::{Deserialize, Serialize};

/// Number of CSI subcarriers per measurement (complex values simplified
/// to magnitude, one column each).
pub const CSI_SUBCARRIERS: usize = 30;

/// Default number of rows requested per generated dataset.
pub const DEFAULT_SAMPLE_COUNT: usize = 5000;

// ============================================================================
// MODALITY
// ============================================================================

/// Physical-layer measurement modality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Modality {
    /// Received Signal Strength Indicator, scalar dBm.
    Rssi,
    /// Channel State Information, 30-element magnitude vector.
    Csi,
    /// Time of Flight, scalar propagation delay.
    Tof,
}

impl Modality {
    pub const ALL: [Modality; 3] = [Modality::Rssi, Modality::Csi, Modality::Tof];

    /// Raw values per sample for this modality.
    pub fn value_width(&self) -> usize {
        match self {
            Modality::Rssi | Modality::Tof => 1,
            Modality::Csi => CSI_SUBCARRIERS,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Modality::Rssi => "rssi",
            Modality::Csi => "csi",
            Modality::Tof => "tof",
        }
    }
}

// ============================================================================
// BEHAVIOR CLASS
// ============================================================================

/// Latent generative behavior behind a sample.
///
/// Exactly one per sample; the binary label is a deterministic function of
/// the class (Normal → 0, everything else → 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehaviorClass {
    Normal,
    Spoofing,
    Jamming,
    Replay,
    Eavesdropping,
}

impl BehaviorClass {
    /// Generation order. Rows are emitted class-by-class in this order.
    pub const ALL: [BehaviorClass; 5] = [
        BehaviorClass::Normal,
        BehaviorClass::Spoofing,
        BehaviorClass::Jamming,
        BehaviorClass::Replay,
        BehaviorClass::Eavesdropping,
    ];

    /// Share of the requested total for this class.
    pub fn fraction(&self) -> f64 {
        match self {
            BehaviorClass::Normal => 0.6,
            _ => 0.1,
        }
    }

    /// Binary anomaly label: 0 = normal, 1 = anomalous.
    pub fn label(&self) -> u8 {
        match self {
            BehaviorClass::Normal => 0,
            _ => 1,
        }
    }

    pub fn is_anomalous(&self) -> bool {
        self.label() == 1
    }
}

// ============================================================================
// SAMPLES & DATASETS
// ============================================================================

/// One observation of a modality. Immutable after generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalSample {
    /// Generating behavior class.
    pub class: BehaviorClass,
    /// Binary label derived from `class`.
    pub label: u8,
    /// Raw measurement: length 1 (RSSI/ToF) or `CSI_SUBCARRIERS` (CSI).
    pub values: Vec<f32>,
}

/// Ordered collection of samples for one modality.
///
/// Class proportions are fixed at generation time (60% normal, 10% per
/// anomaly class, floor-truncated), so the row count may fall short of the
/// requested total. Callers must not assume exact-N rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignalDataset {
    pub modality: Modality,
    pub samples: Vec<SignalSample>,
}

impl SignalDataset {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Rows belonging to one behavior class, in emission order.
    pub fn rows_of(&self, class: BehaviorClass) -> impl Iterator<Item = &SignalSample> {
        self.samples.iter().filter(move |s| s.class == class)
    }
}

// ============================================================================
// GENERATOR CONFIGURATION
// ============================================================================

/// Generator parameters. Randomness is seeded per call, never ambient:
/// a fixed (modality, total_count, seed) triple reproduces a bit-identical
/// dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Requested rows; actual output is ≤ this due to floor partitioning.
    pub total_count: usize,
    /// RNG seed threaded through every draw.
    pub seed: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            total_count: DEFAULT_SAMPLE_COUNT,
            seed: 42,
        }
    }
}

impl GeneratorConfig {
    pub fn new(total_count: usize, seed: u64) -> Self {
        Self { total_count, seed }
    }
}
