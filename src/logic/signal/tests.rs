use super::generator::{class_count, generate};
use super::types::{BehaviorClass, GeneratorConfig, Modality, CSI_SUBCARRIERS};
use crate::error::CoreError;

#[test]
fn test_fixed_seed_is_bit_identical() {
    let config = GeneratorConfig::new(500, 7);

    for modality in Modality::ALL {
        let a = generate(modality, &config).unwrap();
        let b = generate(modality, &config).unwrap();

        assert_eq!(a.len(), b.len());
        for (x, y) in a.samples.iter().zip(b.samples.iter()) {
            assert_eq!(x.class, y.class);
            assert_eq!(x.label, y.label);
            assert_eq!(x.values, y.values);
        }
    }
}

#[test]
fn test_different_seeds_differ() {
    let a = generate(Modality::Rssi, &GeneratorConfig::new(200, 1)).unwrap();
    let b = generate(Modality::Rssi, &GeneratorConfig::new(200, 2)).unwrap();

    let identical = a
        .samples
        .iter()
        .zip(b.samples.iter())
        .all(|(x, y)| x.values == y.values);
    assert!(!identical);
}

#[test]
fn test_label_follows_class() {
    let dataset = generate(Modality::Tof, &GeneratorConfig::new(1000, 42)).unwrap();

    for sample in &dataset.samples {
        if sample.class == BehaviorClass::Normal {
            assert_eq!(sample.label, 0);
        } else {
            assert_eq!(sample.label, 1);
        }
    }
}

#[test]
fn test_partition_sizes_floor() {
    // 1000 divides evenly: 600 + 4 * 100.
    let dataset = generate(Modality::Rssi, &GeneratorConfig::new(1000, 42)).unwrap();
    assert_eq!(dataset.rows_of(BehaviorClass::Normal).count(), 600);
    for class in [
        BehaviorClass::Spoofing,
        BehaviorClass::Jamming,
        BehaviorClass::Replay,
        BehaviorClass::Eavesdropping,
    ] {
        assert_eq!(dataset.rows_of(class).count(), 100);
    }
    assert_eq!(dataset.len(), 1000);

    // 997 truncates: floor(598.2) + 4 * floor(99.7) = 598 + 396 = 994.
    let truncated = generate(Modality::Rssi, &GeneratorConfig::new(997, 42)).unwrap();
    assert_eq!(truncated.rows_of(BehaviorClass::Normal).count(), 598);
    assert_eq!(truncated.rows_of(BehaviorClass::Jamming).count(), 99);
    assert_eq!(truncated.len(), 994);
    assert!(truncated.len() <= 997);
}

#[test]
fn test_class_count_matches_rows() {
    for total in [10, 57, 500, 997, 5000] {
        let dataset = generate(Modality::Tof, &GeneratorConfig::new(total, 3)).unwrap();
        for class in BehaviorClass::ALL {
            assert_eq!(
                dataset.rows_of(class).count(),
                class_count(class, total),
                "class {:?} at total {}",
                class,
                total
            );
        }
    }
}

#[test]
fn test_csi_replay_rows_identical() {
    let dataset = generate(Modality::Csi, &GeneratorConfig::new(1000, 42)).unwrap();
    let replay: Vec<_> = dataset.rows_of(BehaviorClass::Replay).collect();

    assert_eq!(replay.len(), 100);
    let signature = &replay[0].values;
    assert_eq!(signature.len(), CSI_SUBCARRIERS);
    for row in &replay {
        assert_eq!(&row.values, signature);
    }
}

#[test]
fn test_scalar_replay_rows_are_not_repeated() {
    // Only the CSI replay class repeats a signature; RSSI replay is a
    // tight Gaussian, so consecutive rows still differ.
    let dataset = generate(Modality::Rssi, &GeneratorConfig::new(1000, 42)).unwrap();
    let replay: Vec<_> = dataset.rows_of(BehaviorClass::Replay).collect();

    assert!(replay.windows(2).any(|w| w[0].values != w[1].values));
}

#[test]
fn test_value_widths() {
    let config = GeneratorConfig::new(100, 42);

    let rssi = generate(Modality::Rssi, &config).unwrap();
    assert!(rssi.samples.iter().all(|s| s.values.len() == 1));

    let csi = generate(Modality::Csi, &config).unwrap();
    assert!(csi.samples.iter().all(|s| s.values.len() == CSI_SUBCARRIERS));
}

#[test]
fn test_zero_count_is_configuration_error() {
    let err = generate(Modality::Rssi, &GeneratorConfig::new(0, 42)).unwrap_err();
    assert!(matches!(err, CoreError::Configuration(_)));
}

#[test]
fn test_class_order_is_stable() {
    let dataset = generate(Modality::Tof, &GeneratorConfig::new(100, 42)).unwrap();

    let classes: Vec<_> = dataset.samples.iter().map(|s| s.class).collect();
    let mut sorted = classes.clone();
    sorted.sort_by_key(|c| BehaviorClass::ALL.iter().position(|x| x == c));
    assert_eq!(classes, sorted, "rows must be emitted in class order");
}
