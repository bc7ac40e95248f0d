//! IoT Link Security - Reference Pipeline
//!
//! Thin wrapper around the core library: generate the synthetic datasets,
//! persist them, train and score the ensemble, then run one trusted and
//! one tampered challenge-response exchange. All decision logic lives in
//! the library.

use iot_security_core::logic::dataset::DatasetWriter;
use iot_security_core::logic::features::{stack_modalities, FeatureAdapter, WidthAlignAdapter};
use iot_security_core::logic::model::{evaluate, ForestConfig, RandomForest};
use iot_security_core::logic::signal::{generate, GeneratorConfig, Modality};
use iot_security_core::logic::trust::{compute_feedback, fresh_nonce, TrustExchange};
use iot_security_core::CoreError;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting IoT Link Security pipeline...");

    if let Err(e) = run() {
        log::error!("Pipeline failed: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), CoreError> {
    // --- Statistical path: generate, persist, train, evaluate ---
    let generator_config = GeneratorConfig::default();
    let adapter = WidthAlignAdapter::default();
    let writer = DatasetWriter::new();

    let mut parts = Vec::new();
    for modality in Modality::ALL {
        let dataset = generate(modality, &generator_config)?;
        writer.export(&dataset)?;
        parts.push(adapter.extract(&dataset)?);
    }

    let (corpus, labels) = stack_modalities(&parts)?;
    let forest = RandomForest::fit(&ForestConfig::default(), &corpus, &labels)?;

    // Reference flow: score on the training corpus itself.
    let predictions = forest.predict(&corpus)?;
    let report = evaluate(&predictions, &labels)?;

    log::info!("Training accuracy: {:.4}", report.accuracy);
    for class in &report.per_class {
        log::info!(
            "  label {}: precision {:.4}, recall {:.4}, f1 {:.4}, support {}",
            class.label,
            class.precision,
            class.recall,
            class.f1,
            class.support
        );
    }

    // --- Cryptographic path: one clean and one tampered exchange ---
    let key = "PRIVATE_KEY_ABC123";

    let nonce = fresh_nonce();
    let mut exchange = TrustExchange::new();
    exchange.submit_device_feedback(compute_feedback("PACKETS_FROM_DEVICE_1", &nonce, key)?)?;
    let verdict =
        exchange.submit_fusion_feedback(compute_feedback("PACKETS_FROM_DEVICE_1", &nonce, key)?)?;
    log::info!("Matching observations: {:?}", verdict);

    let nonce = fresh_nonce();
    let mut exchange = TrustExchange::new();
    exchange.submit_device_feedback(compute_feedback("PACKETS_FROM_DEVICE_1", &nonce, key)?)?;
    let verdict =
        exchange.submit_fusion_feedback(compute_feedback("PACKETS_FROM_DEVICE_2", &nonce, key)?)?;
    log::info!("Tampered observations: {:?}", verdict);

    Ok(())
}
