//! Dataset Module - CSV Persistence
//!
//! Tabular interchange for generated signal datasets: one CSV per
//! modality, named columns, integer 0/1 label column. This is the
//! contract the feature pipeline and offline training consume.

pub mod writer;


pub use writer::{read_csv, write_csv, DatasetWriter};
