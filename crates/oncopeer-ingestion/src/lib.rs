//! oncopeer-ingestion — Loading patient populations from tab-separated clinical datasets.

pub mod dataset;

pub use dataset::{read_dataset, read_dataset_file, read_dataset_with, write_dataset, write_dataset_with};
