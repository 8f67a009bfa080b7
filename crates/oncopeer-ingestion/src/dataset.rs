//! Tab-separated patient dataset reader and writer.
//!
//! The first row is a header naming the identifier column and the eight
//! clinical attribute columns, in any order. Every following row is one
//! patient; `NA` (or the configured token) marks a missing value.
//!
//! ```text
//! Patient_ID	Age	Gender	Tumor_Size	...	Treatment
//! tcga.5l.aat0	42	female	t2	...	plan_1
//! ```

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::Context;
use tracing::{debug, info, warn};

use oncopeer_common::{
    Attribute, DatasetConfig, FieldValue, OncopeerError, PatientRecord, Population, Result,
};

/// Header used for the identifier column when writing and none is configured.
pub const DEFAULT_ID_COLUMN: &str = "Patient_ID";

/// Column positions resolved from the header row.
#[derive(Debug)]
struct ColumnLayout {
    id: usize,
    attributes: [usize; 8],
    width: usize,
}

impl ColumnLayout {
    fn from_headers(headers: &csv::StringRecord, config: &DatasetConfig) -> Result<Self> {
        let position = |name: &str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| OncopeerError::MissingKey(name.to_string()))
        };

        let id = match config.id_column.as_deref() {
            Some(name) => position(name)?,
            None => 0,
        };

        let mut attributes = [0usize; 8];
        for attribute in Attribute::ALL {
            attributes[attribute as usize] = position(attribute.as_str())?;
        }

        for (i, name) in headers.iter().enumerate() {
            if i != id && !attributes.contains(&i) {
                warn!("Ignoring unknown dataset column {:?}", name);
            }
        }

        Ok(Self { id, attributes, width: headers.len() })
    }

    fn record(&self, row: &csv::StringRecord, missing_token: &str) -> PatientRecord {
        PatientRecord::from_fn(|attribute| {
            let raw = row.get(self.attributes[attribute as usize]).unwrap_or(missing_token);
            FieldValue::classify(raw, missing_token)
        })
    }
}

/// Read a dataset using the default tab-separated format.
pub fn read_dataset<R: Read>(source: R) -> Result<Population> {
    read_dataset_with(source, &DatasetConfig::default())
}

/// Read a dataset with an explicit format configuration.
pub fn read_dataset_with<R: Read>(source: R, config: &DatasetConfig) -> Result<Population> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .has_headers(true)
        .quoting(false)
        // Row widths are checked below so the error names the line
        .flexible(true)
        .from_reader(source);

    let headers = reader.headers()?.clone();
    let layout = ColumnLayout::from_headers(&headers, config)?;
    debug!("Dataset layout: {:?}", layout);

    let mut population = Population::new();
    for result in reader.records() {
        let row = result?;
        if row.len() != layout.width {
            return Err(OncopeerError::SchemaMismatch {
                line: row.position().map(|p| p.line()).unwrap_or_default(),
                expected: layout.width,
                found: row.len(),
            });
        }

        let id = row.get(layout.id).unwrap_or_default().to_string();
        population.insert(id, layout.record(&row, &config.missing_token));
    }

    info!("Loaded {} patients", population.len());
    Ok(population)
}

/// Read a dataset file from disk.
pub fn read_dataset_file(path: impl AsRef<Path>) -> Result<Population> {
    let path = path.as_ref();
    info!("Loading patient dataset from {:?}", path);
    let file = File::open(path)
        .with_context(|| format!("Failed to open dataset: {:?}", path))?;
    read_dataset(file)
}

/// Write a population in the default tab-separated format.
pub fn write_dataset<W: Write>(population: &Population, sink: W) -> Result<()> {
    write_dataset_with(population, sink, &DatasetConfig::default())
}

/// Write a population; columns follow the canonical attribute order.
pub fn write_dataset_with<W: Write>(
    population: &Population,
    sink: W,
    config: &DatasetConfig,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .quote_style(csv::QuoteStyle::Never)
        .from_writer(sink);

    let id_column = config.id_column.as_deref().unwrap_or(DEFAULT_ID_COLUMN);
    writer.write_record(
        std::iter::once(id_column).chain(Attribute::ALL.iter().map(|a| a.as_str())),
    )?;

    for (id, record) in population.iter() {
        let values = record.values().map(|(_, value)| match value {
            FieldValue::Missing => config.missing_token.as_str(),
            other => other.as_str(),
        });
        writer.write_record(std::iter::once(id.as_str()).chain(values))?;
    }

    writer.flush()?;
    debug!("Wrote {} patients", population.len());
    Ok(())
}
