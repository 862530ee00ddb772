//! Dataset source adapters.

mod csv_source;

pub use csv_source::CsvDatasetSource;
