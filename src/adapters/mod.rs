// Adapters layer: concrete implementations for external systems (filesystem, CSV, JSON).

pub mod csv_reader;
pub mod json_writer;
pub mod local_storage;

pub use csv_reader::CsvRecordReader;
pub use json_writer::JsonDocumentWriter;
pub use local_storage::LocalStorage;
