//! Result persistence: CSV rows, the append-only writer, and file naming.

mod naming;
mod rows;
mod writer;

pub use naming::{file_name, output_path, OutputCategory};
pub use rows::{AttemptRow, CsvRecord, RunRow};
pub use writer::ResultWriter;
