pub mod discovery;
pub mod error;
pub mod reader;

pub use discovery::{expand_inputs, file_extension, is_supported, list_input_files};
pub use error::{IngestError, Result};
pub use reader::{TableReader, XlsxReader, cell_value, read_xlsx_table};
