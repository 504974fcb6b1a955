// Input side of the engine: upload checks, decoding, and cell normalization.
pub mod csv_loader;
pub mod normalizer;
pub mod upload;

pub use csv_loader::{load_table, DecodeOutcome, Table, TextEncoding};
pub use upload::{validate_upload, UploadedFile};
