pub mod settings;

pub use settings::{EngineSettings, RequiredColumns};
