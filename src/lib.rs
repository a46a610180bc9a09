//! Type shapes from TypeScript declarations, and mock data generated from them.
//!
//! ```text
//! source ─ registry ─▶ LanguageExtractor ─▶ Vec<ir::Node> ─▶ DataGenerator ─▶ Dataset (JSON)
//! ```
pub mod cli;
pub mod error;
pub mod generate;
pub mod inflect;
pub mod ir;
pub mod path_de;
pub mod registry;
pub mod typescript;

pub use error::{Error, Result};
pub use generate::{DataGenerator, Dataset};
pub use ir::{EnumValue, Kind, Node, Shape};
pub use registry::{ExtractorRegistry, LanguageExtractor};
