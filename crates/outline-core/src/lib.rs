pub mod check;
pub mod coerce;
pub mod config;
pub mod error;
pub mod io;
pub mod normalize;
pub mod report;
pub mod types;

pub use check::{check_outline, Violation};
pub use config::NormalizeConfig;
pub use error::{OutlineError, Result};
pub use normalize::{normalize_outline, normalize_outline_sections, Normalizer};
pub use report::Repair;
pub use types::{LevelPolicy, Outline, OutlineNode};
