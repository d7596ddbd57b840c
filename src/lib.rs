pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::core::{etl::RosterEngine, pipeline::RosterPipeline};
pub use domain::model::{NamePair, Person};
pub use domain::ports::FullName;
pub use utils::error::{Result, RosterError};
