pub mod etl;
pub mod names;
pub mod pipeline;

pub use crate::domain::model::{NamePair, Person, RawRecord, RosterResult};
pub use crate::domain::ports::{ConfigProvider, FullName, Pipeline, Storage};
pub use crate::utils::error::Result;
