#![deny(unsafe_code)]

pub mod error;
pub mod hash;
pub mod loader;
pub mod names;
pub mod paths;

pub use crate::error::RegistryError;
pub use crate::loader::{LoadReport, RegistrySnapshot, SkipReason, SkippedRow, split_name_list};
pub use crate::names::NameTable;
pub use crate::paths::{REGISTRY_ENV_VAR, default_registry_path};
