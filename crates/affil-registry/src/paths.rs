//! Registry dataset path resolution.

use std::path::PathBuf;

/// Environment variable for overriding the registry CSV location.
pub const REGISTRY_ENV_VAR: &str = "AFFIL_REGISTRY_PATH";

/// Get the registry CSV path.
///
/// Resolution order:
/// 1. `AFFIL_REGISTRY_PATH` environment variable
/// 2. `data/ror_organizations.csv` relative to the workspace root
pub fn default_registry_path() -> PathBuf {
    if let Ok(path) = std::env::var(REGISTRY_ENV_VAR) {
        return PathBuf::from(path);
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data/ror_organizations.csv")
}
