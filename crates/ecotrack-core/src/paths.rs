use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "ecotrack.yaml";
pub const DEFAULT_DATA_FILE: &str = "actions.json";

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

/// Resolve a configured data file against the project root. Absolute paths
/// are returned unchanged.
pub fn resolve_data_file(root: &Path, data_file: &Path) -> PathBuf {
    if data_file.is_absolute() {
        data_file.to_path_buf()
    } else {
        root.join(data_file)
    }
}
