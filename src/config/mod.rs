//! Configuration management.

mod file_config;

pub use file_config::{ConfigFile, ConfigFileError, ConversionConfig, LogFormat, LoggingConfig};

use std::path::{Path, PathBuf};

/// Metadata index name used when none is configured
pub const DEFAULT_METADATA_FILE: &str = "all_sources_metadata_2020-03-13.csv";

/// Name of the configuration file looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "paper-convert.toml";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "PAPER_CONVERT";

/// Configuration of one conversion run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// Root searched recursively for `<file id>.json` documents
    pub dataset_root: PathBuf,

    /// Existing directory receiving `<file id>.txt` files
    pub output_dir: PathBuf,

    /// Metadata index file name, relative to the dataset root
    pub metadata_file: String,
}

impl ConvertConfig {
    pub fn new(dataset_root: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            dataset_root: dataset_root.into(),
            output_dir: output_dir.into(),
            metadata_file: DEFAULT_METADATA_FILE.to_string(),
        }
    }

    /// Use a different metadata index name
    pub fn with_metadata_file(mut self, metadata_file: impl Into<String>) -> Self {
        self.metadata_file = metadata_file.into();
        self
    }

    /// Full path of the metadata index
    pub fn metadata_path(&self) -> PathBuf {
        self.dataset_root.join(&self.metadata_file)
    }

    /// Output path for a file id
    pub fn output_path(&self, file_id: &str) -> PathBuf {
        self.output_dir.join(format!("{}.txt", file_id))
    }
}

/// Load configuration from an optional file, layered with `PAPER_CONVERT__*` environment variables
pub fn load_config(path: Option<&Path>) -> Result<ConfigFile, ConfigFileError> {
    let mut builder = config::Config::builder();
    if let Some(path) = path {
        builder = builder.add_source(config::File::from(path));
    }

    let settings = builder
        .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

/// Find a configuration file in the default locations.
///
/// Looks for `./paper-convert.toml`, then `<config dir>/paper-convert/config.toml`.
pub fn find_config_file() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG_FILE);
    if local.is_file() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join("paper-convert").join("config.toml"))
        .filter(|path| path.is_file())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::tempdir;

    // load_config reads the process environment
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn test_convert_config_paths() {
        let config = ConvertConfig::new("/data", "/out");
        assert_eq!(config.metadata_file, DEFAULT_METADATA_FILE);
        assert_eq!(
            config.metadata_path(),
            PathBuf::from("/data/all_sources_metadata_2020-03-13.csv")
        );
        assert_eq!(config.output_path("paper1"), PathBuf::from("/out/paper1.txt"));
    }

    #[test]
    fn test_load_config_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[conversion]
dataset_root = "/data"
output_dir = "/out"
metadata_file = "metadata.csv"

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.conversion.dataset_root, Some(PathBuf::from("/data")));
        assert_eq!(config.conversion.metadata_file, "metadata.csv");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);

        let resolved = config.convert_config().unwrap();
        assert_eq!(resolved.metadata_path(), PathBuf::from("/data/metadata.csv"));
    }

    #[test]
    fn test_load_config_partial_file_uses_defaults() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[conversion]\noutput_dir = \"/out\"\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.conversion.dataset_root, None);
        assert_eq!(config.conversion.metadata_file, DEFAULT_METADATA_FILE);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_config_nonexistent() {
        assert!(load_config(Some(Path::new("/nonexistent/config.toml"))).is_err());
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid.toml");
        fs::write(&path, "invalid = toml = content").unwrap();

        assert!(load_config(Some(&path)).is_err());
    }

    #[test]
    fn test_environment_overrides_file() {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[conversion]\ndataset_root = \"/data\"\nmetadata_file = \"file.csv\"\n",
        )
        .unwrap();

        std::env::set_var("PAPER_CONVERT__CONVERSION__METADATA_FILE", "env.csv");
        std::env::set_var("PAPER_CONVERT__CONVERSION__OUTPUT_DIR", "/env-out");
        std::env::set_var("PAPER_CONVERT__LOGGING__LEVEL", "warn");

        let from_file = load_config(Some(&path));
        let from_env = load_config(None);

        std::env::remove_var("PAPER_CONVERT__CONVERSION__METADATA_FILE");
        std::env::remove_var("PAPER_CONVERT__CONVERSION__OUTPUT_DIR");
        std::env::remove_var("PAPER_CONVERT__LOGGING__LEVEL");

        let config = from_file.unwrap();
        assert_eq!(config.conversion.dataset_root, Some(PathBuf::from("/data")));
        assert_eq!(config.conversion.metadata_file, "env.csv");
        assert_eq!(config.conversion.output_dir, Some(PathBuf::from("/env-out")));
        assert_eq!(config.logging.level, "warn");

        let config = from_env.unwrap();
        assert_eq!(config.conversion.dataset_root, None);
        assert_eq!(config.conversion.metadata_file, "env.csv");
        assert_eq!(config.logging.format, LogFormat::Text);
    }
}
