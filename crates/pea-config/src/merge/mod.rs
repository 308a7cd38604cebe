//! Configuration layering, fallback logic, and environment overrides

use std::collections::HashMap;
use camino::Utf8PathBuf;
use pea_core::error::PeaError;
use tracing::debug;
use crate::toml::{FetchSection, PeaToml};
use crate::{ConfigResult, FetchOptions};

/// Main configuration loading interface
pub struct ConfigLoader {
    /// Current working directory
    cwd: Utf8PathBuf,
}

/// Configuration layering and merging
///
/// Precedence, lowest first: defaults, global config, project config,
/// environment, command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigLayering {
    /// Global configuration
    global_config: Option<FetchSection>,
    /// Project configuration
    project_config: Option<FetchSection>,
    /// Environment overrides
    env_overrides: HashMap<String, String>,
    /// CLI flag overrides
    cli_overrides: FetchSection,
}

/// Configuration source tracking
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigSource {
    /// Global config file
    Global(Utf8PathBuf),
    /// Project pea.toml file
    ProjectToml(Utf8PathBuf),
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new(cwd: Utf8PathBuf) -> Self {
        Self { cwd }
    }

    /// Load the nearest project pea.toml, if any
    pub async fn load_project_config(&self) -> ConfigResult<Option<(PeaToml, ConfigSource)>> {
        let pea_toml_path = self.resolve_config_path("pea.toml")?;
        if !pea_toml_path.exists() {
            return Ok(None);
        }

        let config = crate::toml::load_from_file(&pea_toml_path).await?;
        Ok(Some((config, ConfigSource::ProjectToml(pea_toml_path))))
    }

    /// Find configuration file in project (walks up directory tree)
    pub fn resolve_config_path(&self, filename: &str) -> ConfigResult<Utf8PathBuf> {
        let mut current = self.cwd.as_path();

        loop {
            let config_path = current.join(filename);
            if config_path.exists() {
                return Ok(config_path);
            }

            // Move up one directory
            if let Some(parent) = current.parent() {
                current = parent;
            } else {
                // Reached filesystem root
                break;
            }
        }

        // Return path in current directory even if it doesn't exist
        Ok(self.cwd.join(filename))
    }

    /// Load global configuration from ~/.pea/config.toml
    pub async fn load_global_config(&self) -> ConfigResult<Option<(PeaToml, ConfigSource)>> {
        let home_dir = dirs::home_dir().ok_or_else(|| PeaError::ConfigValidation {
            field: "home_dir".to_string(),
            reason: "Could not determine home directory".to_string(),
        })?;

        let global_config_path = Utf8PathBuf::try_from(home_dir)
            .map_err(|e| PeaError::ConfigValidation {
                field: "home_dir".to_string(),
                reason: format!("Invalid home directory path: {}", e),
            })?
            .join(".pea")
            .join("config.toml");

        if global_config_path.exists() {
            let config = crate::toml::load_from_file(&global_config_path).await?;
            Ok(Some((config, ConfigSource::Global(global_config_path))))
        } else {
            Ok(None)
        }
    }

    /// Resolve effective fetch options from every layer
    pub async fn load_fetch_options(&self, cli_overrides: FetchSection) -> ConfigResult<FetchOptions> {
        let mut layering = ConfigLayering::new()
            .with_env_overrides(ConfigLayering::collect_env_overrides())
            .with_cli_overrides(cli_overrides);

        if let Some((global, source)) = self.load_global_config().await? {
            debug!("Loaded global config from {:?}", source);
            layering = layering.with_global(global.fetch);
        }

        if let Some((project, source)) = self.load_project_config().await? {
            debug!("Loaded project config from {:?}", source);
            layering = layering.with_project(project.fetch);
        }

        layering.resolve()
    }
}

impl ConfigLayering {
    /// Create a new configuration layering system
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_global(mut self, section: FetchSection) -> Self {
        self.global_config = Some(section);
        self
    }

    pub fn with_project(mut self, section: FetchSection) -> Self {
        self.project_config = Some(section);
        self
    }

    pub fn with_env_overrides(mut self, overrides: HashMap<String, String>) -> Self {
        self.env_overrides = overrides;
        self
    }

    pub fn with_cli_overrides(mut self, overrides: FetchSection) -> Self {
        self.cli_overrides = overrides;
        self
    }

    /// Merge every layer into effective options
    pub fn resolve(&self) -> ConfigResult<FetchOptions> {
        let mut merged = FetchSection::default();

        if let Some(global) = &self.global_config {
            merged.merge(global);
        }
        if let Some(project) = &self.project_config {
            merged.merge(project);
        }

        merged.merge(&Self::env_section(&self.env_overrides)?);
        merged.merge(&self.cli_overrides);

        let mut opts = FetchOptions::default();
        merged.apply_to(&mut opts)?;
        Ok(opts)
    }

    /// Translate environment variable overrides into a section
    fn env_section(overrides: &HashMap<String, String>) -> ConfigResult<FetchSection> {
        let mut section = FetchSection::default();

        // PEA_ENDPOINT_URL wins over the legacy PEA_IPFS_URL
        if let Some(url) = overrides.get("PEA_IPFS_URL") {
            section.endpoint_url = Some(url.clone());
        }
        if let Some(url) = overrides.get("PEA_ENDPOINT_URL") {
            section.endpoint_url = Some(url.clone());
        }
        if let Some(tag) = overrides.get("PEA_DEFAULT_TAG") {
            section.default_tag = Some(tag.clone());
        }
        if let Some(enjoy_by) = overrides.get("PEA_ENJOY_BY") {
            section.enjoy_by = Some(enjoy_by.clone());
        }
        if let Some(value) = overrides.get("PEA_INCLUDE_DEPRECATED") {
            let include = match value.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => {
                    return Err(PeaError::ConfigValidation {
                        field: "PEA_INCLUDE_DEPRECATED".to_string(),
                        reason: format!("expected true or false, got '{}'", other),
                    })
                },
            };
            section.include_deprecated = Some(include);
        }

        Ok(section)
    }

    /// Collect environment variable overrides
    pub fn collect_env_overrides() -> HashMap<String, String> {
        std::env::vars()
            .filter(|(key, _)| key.starts_with("PEA_"))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn section(url: Option<&str>, tag: Option<&str>) -> FetchSection {
        FetchSection {
            endpoint_url: url.map(str::to_string),
            default_tag: tag.map(str::to_string),
            ..FetchSection::default()
        }
    }

    #[tokio::test]
    async fn test_config_loader_creation() {
        let cwd = Utf8PathBuf::from("/test");
        let loader = ConfigLoader::new(cwd.clone());
        assert_eq!(loader.cwd, cwd);
    }

    #[tokio::test]
    async fn test_resolve_config_path_walks_up() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        let pea_toml_path = temp_path.join("pea.toml");
        tokio::fs::write(&pea_toml_path, "[fetch]\nendpoint-url = \"/ip4/127.0.0.1/tcp/5001\"\n")
            .await
            .unwrap();

        let nested = temp_path.join("packages").join("app");
        tokio::fs::create_dir_all(&nested).await.unwrap();

        let loader = ConfigLoader::new(nested);
        let resolved = loader.resolve_config_path("pea.toml").unwrap();

        assert_eq!(resolved, pea_toml_path);
    }

    #[tokio::test]
    async fn test_load_project_config() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        let pea_toml_content = r#"
[package]
name = "test-package"

[fetch]
endpoint-url = "/ip4/127.0.0.1/tcp/5001"
"#;
        tokio::fs::write(temp_path.join("pea.toml"), pea_toml_content).await.unwrap();

        let loader = ConfigLoader::new(temp_path);
        let (config, source) = loader.load_project_config().await.unwrap().unwrap();

        assert_eq!(config.fetch.endpoint_url.as_deref(), Some("/ip4/127.0.0.1/tcp/5001"));
        assert!(matches!(source, ConfigSource::ProjectToml(_)));
    }

    #[tokio::test]
    async fn test_load_project_config_reports_file() {
        let temp_dir = TempDir::new().unwrap();
        let temp_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();

        tokio::fs::write(temp_path.join("pea.toml"), "[fetch\n").await.unwrap();

        let loader = ConfigLoader::new(temp_path.clone());
        match loader.load_project_config().await.unwrap_err() {
            PeaError::TomlParse { file, .. } => assert_eq!(file, temp_path.join("pea.toml").to_string()),
            other => panic!("Expected TomlParse, got {:?}", other),
        }
    }

    #[test]
    fn test_layer_precedence() {
        let env = HashMap::from([("PEA_DEFAULT_TAG".to_string(), "beta".to_string())]);

        let opts = ConfigLayering::new()
            .with_global(section(Some("/ip4/10.0.0.1/tcp/5001"), Some("stable")))
            .with_project(section(Some("/ip4/127.0.0.1/tcp/5001"), None))
            .with_env_overrides(env)
            .with_cli_overrides(section(None, Some("next")))
            .resolve()
            .unwrap();

        // Project beats global, CLI beats environment
        assert_eq!(opts.endpoint(), Some("/ip4/127.0.0.1/tcp/5001"));
        assert_eq!(opts.default_tag, "next");
    }

    #[test]
    fn test_env_overrides() {
        let env = HashMap::from([
            ("PEA_IPFS_URL".to_string(), "/ip4/10.0.0.2/tcp/5001".to_string()),
            ("PEA_ENDPOINT_URL".to_string(), "http://localhost:5001".to_string()),
            ("PEA_INCLUDE_DEPRECATED".to_string(), "yes".to_string()),
            ("PEA_ENJOY_BY".to_string(), "2023-05-01T12:00:00+02:00".to_string()),
        ]);

        let opts = ConfigLayering::new().with_env_overrides(env).resolve().unwrap();

        assert_eq!(opts.endpoint(), Some("http://localhost:5001"));
        assert!(opts.include_deprecated);
        assert_eq!(opts.enjoy_by.unwrap().to_rfc3339(), "2023-05-01T10:00:00+00:00");
    }

    #[test]
    fn test_invalid_env_override() {
        let env = HashMap::from([("PEA_INCLUDE_DEPRECATED".to_string(), "maybe".to_string())]);

        let result = ConfigLayering::new().with_env_overrides(env).resolve();
        assert!(matches!(result, Err(PeaError::ConfigValidation { .. })));
    }

    #[test]
    fn test_defaults_without_layers() {
        let opts = ConfigLayering::new().resolve().unwrap();
        assert_eq!(opts, FetchOptions::default());
    }

    #[test]
    fn test_collect_env_overrides() {
        std::env::set_var("PEA_COLLECT_TEST_TAG", "next");
        std::env::set_var("NOT_PEA_COLLECT_TEST", "ignored");

        let overrides = ConfigLayering::collect_env_overrides();

        assert!(overrides.contains_key("PEA_COLLECT_TEST_TAG"));
        assert!(!overrides.contains_key("NOT_PEA_COLLECT_TEST"));

        std::env::remove_var("PEA_COLLECT_TEST_TAG");
        std::env::remove_var("NOT_PEA_COLLECT_TEST");
    }
}
