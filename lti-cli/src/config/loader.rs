use super::types::{
    OutcomesSection, RawOAuthConfig, RawOutcomesConfig, RawServerConfig, RawSessionsConfig,
    RawToolConfig, ServerSection, SessionsSection, ToolConfig,
};
use anyhow::{Context, Result};
use directories::ProjectDirs;
use lti_core::OAuthConfig;
use std::path::{Path, PathBuf};

/// Overrides the project config directory (useful for isolated tests)
pub const PROJECT_CONFIG_DIR_ENV: &str = "LTI_TOOL_PROJECT_CONFIG_DIR";

const PROJECT_CONFIG_DIR: &str = ".lti-tool";
const CONFIG_FILE: &str = "config.toml";

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load merged configuration (user + project)
    pub fn load() -> Result<ToolConfig> {
        let user_path = Self::user_config_path();
        Self::load_from_paths(user_path.as_deref(), &Self::project_config_path())
    }

    /// Load configuration from explicit user and project paths
    ///
    /// Missing files are skipped; values in the project file win.
    pub fn load_from_paths(user_path: Option<&Path>, project_path: &Path) -> Result<ToolConfig> {
        let mut raw = RawToolConfig::default();

        // Layer 1: User config
        if let Some(user_path) = user_path
            && user_path.exists()
        {
            raw = Self::merge_raw(raw, Self::read_raw(user_path)?);
        }

        // Layer 2: Project config
        if project_path.exists() {
            raw = Self::merge_raw(raw, Self::read_raw(project_path)?);
        }

        Ok(Self::finalize(raw))
    }

    /// Get user config path (platform-specific)
    pub fn user_config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "lti-tool").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Get project config path
    pub fn project_config_path() -> PathBuf {
        Self::project_config_path_in(std::env::var(PROJECT_CONFIG_DIR_ENV).ok())
    }

    fn project_config_path_in(dir_override: Option<String>) -> PathBuf {
        match dir_override {
            Some(dir) => PathBuf::from(dir).join(CONFIG_FILE),
            None => PathBuf::from(PROJECT_CONFIG_DIR).join(CONFIG_FILE),
        }
    }

    fn read_raw(path: &Path) -> Result<RawToolConfig> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))
    }

    /// Merge two raw configs (overlay values override base only if explicitly set)
    fn merge_raw(base: RawToolConfig, overlay: RawToolConfig) -> RawToolConfig {
        RawToolConfig {
            server: RawServerConfig {
                host: overlay.server.host.or(base.server.host),
                port: overlay.server.port.or(base.server.port),
                public_url: overlay.server.public_url.or(base.server.public_url),
            },
            oauth: RawOAuthConfig {
                consumer_key: overlay.oauth.consumer_key.or(base.oauth.consumer_key),
                consumer_secret: overlay.oauth.consumer_secret.or(base.oauth.consumer_secret),
                timestamp_tolerance_secs: overlay
                    .oauth
                    .timestamp_tolerance_secs
                    .or(base.oauth.timestamp_tolerance_secs),
                echo_secret_on_failure: overlay
                    .oauth
                    .echo_secret_on_failure
                    .or(base.oauth.echo_secret_on_failure),
            },
            outcomes: RawOutcomesConfig {
                timeout_secs: overlay.outcomes.timeout_secs.or(base.outcomes.timeout_secs),
            },
            sessions: RawSessionsConfig {
                max_sessions: overlay.sessions.max_sessions.or(base.sessions.max_sessions),
            },
        }
    }

    /// Convert raw config to final config with defaults applied
    fn finalize(raw: RawToolConfig) -> ToolConfig {
        let server_defaults = ServerSection::default();
        let oauth_defaults = OAuthConfig::default();

        ToolConfig {
            server: ServerSection {
                host: raw.server.host.unwrap_or(server_defaults.host),
                port: raw.server.port.unwrap_or(server_defaults.port),
                public_url: raw.server.public_url,
            },
            oauth: OAuthConfig {
                consumer_key: raw.oauth.consumer_key.unwrap_or(oauth_defaults.consumer_key),
                consumer_secret: raw
                    .oauth
                    .consumer_secret
                    .unwrap_or(oauth_defaults.consumer_secret),
                timestamp_tolerance_secs: raw.oauth.timestamp_tolerance_secs,
                echo_secret_on_failure: raw
                    .oauth
                    .echo_secret_on_failure
                    .unwrap_or(oauth_defaults.echo_secret_on_failure),
            },
            outcomes: OutcomesSection {
                timeout_secs: raw
                    .outcomes
                    .timeout_secs
                    .unwrap_or_else(|| OutcomesSection::default().timeout_secs),
            },
            sessions: SessionsSection {
                max_sessions: raw
                    .sessions
                    .max_sessions
                    .unwrap_or_else(|| SessionsSection::default().max_sessions),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_load_nonexistent_returns_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.toml");

        let config = ConfigLoader::load_from_paths(Some(&missing), &missing).unwrap();
        assert_eq!(config.server.port, 9292);
        assert_eq!(config.oauth.consumer_secret, "secret");
    }

    #[test]
    fn test_load_from_valid_toml() {
        let temp_dir = TempDir::new().unwrap();
        let project = write(
            &temp_dir,
            "project.toml",
            r#"
[server]
host = "0.0.0.0"
port = 8080
public_url = "https://tool.example"

[oauth]
consumer_key = "canvas"
consumer_secret = "s3cret"
timestamp_tolerance_secs = 300
echo_secret_on_failure = false

[outcomes]
timeout_secs = 5

[sessions]
max_sessions = 50
"#,
        );

        let config = ConfigLoader::load_from_paths(None, &project).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.server.public_url.as_deref(),
            Some("https://tool.example")
        );
        assert_eq!(config.oauth.consumer_key, "canvas");
        assert_eq!(config.oauth.consumer_secret, "s3cret");
        assert_eq!(config.oauth.timestamp_tolerance_secs, Some(300));
        assert!(!config.oauth.echo_secret_on_failure);
        assert_eq!(config.outcomes.timeout_secs, 5);
        assert_eq!(config.sessions.max_sessions, 50);
    }

    #[test]
    fn test_load_invalid_toml_returns_error() {
        let temp_dir = TempDir::new().unwrap();
        let project = write(&temp_dir, "project.toml", "[server\nport = ");

        let result = ConfigLoader::load_from_paths(None, &project);
        assert!(result.is_err());
    }

    #[test]
    fn test_project_layer_overrides_user_layer() {
        let temp_dir = TempDir::new().unwrap();
        let user = write(
            &temp_dir,
            "user.toml",
            "[server]\nport = 7000\n\n[oauth]\nconsumer_secret = \"from-user\"\n",
        );
        let project = write(&temp_dir, "project.toml", "[server]\nport = 7100\n");

        let config = ConfigLoader::load_from_paths(Some(&user), &project).unwrap();
        assert_eq!(config.server.port, 7100);
        // Not set in the project file, so the user value survives
        assert_eq!(config.oauth.consumer_secret, "from-user");
    }

    #[test]
    fn test_merge_raw_none_preserves_base() {
        let base = RawToolConfig {
            server: RawServerConfig {
                host: Some("0.0.0.0".to_string()),
                port: Some(9000),
                public_url: Some("https://base.example".to_string()),
            },
            outcomes: RawOutcomesConfig {
                timeout_secs: Some(2),
            },
            ..Default::default()
        };

        let merged = ConfigLoader::merge_raw(base, RawToolConfig::default());

        assert_eq!(merged.server.host, Some("0.0.0.0".to_string()));
        assert_eq!(merged.server.port, Some(9000));
        assert_eq!(
            merged.server.public_url,
            Some("https://base.example".to_string())
        );
        assert_eq!(merged.outcomes.timeout_secs, Some(2));
    }

    #[test]
    fn test_finalize_applies_defaults() {
        let config = ConfigLoader::finalize(RawToolConfig::default());
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.oauth.consumer_key, "test");
        assert!(config.oauth.echo_secret_on_failure);
        assert_eq!(config.outcomes.timeout_secs, 10);
        assert_eq!(config.sessions.max_sessions, 10_000);
    }

    #[test]
    fn test_user_config_path_returns_some() {
        let path = ConfigLoader::user_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("lti-tool"));
        assert!(path.to_string_lossy().ends_with("config.toml"));
    }

    #[test]
    fn test_project_config_path() {
        assert_eq!(
            ConfigLoader::project_config_path_in(None),
            PathBuf::from(".lti-tool/config.toml")
        );
        assert_eq!(
            ConfigLoader::project_config_path_in(Some("/tmp/isolated".to_string())),
            PathBuf::from("/tmp/isolated/config.toml")
        );
    }
}
