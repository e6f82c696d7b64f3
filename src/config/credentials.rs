use std::collections::HashMap;
use std::{env, fmt, fs, path::Path};

use serde::Serialize;
use tracing::debug;

use super::{ConfigError, ConfigPaths};

const DEFAULT_PROFILE: &str = "default";

/// How the engine reaches the backend store. Consulted once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionConfig {
    Endpoint(String),
    Credentials(Credentials),
}

#[derive(Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub profile: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_arn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("profile", &self.profile)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "***"))
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .field("role_arn", &self.role_arn)
            .field("region", &self.region)
            .finish()
    }
}

/// Resolves a named profile from the shared AWS credentials and config
/// files, or passes an explicit endpoint through untouched.
pub struct CredentialResolver<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> CredentialResolver<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn resolve(
        &self,
        profile: Option<&str>,
        endpoint: Option<&str>,
    ) -> Result<ConnectionConfig, ConfigError> {
        if let Some(endpoint) = endpoint {
            return Ok(ConnectionConfig::Endpoint(endpoint.to_string()));
        }

        let profile = profile
            .map(str::to_string)
            .or_else(|| env::var("AWS_PROFILE").ok().filter(|p| !p.is_empty()))
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string());

        let mut settings = read_section(&self.paths.aws_config_path, &config_section(&profile))?;
        // The credentials file wins over the config file for the same key.
        settings.extend(read_section(&self.paths.credentials_path, &profile)?);

        if settings.is_empty() {
            debug!(profile = %profile, "profile not found in shared files");
        }

        let mut take = |key: &str| settings.remove(key).filter(|v| !v.is_empty());
        Ok(ConnectionConfig::Credentials(Credentials {
            access_key_id: take("aws_access_key_id"),
            secret_access_key: take("aws_secret_access_key"),
            session_token: take("aws_session_token"),
            role_arn: take("role_arn"),
            region: take("region"),
            profile,
        }))
    }
}

fn config_section(profile: &str) -> String {
    if profile == DEFAULT_PROFILE {
        DEFAULT_PROFILE.to_string()
    } else {
        format!("profile {}", profile)
    }
}

/// Collects the `key = value` pairs of one `[section]` of an ini file.
/// A missing file reads as empty.
fn read_section(path: &Path, section: &str) -> Result<HashMap<String, String>, ConfigError> {
    let mut values = HashMap::new();
    if !path.exists() {
        return Ok(values);
    }

    let content = fs::read_to_string(path)?;
    let mut in_section = false;

    for line in content.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
            in_section = name.trim() == section;
            continue;
        }

        if in_section {
            if let Some((key, value)) = line.split_once('=') {
                values.insert(key.trim().to_string(), value.trim().to_string());
            }
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paths_with(credentials: &str, config: &str) -> (tempfile::TempDir, ConfigPaths) {
        let dir = tempfile::tempdir().unwrap();
        let paths = ConfigPaths {
            rc_path: dir.path().join(".nodenamorc"),
            credentials_path: dir.path().join("credentials"),
            aws_config_path: dir.path().join("config"),
        };
        fs::write(&paths.credentials_path, credentials).unwrap();
        fs::write(&paths.aws_config_path, config).unwrap();
        (dir, paths)
    }

    #[test]
    fn test_endpoint_wins() {
        let (_dir, paths) = paths_with("", "");
        let config = CredentialResolver::new(&paths)
            .resolve(Some("prod"), Some("http://localhost:8000"))
            .unwrap();

        assert_eq!(
            config,
            ConnectionConfig::Endpoint("http://localhost:8000".to_string())
        );
    }

    #[test]
    fn test_named_profile_merges_both_files() {
        let (_dir, paths) = paths_with(
            "[default]\naws_access_key_id = AKIADEFAULT\n\n[prod]\naws_access_key_id = AKIAPROD\naws_secret_access_key = secret\n",
            "[profile prod]\nrole_arn = arn:aws:iam::123:role/admin\nregion = eu-west-1\n",
        );

        let config = CredentialResolver::new(&paths).resolve(Some("prod"), None).unwrap();
        let ConnectionConfig::Credentials(credentials) = config else {
            panic!("expected credentials");
        };

        assert_eq!(credentials.profile, "prod");
        assert_eq!(credentials.access_key_id.as_deref(), Some("AKIAPROD"));
        assert_eq!(credentials.secret_access_key.as_deref(), Some("secret"));
        assert_eq!(credentials.role_arn.as_deref(), Some("arn:aws:iam::123:role/admin"));
        assert_eq!(credentials.region.as_deref(), Some("eu-west-1"));
        assert!(!format!("{:?}", credentials).contains("secret\""));
    }

    #[test]
    fn test_unknown_profile_is_not_an_error() {
        let (_dir, paths) = paths_with("[default]\naws_access_key_id = x\n", "");
        let config = CredentialResolver::new(&paths).resolve(Some("ghost"), None).unwrap();

        assert_eq!(
            config,
            ConnectionConfig::Credentials(Credentials {
                profile: "ghost".to_string(),
                ..Credentials::default()
            })
        );
    }

    #[test]
    fn test_serialized_shape() {
        let endpoint = serde_json::to_value(ConnectionConfig::Endpoint("http://x".into())).unwrap();
        assert_eq!(endpoint, serde_json::json!({"endpoint": "http://x"}));

        let credentials = serde_json::to_value(ConnectionConfig::Credentials(Credentials {
            profile: "dev".into(),
            ..Credentials::default()
        }))
        .unwrap();
        assert_eq!(credentials, serde_json::json!({"credentials": {"profile": "dev"}}));
    }
}
