use super::ConfigError;
use std::env;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub credentials_path: PathBuf,
    pub aws_config_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::with_home(&home))
    }

    /// Lays out the default files under `home`. The AWS SDK variables
    /// relocate the shared files the same way the SDK does.
    pub fn with_home(home: &Path) -> Self {
        let aws_dir = home.join(".aws");

        ConfigPaths {
            rc_path: home.join(".nodenamorc"),
            credentials_path: env::var_os("AWS_SHARED_CREDENTIALS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| aws_dir.join("credentials")),
            aws_config_path: env::var_os("AWS_CONFIG_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|| aws_dir.join("config")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths_under_home() {
        let paths = ConfigPaths::with_home(Path::new("/home/testuser"));

        assert_eq!(paths.rc_path, PathBuf::from("/home/testuser/.nodenamorc"));
        if env::var_os("AWS_SHARED_CREDENTIALS_FILE").is_none() {
            assert_eq!(
                paths.credentials_path,
                PathBuf::from("/home/testuser/.aws/credentials")
            );
        }
        if env::var_os("AWS_CONFIG_FILE").is_none() {
            assert_eq!(paths.aws_config_path, PathBuf::from("/home/testuser/.aws/config"));
        }
    }
}
