use std::{env, fmt};

mod credentials;
mod loader;
mod paths;

pub use credentials::{ConnectionConfig, CredentialResolver, Credentials};
pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

pub const DEFAULT_PROMPT: &str = "nodenamo> ";

/// Overrides the `engine` rc setting.
pub const ENGINE_ENV_VAR: &str = "NODENAMO_ENGINE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Command line of the execution engine bridge.
    pub engine: Option<String>,
    pub prompt: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            engine: None,
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }
}

impl Config {
    pub fn load(paths: &ConfigPaths) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        ConfigLoader::new(&paths.rc_path).load_into(&mut config)?;

        if let Some(engine) = env::var(ENGINE_ENV_VAR).ok().filter(|v| !v.trim().is_empty()) {
            config.engine = Some(engine);
        }
        Ok(config)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    HomeDirNotFound,
    IoError(std::io::Error),
    InvalidLine(usize, String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::HomeDirNotFound => write!(f, "Home directory not found"),
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::InvalidLine(line, text) => {
                write!(f, "Invalid setting on line {}: {}", line, text)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
