use std::{fs, path::Path};

use tracing::debug;

use super::{Config, ConfigError};

/// Reads `key = value` settings from the rc file.
pub struct ConfigLoader<'a> {
    rc_path: &'a Path,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(rc_path: &'a Path) -> Self {
        Self { rc_path }
    }

    pub fn load_into(&self, config: &mut Config) -> Result<(), ConfigError> {
        if self.rc_path.exists() {
            let content = fs::read_to_string(self.rc_path)?;
            for (number, line) in content.lines().enumerate() {
                self.process_line(line, config)
                    .map_err(|e| match e {
                        ConfigError::InvalidLine(_, text) => {
                            ConfigError::InvalidLine(number + 1, text)
                        }
                        other => other,
                    })?;
            }
            debug!(path = %self.rc_path.display(), "loaded rc file");
        }
        Ok(())
    }

    fn process_line(&self, line: &str, config: &mut Config) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let (key, value) = line
            .split_once('=')
            .ok_or_else(|| ConfigError::InvalidLine(0, line.to_string()))?;
        let value = unquote(value.trim());

        match key.trim() {
            "engine" => config.engine = Some(value.to_string()).filter(|v| !v.is_empty()),
            "prompt" => config.prompt = value.to_string(),
            other => debug!(key = other, "ignoring unknown rc setting"),
        }
        Ok(())
    }
}

/// Strips one pair of matching surrounding quotes. Quotes let a prompt keep
/// its trailing space.
fn unquote(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
