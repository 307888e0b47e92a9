// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Interfaces for parsing configuration files and working with a registry
//! configuration

use camino::Utf8Path;
use camino::Utf8PathBuf;
use dropshot::ConfigLogging;
use fedreg_types::validation::ValidationPolicy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for a registry instance
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RegistryConfig {
    /// Server-wide logging configuration.
    pub log: ConfigLogging,
    /// Payload validation knobs (see
    /// [`fedreg_types::validation::ValidationPolicy`]).
    #[serde(default)]
    pub validation: ValidationPolicy,
}

impl RegistryConfig {
    /// Load a `RegistryConfig` from the given TOML file
    ///
    /// This config object can then be used to create a new registry.
    pub fn from_file(path: &Utf8Path) -> Result<RegistryConfig, LoadError> {
        let file_contents = std::fs::read_to_string(path)
            .map_err(|err| LoadError::Io { path: path.into(), err })?;
        let config_parsed: RegistryConfig = toml::from_str(&file_contents)
            .map_err(|err| LoadError::Parse { path: path.into(), err })?;
        Ok(config_parsed)
    }
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("error reading \"{path}\": {err}")]
    Io {
        path: Utf8PathBuf,
        #[source]
        err: std::io::Error,
    },
    #[error("error parsing \"{path}\": {err}")]
    Parse {
        path: Utf8PathBuf,
        #[source]
        err: toml::de::Error,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_config() {
        let config: RegistryConfig = toml::from_str(
            r#"
            [log]
            mode = "stderr-terminal"
            level = "info"

            [validation]
            require_user_groups = true
            "#,
        )
        .unwrap();
        assert!(config.validation.require_user_groups);
        // Unset knobs fall back to their defaults.
        assert!(config.validation.allow_service_level_quotas);
    }

    #[test]
    fn test_validation_table_is_optional() {
        let config: RegistryConfig = toml::from_str(
            r#"
            [log]
            mode = "stderr-terminal"
            level = "info"
            "#,
        )
        .unwrap();
        assert_eq!(config.validation, ValidationPolicy::default());
    }
}
