//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading country tax
//! configurations from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{EngineError, EngineResult};

use super::types::{CountrySummary, TaxConfig};

/// Loads and provides access to country tax configurations.
///
/// The `ConfigLoader` reads one YAML file per country from a directory
/// and provides methods to look up a country's configuration by code.
///
/// # Directory Structure
///
/// The configuration directory holds one file per country:
/// ```text
/// config/countries/
/// └── bg.yaml   # Bulgaria
/// ```
///
/// Exactly one country must be marked `default: true` unless the
/// directory contains a single country, which is then the default.
///
/// # Example
///
/// ```no_run
/// use salary_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/countries").unwrap();
///
/// let bulgaria = loader.country("BG").unwrap();
/// println!("Currency: {}", bulgaria.currency);
/// println!("Ceiling: {}", bulgaria.social_security_ceiling_monthly);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    countries: HashMap<String, TaxConfig>,
    default_code: String,
}

impl ConfigLoader {
    /// Loads all country configurations from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/countries")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The directory is missing or contains no YAML files
    /// - Any file contains invalid YAML
    /// - Any configuration fails semantic validation
    /// - Two files declare the same country code or both claim the default
    ///
    /// # Example
    ///
    /// ```no_run
    /// use salary_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/countries")?;
    /// # Ok::<(), salary_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let dir_str = path.display().to_string();

        if !path.exists() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(path).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files: Vec<PathBuf> = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;

            let file_path = entry.path();
            if file_path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(file_path);
            }
        }
        files.sort();

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no country files found)", dir_str),
            });
        }

        let mut countries: HashMap<String, TaxConfig> = HashMap::new();
        let mut default_code: Option<String> = None;

        for file_path in &files {
            let config = Self::load_yaml::<TaxConfig>(file_path)?;
            config.validate()?;

            if countries.contains_key(&config.code) {
                return Err(EngineError::InvalidConfig {
                    code: config.code.clone(),
                    message: format!("duplicate country code in {}", file_path.display()),
                });
            }

            if config.is_default {
                if let Some(existing) = &default_code {
                    return Err(EngineError::InvalidConfig {
                        code: config.code.clone(),
                        message: format!("default country is already set to '{}'", existing),
                    });
                }
                default_code = Some(config.code.clone());
            }

            countries.insert(config.code.clone(), config);
        }

        let default_code = match default_code {
            Some(code) => code,
            None => {
                let mut codes: Vec<&str> = countries.keys().map(String::as_str).collect();
                codes.sort_unstable();
                if let [only] = codes.as_slice() {
                    only.to_string()
                } else {
                    return Err(EngineError::InvalidConfig {
                        code: codes.join(", "),
                        message: "exactly one country must be marked as default".to_string(),
                    });
                }
            }
        };

        Ok(Self {
            countries,
            default_code,
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Gets a country configuration by its code.
    ///
    /// # Arguments
    ///
    /// * `code` - The country code (e.g., "BG")
    ///
    /// # Returns
    ///
    /// Returns the configuration if found, or `CountryNotFound` error.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use salary_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/countries")?;
    /// let bulgaria = loader.country("BG")?;
    /// println!("Minimum wage: {}", bulgaria.minimum_wage_monthly);
    /// # Ok::<(), salary_engine::error::EngineError>(())
    /// ```
    pub fn country(&self, code: &str) -> EngineResult<&TaxConfig> {
        self.countries
            .get(code)
            .ok_or_else(|| EngineError::CountryNotFound {
                code: code.to_string(),
            })
    }

    /// Gets a country configuration by code, or the default country when
    /// no code is given.
    pub fn country_or_default(&self, code: Option<&str>) -> EngineResult<&TaxConfig> {
        match code {
            Some(code) => self.country(code),
            None => self.default_country(),
        }
    }

    /// Returns the default country configuration.
    pub fn default_country(&self) -> EngineResult<&TaxConfig> {
        self.country(&self.default_code)
    }

    /// Returns the default country code.
    pub fn default_code(&self) -> &str {
        &self.default_code
    }

    /// Returns summaries of all configured countries, sorted by code.
    pub fn countries(&self) -> Vec<CountrySummary> {
        let mut summaries: Vec<CountrySummary> =
            self.countries.values().map(TaxConfig::summary).collect();
        summaries.sort_by(|a, b| a.code.cmp(&b.code));
        summaries
    }
}
