use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::ConfigError;

/// A tracked entity: the operator's own brand or a competitor.
///
/// The name is the join key across every metric family. Matching against
/// overview and history payloads is case-sensitive; the SEO cross-reference
/// compares names case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Brand {
    pub id: Uuid,
    pub name: String,
    pub domain: Option<String>,
    pub is_competitor: bool,
}

impl Brand {
    /// Creates a brand from raw user input.
    ///
    /// The name and domain are trimmed; an empty domain is stored as `None`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if the trimmed name is empty.
    pub fn new(name: &str, domain: Option<&str>, is_competitor: bool) -> Result<Self, ConfigError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        let domain = domain
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToOwned::to_owned);

        Ok(Self {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            domain,
            is_competitor,
        })
    }

    /// Returns the domain only when it is set and non-blank.
    #[must_use]
    pub fn seo_target(&self) -> Option<&str> {
        self.domain
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
    }
}

/// One entry of `config/brands.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandEntry {
    pub name: String,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub competitor: bool,
}

#[derive(Debug, Deserialize)]
pub struct BrandsFile {
    pub brands: Vec<BrandEntry>,
}

impl BrandsFile {
    /// Converts the file entries into [`Brand`] values, preserving order.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] if any entry has a blank name.
    pub fn into_brands(self) -> Result<Vec<Brand>, ConfigError> {
        self.brands
            .iter()
            .map(|entry| Brand::new(&entry.name, entry.domain.as_deref(), entry.competitor))
            .collect()
    }
}

/// Load and validate the brands list from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_brands(path: &Path) -> Result<BrandsFile, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::BrandsFileIo {
        path: path.display().to_string(),
        source: e,
    })?;

    parse_brands(&content)
}

fn parse_brands(content: &str) -> Result<BrandsFile, ConfigError> {
    let brands_file: BrandsFile =
        serde_yaml::from_str(content).map_err(ConfigError::BrandsFileParse)?;

    validate_brands(&brands_file)?;

    Ok(brands_file)
}

fn validate_brands(brands_file: &BrandsFile) -> Result<(), ConfigError> {
    let mut seen_names = HashSet::new();

    for brand in &brands_file.brands {
        let name = brand.name.trim();
        if name.is_empty() {
            return Err(ConfigError::Validation(
                "brand name must be non-empty".to_string(),
            ));
        }

        // Case-insensitive uniqueness.
        if !seen_names.insert(name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate brand name: '{}'",
                brand.name
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "brands_test.rs"]
mod tests;
