//! Product metadata records cached from the remote catalog.

use serde::{Deserialize, Serialize};

/// Number of declared bands used when a request carries no usable band
/// list: the default is the prefix of this length.
pub const DEFAULT_BAND_COUNT: usize = 2;

/// A band/variable declared by a product. Remote catalogs are inconsistent
/// about which of `name`/`id` carries the band identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variable {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl Variable {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            id: None,
        }
    }

    /// The usable band name: `name` wins over `id`; empty strings count
    /// as absent.
    pub fn band_name(&self) -> Option<&str> {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One cached product record, keyed by the remote collection id.
///
/// Written only by the offline sync job; read-only at request time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "productName")]
    pub product_name: String,
    #[serde(rename = "friendlyName")]
    pub friendly_name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(rename = "platformId")]
    pub platform_id: Option<String>,
}

impl ProductRecord {
    /// Band names declared by this product, in declaration order, with
    /// unusable entries filtered out.
    pub fn declared_bands(&self) -> Vec<String> {
        self.variables
            .iter()
            .filter_map(|v| v.band_name().map(str::to_string))
            .collect()
    }

    /// The default band prefix requested when the caller supplies none.
    pub fn default_bands(&self) -> Vec<String> {
        let mut bands = self.declared_bands();
        bands.truncate(DEFAULT_BAND_COUNT);
        bands
    }
}
