//! Outgoing query-string normalization.

use std::borrow::Cow;

use radar_core::DataSource;

/// Group selector shared by the brand-radar overview and history endpoints.
///
/// `brand` and `competitors` are comma-joined name lists. Any field left
/// empty is omitted from the request.
#[derive(Debug, Clone, Copy)]
pub struct BrandFilter<'a> {
    pub data_source: DataSource,
    pub brand: &'a str,
    pub competitors: &'a str,
    pub country: &'a str,
}

impl<'a> BrandFilter<'a> {
    #[must_use]
    pub fn new(data_source: DataSource) -> Self {
        Self {
            data_source,
            brand: "",
            competitors: "",
            country: "",
        }
    }

    #[must_use]
    pub fn brand(mut self, brand: &'a str) -> Self {
        self.brand = brand;
        self
    }

    #[must_use]
    pub fn competitors(mut self, competitors: &'a str) -> Self {
        self.competitors = competitors;
        self
    }

    #[must_use]
    pub fn country(mut self, country: &'a str) -> Self {
        self.country = country;
        self
    }
}

/// Applies the transmission rules to a raw parameter list.
///
/// Pairs with an empty value are dropped. A non-empty `country` is always
/// lower-cased. Order of the surviving pairs is preserved.
pub(crate) fn normalize_params<'a>(params: &[(&'a str, &'a str)]) -> Vec<(&'a str, Cow<'a, str>)> {
    params
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|&(key, value)| {
            if key == "country" {
                (key, Cow::Owned(value.to_lowercase()))
            } else {
                (key, Cow::Borrowed(value))
            }
        })
        .collect()
}
