//! Named building outlines.
use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::building::outline::Outline;
use crate::building::presets::{default_building, experimental_building, skyscraper};
use crate::error::{Error, Result};

/// Outlines keyed by building id, iterated in id order.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BuildingTable {
    buildings: BTreeMap<String, Outline>,
}

impl BuildingTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// The stock buildings: `default`, `experimental` and a ten-floor `scraper`.
    pub fn standard() -> Result<Self> {
        let mut table = Self::new();
        table.insert("default", default_building())?;
        table.insert("experimental", experimental_building())?;
        table.insert("scraper", skyscraper(10, 15, 9)?)?;
        Ok(table)
    }

    /// Adds or replaces a building after validating its outline.
    pub fn insert(&mut self, id: impl Into<String>, outline: Outline) -> Result<()> {
        let id = id.into();
        outline
            .validate()
            .map_err(|e| Error::InvalidConfig(format!("building '{id}': {e}")))?;
        self.buildings.insert(id, outline);
        Ok(())
    }

    pub fn with_building(mut self, id: impl Into<String>, outline: Outline) -> Result<Self> {
        self.insert(id, outline)?;
        Ok(self)
    }

    pub fn get(&self, id: &str) -> Result<&Outline> {
        self.buildings
            .get(id)
            .ok_or_else(|| Error::UnknownBuilding { id: id.to_owned() })
    }

    pub fn contains(&self, id: &str) -> bool {
        self.buildings.contains_key(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Outline)> {
        self.buildings.iter().map(|(id, o)| (id.as_str(), o))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.buildings.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.buildings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buildings.is_empty()
    }

    /// Validates every outline in the table.
    pub fn validate(&self) -> Result<()> {
        for (id, outline) in &self.buildings {
            outline
                .validate()
                .map_err(|e| Error::InvalidConfig(format!("building '{id}': {e}")))?;
        }
        Ok(())
    }

    /// Parses a RON map of building id to floor list and validates it.
    #[cfg(feature = "ron")]
    pub fn from_ron_str(s: &str) -> Result<Self> {
        let table: Self = ron::from_str(s)?;
        table.validate()?;
        tracing::debug!("Loaded {} buildings from RON.", table.len());
        Ok(table)
    }

    /// Reads a RON building table from a file.
    #[cfg(feature = "ron")]
    pub fn from_ron_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    #[cfg(feature = "ron")]
    pub fn to_ron_string(&self) -> Result<String> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| Error::Other(e.to_string()))
    }
}
