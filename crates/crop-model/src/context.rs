//! Context table kinds (pesticide usage, rainfall, temperature).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;
use crate::schema::{AVG_TEMP, COUNTRY, PESTICIDES_TONNES, RAINFALL_MM, YEAR};

/// One of the three per-(country, year) context sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContextKind {
    Pesticides,
    Rainfall,
    Temperature,
}

impl ContextKind {
    pub const ALL: [ContextKind; 3] = [
        ContextKind::Pesticides,
        ContextKind::Rainfall,
        ContextKind::Temperature,
    ];

    /// Tag used on the command line and in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            ContextKind::Pesticides => "pesticides",
            ContextKind::Rainfall => "rainfall",
            ContextKind::Temperature => "temperature",
        }
    }

    /// Canonical name of the value column this kind contributes.
    pub fn value_column(self) -> &'static str {
        match self {
            ContextKind::Pesticides => PESTICIDES_TONNES,
            ContextKind::Rainfall => RAINFALL_MM,
            ContextKind::Temperature => AVG_TEMP,
        }
    }

    /// Raw header to canonical name pairs for this source's file layout.
    pub fn column_mapping(self) -> &'static [(&'static str, &'static str)] {
        match self {
            ContextKind::Pesticides => &[
                ("Area", COUNTRY),
                ("Year", YEAR),
                ("Value", PESTICIDES_TONNES),
            ],
            ContextKind::Rainfall => &[
                ("Area", COUNTRY),
                ("Year", YEAR),
                ("average_rain_fall_mm_per_year", RAINFALL_MM),
            ],
            ContextKind::Temperature => &[],
        }
    }

    /// Conventional raw file name inside a raw data directory.
    pub fn default_file_name(self) -> &'static str {
        match self {
            ContextKind::Pesticides => "pesticides.csv",
            ContextKind::Rainfall => "rainfall.csv",
            ContextKind::Temperature => "temp.csv",
        }
    }
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContextKind {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pesticides" => Ok(ContextKind::Pesticides),
            "rainfall" => Ok(ContextKind::Rainfall),
            "temperature" => Ok(ContextKind::Temperature),
            other => Err(ConfigurationError::UnknownContextType(other.to_string())),
        }
    }
}
