use core::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// Errors that occur while loading or validating a config file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to open config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate display name {0:?}")]
    DuplicateDisplay(String),
    #[error("display {0:?} has neither a serial nor the is-laptop flag")]
    NoIdentity(String),
    #[error("layout {layout:?} references unknown display {display:?}")]
    UnknownDisplay { layout: String, display: String },
    #[error("config declares no layouts")]
    NoLayouts,
}

/// A named display from the configuration, identified either by its serial
/// number or as the local laptop panel (which sometimes has no serial).
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct DisplayConfig {
    pub name: String,
    #[serde(default)]
    pub serial: Option<u32>,
    #[serde(default, rename = "is-laptop")]
    pub is_laptop: bool,
}

/// Where a display sits relative to another in a layout
#[derive(Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    LeftOf,
    RightOf,
    Above,
    Below,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::LeftOf => write!(f, "left-of"),
            Direction::RightOf => write!(f, "right-of"),
            Direction::Above => write!(f, "above"),
            Direction::Below => write!(f, "below"),
        }
    }
}

#[derive(Error, Debug)]
pub enum ParseDirectionError {
    #[error("Unknown direction: {0}")]
    UnknownDirection(String),
}

impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "left-of" => Ok(Direction::LeftOf),
            "right-of" => Ok(Direction::RightOf),
            "above" => Ok(Direction::Above),
            "below" => Ok(Direction::Below),
            _ => Err(ParseDirectionError::UnknownDirection(s.to_string())),
        }
    }
}

/// A position of one layout display relative to another
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct RelativePosition {
    #[serde(rename = "location")]
    pub direction: Direction,
    pub display: String,
}

/// One display's role within a layout
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Placement {
    pub display: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default, rename = "relative-locations")]
    pub positions: Vec<RelativePosition>,
}

/// A named layout comprising one or more displays with their positions
/// indicated relative to each other.
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Layout {
    pub name: String,
    pub displays: Vec<Placement>,
}

/// An entire config file
#[derive(Deserialize, Debug, Clone)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub displays: Vec<DisplayConfig>,
    pub layouts: Vec<Layout>,
}

impl Config {
    /// Reads and validates a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let file = File::open(path)?;
        let config: Config = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Parses and validates config text (fixtures, tests)
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the cross-references a valid config must satisfy: unique
    /// display names, an identity on every display, and layout placements
    /// that only name declared displays.
    fn validate(&self) -> Result<(), ConfigError> {
        for (i, display) in self.displays.iter().enumerate() {
            if self.displays[..i].iter().any(|d| d.name == display.name) {
                return Err(ConfigError::DuplicateDisplay(display.name.clone()));
            }
            if display.serial.is_none() && !display.is_laptop {
                return Err(ConfigError::NoIdentity(display.name.clone()));
            }
        }
        if self.layouts.is_empty() {
            return Err(ConfigError::NoLayouts);
        }
        let known = |name: &str| self.displays.iter().any(|d| d.name == name);
        for layout in &self.layouts {
            for placement in &layout.displays {
                let mut names = vec![placement.display.as_str()];
                names.extend(placement.positions.iter().map(|p| p.display.as_str()));
                for name in names {
                    if !known(name) {
                        return Err(ConfigError::UnknownDisplay {
                            layout: layout.name.clone(),
                            display: name.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
