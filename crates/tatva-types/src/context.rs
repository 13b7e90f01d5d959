//! Per-session view state.
//!
//! Theme, view mode and the active property category live here as explicit
//! fields handed to the controllers that need them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The category value that disables filtering.
pub const ALL_CATEGORIES: &str = "All";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("invalid theme: '{other}'")),
        }
    }
}

/// Which panels the front end shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    /// Listings and map side by side.
    #[default]
    Split,
    List,
    Map,
}

impl ViewMode {
    pub fn shows_list(self) -> bool {
        matches!(self, ViewMode::Split | ViewMode::List)
    }

    pub fn shows_map(self) -> bool {
        matches!(self, ViewMode::Split | ViewMode::Map)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ViewMode::Split => write!(f, "split"),
            ViewMode::List => write!(f, "list"),
            ViewMode::Map => write!(f, "map"),
        }
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "split" => Ok(ViewMode::Split),
            "list" => Ok(ViewMode::List),
            "map" => Ok(ViewMode::Map),
            other => Err(format!("invalid view mode: '{other}'")),
        }
    }
}

/// View state owned by one search session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub theme: Theme,
    pub view_mode: ViewMode,
    /// Property-type filter; [`ALL_CATEGORIES`] shows everything.
    pub category: String,
}

impl SessionContext {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            view_mode: ViewMode::default(),
            category: ALL_CATEGORIES.to_string(),
        }
    }
}
