use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

/// The auto-rotating KPI stacks across the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, EnumIter)]
#[serde(rename_all = "lowercase")]
pub enum WidgetId {
    Revenue,
    Churn,
    Coordination,
    Risk,
    Performance,
}

impl WidgetId {
    /// Only the revenue stack remembers which way it was last flipped.
    pub fn has_flip_direction(self) -> bool {
        matches!(self, WidgetId::Revenue)
    }
}

impl fmt::Display for WidgetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            WidgetId::Revenue => "revenue",
            WidgetId::Churn => "churn",
            WidgetId::Coordination => "coordination",
            WidgetId::Risk => "risk",
            WidgetId::Performance => "performance",
        };
        write!(f, "{label}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlipDirection {
    #[default]
    Forward,
    Backward,
}

impl FlipDirection {
    pub fn step(self) -> i64 {
        match self {
            FlipDirection::Forward => 1,
            FlipDirection::Backward => -1,
        }
    }

    /// Browser wheel convention: positive delta scrolls down, which flips forward.
    pub fn from_wheel(delta_y: f32) -> Self {
        if delta_y > 0.0 {
            FlipDirection::Forward
        } else {
            FlipDirection::Backward
        }
    }
}

/// Layout flavour of the dashboard. One renderer, four presets.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    EnumIter,
    clap::ValueEnum,
)]
pub enum DashboardVariant {
    #[default]
    Classic,
    Minimalist,
    Compact,
    Idp,
}

impl DashboardVariant {
    /// Maps a URL path to a variant. Unknown paths fall back to the classic layout.
    pub fn from_path(path: &str) -> Self {
        match path.trim_end_matches('/') {
            "/minimalist" => DashboardVariant::Minimalist,
            "/minimalist2" => DashboardVariant::Compact,
            "/idp" => DashboardVariant::Idp,
            _ => DashboardVariant::Classic,
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            DashboardVariant::Classic => "/",
            DashboardVariant::Minimalist => "/minimalist",
            DashboardVariant::Compact => "/minimalist2",
            DashboardVariant::Idp => "/idp",
        }
    }
}

impl fmt::Display for DashboardVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardVariant::Classic => write!(f, "Classic"),
            DashboardVariant::Minimalist => write!(f, "Minimalist"),
            DashboardVariant::Compact => write!(f, "Compact"),
            DashboardVariant::Idp => write!(f, "IDP"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn variant_paths_round_trip() {
        for variant in DashboardVariant::iter() {
            assert_eq!(DashboardVariant::from_path(variant.path()), variant);
        }
        assert_eq!(DashboardVariant::from_path("/minimalist2/"), DashboardVariant::Compact);
        assert_eq!(DashboardVariant::from_path("/nowhere"), DashboardVariant::Classic);
        assert_eq!(DashboardVariant::from_path(""), DashboardVariant::Classic);
    }

    #[test]
    fn wheel_direction() {
        assert_eq!(FlipDirection::from_wheel(12.0), FlipDirection::Forward);
        assert_eq!(FlipDirection::from_wheel(-3.0), FlipDirection::Backward);
        assert_eq!(FlipDirection::Backward.step(), -1);
    }
}
