//! Condition keys and their visual representation.
//!
//! The provider reports a short top-level condition ("Clear", "Rain", ...).
//! Its lower-cased form is the key used to pick an icon and a background
//! gradient. Lookup is total: unknown keys get the clear-sky visuals.

use serde::Serialize;

/// Lower-cased provider condition, e.g. `"clouds"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ConditionKey(String);

impl ConditionKey {
    pub fn from_provider(condition: &str) -> Self {
        Self(condition.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn visual(&self) -> Visual {
        visual_for(self)
    }
}

/// Three colour stops, top-left to bottom-right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Gradient {
    pub from: &'static str,
    pub via: &'static str,
    pub to: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Visual {
    pub icon: &'static str,
    pub gradient: Gradient,
}

pub const DEFAULT_VISUAL: Visual = Visual {
    icon: "sun",
    gradient: Gradient {
        from: "orange-400",
        via: "pink-500",
        to: "red-500",
    },
};

const VISUALS: &[(&str, Visual)] = &[
    ("clear", DEFAULT_VISUAL),
    (
        "clouds",
        Visual {
            icon: "cloud",
            gradient: Gradient {
                from: "gray-400",
                via: "gray-600",
                to: "gray-800",
            },
        },
    ),
    (
        "rain",
        Visual {
            icon: "cloud-rain",
            gradient: Gradient {
                from: "blue-400",
                via: "blue-600",
                to: "blue-800",
            },
        },
    ),
    (
        "snow",
        Visual {
            icon: "snowflake",
            gradient: Gradient {
                from: "blue-200",
                via: "white",
                to: "gray-300",
            },
        },
    ),
    (
        "thunderstorm",
        Visual {
            icon: "zap",
            gradient: Gradient {
                from: "purple-600",
                via: "purple-800",
                to: "gray-900",
            },
        },
    ),
];

/// Icon and gradient for a condition key.
pub fn visual_for(key: &ConditionKey) -> Visual {
    VISUALS
        .iter()
        .find(|(name, _)| *name == key.as_str())
        .map(|(_, visual)| *visual)
        .unwrap_or(DEFAULT_VISUAL)
}

/// Keys with a dedicated entry in the lookup table.
pub fn known_keys() -> impl Iterator<Item = &'static str> {
    VISUALS.iter().map(|(name, _)| *name)
}
