use serde::{Deserialize, Serialize};

/// Display unit for temperatures. Stored values are always Celsius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn toggle(self) -> Self {
        match self {
            Self::Celsius => Self::Fahrenheit,
            Self::Fahrenheit => Self::Celsius,
        }
    }

    pub fn is_celsius(self) -> bool {
        self == Self::Celsius
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Celsius => "C",
            Self::Fahrenheit => "F",
        }
    }

    /// Integer temperature for display in this unit.
    pub fn display(self, celsius: f64) -> i64 {
        to_display_temp(celsius, self.is_celsius())
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Celsius => "celsius",
            Self::Fahrenheit => "fahrenheit",
        })
    }
}

/// Converts a stored Celsius value to the integer shown on screen.
///
/// Rounds half-up, so `-2.5` displays as `-2` and `2.5` as `3`.
pub fn to_display_temp(celsius: f64, use_celsius: bool) -> i64 {
    let value = if use_celsius {
        celsius
    } else {
        celsius * 9.0 / 5.0 + 32.0
    };
    round_half_up(value)
}

fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}
