use std::fmt;

/// Temperature in degrees Celsius.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Temperature {
    celsius: f64,
}

impl Temperature {
    /// Builds a temperature from degrees Celsius.
    pub const fn from_degrees_celsius(celsius: f64) -> Self {
        Self { celsius }
    }

    /// Value in degrees Celsius.
    pub const fn degrees_celsius(self) -> f64 {
        self.celsius
    }
}

impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} °C", self.celsius)
    }
}

/// Relative humidity in percent.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct RelativeHumidity {
    percent: f64,
}

impl RelativeHumidity {
    /// Builds a humidity reading from a percentage.
    pub const fn from_percent(percent: f64) -> Self {
        Self { percent }
    }

    /// Value in percent.
    pub const fn percent(self) -> f64 {
        self.percent
    }
}

impl fmt::Display for RelativeHumidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} %RH", self.percent)
    }
}
