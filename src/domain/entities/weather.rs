use serde::{Deserialize, Serialize};

/// Current weather for a named area, supplied by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherContext {
    pub area: String,
    pub rainfall_mm: f64,
    pub humidity_percent: f64,
    pub temperature_c: f64,
}
