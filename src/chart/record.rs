use std::fmt;
use std::rc::Rc;

use serde::Deserialize;

use crate::error::ConfigError;

/// One geotagged event. The chart only reads records; the caller owns them.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct SymbolRecord {
    #[serde(alias = "lon")]
    pub longitude: f64,
    #[serde(alias = "lat")]
    pub latitude: f64,
    #[serde(default)]
    pub value: Option<f64>,
    #[serde(default)]
    pub mag: Option<f64>,
    /// Drives the fill color
    #[serde(default)]
    pub depth: f64,
    #[serde(default)]
    pub place: String,
    #[serde(default)]
    pub time: String,
}

impl SymbolRecord {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
            ..Self::default()
        }
    }
}

/// Reads the numeric value that sizes a symbol
#[derive(Clone)]
pub struct ValueAccessor(Rc<dyn Fn(&SymbolRecord) -> Option<f64>>);

impl ValueAccessor {
    pub fn new(f: impl Fn(&SymbolRecord) -> Option<f64> + 'static) -> Self {
        Self(Rc::new(f))
    }

    /// Accessor for a named record field: `value`, `mag` or `depth`
    pub fn field(name: &str) -> Result<Self, ConfigError> {
        match name.trim() {
            "value" => Ok(Self::new(|d| d.value)),
            "mag" | "magnitude" => Ok(Self::new(|d| d.mag)),
            "depth" => Ok(Self::new(|d| Some(d.depth))),
            other => Err(ConfigError::ValueField(other.to_string())),
        }
    }

    #[inline]
    pub fn get(&self, record: &SymbolRecord) -> Option<f64> {
        (self.0)(record)
    }
}

impl Default for ValueAccessor {
    fn default() -> Self {
        Self::new(|d| d.value)
    }
}

impl fmt::Debug for ValueAccessor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ValueAccessor(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_reads_value() {
        let mut d = SymbolRecord::new(1.0, 2.0);
        assert_eq!(ValueAccessor::default().get(&d), None);
        d.value = Some(3.5);
        assert_eq!(ValueAccessor::default().get(&d), Some(3.5));
    }

    #[test]
    fn test_named_fields() {
        let d = SymbolRecord {
            mag: Some(5.2),
            depth: 10.0,
            ..SymbolRecord::new(0.0, 0.0)
        };
        assert_eq!(ValueAccessor::field("mag").unwrap().get(&d), Some(5.2));
        assert_eq!(ValueAccessor::field("depth").unwrap().get(&d), Some(10.0));
        assert!(ValueAccessor::field("place").is_err());
    }

    #[test]
    fn test_custom_accessor() {
        let squared = ValueAccessor::new(|d| d.mag.map(|m| m * m));
        let d = SymbolRecord {
            mag: Some(3.0),
            ..SymbolRecord::default()
        };
        assert_eq!(squared.get(&d), Some(9.0));
    }
}
