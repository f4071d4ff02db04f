// src/zoom_config.rs
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_ACTIVE: bool = false;
pub const DEFAULT_DURATION_MS: f64 = 300.0;
pub const DEFAULT_SCALE: f64 = 2.0;

/// The three reflected fields of a zoom widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Active,
    Duration,
    Scale,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Active, Field::Duration, Field::Scale];

    pub fn attribute_name(self) -> &'static str {
        match self {
            Field::Active => "active",
            Field::Duration => "duration",
            Field::Scale => "scale",
        }
    }

    pub fn from_attribute(name: &str) -> Option<Field> {
        Field::ALL
            .into_iter()
            .find(|field| field.attribute_name() == name)
    }

    /// Boolean fields are presence-based attributes.
    pub fn is_boolean(self) -> bool {
        matches!(self, Field::Active)
    }

    /// Fields that feed the style layer when they change.
    pub fn is_visual(self) -> bool {
        matches!(self, Field::Duration | Field::Scale)
    }

    pub fn observed_attributes() -> Vec<&'static str> {
        Field::ALL.iter().map(|f| f.attribute_name()).collect()
    }
}

/// A loosely typed value handed to a property setter or found in a config layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Unset,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Objects, arrays and anything else no field can hold.
    Other(serde_json::Value),
}

impl PropertyValue {
    /// Truthiness decides between writing and removing the reflected attribute.
    pub fn is_truthy(&self) -> bool {
        match self {
            PropertyValue::Unset => false,
            PropertyValue::Bool(b) => *b,
            PropertyValue::Number(n) => *n != 0.0 && !n.is_nan(),
            PropertyValue::Text(s) => !s.is_empty(),
            PropertyValue::Other(_) => true,
        }
    }

    pub fn to_attribute_text(&self) -> String {
        match self {
            PropertyValue::Unset => String::new(),
            PropertyValue::Bool(b) => b.to_string(),
            PropertyValue::Number(n) => n.to_string(),
            PropertyValue::Text(s) => s.clone(),
            PropertyValue::Other(value) => value.to_string(),
        }
    }

    fn positive_or(&self, default: f64) -> f64 {
        match self {
            PropertyValue::Number(n) => valid_positive(*n).unwrap_or(default),
            PropertyValue::Text(s) => parse_positive(s).unwrap_or(default),
            PropertyValue::Unset | PropertyValue::Bool(_) | PropertyValue::Other(_) => default,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(value: bool) -> Self {
        PropertyValue::Bool(value)
    }
}

impl From<f64> for PropertyValue {
    fn from(value: f64) -> Self {
        PropertyValue::Number(value)
    }
}

impl From<&str> for PropertyValue {
    fn from(value: &str) -> Self {
        PropertyValue::Text(value.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(value: String) -> Self {
        PropertyValue::Text(value)
    }
}

impl<T: Into<PropertyValue>> From<Option<T>> for PropertyValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(PropertyValue::Unset)
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_attribute_text())
    }
}

fn valid_positive(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Parses a numeric attribute; anything that is not a finite number above zero is rejected.
pub fn parse_positive(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().and_then(valid_positive)
}

/// One layer of configuration. Absent fields leave earlier layers untouched and
/// unknown keys are ignored when decoding.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<PropertyValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<PropertyValue>,
}

impl PartialConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(mut self, active: bool) -> Self {
        self.active = Some(PropertyValue::Bool(active));
        self
    }

    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = Some(PropertyValue::Number(duration));
        self
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = Some(PropertyValue::Number(scale));
        self
    }

    pub fn get(&self, field: Field) -> Option<&PropertyValue> {
        match field {
            Field::Active => self.active.as_ref(),
            Field::Duration => self.duration.as_ref(),
            Field::Scale => self.scale.as_ref(),
        }
    }

    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|f| self.get(*f).is_none())
    }

    /// Decodes a JSON object. Blank input and JSON that is not an object
    /// (arrays, strings, numbers, null) decode to an empty layer.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let value: serde_json::Value =
            serde_json::from_str(trimmed).map_err(|e| format!("Failed to parse config: {}", e))?;
        if !value.is_object() {
            log::warn!("config is not a JSON object, ignoring it");
            return Ok(Self::default());
        }
        serde_json::from_value(value).map_err(|e| format!("Failed to parse config: {}", e))
    }
}

/// The authoritative configuration of one widget instance. Every field always
/// holds a valid value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Configuration {
    active: bool,
    duration: f64,
    scale: f64,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            active: DEFAULT_ACTIVE,
            duration: DEFAULT_DURATION_MS,
            scale: DEFAULT_SCALE,
        }
    }
}

impl Configuration {
    /// Defaults, then each layer in order.
    pub fn resolve<'a>(layers: impl IntoIterator<Item = &'a PartialConfig>) -> Self {
        let mut config = Self::default();
        for layer in layers {
            config.merge(layer);
        }
        config
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn default_for(field: Field) -> PropertyValue {
        match field {
            Field::Active => PropertyValue::Bool(DEFAULT_ACTIVE),
            Field::Duration => PropertyValue::Number(DEFAULT_DURATION_MS),
            Field::Scale => PropertyValue::Number(DEFAULT_SCALE),
        }
    }

    /// Current value of a field in its loosely typed form.
    pub fn value(&self, field: Field) -> PropertyValue {
        match field {
            Field::Active => PropertyValue::Bool(self.active),
            Field::Duration => PropertyValue::Number(self.duration),
            Field::Scale => PropertyValue::Number(self.scale),
        }
    }

    /// Overrides field by field with whatever the layer carries.
    pub fn merge(&mut self, layer: &PartialConfig) {
        if let Some(value) = &layer.active {
            self.active = value.is_truthy();
        }
        if let Some(value) = &layer.duration {
            self.duration = value.positive_or(DEFAULT_DURATION_MS);
        }
        if let Some(value) = &layer.scale {
            self.scale = value.positive_or(DEFAULT_SCALE);
        }
    }

    /// Coerces a loosely typed value the way the matching field would store it.
    pub fn coerce(field: Field, value: &PropertyValue) -> PropertyValue {
        match field {
            Field::Active => PropertyValue::Bool(value.is_truthy()),
            Field::Duration => PropertyValue::Number(value.positive_or(DEFAULT_DURATION_MS)),
            Field::Scale => PropertyValue::Number(value.positive_or(DEFAULT_SCALE)),
        }
    }

    /// Applies an attribute value (`None` when the attribute is absent) and
    /// reports whether the stored value changed.
    pub fn format_attribute(&mut self, field: Field, value: Option<&str>) -> bool {
        let before = *self;
        match field {
            Field::Active => self.active = value.is_some(),
            Field::Duration => {
                self.duration = value.and_then(parse_positive).unwrap_or(DEFAULT_DURATION_MS)
            }
            Field::Scale => self.scale = value.and_then(parse_positive).unwrap_or(DEFAULT_SCALE),
        }
        before != *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Configuration::default();
        assert!(!config.active());
        assert_eq!(config.duration(), 300.0);
        assert_eq!(config.scale(), 2.0);
    }

    #[test]
    fn test_numeric_attribute_law() {
        let cases = [
            ("3", 3.0),
            (" 1.5 ", 1.5),
            ("1e1", 10.0),
            ("0", DEFAULT_SCALE),
            ("-4", DEFAULT_SCALE),
            ("", DEFAULT_SCALE),
            ("abc", DEFAULT_SCALE),
            ("NaN", DEFAULT_SCALE),
            ("inf", DEFAULT_SCALE),
        ];
        for (raw, expected) in cases {
            let mut config = Configuration::default();
            config.format_attribute(Field::Scale, Some(raw));
            assert_eq!(config.scale(), expected, "scale={:?}", raw);
        }

        let mut config = Configuration::default();
        config.format_attribute(Field::Duration, Some("500"));
        assert_eq!(config.duration(), 500.0);
        config.format_attribute(Field::Duration, Some("-1"));
        assert_eq!(config.duration(), DEFAULT_DURATION_MS);
    }

    #[test]
    fn test_boolean_attribute_is_presence_based() {
        let mut config = Configuration::default();
        assert!(config.format_attribute(Field::Active, Some("false")));
        assert!(config.active());
        assert!(config.format_attribute(Field::Active, None));
        assert!(!config.active());
        assert!(!config.format_attribute(Field::Active, None));
    }

    #[test]
    fn test_removed_numeric_attribute_restores_default() {
        let mut config = Configuration::default();
        config.format_attribute(Field::Scale, Some("5"));
        assert!(config.format_attribute(Field::Scale, None));
        assert_eq!(config.scale(), DEFAULT_SCALE);
    }

    #[test]
    fn test_layers_override_in_order() {
        let constructor = PartialConfig::new().with_scale(4.0).with_duration(500.0);
        let external = PartialConfig {
            scale: Some(PropertyValue::Text("6".into())),
            ..Default::default()
        };
        let config = Configuration::resolve([&constructor, &external]);
        assert_eq!(config.scale(), 6.0);
        assert_eq!(config.duration(), 500.0);
        assert!(!config.active());
    }

    #[test]
    fn test_invalid_layer_values_fall_back_to_defaults() {
        let layer = PartialConfig {
            active: Some(PropertyValue::Number(1.0)),
            duration: Some(PropertyValue::Bool(true)),
            scale: Some(PropertyValue::Number(f64::NAN)),
        };
        let config = Configuration::resolve([&PartialConfig::new().with_scale(3.0), &layer]);
        assert!(config.active());
        assert_eq!(config.duration(), DEFAULT_DURATION_MS);
        assert_eq!(config.scale(), DEFAULT_SCALE);
    }

    #[test]
    fn test_from_json_ignores_unknown_keys() {
        let layer =
            PartialConfig::from_json(r#"{"scale": "3", "duration": 450, "theme": "dark"}"#).unwrap();
        assert_eq!(layer.scale, Some(PropertyValue::Text("3".into())));
        assert_eq!(layer.duration, Some(PropertyValue::Number(450.0)));
        assert!(layer.active.is_none());

        let config = Configuration::resolve([&layer]);
        assert_eq!(config.scale(), 3.0);
        assert_eq!(config.duration(), 450.0);
    }

    #[test]
    fn test_from_json_null_and_blank() {
        let layer = PartialConfig::from_json(r#"{"active": null}"#).unwrap();
        assert!(layer.is_empty());
        assert!(PartialConfig::from_json("  \n ").unwrap().is_empty());
        assert!(PartialConfig::from_json("{scale:").is_err());
    }

    #[test]
    fn test_from_json_non_object_is_empty_layer() {
        assert!(PartialConfig::from_json("[true, 500, 4]").unwrap().is_empty());
        assert!(PartialConfig::from_json("[1, 2]").unwrap().is_empty());
        assert!(PartialConfig::from_json(r#""scale""#).unwrap().is_empty());
        assert!(PartialConfig::from_json("42").unwrap().is_empty());
        assert!(PartialConfig::from_json("null").unwrap().is_empty());
    }

    #[test]
    fn test_from_json_malformed_field_falls_back_to_default() {
        let layer = PartialConfig::from_json(r#"{"scale": {"x": 1}, "duration": 400}"#).unwrap();
        let config = Configuration::resolve([&PartialConfig::new().with_scale(3.0), &layer]);
        assert_eq!(config.scale(), DEFAULT_SCALE);
        assert_eq!(config.duration(), 400.0);

        let layer = PartialConfig::from_json(r#"{"scale": [3], "active": {}}"#).unwrap();
        let config = Configuration::resolve([&layer]);
        assert_eq!(config.scale(), DEFAULT_SCALE);
        assert!(config.active());
        assert_eq!(
            Configuration::coerce(Field::Duration, &PropertyValue::Other(serde_json::json!([1]))),
            PropertyValue::Number(DEFAULT_DURATION_MS)
        );
    }

    #[test]
    fn test_truthiness() {
        assert!(!PropertyValue::Unset.is_truthy());
        assert!(!PropertyValue::Number(0.0).is_truthy());
        assert!(!PropertyValue::Number(f64::NAN).is_truthy());
        assert!(!PropertyValue::Text(String::new()).is_truthy());
        assert!(PropertyValue::Number(-1.0).is_truthy());
        assert!(PropertyValue::Text("0".into()).is_truthy());
        assert_eq!(PropertyValue::from(3.0).to_attribute_text(), "3");
        assert_eq!(PropertyValue::from(None::<f64>), PropertyValue::Unset);
    }

    #[test]
    fn test_field_names() {
        assert_eq!(Field::observed_attributes(), vec!["active", "duration", "scale"]);
        assert_eq!(Field::from_attribute("scale"), Some(Field::Scale));
        assert_eq!(Field::from_attribute("remoteconfig"), None);
    }
}
