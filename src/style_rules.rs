// src/style_rules.rs
use crate::geometry::TransformOrigin;
use crate::zoom_config::{Configuration, DEFAULT_DURATION_MS, DEFAULT_SCALE};
use serde::Serialize;

/// Slot the host's `<img>` must carry.
pub const VISION_SLOT: &str = "msc-zoom-vision";

/// Class of the internal container that receives the dynamic rule.
pub const BASIS_SELECTOR: &str = ".main--basis";

pub const PROP_SCALE_ACTIVE: &str = "--scale-active";
pub const PROP_TRANSFORM_ORIGIN: &str = "--transform-origin";
pub const PROP_DURATION: &str = "--duration";

/// A single `selector { name: value; ... }` rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleRule {
    pub selector: String,
    pub declarations: Vec<(String, String)>,
}

impl StyleRule {
    pub fn new(selector: impl Into<String>) -> Self {
        Self {
            selector: selector.into(),
            declarations: Vec::new(),
        }
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.declarations.push((name.into(), value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.declarations
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn css_text(&self) -> String {
        let body: String = self
            .declarations
            .iter()
            .map(|(name, value)| format!("{}:{};", name, value))
            .collect();
        format!("{}{{{}}}", self.selector, body)
    }
}

/// The values pushed into the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VisualParameters {
    pub scale: f64,
    pub duration: f64,
    pub origin: TransformOrigin,
}

impl Default for VisualParameters {
    fn default() -> Self {
        Self {
            scale: DEFAULT_SCALE,
            duration: DEFAULT_DURATION_MS,
            origin: TransformOrigin::CENTER,
        }
    }
}

/// A partial change; omitted fields keep their current values.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct VisualUpdate {
    pub scale: Option<f64>,
    pub duration: Option<f64>,
    pub origin: Option<TransformOrigin>,
}

impl VisualUpdate {
    pub fn origin(origin: TransformOrigin) -> Self {
        Self {
            origin: Some(origin),
            ..Self::default()
        }
    }
}

impl VisualParameters {
    /// Scale and duration default to the configuration, origin to the last applied one.
    pub fn updated(&self, update: VisualUpdate, config: &Configuration) -> Self {
        Self {
            scale: update.scale.unwrap_or(config.scale()),
            duration: update.duration.unwrap_or(config.duration()),
            origin: update.origin.unwrap_or(self.origin),
        }
    }

    pub fn to_rule(&self) -> StyleRule {
        StyleRule::new(BASIS_SELECTOR)
            .with(PROP_SCALE_ACTIVE, self.scale.to_string())
            .with(PROP_TRANSFORM_ORIGIN, self.origin.to_string())
            .with(PROP_DURATION, format!("{}ms", self.duration))
    }
}

/// Shadow tree of a widget: the base stylesheet followed by the container.
pub fn shadow_markup() -> String {
    format!(
        r#"<style>
:host{{position:relative;inline-size:100%;block-size:100%;display:block;}}

.main {{
  --scale-normal: 1;
  --scale-active: {scale};
  --scale: var(--scale-normal);

  --duration: {duration}ms;
  --transform-origin: 50% 50%;

  --cursor-zoom-in: zoom-in;
  --cursor-zoom-out: zoom-out;
  --cursor: var(--cursor-zoom-in);
}}
.main{{position:relative;inline-size:100%;block-size:100%;overflow:hidden;cursor:var(--cursor);pointer-events:auto;}}
::slotted(img){{inline-size:100%;block-size:100%;display:block;transition:transform var(--duration) ease-in-out;transform:scale(var(--scale));transform-origin:var(--transform-origin);will-change:transform;}}

.main--basis{{}}
:host([active]) .main {{
  --cursor: var(--cursor-zoom-out);
  --scale: var(--scale-active);
}}
</style>

<div class="main main--basis">
  <slot name="{slot}"></slot>
</div>
"#,
        scale = DEFAULT_SCALE,
        duration = DEFAULT_DURATION_MS,
        slot = VISION_SLOT,
    )
}
