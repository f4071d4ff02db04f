// src/widget.rs
use crate::geometry::{compute_origin, PagePoint};
use crate::host::{NaturalSize, ZoomEvent, ZoomHost, ZoomMode};
use crate::lifecycle::AbortScope;
use crate::style_rules::{VisualParameters, VisualUpdate};
use crate::zoom_config::{Configuration, Field, PartialConfig, PropertyValue};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionState {
    Inactive,
    Active,
}

/// One zoom-on-click widget bound to its host element.
///
/// Configuration is only changed through [`Configuration::merge`] and
/// [`Configuration::format_attribute`]; the interaction state is read straight
/// from the `active` field so the two cannot diverge.
pub struct ZoomWidget<H: ZoomHost> {
    pub(crate) host: H,
    pub(crate) config: Configuration,
    visual: VisualParameters,
    // property writes that arrived before the upgrade ran
    pending: BTreeMap<Field, PropertyValue>,
    upgraded: bool,
    pub(crate) source: Option<H::Source>,
    pub(crate) natural_size: Option<NaturalSize>,
    pub(crate) scope: Option<AbortScope>,
    pub(crate) epoch: u64,
    pub(crate) scopes_created: u64,
    pub(crate) removed: bool,
}

impl<H: ZoomHost> ZoomWidget<H> {
    pub fn new(host: H, config: PartialConfig) -> Self {
        Self {
            host,
            config: Configuration::resolve([&config]),
            visual: VisualParameters::default(),
            pending: BTreeMap::new(),
            upgraded: false,
            source: None,
            natural_size: None,
            scope: None,
            epoch: 0,
            scopes_created: 0,
            removed: false,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    pub fn visual_parameters(&self) -> &VisualParameters {
        &self.visual
    }

    /// The slotted image, once an attach has loaded it.
    pub fn source(&self) -> Option<&H::Source> {
        self.source.as_ref()
    }

    pub fn natural_size(&self) -> Option<NaturalSize> {
        self.natural_size
    }

    pub fn is_upgraded(&self) -> bool {
        self.upgraded
    }

    pub fn is_removed(&self) -> bool {
        self.removed
    }

    pub fn state(&self) -> InteractionState {
        if self.active() {
            InteractionState::Active
        } else {
            InteractionState::Inactive
        }
    }

    // ------ PROPERTIES ------

    pub fn active(&self) -> bool {
        match self.property(Field::Active) {
            PropertyValue::Bool(b) => b,
            _ => self.config.active(),
        }
    }

    pub fn scale(&self) -> f64 {
        match self.property(Field::Scale) {
            PropertyValue::Number(n) => n,
            _ => self.config.scale(),
        }
    }

    pub fn duration(&self) -> f64 {
        match self.property(Field::Duration) {
            PropertyValue::Number(n) => n,
            _ => self.config.duration(),
        }
    }

    fn property(&self, field: Field) -> PropertyValue {
        match self.pending.get(&field) {
            Some(value) => Configuration::coerce(field, value),
            None => self.config.value(field),
        }
    }

    pub fn set_active(&mut self, value: impl Into<PropertyValue>) {
        self.set_property(Field::Active, value.into());
    }

    pub fn set_scale(&mut self, value: impl Into<PropertyValue>) {
        self.set_property(Field::Scale, value.into());
    }

    pub fn set_duration(&mut self, value: impl Into<PropertyValue>) {
        self.set_property(Field::Duration, value.into());
    }

    /// Canonical setter. Before the upgrade the value is parked; afterwards it
    /// is reflected to the attribute and formatted back into the configuration.
    pub fn set_property(&mut self, field: Field, value: PropertyValue) {
        if !self.upgraded {
            self.pending.insert(field, value);
            return;
        }
        self.reflect(field, &value);
    }

    fn reflect(&mut self, field: Field, value: &PropertyValue) {
        let name = field.attribute_name();
        let current = self.host.attribute(name);
        let next = if !value.is_truthy() {
            None
        } else if field.is_boolean() {
            // presence is all that matters; keep whatever text is already there
            Some(current.clone().unwrap_or_default())
        } else {
            Some(value.to_attribute_text())
        };

        if current != next {
            match &next {
                Some(text) => self.host.set_attribute(name, text),
                None => self.host.remove_attribute(name),
            }
        }
        self.attribute_changed(name, next.as_deref());
    }

    /// Attribute mutation entry point. Unobserved names are ignored, as is
    /// anything that arrives before the upgrade.
    pub fn attribute_changed(&mut self, name: &str, value: Option<&str>) {
        let Some(field) = Field::from_attribute(name) else {
            return;
        };
        if !self.upgraded {
            return;
        }
        let changed = self.config.format_attribute(field, value);
        if changed && field.is_visual() {
            self.apply_visual(VisualUpdate::default());
        }
    }

    /// Replays parked writes, or seeds from attribute/configuration, once per
    /// field, then pushes the resolved scale and duration to the style layer.
    pub fn upgrade(&mut self) {
        self.upgraded = true;
        for field in Field::ALL {
            self.upgrade_property(field);
        }
        self.apply_visual(VisualUpdate::default());
    }

    fn upgrade_property(&mut self, field: Field) {
        let name = field.attribute_name();
        let value = match self.pending.remove(&field) {
            Some(value) => value,
            None if field.is_boolean() => {
                PropertyValue::Bool(self.host.has_attribute(name) || self.config.active())
            }
            None => self
                .host
                .attribute(name)
                .map(PropertyValue::Text)
                .unwrap_or_else(|| self.config.value(field)),
        };
        self.reflect(field, &value);
    }

    // ------ STYLE ------

    pub fn apply_visual(&mut self, update: VisualUpdate) {
        self.visual = self.visual.updated(update, &self.config);
        self.host.insert_rule(&self.visual.to_rule());
    }

    // ------ INTERACTION ------

    /// Runs the click transition and returns the notification to fire.
    pub fn transition_on_click(&mut self, pointer: PagePoint) -> ZoomEvent {
        if self.active() {
            self.set_active(false);
        } else {
            let origin = compute_origin(
                pointer,
                self.host.bounding_box(),
                self.host.scroll_offset(),
            );
            self.apply_visual(VisualUpdate::origin(origin));
            self.set_active(true);
        }
        ZoomEvent::new(ZoomMode::from_active(self.active()))
    }

    /// Sets the state directly, or flips it when `force` is `None`. No
    /// notification is fired and the origin is left alone.
    pub fn toggle(&mut self, force: Option<bool>) {
        let next = force.unwrap_or(!self.active());
        self.set_active(next);
    }
}
