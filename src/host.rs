// src/host.rs
//
// The seam between the widget core and whatever element hosts it. The browser
// implementation lives in `dom_host`; tests drive the core through a fake.

use crate::error::ZoomError;
use crate::geometry::{BoundingBox, PagePoint, ScrollOffset};
use crate::style_rules::StyleRule;
use crate::zoom_config::PartialConfig;
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::future::Future;
use std::pin::Pin;

/// Name of the notification fired on every click transition.
pub const ZOOM_EVENT: &str = "msc-zoom-click";

pub type LocalFuture<T> = Pin<Box<dyn Future<Output = T>>>;

/// Keeps a listener registered for as long as it is alive.
pub type Registration = Box<dyn Any>;

pub type ClickHandler = Box<dyn FnMut(PagePoint)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ZoomMode {
    ZoomIn,
    ZoomOut,
}

impl ZoomMode {
    pub fn from_active(active: bool) -> Self {
        if active {
            ZoomMode::ZoomIn
        } else {
            ZoomMode::ZoomOut
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoomMode::ZoomIn => "zoom-in",
            ZoomMode::ZoomOut => "zoom-out",
        }
    }
}

/// Payload of [`ZOOM_EVENT`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoomEvent {
    pub mode: ZoomMode,
}

impl ZoomEvent {
    pub fn new(mode: ZoomMode) -> Self {
        Self { mode }
    }
}

/// Natural dimensions reported by a successful image probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NaturalSize {
    pub width: u32,
    pub height: u32,
}

pub trait ZoomHost: Clone + 'static {
    /// Handle to the slotted image.
    type Source: Clone + 'static;

    /// Tag used to prefix warnings.
    fn tag_name(&self) -> String;

    fn attribute(&self, name: &str) -> Option<String>;
    fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name).is_some()
    }
    fn set_attribute(&self, name: &str, value: &str);
    fn remove_attribute(&self, name: &str);

    fn bounding_box(&self) -> BoundingBox;
    fn scroll_offset(&self) -> ScrollOffset;

    /// External config layer for this element.
    fn fetch_config(&self) -> LocalFuture<Result<PartialConfig, String>>;

    /// Finds the slotted image and prepares it for cross-origin use.
    fn locate_source(&self) -> Result<Self::Source, ZoomError>;
    fn probe_source(&self, source: &Self::Source) -> LocalFuture<Result<NaturalSize, ZoomError>>;

    /// Replaces any rule with the same selector in the instance's stylesheet.
    fn insert_rule(&self, rule: &StyleRule);
    fn dispatch(&self, event: &ZoomEvent);

    /// Detaches the element from its parent.
    fn remove(&self);

    fn listen_clicks(&self, on_click: ClickHandler) -> Registration;
}
