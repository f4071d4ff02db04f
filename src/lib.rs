// src/lib.rs
//! Zoom-on-click image widget: a slotted image that toggles between normal and
//! magnified views, anchored at the clicked point.
//!
//! The core (`zoom_config`, `widget`, `geometry`, `style_rules`, `lifecycle`)
//! is generic over [`host::ZoomHost`]; `dom_host` and `element` bind it to a
//! real element, and `components` wraps it for yew.

pub mod capabilities;
pub mod components;
pub mod dom_host;
pub mod element;
pub mod error;
pub mod geometry;
pub mod host;
pub mod lifecycle;
pub mod remote_config;
pub mod style_rules;
pub mod utils;
pub mod widget;
pub mod zoom_config;

#[cfg(test)]
mod testing;

pub use element::ZoomElement;
pub use error::ZoomError;
pub use host::{ZoomEvent, ZoomHost, ZoomMode, ZOOM_EVENT};
pub use widget::{InteractionState, ZoomWidget};
pub use zoom_config::{Configuration, PartialConfig, PropertyValue};
