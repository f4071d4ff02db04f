// src/capabilities.rs
use std::cell::OnceCell;
use wasm_bindgen::JsValue;

/// Host environment features the widget depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Capabilities {
    pub custom_elements: bool,
    pub shadow_dom: bool,
    pub template: bool,
}

impl Capabilities {
    pub fn is_supported(&self) -> bool {
        self.custom_elements && self.shadow_dom && self.template
    }

    /// Names of the missing features, for the warning.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if !self.custom_elements {
            missing.push("customElements");
        }
        if !self.shadow_dom {
            missing.push("shadowDOM");
        }
        if !self.template {
            missing.push("template");
        }
        missing
    }

    pub fn detect() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let custom_elements = has(&window, "customElements");
        let shadow_dom = js_sys::Reflect::get(&js_sys::global(), &JsValue::from_str("Element"))
            .and_then(|ctor| js_sys::Reflect::get(&ctor, &JsValue::from_str("prototype")))
            .map(|proto| has(&proto, "attachShadow"))
            .unwrap_or(false);
        let template = window
            .document()
            .and_then(|doc| doc.create_element("template").ok())
            .map(|el| has(&el, "content"))
            .unwrap_or(false);

        Self {
            custom_elements,
            shadow_dom,
            template,
        }
    }
}

fn has(target: &JsValue, name: &str) -> bool {
    js_sys::Reflect::has(target, &JsValue::from_str(name)).unwrap_or(false)
}

thread_local! {
    static DETECTED: OnceCell<Capabilities> = const { OnceCell::new() };
}

/// Detected once per thread, then cached.
pub fn capabilities() -> Capabilities {
    DETECTED.with(|cell| *cell.get_or_init(Capabilities::detect))
}
