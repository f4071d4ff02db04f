// src/dom_host.rs
use crate::capabilities::capabilities;
use crate::error::ZoomError;
use crate::geometry::{BoundingBox, ScrollOffset};
use crate::host::{ClickHandler, LocalFuture, NaturalSize, Registration, ZoomEvent, ZoomHost, ZOOM_EVENT};
use crate::remote_config;
use crate::style_rules::{shadow_markup, StyleRule, VISION_SLOT};
use crate::utils::{class_to_tag_name, js_error, pointer, scroll_offset};
use crate::zoom_config::PartialConfig;
use gloo::events::EventListener;
use gloo::utils::document;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    CssStyleRule, CssStyleSheet, CustomEvent, CustomEventInit, Event, HtmlElement,
    HtmlImageElement, HtmlStyleElement, HtmlTemplateElement, MouseEvent, ShadowRoot,
    ShadowRootInit, ShadowRootMode,
};

pub const WIDGET_CLASS: &str = "MscZoom";

thread_local! {
    static TEMPLATE: Option<HtmlTemplateElement> = build_template();
}

fn build_template() -> Option<HtmlTemplateElement> {
    let template = document()
        .create_element("template")
        .ok()?
        .dyn_into::<HtmlTemplateElement>()
        .ok()?;
    template.set_inner_html(&shadow_markup());
    Some(template)
}

fn dom_err(error: JsValue) -> ZoomError {
    ZoomError::Dom(js_error(error))
}

/// A widget host backed by a real element and its shadow root.
#[derive(Clone)]
pub struct DomHost {
    element: HtmlElement,
    style: HtmlStyleElement,
}

impl DomHost {
    /// Builds the shadow tree (or reuses one from an earlier connect).
    pub fn new(element: HtmlElement) -> Result<Self, ZoomError> {
        let caps = capabilities();
        if !caps.is_supported() {
            return Err(ZoomError::Unsupported(caps.missing().join(", ")));
        }

        let shadow = match element.shadow_root() {
            Some(shadow) => shadow,
            None => {
                let shadow = element
                    .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
                    .map_err(dom_err)?;
                stamp_template(&shadow)?;
                shadow
            }
        };

        let style = shadow
            .query_selector("style")
            .map_err(dom_err)?
            .and_then(|el| el.dyn_into::<HtmlStyleElement>().ok())
            .ok_or_else(|| ZoomError::Dom("shadow root has no <style>".into()))?;

        Ok(Self { element, style })
    }

    pub fn element(&self) -> &HtmlElement {
        &self.element
    }

    fn sheet(&self) -> Option<CssStyleSheet> {
        self.style
            .sheet()
            .and_then(|sheet| sheet.dyn_into::<CssStyleSheet>().ok())
    }

    /// CSS text of every rule in the owned stylesheet.
    pub fn rule_texts(&self) -> Vec<String> {
        let Some(rules) = self.sheet().and_then(|s| s.css_rules().ok()) else {
            return Vec::new();
        };
        (0..rules.length())
            .filter_map(|i| rules.get(i))
            .map(|rule| rule.css_text())
            .collect()
    }
}

fn stamp_template(shadow: &ShadowRoot) -> Result<(), ZoomError> {
    let content = TEMPLATE
        .with(|template| template.as_ref().map(|t| t.content()))
        .ok_or_else(|| ZoomError::Unsupported("template".into()))?;
    let fragment = content.clone_node_with_deep(true).map_err(dom_err)?;
    shadow.append_child(&fragment).map_err(dom_err)?;
    Ok(())
}

impl ZoomHost for DomHost {
    type Source = HtmlImageElement;

    fn tag_name(&self) -> String {
        class_to_tag_name(WIDGET_CLASS)
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.element.get_attribute(name)
    }

    fn has_attribute(&self, name: &str) -> bool {
        self.element.has_attribute(name)
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let _ = self.element.set_attribute(name, value);
    }

    fn remove_attribute(&self, name: &str) {
        let _ = self.element.remove_attribute(name);
    }

    fn bounding_box(&self) -> BoundingBox {
        let rect = self.element.get_bounding_client_rect();
        BoundingBox::new(rect.x(), rect.y(), rect.width(), rect.height())
    }

    fn scroll_offset(&self) -> ScrollOffset {
        scroll_offset()
    }

    fn fetch_config(&self) -> LocalFuture<Result<PartialConfig, String>> {
        let element = self.element.clone();
        Box::pin(async move { remote_config::resolve(&element).await })
    }

    fn locate_source(&self) -> Result<HtmlImageElement, ZoomError> {
        let selector = format!(r#"img[slot="{}"]"#, VISION_SLOT);
        let source = self
            .element
            .query_selector(&selector)
            .map_err(dom_err)?
            .and_then(|el| el.dyn_into::<HtmlImageElement>().ok())
            .ok_or(ZoomError::SourceMissing)?;
        // Allowing cross-origin use of images and canvas
        source.set_cross_origin(Some("anonymous"));
        Ok(source)
    }

    fn probe_source(&self, source: &HtmlImageElement) -> LocalFuture<Result<NaturalSize, ZoomError>> {
        let src = source.src();
        Box::pin(async move { probe_image(src).await })
    }

    fn insert_rule(&self, rule: &StyleRule) {
        let Some(sheet) = self.sheet() else {
            log::warn!("{}: stylesheet unavailable", self.tag_name());
            return;
        };
        if let Err(e) = replace_rule(&sheet, rule) {
            log::warn!("{}: failed to apply style rule: {}", self.tag_name(), js_error(e));
        }
    }

    fn dispatch(&self, event: &ZoomEvent) {
        let detail = serde_json::to_string(event)
            .ok()
            .and_then(|json| js_sys::JSON::parse(&json).ok())
            .unwrap_or(JsValue::NULL);

        let init = CustomEventInit::new();
        init.set_bubbles(true);
        init.set_composed(true);
        init.set_detail(&detail);

        match CustomEvent::new_with_event_init_dict(ZOOM_EVENT, &init) {
            Ok(custom) => {
                let _ = self.element.dispatch_event(&custom);
            }
            Err(e) => log::warn!("{}: {}", self.tag_name(), js_error(e)),
        }
    }

    fn remove(&self) {
        self.element.remove();
    }

    fn listen_clicks(&self, mut on_click: ClickHandler) -> Registration {
        let listener = EventListener::new(&self.element, "click", move |event| {
            if let Some(mouse) = event.dyn_ref::<MouseEvent>() {
                on_click(pointer(mouse));
            }
        });
        Box::new(listener)
    }
}

/// Deletes every rule whose selector matches, then appends the new one.
pub fn replace_rule(sheet: &CssStyleSheet, rule: &StyleRule) -> Result<(), JsValue> {
    let rules = sheet.css_rules()?;
    for index in (0..rules.length()).rev() {
        let same_target = rules
            .get(index)
            .and_then(|r| r.dyn_into::<CssStyleRule>().ok())
            .is_some_and(|r| r.selector_text() == rule.selector);
        if same_target {
            sheet.delete_rule(index)?;
        }
    }
    let end = sheet.css_rules()?.length();
    sheet.insert_rule_with_index(&rule.css_text(), end)?;
    Ok(())
}

async fn probe_image(src: String) -> Result<NaturalSize, ZoomError> {
    let img = HtmlImageElement::new().map_err(dom_err)?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let on_load = Closure::once(move |_event: Event| {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let on_error = Closure::once(move |_event: Event| {
            let _ = reject.call0(&JsValue::NULL);
        });
        img.set_onload(Some(on_load.as_ref().unchecked_ref()));
        img.set_onerror(Some(on_error.as_ref().unchecked_ref()));
        on_load.forget();
        on_error.forget();
    });
    img.set_src(&src);

    let loaded = JsFuture::from(promise).await;
    img.set_onload(None);
    img.set_onerror(None);
    loaded.map_err(|_| ZoomError::SourceLoad(src))?;

    Ok(NaturalSize {
        width: img.natural_width(),
        height: img.natural_height(),
    })
}

/// Reads the payload of a `msc-zoom-click` event.
pub fn read_zoom_event(event: &Event) -> Option<ZoomEvent> {
    let custom = event.dyn_ref::<CustomEvent>()?;
    let json = js_sys::JSON::stringify(&custom.detail()).ok()?.as_string()?;
    serde_json::from_str(&json).ok()
}
