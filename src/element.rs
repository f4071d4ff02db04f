// src/element.rs
use crate::dom_host::DomHost;
use crate::error::ZoomError;
use crate::lifecycle;
use crate::widget::ZoomWidget;
use crate::zoom_config::{Field, PartialConfig, PropertyValue};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlElement, MutationObserver, MutationObserverInit, MutationRecord};

type Widget = Rc<RefCell<ZoomWidget<DomHost>>>;

/// Handle to a zoom widget living on a DOM element.
///
/// Attribute mutations on the element are observed for as long as the handle
/// lives. Dropping the handle detaches the widget.
pub struct ZoomElement {
    widget: Widget,
    observer: MutationObserver,
    _on_mutation: Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
}

impl ZoomElement {
    /// Builds the widget on `element` and starts attaching it in the background.
    pub fn connect(element: HtmlElement, config: PartialConfig) -> Result<Self, ZoomError> {
        let host = DomHost::new(element.clone())?;
        let widget: Widget = Rc::new(RefCell::new(ZoomWidget::new(host, config)));
        let (observer, on_mutation) = observe_attributes(&element, &widget)?;

        let handle = Self {
            widget,
            observer,
            _on_mutation: on_mutation,
        };
        handle.attach();
        Ok(handle)
    }

    pub fn attach(&self) {
        let widget = self.widget.clone();
        spawn_local(async move {
            if let Err(err) = lifecycle::attach(&widget).await {
                log::debug!("attach ended: {}", err);
            }
        });
    }

    pub fn detach(&self) {
        self.widget.borrow_mut().detach();
    }

    pub fn toggle(&self, force: Option<bool>) {
        self.widget.borrow_mut().toggle(force);
    }

    pub fn active(&self) -> bool {
        self.widget.borrow().active()
    }

    pub fn scale(&self) -> f64 {
        self.widget.borrow().scale()
    }

    pub fn duration(&self) -> f64 {
        self.widget.borrow().duration()
    }

    pub fn set_active(&self, value: impl Into<PropertyValue>) {
        self.widget.borrow_mut().set_active(value);
    }

    pub fn set_scale(&self, value: impl Into<PropertyValue>) {
        self.widget.borrow_mut().set_scale(value);
    }

    pub fn set_duration(&self, value: impl Into<PropertyValue>) {
        self.widget.borrow_mut().set_duration(value);
    }
}

impl Drop for ZoomElement {
    fn drop(&mut self) {
        self.observer.disconnect();
        if let Ok(mut widget) = self.widget.try_borrow_mut() {
            widget.detach();
        }
    }
}

fn observe_attributes(
    element: &HtmlElement,
    widget: &Widget,
) -> Result<
    (
        MutationObserver,
        Closure<dyn FnMut(js_sys::Array, MutationObserver)>,
    ),
    ZoomError,
> {
    let weak = Rc::downgrade(widget);
    let target = element.clone();
    let on_mutation = Closure::wrap(Box::new(move |records: js_sys::Array, _: MutationObserver| {
        let Some(widget) = weak.upgrade() else {
            return;
        };
        for record in records.iter() {
            let Ok(record) = record.dyn_into::<MutationRecord>() else {
                continue;
            };
            let Some(name) = record.attribute_name() else {
                continue;
            };
            let value = target.get_attribute(&name);
            if let Ok(mut widget) = widget.try_borrow_mut() {
                widget.attribute_changed(&name, value.as_deref());
            }
        }
    }) as Box<dyn FnMut(js_sys::Array, MutationObserver)>);

    let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())
        .map_err(|e| ZoomError::Dom(crate::utils::js_error(e)))?;

    let filter = js_sys::Array::new();
    for name in Field::observed_attributes() {
        filter.push(&name.into());
    }
    let init = MutationObserverInit::new();
    init.set_attributes(true);
    init.set_attribute_filter(&filter);
    observer
        .observe_with_options(element, &init)
        .map_err(|e| ZoomError::Dom(crate::utils::js_error(e)))?;

    Ok((observer, on_mutation))
}
