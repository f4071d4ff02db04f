// src/components/zoom_viewer.rs
use crate::dom_host::read_zoom_event;
use crate::element::ZoomElement;
use crate::host::{ZoomMode, ZOOM_EVENT};
use crate::style_rules::VISION_SLOT;
use crate::zoom_config::PartialConfig;
use gloo::events::EventListener;
use std::cell::RefCell;
use web_sys::HtmlElement;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ZoomViewerProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub alt: AttrValue,
    #[prop_or_default]
    pub scale: Option<f64>,
    #[prop_or_default]
    pub duration: Option<f64>,
    #[prop_or_default]
    pub active: bool,
    #[prop_or_default]
    pub on_zoom: Callback<ZoomMode>,
}

/// Props as the widget's constructor layer. An unset `active` is left out so
/// an external config can still turn it on.
fn constructor_layer(props: &ZoomViewerProps) -> PartialConfig {
    let mut config = PartialConfig::new();
    if props.active {
        config = config.with_active(true);
    }
    if let Some(scale) = props.scale {
        config = config.with_scale(scale);
    }
    if let Some(duration) = props.duration {
        config = config.with_duration(duration);
    }
    config
}

/// False on the mount run of an effect, true on every later run.
fn is_update(mounted: &RefCell<bool>) -> bool {
    std::mem::replace(&mut *mounted.borrow_mut(), true)
}

#[function_component(ZoomViewer)]
pub fn zoom_viewer(props: &ZoomViewerProps) -> Html {
    let host_ref = use_node_ref();
    let handle = use_mut_ref(|| None::<ZoomElement>);

    // ------ CONNECT / DISCONNECT ------
    {
        let host_ref = host_ref.clone();
        let handle = handle.clone();
        let config = constructor_layer(props);

        use_effect_with((), move |_| {
            if let Some(element) = host_ref.cast::<HtmlElement>() {
                match ZoomElement::connect(element, config) {
                    Ok(zoom) => *handle.borrow_mut() = Some(zoom),
                    Err(e) => log::warn!("msc-zoom: {}", e),
                }
            }
            move || {
                handle.borrow_mut().take();
            }
        });
    }

    // ------ PROPERTY UPDATES ------
    // Mount-time values already went in through the constructor layer; writing
    // them again would park overrides that beat the external config.
    {
        let handle = handle.clone();
        let mounted = use_mut_ref(|| false);
        use_effect_with((props.scale, props.duration), move |(scale, duration)| {
            if let (true, Some(zoom)) = (is_update(&mounted), handle.borrow().as_ref()) {
                if let Some(scale) = scale {
                    zoom.set_scale(*scale);
                }
                if let Some(duration) = duration {
                    zoom.set_duration(*duration);
                }
            }
            || ()
        });
    }
    {
        let handle = handle.clone();
        let mounted = use_mut_ref(|| false);
        use_effect_with(props.active, move |active| {
            if let (true, Some(zoom)) = (is_update(&mounted), handle.borrow().as_ref()) {
                zoom.set_active(*active);
            }
            || ()
        });
    }

    // ------ NOTIFICATIONS ------
    {
        let host_ref = host_ref.clone();
        use_effect_with(props.on_zoom.clone(), move |on_zoom| {
            let on_zoom = on_zoom.clone();
            let listener = host_ref.cast::<HtmlElement>().map(|element| {
                EventListener::new(&element, ZOOM_EVENT, move |event| {
                    if let Some(zoom_event) = read_zoom_event(event) {
                        on_zoom.emit(zoom_event.mode);
                    }
                })
            });
            move || drop(listener)
        });
    }

    html! {
        <msc-zoom ref={host_ref}>
            <img slot={VISION_SLOT} src={props.src.clone()} alt={props.alt.clone()} />
        </msc-zoom>
    }
}
