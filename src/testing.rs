// src/testing.rs
//
// Recording host used by the unit tests.

use crate::error::ZoomError;
use crate::geometry::{BoundingBox, PagePoint, ScrollOffset};
use crate::host::{ClickHandler, LocalFuture, NaturalSize, Registration, ZoomEvent, ZoomHost};
use crate::style_rules::StyleRule;
use crate::zoom_config::PartialConfig;
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

type Listener = Rc<RefCell<ClickHandler>>;

struct FakeState {
    attributes: BTreeMap<String, String>,
    attribute_writes: usize,
    bounds: BoundingBox,
    scroll: ScrollOffset,
    config: Result<PartialConfig, String>,
    probe: Result<NaturalSize, ZoomError>,
    source_present: bool,
    source_probed: bool,
    rules: Vec<StyleRule>,
    events: Vec<ZoomEvent>,
    removed: bool,
    listeners: BTreeMap<u64, Listener>,
    listeners_registered: u64,
    on_fetch: Option<Rc<dyn Fn()>>,
    on_dispatch: Option<Rc<dyn Fn(&ZoomEvent)>>,
}

#[derive(Clone)]
pub struct FakeHost {
    state: Rc<RefCell<FakeState>>,
}

/// Dropping it unregisters the listener.
struct ListenerGuard {
    state: Rc<RefCell<FakeState>>,
    id: u64,
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.state.borrow_mut().listeners.remove(&self.id);
    }
}

impl FakeHost {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeState {
                attributes: BTreeMap::new(),
                attribute_writes: 0,
                bounds: BoundingBox::new(0.0, 0.0, 100.0, 100.0),
                scroll: ScrollOffset::default(),
                config: Ok(PartialConfig::default()),
                probe: Ok(NaturalSize {
                    width: 640,
                    height: 480,
                }),
                source_present: true,
                source_probed: false,
                rules: Vec::new(),
                events: Vec::new(),
                removed: false,
                listeners: BTreeMap::new(),
                listeners_registered: 0,
                on_fetch: None,
                on_dispatch: None,
            })),
        }
    }

    pub fn set_bounds(&self, bounds: BoundingBox) {
        self.state.borrow_mut().bounds = bounds;
    }

    pub fn set_config(&self, config: Result<PartialConfig, String>) {
        self.state.borrow_mut().config = config;
    }

    pub fn set_probe(&self, probe: Result<NaturalSize, ZoomError>) {
        self.state.borrow_mut().probe = probe;
    }

    pub fn set_source_present(&self, present: bool) {
        self.state.borrow_mut().source_present = present;
    }

    pub fn on_fetch(&self, hook: impl Fn() + 'static) {
        self.state.borrow_mut().on_fetch = Some(Rc::new(hook));
    }

    pub fn on_dispatch(&self, hook: impl Fn(&ZoomEvent) + 'static) {
        self.state.borrow_mut().on_dispatch = Some(Rc::new(hook));
    }

    /// Delivers a click to every live listener.
    pub fn click(&self, x: f64, y: f64) {
        let listeners: Vec<Listener> = self.state.borrow().listeners.values().cloned().collect();
        for listener in listeners {
            (*listener.borrow_mut())(PagePoint::new(x, y));
        }
    }

    pub fn events(&self) -> Vec<ZoomEvent> {
        self.state.borrow().events.clone()
    }

    /// Every rule insertion, oldest first.
    pub fn rules(&self) -> Vec<StyleRule> {
        self.state.borrow().rules.clone()
    }

    pub fn last_rule(&self) -> Option<StyleRule> {
        self.state.borrow().rules.last().cloned()
    }

    pub fn attribute_writes(&self) -> usize {
        self.state.borrow().attribute_writes
    }

    pub fn live_listeners(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    pub fn listeners_registered(&self) -> u64 {
        self.state.borrow().listeners_registered
    }

    pub fn is_removed(&self) -> bool {
        self.state.borrow().removed
    }

    pub fn source_probed(&self) -> bool {
        self.state.borrow().source_probed
    }
}

impl ZoomHost for FakeHost {
    type Source = ();

    fn tag_name(&self) -> String {
        "msc-zoom".to_string()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.state.borrow().attributes.get(name).cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut state = self.state.borrow_mut();
        state.attribute_writes += 1;
        state.attributes.insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&self, name: &str) {
        let mut state = self.state.borrow_mut();
        state.attribute_writes += 1;
        state.attributes.remove(name);
    }

    fn bounding_box(&self) -> BoundingBox {
        self.state.borrow().bounds
    }

    fn scroll_offset(&self) -> ScrollOffset {
        self.state.borrow().scroll
    }

    fn fetch_config(&self) -> LocalFuture<Result<PartialConfig, String>> {
        let hook = self.state.borrow().on_fetch.clone();
        if let Some(hook) = hook {
            hook();
        }
        let result = self.state.borrow().config.clone();
        Box::pin(std::future::ready(result))
    }

    fn locate_source(&self) -> Result<(), ZoomError> {
        if self.state.borrow().source_present {
            Ok(())
        } else {
            Err(ZoomError::SourceMissing)
        }
    }

    fn probe_source(&self, _source: &()) -> LocalFuture<Result<NaturalSize, ZoomError>> {
        let mut state = self.state.borrow_mut();
        state.source_probed = true;
        Box::pin(std::future::ready(state.probe.clone()))
    }

    fn insert_rule(&self, rule: &StyleRule) {
        let mut state = self.state.borrow_mut();
        state.rules.push(rule.clone());
    }

    fn dispatch(&self, event: &ZoomEvent) {
        self.state.borrow_mut().events.push(*event);
        let hook = self.state.borrow().on_dispatch.clone();
        if let Some(hook) = hook {
            hook(event);
        }
    }

    fn remove(&self) {
        self.state.borrow_mut().removed = true;
    }

    fn listen_clicks(&self, on_click: ClickHandler) -> Registration {
        let mut state = self.state.borrow_mut();
        state.listeners_registered += 1;
        let id = state.listeners_registered;
        state.listeners.insert(id, Rc::new(RefCell::new(on_click)));
        Box::new(ListenerGuard {
            state: self.state.clone(),
            id,
        })
    }
}
