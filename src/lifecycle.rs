// src/lifecycle.rs
use crate::error::ZoomError;
use crate::geometry::PagePoint;
use crate::host::{Registration, ZoomHost};
use crate::widget::ZoomWidget;
use std::cell::RefCell;
use std::rc::Rc;

/// Owns every listener registered during one attach. Aborting drops them all,
/// once; later aborts and registrations against an aborted scope are no-ops.
pub struct AbortScope {
    id: u64,
    registrations: Vec<Registration>,
    aborted: bool,
}

impl AbortScope {
    pub fn new(id: u64) -> Self {
        Self {
            id,
            registrations: Vec::new(),
            aborted: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn is_aborted(&self) -> bool {
        self.aborted
    }

    pub fn len(&self) -> usize {
        self.registrations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registrations.is_empty()
    }

    pub fn register(&mut self, registration: Registration) {
        if self.aborted {
            // dropping it unregisters immediately
            return;
        }
        self.registrations.push(registration);
    }

    pub fn abort(&mut self) {
        if self.aborted {
            return;
        }
        self.aborted = true;
        self.registrations.clear();
    }
}

impl<H: ZoomHost> ZoomWidget<H> {
    /// Invalidates the current abort scope. An attach that is still waiting on
    /// its config fetch or image probe will not register anything afterwards.
    pub fn detach(&mut self) {
        self.epoch += 1;
        if let Some(mut scope) = self.scope.take() {
            log::debug!("{}: detach, aborting scope {}", self.host.tag_name(), scope.id());
            scope.abort();
        }
    }

    pub fn is_attached(&self) -> bool {
        self.scope.as_ref().is_some_and(|s| !s.is_aborted())
    }

    pub fn abort_scope(&self) -> Option<&AbortScope> {
        self.scope.as_ref()
    }
}

/// Attach sequence: resolve config, load the slotted image, upgrade properties,
/// then register the click listener under a fresh abort scope.
///
/// Instance-fatal failures are logged and the element removes itself; the error
/// is still returned so callers can observe it.
pub async fn attach<H: ZoomHost>(widget: &Rc<RefCell<ZoomWidget<H>>>) -> Result<(), ZoomError> {
    let (host, epoch) = {
        let w = widget.borrow();
        (w.host.clone(), w.epoch)
    };
    log::debug!("{}: attach", host.tag_name());

    let layer = match host.fetch_config().await {
        Ok(layer) => layer,
        Err(message) => return Err(fail(widget, &host, ZoomError::ConfigResolution(message))),
    };
    widget.borrow_mut().config.merge(&layer);

    let source = match host.locate_source() {
        Ok(source) => source,
        Err(err) => return Err(fail(widget, &host, err)),
    };
    let size = match host.probe_source(&source).await {
        Ok(size) => size,
        Err(err) => return Err(fail(widget, &host, err)),
    };
    log::debug!(
        "{}: source loaded ({}x{})",
        host.tag_name(),
        size.width,
        size.height
    );

    let mut w = widget.borrow_mut();
    w.source = Some(source);
    w.natural_size = Some(size);
    if w.epoch != epoch {
        log::debug!("{}: detached while attaching", host.tag_name());
        return Ok(());
    }
    w.upgrade();
    drop(w);

    register_click_listener(widget);
    Ok(())
}

fn fail<H: ZoomHost>(widget: &Rc<RefCell<ZoomWidget<H>>>, host: &H, err: ZoomError) -> ZoomError {
    log::warn!("{}: {}", host.tag_name(), err);
    host.remove();
    widget.borrow_mut().removed = true;
    err
}

fn register_click_listener<H: ZoomHost>(widget: &Rc<RefCell<ZoomWidget<H>>>) {
    let weak = Rc::downgrade(widget);
    let mut w = widget.borrow_mut();
    if let Some(mut stale) = w.scope.take() {
        stale.abort();
    }

    w.scopes_created += 1;
    let mut scope = AbortScope::new(w.scopes_created);
    let registration = w.host.listen_clicks(Box::new(move |point| {
        if let Some(widget) = weak.upgrade() {
            on_click(&widget, point);
        }
    }));
    scope.register(registration);
    log::debug!("{}: click listener registered (scope {})", w.host.tag_name(), scope.id());
    w.scope = Some(scope);
}

/// Click entry point: transitions, then fires the notification once the
/// widget is no longer borrowed so listeners may call back into it.
pub fn on_click<H: ZoomHost>(widget: &Rc<RefCell<ZoomWidget<H>>>, point: PagePoint) {
    let (host, event) = {
        let Ok(mut w) = widget.try_borrow_mut() else {
            return;
        };
        let event = w.transition_on_click(point);
        (w.host.clone(), event)
    };
    host.dispatch(&event);
}
