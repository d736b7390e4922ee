//! Deterministic in-memory page that hosts the controller.

use super::*;
use crate::events::ListenerStore;
use crate::intersection::IntersectionWatcher;
use crate::scheduler::Scheduler;
use crate::trace::{TraceCategory, TraceState};

mod host_impl;
mod inspect;
mod timers;

const DEFAULT_VIEWPORT_HEIGHT: f64 = 800.0;

/// Everything the controller can see and touch through the host traits.
#[derive(Debug)]
pub(crate) struct PageContext {
    pub(crate) dom: Dom,
    pub(crate) listeners: ListenerStore,
    pub(crate) scheduler: Scheduler,
    pub(crate) scroll_y: f64,
    pub(crate) viewport_height: f64,
    pub(crate) layout: HashMap<NodeId, LayoutBox>,
    pub(crate) intersections: IntersectionWatcher,
    pub(crate) notices: Vec<String>,
    pub(crate) scroll_requests: Vec<ScrollRequest>,
    pub(crate) location_hash: String,
    // Set when a handler moved the viewport; the page fires `scroll` after it.
    pub(crate) scroll_pending: bool,
    pub(crate) trace: TraceState,
}

impl PageContext {
    fn new(dom: Dom) -> Self {
        Self {
            dom,
            listeners: ListenerStore::default(),
            scheduler: Scheduler::default(),
            scroll_y: 0.0,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            layout: HashMap::new(),
            intersections: IntersectionWatcher::default(),
            notices: Vec::new(),
            scroll_requests: Vec::new(),
            location_hash: String::new(),
            scroll_pending: false,
            trace: TraceState::default(),
        }
    }

    pub(crate) fn set_scroll_y(&mut self, y: f64) {
        let y = if y.is_finite() { y.max(0.0) } else { 0.0 };
        if y != self.scroll_y {
            self.scroll_y = y;
            self.scroll_pending = true;
        }
    }

    pub(crate) fn node_label(&self, node: NodeId) -> String {
        let Some(tag) = self.dom.tag_name(node) else {
            return "#document".into();
        };
        match self.dom.attr(node, "id") {
            Some(id) if !id.is_empty() => format!("{tag}#{id}"),
            _ => tag.to_string(),
        }
    }
}

#[derive(Debug)]
pub struct Page {
    context: PageContext,
    controller: PageInteractionController,
}

impl Page {
    pub fn from_html(html: &str) -> Result<Self> {
        Self::from_html_with_config(html, ControllerConfig::default())
    }

    pub fn from_html_with_config(html: &str, config: ControllerConfig) -> Result<Self> {
        config.validate()?;
        let dom = crate::html::parse_html(html)?;
        let mut page = Self {
            context: PageContext::new(dom),
            controller: PageInteractionController::new(config),
        };
        page.controller.initialize(&mut page.context);
        page.deliver_intersections();
        Ok(page)
    }

    /// Runs the controller's initialization again against the current
    /// document.
    pub fn reinitialize(&mut self) {
        self.controller.initialize(&mut self.context);
        self.deliver_intersections();
    }

    pub fn controller(&self) -> &PageInteractionController {
        &self.controller
    }

    /// Clicks the first element matching `selector`, then runs the default
    /// action unless a handler prevented it.
    pub fn click(&mut self, selector: &str) -> Result<()> {
        let target = self.select_one(selector)?;
        let event = self.dispatch_click(target);
        if !event.default_prevented() {
            self.run_default_click_action(target);
        }
        self.finish_step();
        Ok(())
    }

    /// Scrolls the window to `y` (clamped at 0) and fires `scroll`.
    pub fn scroll_to(&mut self, y: f64) {
        self.context.set_scroll_y(y);
        self.dispatch_scroll();
        self.finish_step();
    }

    pub fn set_viewport_height(&mut self, height: f64) -> Result<()> {
        if !height.is_finite() || height <= 0.0 {
            return Err(Error::Config(format!(
                "viewport height must be positive, got {height}"
            )));
        }
        self.context.viewport_height = height;
        self.deliver_intersections();
        Ok(())
    }

    /// Gives the first element matching `selector` a layout box.
    pub fn set_layout(&mut self, selector: &str, layout: LayoutBox) -> Result<()> {
        let node = self.select_one(selector)?;
        self.context.layout.insert(node, layout);
        self.deliver_intersections();
        Ok(())
    }

    /// Stacks every element matching `selector` vertically, starting at
    /// `first` and leaving `gap` pixels between boxes.
    pub fn set_layout_all(&mut self, selector: &str, first: LayoutBox, gap: f64) -> Result<()> {
        let nodes = self.context.dom.query_selector_all(selector)?;
        if nodes.is_empty() {
            return Err(Error::SelectorNotFound(selector.into()));
        }
        let mut top = first.top;
        for node in nodes {
            let layout = LayoutBox::new(top, first.height);
            self.context.layout.insert(node, layout);
            top = layout.bottom() + gap;
        }
        self.deliver_intersections();
        Ok(())
    }

    pub fn enable_trace(&mut self, enabled: bool) {
        self.context.trace.enabled = enabled;
    }

    pub fn set_trace_events(&mut self, enabled: bool) {
        self.context.trace.events = enabled;
    }

    pub fn set_trace_timers(&mut self, enabled: bool) {
        self.context.trace.timers = enabled;
    }

    pub fn set_trace_log_limit(&mut self, max_entries: usize) -> Result<()> {
        self.context.trace.set_log_limit(max_entries)
    }

    pub fn take_trace_logs(&mut self) -> Vec<String> {
        self.context.trace.take()
    }

    fn select_one(&self, selector: &str) -> Result<NodeId> {
        self.context
            .dom
            .query_selector(selector)?
            .ok_or_else(|| Error::SelectorNotFound(selector.into()))
    }

    fn dispatch_click(&mut self, target: NodeId) -> EventState {
        let mut event = EventState::new(
            EventKind::Click,
            EventTarget::Node(target),
            self.context.scheduler.now_ms(),
        );
        let mut path = vec![EventTarget::Node(target)];
        let mut cursor = self.context.dom.parent(target);
        while let Some(node) = cursor {
            path.push(EventTarget::Node(node));
            cursor = self.context.dom.parent(node);
        }
        path.push(EventTarget::Window);

        for current in path {
            event.current_target = current;
            self.invoke_listeners(&mut event);
        }
        let line = format!(
            "[event] done click target={} default_prevented={}",
            self.context.node_label(target),
            event.default_prevented()
        );
        self.context.trace.record(TraceCategory::Event, line);
        event
    }

    fn dispatch_scroll(&mut self) {
        let mut event = EventState::new(
            EventKind::Scroll,
            EventTarget::Window,
            self.context.scheduler.now_ms(),
        );
        self.context.scroll_pending = false;
        self.invoke_listeners(&mut event);
    }

    fn invoke_listeners(&mut self, event: &mut EventState) {
        let bindings = self.context.listeners.get(event.current_target, event.kind);
        for binding in bindings {
            let current = match event.current_target {
                EventTarget::Window => "window".to_string(),
                EventTarget::Node(node) => self.context.node_label(node),
            };
            let line = format!(
                "[event] {} current={current} binding={binding:?} scroll_y={}",
                event.kind.as_str(),
                format_css_number(self.context.scroll_y)
            );
            self.context.trace.record(TraceCategory::Event, line);
            self.controller.handle(binding, event, &mut self.context);
        }
    }

    /// Fragment navigation for in-page links nobody intercepted.
    fn run_default_click_action(&mut self, target: NodeId) {
        let Ok(Some(anchor)) = self.context.dom.closest(target, "a[href^=\"#\"]") else {
            return;
        };
        let Some(href) = self.context.dom.attr(anchor, "href") else {
            return;
        };
        let Some(fragment) = href.strip_prefix('#') else {
            return;
        };
        self.context.location_hash = if fragment.is_empty() {
            String::new()
        } else {
            href.clone()
        };
        let destination = if fragment.is_empty() {
            Some(0.0)
        } else {
            self.context
                .dom
                .by_id(fragment)
                .and_then(|node| self.context.layout.get(&node))
                .map(|layout| layout.top)
        };
        if let Some(y) = destination {
            self.context.set_scroll_y(y);
        }
    }

    /// Fires `scroll` for any viewport move a handler caused, then delivers
    /// intersection changes.
    fn finish_step(&mut self) {
        if self.context.scroll_pending {
            self.dispatch_scroll();
        }
        self.deliver_intersections();
    }

    fn deliver_intersections(&mut self) {
        let entries = self.context.intersections.compute(
            self.context.scroll_y,
            self.context.viewport_height,
            &self.context.layout,
        );
        if entries.is_empty() {
            return;
        }
        self.controller.on_intersection(&entries, &mut self.context);
    }
}
