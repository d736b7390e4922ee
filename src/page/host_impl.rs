use super::*;

impl DocumentQuery for PageContext {
    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector(selector)
    }

    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>> {
        self.dom.query_selector_all(selector)
    }

    fn query_selector_within(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>> {
        self.dom.query_selector_within(root, selector)
    }

    fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>> {
        self.dom.closest(node, selector)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.dom.by_id(id)
    }

    fn has_class(&self, node: NodeId, class_name: &str) -> bool {
        self.dom.class_contains(node, class_name)
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.dom.attr(node, name)
    }

    fn text_content(&self, node: NodeId) -> String {
        self.dom.text_content(node)
    }

    fn scroll_y(&self) -> f64 {
        self.scroll_y
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }
}

impl PresentationEffects for PageContext {
    fn add_class(&mut self, node: NodeId, class_name: &str) {
        self.dom.class_add(node, class_name);
    }

    fn remove_class(&mut self, node: NodeId, class_name: &str) {
        self.dom.class_remove(node, class_name);
    }

    fn toggle_class(&mut self, node: NodeId, class_name: &str) -> bool {
        self.dom.class_toggle(node, class_name)
    }

    fn set_style(&mut self, node: NodeId, property: &str, value: &str) {
        self.dom.style_set(node, property, value);
    }

    fn set_text(&mut self, node: NodeId, text: &str) {
        self.dom.set_text_content(node, text);
    }

    /// Records the request and jumps straight to the final position. Nodes
    /// without a layout box stay where they are.
    fn scroll_into_view(&mut self, node: NodeId, options: ScrollIntoViewOptions) {
        self.scroll_requests.push(ScrollRequest { node, options });
        let Some(layout) = self.layout.get(&node).copied() else {
            return;
        };
        let viewport = self.viewport_height;
        let y = match options.block {
            ScrollBlock::Start => layout.top,
            ScrollBlock::Center => layout.top - (viewport - layout.height) / 2.0,
            ScrollBlock::End => layout.bottom() - viewport,
            ScrollBlock::Nearest => {
                if layout.top < self.scroll_y {
                    layout.top
                } else if layout.bottom() > self.scroll_y + viewport {
                    layout.bottom() - viewport
                } else {
                    self.scroll_y
                }
            }
        };
        self.set_scroll_y(y);
    }

    fn notify(&mut self, message: &str) {
        tracing::info!(message, "page notice");
        self.notices.push(message.to_string());
    }

    fn append_style_block(&mut self, id: &str, css: &str) {
        let head = self.dom.ensure_head();
        let attrs = HashMap::from([("id".to_string(), id.to_string())]);
        let style = self.dom.create_element(head, "style".to_string(), attrs);
        self.dom.create_text(style, css.to_string());
    }
}

impl DeferredTasks for PageContext {
    fn schedule_style(&mut self, key: TaskKey, delay_ms: i64, write: StyleWrite) -> TimerId {
        let (id, superseded) = self.scheduler.schedule(key, delay_ms, write);
        if let Some(previous) = superseded {
            self.trace.record(
                TraceCategory::Timer,
                format!("[timer] cancel id={} superseded_by={}", previous.get(), id.get()),
            );
        }
        let line = format!(
            "[timer] schedule id={} delay_ms={delay_ms} slot={:?} node={}",
            id.get(),
            key.slot,
            self.node_label(key.node)
        );
        self.trace.record(TraceCategory::Timer, line);
        id
    }

    fn cancel_task(&mut self, key: TaskKey) -> bool {
        let removed = self.scheduler.cancel_key(key);
        if let Some(id) = removed {
            self.trace
                .record(TraceCategory::Timer, format!("[timer] cancel id={}", id.get()));
        }
        removed.is_some()
    }
}

impl EventRegistry for PageContext {
    fn add_listener(&mut self, target: EventTarget, kind: EventKind, binding: Binding) {
        self.listeners.add(target, kind, binding);
    }
}

impl IntersectionHost for PageContext {
    fn create_observer(&mut self, options: ObserverOptions) -> ObserverId {
        self.intersections.create_observer(options)
    }

    fn observe(&mut self, observer: ObserverId, node: NodeId) {
        self.intersections.observe(observer, node);
    }

    fn unobserve(&mut self, observer: ObserverId, node: NodeId) {
        self.intersections.unobserve(observer, node);
    }
}
