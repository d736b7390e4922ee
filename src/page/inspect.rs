use super::*;

impl Page {
    pub fn text(&self, selector: &str) -> Result<String> {
        let node = self.select_one(selector)?;
        Ok(self.context.dom.text_content(node))
    }

    /// Inline style value of `property`, or an empty string when unset.
    pub fn style(&self, selector: &str, property: &str) -> Result<String> {
        let node = self.select_one(selector)?;
        Ok(self.context.dom.style_get(node, property))
    }

    pub fn has_class(&self, selector: &str, class_name: &str) -> Result<bool> {
        let node = self.select_one(selector)?;
        Ok(self.context.dom.class_contains(node, class_name))
    }

    pub fn count(&self, selector: &str) -> Result<usize> {
        Ok(self.context.dom.query_selector_all(selector)?.len())
    }

    pub fn assert_text(&self, selector: &str, expected: &str) -> Result<()> {
        let node = self.select_one(selector)?;
        let actual = self.context.dom.text_content(node);
        if actual != expected {
            return Err(self.assertion_failed(selector, node, expected, &actual));
        }
        Ok(())
    }

    pub fn assert_exists(&self, selector: &str) -> Result<()> {
        self.select_one(selector).map(|_| ())
    }

    pub fn assert_class(&self, selector: &str, class_name: &str, present: bool) -> Result<()> {
        let node = self.select_one(selector)?;
        let actual = self.context.dom.class_contains(node, class_name);
        if actual != present {
            let describe = |has: bool| {
                if has {
                    format!("class {class_name:?} present")
                } else {
                    format!("class {class_name:?} absent")
                }
            };
            return Err(self.assertion_failed(selector, node, &describe(present), &describe(actual)));
        }
        Ok(())
    }

    pub fn dump_dom(&self) -> String {
        self.context.dom.dump_node(self.context.dom.root)
    }

    /// Drains the notices shown so far.
    pub fn take_notices(&mut self) -> Vec<String> {
        std::mem::take(&mut self.context.notices)
    }

    pub fn take_scroll_requests(&mut self) -> Vec<ScrollRequest> {
        std::mem::take(&mut self.context.scroll_requests)
    }

    /// Current location fragment including the leading `#`, or empty.
    pub fn location_hash(&self) -> &str {
        &self.context.location_hash
    }

    pub fn scroll_y(&self) -> f64 {
        self.context.scroll_y
    }

    pub fn viewport_height(&self) -> f64 {
        self.context.viewport_height
    }

    pub fn observed_count(&self) -> usize {
        self.context.intersections.observed_count()
    }

    pub fn listener_count(&self) -> usize {
        self.context.listeners.len()
    }

    /// Resolves `selector` to a node handle, e.g. to compare against
    /// [`ScrollRequest::node`].
    pub fn node(&self, selector: &str) -> Result<NodeId> {
        self.select_one(selector)
    }

    fn assertion_failed(&self, selector: &str, node: NodeId, expected: &str, actual: &str) -> Error {
        Error::AssertionFailed {
            selector: selector.into(),
            expected: expected.into(),
            actual: actual.into(),
            dom_snippet: truncate_chars(&self.context.dom.dump_node(node), 200),
        }
    }
}
