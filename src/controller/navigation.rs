use super::*;

impl PageInteractionController {
    pub(super) fn bind_anchors<H: PageHost + ?Sized>(&self, host: &mut H) {
        for anchor in find_all(host, &self.config.selectors.in_page_anchors) {
            host.add_listener(EventTarget::Node(anchor), EventKind::Click, Binding::AnchorScroll);
        }
    }

    pub(super) fn bind_plans<H: PageHost + ?Sized>(&self, host: &mut H) {
        for button in find_all(host, &self.config.selectors.plan_buttons) {
            host.add_listener(EventTarget::Node(button), EventKind::Click, Binding::PlanSelect);
        }
    }

    pub(super) fn bind_cta<H: PageHost + ?Sized>(&self, host: &mut H) {
        if let Some(button) = find_first(host, &self.config.selectors.cta_button) {
            host.add_listener(EventTarget::Node(button), EventKind::Click, Binding::CtaScroll);
        }
    }

    /// Replaces fragment navigation with the configured scroll. The href is used as
    /// a selector; when it matches nothing (or is not a valid selector, like a
    /// bare `#`) the click is swallowed.
    pub(super) fn scroll_to_anchor<H: PageHost + ?Sized>(
        &self,
        event: &mut EventState,
        host: &mut H,
    ) {
        event.prevent_default();
        let Some(anchor) = event.current_node() else {
            return;
        };
        let Some(href) = host.attribute(anchor, "href") else {
            return;
        };
        if let Some(target) = find_first(host, &href) {
            host.scroll_into_view(target, self.config.scroll);
        }
    }

    pub(super) fn select_plan<H: PageHost + ?Sized>(&self, event: &EventState, host: &mut H) {
        let selectors = &self.config.selectors;
        let Some(button) = event.current_node() else {
            return;
        };
        let Some(card) = find_closest(host, button, &selectors.pricing_card) else {
            return;
        };
        let Some(label) = find_within(host, card, &selectors.plan_name) else {
            return;
        };
        let plan = host.text_content(label);
        let message = self.config.plans.notice(plan.trim());
        host.notify(&message);
    }

    pub(super) fn scroll_to_catalog<H: PageHost + ?Sized>(&self, host: &mut H) {
        if let Some(catalog) = find_first(host, &self.config.selectors.catalog_section) {
            host.scroll_into_view(catalog, self.config.scroll);
        }
    }
}
