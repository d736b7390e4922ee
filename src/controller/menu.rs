use super::*;

impl PageInteractionController {
    pub(super) fn bind_menu<H: PageHost + ?Sized>(&self, host: &mut H) {
        let selectors = &self.config.selectors;
        if let Some(toggle) = find_first(host, &selectors.menu_toggle) {
            host.add_listener(EventTarget::Node(toggle), EventKind::Click, Binding::MenuToggle);
        }
        for link in find_all(host, &selectors.nav_links) {
            host.add_listener(EventTarget::Node(link), EventKind::Click, Binding::NavLinkClose);
        }
    }

    /// Opens the menu when the control is closed and closes it otherwise,
    /// writing the same state to both the control and the panel.
    pub(super) fn toggle_menu<H: PageHost + ?Sized>(&self, host: &mut H) {
        let selectors = &self.config.selectors;
        let (Some(toggle), Some(panel)) = (
            find_first(host, &selectors.menu_toggle),
            find_first(host, &selectors.menu_panel),
        ) else {
            return;
        };
        let class_name = &self.config.classes.menu_open;
        let open = !host.has_class(toggle, class_name);
        for node in [toggle, panel] {
            if open {
                host.add_class(node, class_name);
            } else {
                host.remove_class(node, class_name);
            }
        }
    }

    pub(super) fn close_menu<H: PageHost + ?Sized>(&self, host: &mut H) {
        let selectors = &self.config.selectors;
        for selector in [&selectors.menu_toggle, &selectors.menu_panel] {
            if let Some(node) = find_first(host, selector) {
                host.remove_class(node, &self.config.classes.menu_open);
            }
        }
    }
}
