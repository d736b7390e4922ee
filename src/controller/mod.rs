//! The storefront page behaviors.
//!
//! [`PageInteractionController::initialize`] resolves the configured elements
//! and registers one [`Binding`] per behavior with the host. The host hands
//! events back through [`PageInteractionController::handle`] and intersection
//! changes through [`PageInteractionController::on_intersection`]. Handlers
//! never fail: missing elements are skipped and selector errors are logged.

use super::*;

mod cart;
mod fade_in;
mod menu;
mod navigation;
mod parallax;
mod theme;

pub use fade_in::AnimatedElementSet;

#[derive(Debug, Clone)]
pub struct PageInteractionController {
    config: ControllerConfig,
    state: InteractionState,
    animated: AnimatedElementSet,
    fade_observer: Option<ObserverId>,
}

impl Default for PageInteractionController {
    fn default() -> Self {
        Self::new(ControllerConfig::default())
    }
}

impl PageInteractionController {
    pub fn new(config: ControllerConfig) -> Self {
        let state = InteractionState::new(config.theme.starts_dark);
        Self {
            config,
            state,
            animated: AnimatedElementSet::default(),
            fade_observer: None,
        }
    }

    /// Binds every behavior to the elements currently in the document.
    /// Safe to call again after the document changes.
    pub fn initialize<H: PageHost + ?Sized>(&mut self, host: &mut H) {
        self.bind_menu(host);
        self.bind_theme(host);
        self.bind_cart(host);
        self.bind_anchors(host);
        host.add_listener(EventTarget::Window, EventKind::Scroll, Binding::Parallax);
        self.prepare_fade_in(host);
        self.bind_plans(host);
        self.bind_cta(host);
        self.ensure_cart_animation_style(host);
        tracing::debug!(
            animated = self.animated.prepared_count(),
            "page interactions initialized"
        );
    }

    pub fn handle<H: PageHost + ?Sized>(
        &mut self,
        binding: Binding,
        event: &mut EventState,
        host: &mut H,
    ) {
        tracing::debug!(?binding, event = event.kind.as_str(), "handling binding");
        match binding {
            Binding::MenuToggle => self.toggle_menu(host),
            Binding::NavLinkClose => self.close_menu(host),
            Binding::ThemeToggle => self.toggle_theme(host),
            Binding::CartCard => self.register_cart_click(event, host),
            Binding::AnchorScroll => self.scroll_to_anchor(event, host),
            Binding::PlanSelect => self.select_plan(event, host),
            Binding::CtaScroll => self.scroll_to_catalog(host),
            Binding::Parallax => self.apply_parallax(host),
        }
    }

    pub fn cart_count(&self) -> u32 {
        self.state.cart.count()
    }

    pub fn is_dark(&self) -> bool {
        self.state.theme.is_dark()
    }

    pub fn state(&self) -> &InteractionState {
        &self.state
    }

    pub fn animated(&self) -> &AnimatedElementSet {
        &self.animated
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    fn ensure_cart_animation_style<H: PageHost + ?Sized>(&self, host: &mut H) {
        let cart = &self.config.cart;
        if host.element_by_id(&cart.style_block_id).is_some() {
            return;
        }
        host.append_style_block(&cart.style_block_id, &cart.keyframes);
    }
}

fn find_first<H: DocumentQuery + ?Sized>(host: &H, selector: &str) -> Option<NodeId> {
    host.query_selector(selector)
        .unwrap_or_else(|err| log_lookup_failure(selector, &err))
}

fn find_all<H: DocumentQuery + ?Sized>(host: &H, selector: &str) -> Vec<NodeId> {
    host.query_selector_all(selector).unwrap_or_else(|err| {
        log_lookup_failure(selector, &err);
        Vec::new()
    })
}

fn find_closest<H: DocumentQuery + ?Sized>(host: &H, node: NodeId, selector: &str) -> Option<NodeId> {
    host.closest(node, selector)
        .unwrap_or_else(|err| log_lookup_failure(selector, &err))
}

fn find_within<H: DocumentQuery + ?Sized>(host: &H, root: NodeId, selector: &str) -> Option<NodeId> {
    host.query_selector_within(root, selector)
        .unwrap_or_else(|err| log_lookup_failure(selector, &err))
}

fn log_lookup_failure(selector: &str, err: &Error) -> Option<NodeId> {
    tracing::warn!(selector, error = %err, "selector lookup failed; treating as not found");
    None
}
