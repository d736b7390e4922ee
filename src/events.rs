use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    Scroll,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::Scroll => "scroll",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTarget {
    Window,
    Node(NodeId),
}

/// The controller operation a registered listener runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Binding {
    MenuToggle,
    NavLinkClose,
    ThemeToggle,
    CartCard,
    AnchorScroll,
    PlanSelect,
    CtaScroll,
    Parallax,
}

#[derive(Debug, Clone)]
pub struct EventState {
    pub kind: EventKind,
    pub target: EventTarget,
    pub current_target: EventTarget,
    pub time_stamp_ms: i64,
    pub(crate) default_prevented: bool,
}

impl EventState {
    pub fn new(kind: EventKind, target: EventTarget, time_stamp_ms: i64) -> Self {
        Self {
            kind,
            target,
            current_target: target,
            time_stamp_ms,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The node the event was dispatched at, if it was not the window.
    pub fn target_node(&self) -> Option<NodeId> {
        match self.target {
            EventTarget::Node(node) => Some(node),
            EventTarget::Window => None,
        }
    }

    pub fn current_node(&self) -> Option<NodeId> {
        match self.current_target {
            EventTarget::Node(node) => Some(node),
            EventTarget::Window => None,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ListenerStore {
    map: HashMap<EventTarget, HashMap<EventKind, Vec<Binding>>>,
}

impl ListenerStore {
    /// Registers `binding`; a binding already present for the same target and
    /// event is not added twice.
    pub(crate) fn add(&mut self, target: EventTarget, kind: EventKind, binding: Binding) -> bool {
        let bindings = self.map.entry(target).or_default().entry(kind).or_default();
        if bindings.contains(&binding) {
            return false;
        }
        bindings.push(binding);
        true
    }

    pub(crate) fn get(&self, target: EventTarget, kind: EventKind) -> Vec<Binding> {
        self.map
            .get(&target)
            .and_then(|events| events.get(&kind))
            .cloned()
            .unwrap_or_default()
    }

    pub(crate) fn len(&self) -> usize {
        self.map
            .values()
            .flat_map(|events| events.values())
            .map(Vec::len)
            .sum()
    }
}
