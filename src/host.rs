//! Seams between [`PageInteractionController`](crate::PageInteractionController)
//! and the page it drives.

use super::*;
use serde::Deserialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBehavior {
    Auto,
    Smooth,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollBlock {
    Start,
    Center,
    End,
    Nearest,
}

/// Options passed to `scrollIntoView` by the anchor and CTA handlers.
/// Deserializes from the `[scroll]` config section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ScrollIntoViewOptions {
    pub behavior: ScrollBehavior,
    pub block: ScrollBlock,
}

impl ScrollIntoViewOptions {
    pub fn smooth_start() -> Self {
        Self {
            behavior: ScrollBehavior::Smooth,
            block: ScrollBlock::Start,
        }
    }
}

impl Default for ScrollIntoViewOptions {
    fn default() -> Self {
        Self::smooth_start()
    }
}

/// A recorded `scrollIntoView` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrollRequest {
    pub node: NodeId,
    pub options: ScrollIntoViewOptions,
}

pub trait DocumentQuery {
    fn query_selector(&self, selector: &str) -> Result<Option<NodeId>>;
    fn query_selector_all(&self, selector: &str) -> Result<Vec<NodeId>>;
    fn query_selector_within(&self, root: NodeId, selector: &str) -> Result<Option<NodeId>>;
    /// Nearest inclusive ancestor of `node` matching `selector`.
    fn closest(&self, node: NodeId, selector: &str) -> Result<Option<NodeId>>;
    /// First element whose `id` attribute equals `id` exactly.
    fn element_by_id(&self, id: &str) -> Option<NodeId>;
    fn has_class(&self, node: NodeId, class_name: &str) -> bool;
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;
    fn text_content(&self, node: NodeId) -> String;
    fn scroll_y(&self) -> f64;
    fn viewport_height(&self) -> f64;
}

pub trait PresentationEffects {
    fn add_class(&mut self, node: NodeId, class_name: &str);
    fn remove_class(&mut self, node: NodeId, class_name: &str);
    /// Returns whether the class is present afterwards.
    fn toggle_class(&mut self, node: NodeId, class_name: &str) -> bool;
    /// An empty value removes the declaration.
    fn set_style(&mut self, node: NodeId, property: &str, value: &str);
    fn set_text(&mut self, node: NodeId, text: &str);
    fn scroll_into_view(&mut self, node: NodeId, options: ScrollIntoViewOptions);
    /// Blocking user-facing notice (an `alert` in a browser).
    fn notify(&mut self, message: &str);
    fn append_style_block(&mut self, id: &str, css: &str);
}

pub trait DeferredTasks {
    /// Schedules `write`, replacing any pending task with the same key.
    fn schedule_style(&mut self, key: TaskKey, delay_ms: i64, write: StyleWrite) -> TimerId;
    fn cancel_task(&mut self, key: TaskKey) -> bool;
}

pub trait EventRegistry {
    fn add_listener(&mut self, target: EventTarget, kind: EventKind, binding: Binding);
}

pub trait IntersectionHost {
    fn create_observer(&mut self, options: ObserverOptions) -> ObserverId;
    fn observe(&mut self, observer: ObserverId, node: NodeId);
    fn unobserve(&mut self, observer: ObserverId, node: NodeId);
}

pub trait PageHost:
    DocumentQuery + PresentationEffects + DeferredTasks + EventRegistry + IntersectionHost
{
}

impl<T> PageHost for T where
    T: DocumentQuery + PresentationEffects + DeferredTasks + EventRegistry + IntersectionHost
{
}
