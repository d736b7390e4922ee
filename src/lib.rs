//! Interaction layer for the comic storefront page.
//!
//! [`PageInteractionController`] binds menu, theme, cart, scrolling, parallax,
//! fade-in and pricing behaviors to a page through the traits in [`host`].
//! [`Page`] is a deterministic in-memory host: it parses an HTML fixture,
//! dispatches clicks and scrolls, runs deferred tasks on a virtual clock and
//! computes viewport intersections, so every behavior can be exercised from
//! ordinary `#[test]` functions.
//!
//! ```no_run
//! use storefront_interactions::Page;
//!
//! # fn main() -> storefront_interactions::Result<()> {
//! let mut page = Page::from_html(
//!     "<button class='cart-btn'><span class='cart-count'>0</span></button>
//!      <div class='comic-card'>Issue #1</div>",
//! )?;
//! page.click(".comic-card")?;
//! page.assert_text(".cart-count", "1")?;
//! # Ok(())
//! # }
//! ```

use std::collections::{HashMap, HashSet, VecDeque};

mod config;
mod controller;
mod dom;
mod dom_utils;
mod events;
mod host;
mod html;
mod intersection;
mod page;
mod scheduler;
mod selector;
mod state;
mod trace;

pub use config::{
    CartConfig, ClassConfig, ControllerConfig, FadeInConfig, ParallaxConfig, PlanConfig,
    SelectorConfig, ThemeConfig,
};
pub use controller::{AnimatedElementSet, PageInteractionController};
pub use events::{Binding, EventKind, EventState, EventTarget};
pub use host::{
    DeferredTasks, DocumentQuery, EventRegistry, IntersectionHost, PageHost,
    PresentationEffects, ScrollBehavior, ScrollBlock, ScrollIntoViewOptions, ScrollRequest,
};
pub use intersection::{IntersectionEntry, LayoutBox, ObserverId, ObserverOptions, RootMargin};
pub use page::Page;
pub use scheduler::{PendingTimer, StyleWrite, TaskKey, TaskSlot, TimerId};
pub use state::{CartCounter, InteractionState, ThemeState};

use dom::Dom;
use dom_utils::*;
use selector::*;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("html parse error: {0}")]
    HtmlParse(String),
    #[error("unsupported selector: {0}")]
    UnsupportedSelector(String),
    #[error("selector not found: {0}")]
    SelectorNotFound(String),
    #[error("assertion failed for {selector}: expected {expected}, actual {actual}, snippet {dom_snippet}")]
    AssertionFailed {
        selector: String,
        expected: String,
        actual: String,
        dom_snippet: String,
    },
    #[error("timer error: {0}")]
    Timer(String),
    #[error("config error: {0}")]
    Config(String),
}

/// Handle to a node of the in-memory document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[cfg(test)]
mod tests;
