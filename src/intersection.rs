use super::*;
use serde::Deserialize;
use std::str::FromStr;

/// Vertical extent of an element in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutBox {
    pub top: f64,
    pub height: f64,
}

impl LayoutBox {
    pub fn new(top: f64, height: f64) -> Self {
        Self {
            top,
            height: height.max(0.0),
        }
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// CSS `rootMargin` shorthand, in pixels. Positive values grow the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct RootMargin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl FromStr for RootMargin {
    type Err = Error;

    fn from_str(src: &str) -> Result<Self> {
        let values = src
            .split_whitespace()
            .map(|part| parse_px(part).ok_or_else(|| invalid_margin(src)))
            .collect::<Result<Vec<_>>>()?;
        let (top, right, bottom, left) = match values.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => return Err(invalid_margin(src)),
        };
        Ok(Self {
            top,
            right,
            bottom,
            left,
        })
    }
}

impl TryFrom<String> for RootMargin {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

fn parse_px(part: &str) -> Option<f64> {
    let number = part.strip_suffix("px").unwrap_or(part);
    // Unitless values are only valid for zero.
    if number.len() == part.len() && number != "0" {
        return None;
    }
    number.parse::<f64>().ok().filter(|value| value.is_finite())
}

fn invalid_margin(src: &str) -> Error {
    Error::Config(format!("root margin must be 1-4 pixel lengths, got {src:?}"))
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: RootMargin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionEntry {
    pub observer: ObserverId,
    pub target: NodeId,
    pub intersection_ratio: f64,
    pub is_intersecting: bool,
}

#[derive(Debug, Clone)]
struct ObservedTarget {
    node: NodeId,
    // None until the first computation after `observe`.
    last_intersecting: Option<bool>,
}

#[derive(Debug, Clone)]
struct Observer {
    options: ObserverOptions,
    targets: Vec<ObservedTarget>,
}

#[derive(Debug, Default)]
pub(crate) struct IntersectionWatcher {
    observers: Vec<Observer>,
}

impl IntersectionWatcher {
    pub(crate) fn create_observer(&mut self, options: ObserverOptions) -> ObserverId {
        self.observers.push(Observer {
            options,
            targets: Vec::new(),
        });
        ObserverId(self.observers.len() - 1)
    }

    /// Returns false if the target was already observed by this observer.
    pub(crate) fn observe(&mut self, observer: ObserverId, node: NodeId) -> bool {
        let Some(state) = self.observers.get_mut(observer.0) else {
            return false;
        };
        if state.targets.iter().any(|target| target.node == node) {
            return false;
        }
        state.targets.push(ObservedTarget {
            node,
            last_intersecting: None,
        });
        true
    }

    pub(crate) fn unobserve(&mut self, observer: ObserverId, node: NodeId) -> bool {
        let Some(state) = self.observers.get_mut(observer.0) else {
            return false;
        };
        let before = state.targets.len();
        state.targets.retain(|target| target.node != node);
        state.targets.len() != before
    }

    pub(crate) fn observed_count(&self) -> usize {
        self.observers.iter().map(|observer| observer.targets.len()).sum()
    }

    /// Recomputes every observed target against the viewport and returns the
    /// entries whose state is new or changed, in observation order.
    pub(crate) fn compute(
        &mut self,
        scroll_y: f64,
        viewport_height: f64,
        layout: &HashMap<NodeId, LayoutBox>,
    ) -> Vec<IntersectionEntry> {
        let mut entries = Vec::new();
        for (index, observer) in self.observers.iter_mut().enumerate() {
            let margin = observer.options.root_margin;
            let root_top = scroll_y - margin.top;
            let root_bottom = scroll_y + viewport_height + margin.bottom;
            let threshold = observer.options.threshold;

            for target in &mut observer.targets {
                let (ratio, is_intersecting) = match layout.get(&target.node) {
                    Some(layout) => measure(*layout, root_top, root_bottom, threshold),
                    None => (0.0, false),
                };
                if target.last_intersecting != Some(is_intersecting) {
                    target.last_intersecting = Some(is_intersecting);
                    entries.push(IntersectionEntry {
                        observer: ObserverId(index),
                        target: target.node,
                        intersection_ratio: ratio,
                        is_intersecting,
                    });
                }
            }
        }
        entries
    }
}

/// Visible ratio of `layout` inside `[root_top, root_bottom]`, and whether it
/// meets `threshold`. A zero threshold only needs the edges to touch.
fn measure(layout: LayoutBox, root_top: f64, root_bottom: f64, threshold: f64) -> (f64, bool) {
    let touches = layout.bottom() >= root_top && layout.top <= root_bottom && root_bottom >= root_top;
    if !touches {
        return (0.0, false);
    }
    let visible = (layout.bottom().min(root_bottom) - layout.top.max(root_top)).max(0.0);
    let ratio = if layout.height > 0.0 {
        (visible / layout.height).clamp(0.0, 1.0)
    } else {
        1.0
    };
    let is_intersecting = if threshold <= 0.0 {
        true
    } else {
        ratio >= threshold
    };
    (ratio, is_intersecting)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storefront_options() -> ObserverOptions {
        ObserverOptions {
            threshold: 0.1,
            root_margin: "0px 0px -100px 0px".parse().unwrap(),
        }
    }

    #[test]
    fn root_margin_shorthand_expands_like_css() {
        let margin: RootMargin = "10px 20px".parse().unwrap();
        assert_eq!(
            margin,
            RootMargin {
                top: 10.0,
                right: 20.0,
                bottom: 10.0,
                left: 20.0
            }
        );
        let margin: RootMargin = "0 0 -100px 0".parse().unwrap();
        assert_eq!(margin.bottom, -100.0);
        assert!("10em".parse::<RootMargin>().is_err());
        assert!("1px 2px 3px 4px 5px".parse::<RootMargin>().is_err());
        assert!("".parse::<RootMargin>().is_err());
    }

    #[test]
    fn first_computation_always_reports() {
        let mut watcher = IntersectionWatcher::default();
        let observer = watcher.create_observer(storefront_options());
        watcher.observe(observer, NodeId(1));
        let layout = HashMap::from([(NodeId(1), LayoutBox::new(2000.0, 300.0))]);

        let entries = watcher.compute(0.0, 800.0, &layout);
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);

        assert!(watcher.compute(10.0, 800.0, &layout).is_empty());
    }

    #[test]
    fn bottom_margin_shrinks_the_root() {
        let mut watcher = IntersectionWatcher::default();
        let observer = watcher.create_observer(storefront_options());
        watcher.observe(observer, NodeId(1));
        // Root bottom is 700. 40px of a 300px box visible = 13%.
        let layout = HashMap::from([(NodeId(1), LayoutBox::new(660.0, 300.0))]);
        let entries = watcher.compute(0.0, 800.0, &layout);
        assert!(entries[0].is_intersecting);

        let mut watcher = IntersectionWatcher::default();
        let observer = watcher.create_observer(storefront_options());
        watcher.observe(observer, NodeId(1));
        // 20px visible = 6.7%, under the threshold even though the box is on screen.
        let layout = HashMap::from([(NodeId(1), LayoutBox::new(680.0, 300.0))]);
        let entries = watcher.compute(0.0, 800.0, &layout);
        assert!(!entries[0].is_intersecting);
        assert!(entries[0].intersection_ratio > 0.0);
    }

    #[test]
    fn targets_without_layout_never_intersect() {
        let mut watcher = IntersectionWatcher::default();
        let observer = watcher.create_observer(ObserverOptions::default());
        watcher.observe(observer, NodeId(9));
        let entries = watcher.compute(0.0, 800.0, &HashMap::new());
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].is_intersecting);
    }

    #[test]
    fn unobserved_targets_stop_reporting() {
        let mut watcher = IntersectionWatcher::default();
        let observer = watcher.create_observer(storefront_options());
        assert!(watcher.observe(observer, NodeId(1)));
        assert!(!watcher.observe(observer, NodeId(1)));
        assert_eq!(watcher.observed_count(), 1);
        assert!(watcher.unobserve(observer, NodeId(1)));
        assert_eq!(watcher.observed_count(), 0);
        let layout = HashMap::from([(NodeId(1), LayoutBox::new(0.0, 100.0))]);
        assert!(watcher.compute(0.0, 800.0, &layout).is_empty());
    }
}
