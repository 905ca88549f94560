//! Binary search tree of stations keyed by id.

use std::cmp::Ordering;
use std::fmt::Write as _;
use std::path::Path;

use tn_core::StationId;
use tn_graph::Station;

use crate::{RegistryError, RegistryResult};

type Link = Option<Box<Node>>;

struct Node {
    station: Station,
    left: Link,
    right: Link,
}

impl Node {
    fn leaf(station: Station) -> Box<Self> {
        Box::new(Self {
            station,
            left: None,
            right: None,
        })
    }
}

/// Depth-first orders supported by [`StationRegistry::traverse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalOrder {
    InOrder,
    PreOrder,
    PostOrder,
}

impl TraversalOrder {
    pub const ALL: [TraversalOrder; 3] = [
        TraversalOrder::InOrder,
        TraversalOrder::PreOrder,
        TraversalOrder::PostOrder,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TraversalOrder::InOrder => "In-Order",
            TraversalOrder::PreOrder => "Pre-Order",
            TraversalOrder::PostOrder => "Post-Order",
        }
    }
}

impl std::fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TraversalOrder {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "in" | "inorder" | "in-order" => Ok(TraversalOrder::InOrder),
            "pre" | "preorder" | "pre-order" => Ok(TraversalOrder::PreOrder),
            "post" | "postorder" | "post-order" => Ok(TraversalOrder::PostOrder),
            other => Err(RegistryError::UnknownOrder(other.to_string())),
        }
    }
}

/// Unbalanced binary search tree owning the canonical station records.
///
/// Duplicate ids are rejected rather than replaced. The tree shape depends on
/// insertion order, which is what the pre-order and post-order traversals
/// expose. Ascending inserts build a chain as deep as the registry is long, so
/// nothing here recurses per level.
#[derive(Default)]
pub struct StationRegistry {
    root: Link,
    len: usize,
}

impl StationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a station. Returns `false` if the id is already registered.
    pub fn insert(&mut self, station: Station) -> bool {
        let mut cursor = &mut self.root;
        while let Some(node) = cursor {
            cursor = match station.id.cmp(&node.station.id) {
                Ordering::Less => &mut node.left,
                Ordering::Greater => &mut node.right,
                Ordering::Equal => return false,
            };
        }
        *cursor = Some(Node::leaf(station));
        self.len += 1;
        true
    }

    pub fn search(&self, id: StationId) -> Option<&Station> {
        let mut cursor = self.root.as_deref();
        while let Some(node) = cursor {
            cursor = match id.cmp(&node.station.id) {
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
                Ordering::Equal => return Some(&node.station),
            };
        }
        None
    }

    pub fn contains(&self, id: StationId) -> bool {
        self.search(id).is_some()
    }

    /// Remove a station. Returns `false` if the id was not registered.
    pub fn remove(&mut self, id: StationId) -> bool {
        let mut link = &mut self.root;
        loop {
            let go_left = match link.as_deref() {
                None => return false,
                Some(node) => match id.cmp(&node.station.id) {
                    Ordering::Equal => break,
                    Ordering::Less => true,
                    Ordering::Greater => false,
                },
            };
            let Some(node) = link else {
                return false;
            };
            link = if go_left {
                &mut node.left
            } else {
                &mut node.right
            };
        }

        let Some(node) = link.as_mut() else {
            return false;
        };
        if node.left.is_some() && node.right.is_some() {
            // Replace with the in-order successor.
            if let Some(successor) = take_min(&mut node.right) {
                node.station = successor;
            }
        } else {
            let child = node.left.take().or_else(|| node.right.take());
            *link = child;
        }
        self.len -= 1;
        true
    }

    pub fn clear(&mut self) {
        release(self.root.take());
        self.len = 0;
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn in_order(&self) -> Vec<StationId> {
        self.in_order_nodes().map(|s| s.id).collect()
    }

    pub fn pre_order(&self) -> Vec<StationId> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            out.push(node.station.id);
            stack.extend(node.right.as_deref());
            stack.extend(node.left.as_deref());
        }
        out
    }

    pub fn post_order(&self) -> Vec<StationId> {
        // Root-right-left, reversed.
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node> = self.root.as_deref().into_iter().collect();
        while let Some(node) = stack.pop() {
            out.push(node.station.id);
            stack.extend(node.left.as_deref());
            stack.extend(node.right.as_deref());
        }
        out.reverse();
        out
    }

    pub fn traverse(&self, order: TraversalOrder) -> Vec<StationId> {
        match order {
            TraversalOrder::InOrder => self.in_order(),
            TraversalOrder::PreOrder => self.pre_order(),
            TraversalOrder::PostOrder => self.post_order(),
        }
    }

    /// Copies of all stations, sorted by id.
    pub fn stations(&self) -> Vec<Station> {
        self.in_order_nodes().cloned().collect()
    }

    fn in_order_nodes(&self) -> impl Iterator<Item = &Station> + '_ {
        let mut stack: Vec<&Node> = Vec::new();
        let mut cursor = self.root.as_deref();
        std::iter::from_fn(move || {
            while let Some(node) = cursor {
                stack.push(node);
                cursor = node.left.as_deref();
            }
            let node = stack.pop()?;
            cursor = node.right.as_deref();
            Some(&node.station)
        })
    }

    /// Text listing of the three traversals.
    pub fn traversals_text(&self) -> String {
        let mut out = String::from("=== TREE TRAVERSALS ===\n\n");
        for order in TraversalOrder::ALL {
            let ids: Vec<String> = self.traverse(order).iter().map(|id| id.to_string()).collect();
            let _ = writeln!(out, "{}: {}\n", order.label(), ids.join(", "));
        }
        // Single trailing newline.
        while out.ends_with("\n\n") {
            out.pop();
        }
        out
    }

    /// Write [`StationRegistry::traversals_text`] to `path`.
    pub fn export_traversals(&self, path: &Path) -> RegistryResult<()> {
        std::fs::write(path, self.traversals_text()).map_err(|source| RegistryError::Export {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), stations = self.len, "exported traversals");
        Ok(())
    }
}

/// Detach the leftmost node of a subtree and return its station.
fn take_min(mut link: &mut Link) -> Option<Station> {
    while link.as_ref()?.left.is_some() {
        let Some(node) = link else {
            return None;
        };
        link = &mut node.left;
    }
    let node = link.take()?;
    let Node { station, right, .. } = *node;
    *link = right;
    Some(station)
}

/// Free a subtree one node at a time.
fn release(root: Link) {
    let mut pending: Vec<Box<Node>> = root.into_iter().collect();
    while let Some(mut node) = pending.pop() {
        pending.extend(node.left.take());
        pending.extend(node.right.take());
    }
}

impl Drop for StationRegistry {
    fn drop(&mut self) {
        release(self.root.take());
    }
}

impl Clone for StationRegistry {
    /// Same shape, built bottom-up from an explicit stack.
    fn clone(&self) -> Self {
        enum Step<'a> {
            Enter(Option<&'a Node>),
            Join(&'a Node),
        }

        let mut steps = vec![Step::Enter(self.root.as_deref())];
        let mut built: Vec<Link> = Vec::new();
        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(None) => built.push(None),
                Step::Enter(Some(node)) => {
                    steps.push(Step::Join(node));
                    steps.push(Step::Enter(node.right.as_deref()));
                    steps.push(Step::Enter(node.left.as_deref()));
                }
                Step::Join(node) => {
                    let right = built.pop().flatten();
                    let left = built.pop().flatten();
                    built.push(Some(Box::new(Node {
                        station: node.station.clone(),
                        left,
                        right,
                    })));
                }
            }
        }
        Self {
            root: built.pop().flatten(),
            len: self.len,
        }
    }
}

impl std::fmt::Debug for StationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationRegistry")
            .field("len", &self.len)
            .field("in_order", &self.in_order())
            .finish()
    }
}
