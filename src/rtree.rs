//! ## R-tree Implementation
//!
//! This module implements a dynamic R-tree over axis-aligned integer rectangles,
//! following Guttman's original design with the quadratic-cost node split. The tree is
//! height balanced and completely dynamic: insertions, deletions, and overlap searches
//! can be intermixed freely and no periodic reorganisation is required.
//!
//! Objects stored in the tree must implement the [`RTreeObject`] trait, which requires a
//! method returning the minimum bounding rectangle of the object. The bounding rectangle
//! is captured when the object is inserted and is never re-read afterwards.
//!
//! # Examples
//!
//! ```
//! use rtree2d::geometry::Rectangle;
//! use rtree2d::rtree::{RTree, RTreeObject};
//!
//! #[derive(Debug, PartialEq)]
//! struct Item {
//!     id: u32,
//!     bbox: Rectangle,
//! }
//!
//! impl RTreeObject for Item {
//!     fn mbr(&self) -> Rectangle {
//!         self.bbox
//!     }
//! }
//!
//! let mut tree: RTree<Item> = RTree::new();
//! tree.insert(Item { id: 1, bbox: Rectangle::from_edges(10, 10, 20, 20) });
//! tree.insert(Item { id: 2, bbox: Rectangle::from_edges(30, 30, 40, 40) });
//!
//! let window = Rectangle::from_edges(0, 0, 15, 15);
//! let hits: Vec<_> = tree.search(&window).collect();
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].id, 1);
//! ```

use crate::exceptions::RTreeError;
use crate::geometry::Rectangle;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

/// Maximum number of occupants in any node.
pub const MAX_ENTRIES: usize = 4;
/// Minimum number of occupants in any non-root node. Must be at most `MAX_ENTRIES / 2`.
pub const MIN_ENTRIES: usize = 2;

const _: () = assert!(
    MIN_ENTRIES >= 1 && MIN_ENTRIES <= MAX_ENTRIES / 2,
    "MIN_ENTRIES must be in 1..=MAX_ENTRIES/2"
);

/// Trait for objects stored in the R-tree.
///
/// Each object must provide its minimum bounding rectangle via the `mbr()` method.
pub trait RTreeObject: fmt::Debug {
    /// Returns the minimum bounding rectangle of the object.
    fn mbr(&self) -> Rectangle;
}

/// A leaf record: the object's bounding rectangle paired with the object itself.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Entry<T> {
    bbox: Rectangle,
    object: T,
}

/// Index of a node in the tree's arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct NodeId(usize);

/// The occupants of a node: index entries for a leaf, child links for a branch.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
enum NodeKind<T> {
    Leaf(Vec<Entry<T>>),
    Branch(Vec<NodeId>),
}

/// A node in the R-tree. `mbr` is kept minimally bounding over the node's occupants at
/// all times; `parent` supports the upward passes of the insertion and deletion
/// algorithms.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
struct Node<T> {
    mbr: Rectangle,
    parent: Option<NodeId>,
    kind: NodeKind<T>,
}

/// A dynamic R-tree over axis-aligned integer rectangles.
///
/// Nodes live in an arena and reference each other by index, so parent links are plain
/// indices and teardown is a single arena drop. The tree owns the objects inserted into
/// it; `delete` hands the matching object back to the caller.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RTree<T: RTreeObject> {
    nodes: Vec<Node<T>>,
    free: Vec<NodeId>,
    root: NodeId,
    len: usize,
}

impl<T: RTreeObject> RTree<T> {
    /// Creates a new, empty R-tree whose root is an empty leaf.
    pub fn new() -> Self {
        info!(
            "Creating new RTree with MAX_ENTRIES: {}, MIN_ENTRIES: {}",
            MAX_ENTRIES, MIN_ENTRIES
        );
        RTree {
            nodes: vec![Node {
                mbr: Rectangle::from_edges(0, 0, 0, 0),
                parent: None,
                kind: NodeKind::Leaf(Vec::new()),
            }],
            free: Vec::new(),
            root: NodeId(0),
            len: 0,
        }
    }

    /// The number of objects currently stored in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the tree stores no objects.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The number of levels in the tree. A tree whose root is a leaf has height 1.
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    /// Inserts an object into the R-tree.
    ///
    /// The object's bounding rectangle is captured here and used for all subsequent
    /// searches; later changes to the object do not move it within the index.
    pub fn insert(&mut self, object: T) {
        info!("Inserting object into RTree: {:?}", object);
        let bbox = object.mbr();
        let entry = Entry { bbox, object };
        let leaf = self.choose_leaf(&bbox);
        let split = self.place_entry(leaf, entry);
        self.adjust_tree(leaf, split);
        self.len += 1;
        self.check();
    }

    /// Removes the first entry whose object equals `object` and returns the stored
    /// object.
    ///
    /// Matching is by `PartialEq` on the object; two distinct objects with identical
    /// bounding rectangles are two distinct entries, and a single call removes exactly
    /// one of the matches.
    ///
    /// # Errors
    ///
    /// Returns `RTreeError::NotFound` if no entry matches. The tree is unchanged in that
    /// case.
    pub fn delete(&mut self, object: &T) -> Result<T, RTreeError>
    where
        T: PartialEq,
    {
        info!("Attempting to delete object: {:?}", object);
        let bbox = object.mbr();
        let (leaf, pos) = self
            .find_leaf(self.root, &bbox, object)
            .ok_or(RTreeError::NotFound)?;
        let removed = match &mut self.nodes[leaf.0].kind {
            NodeKind::Leaf(entries) => entries.remove(pos),
            NodeKind::Branch(_) => unreachable!("find_leaf returned a branch"),
        };
        self.len -= 1;
        self.condense_tree(leaf);
        self.contract_root();
        self.check();
        Ok(removed.object)
    }

    /// Returns a lazy iterator over every stored object whose bounding rectangle
    /// overlaps `window`.
    ///
    /// Subtrees whose mbr is separate from the window are never visited. The order of
    /// the results is unspecified; each matching object is yielded exactly once.
    pub fn search<'a>(&'a self, window: &Rectangle) -> Search<'a, T> {
        info!("Performing overlap search with window: {:?}", window);
        Search {
            tree: self,
            window: *window,
            stack: vec![self.root],
            entries: &[],
            cursor: 0,
        }
    }

    /// Asserts that the tree is correctly formed. Does nothing in release builds.
    ///
    /// Checked invariants: all leaves at equal depth; every non-root node holds between
    /// `MIN_ENTRIES` and `MAX_ENTRIES` occupants and a branch root at least two; every
    /// node's mbr is minimally bounding over its occupants; every child references its
    /// parent.
    pub fn check(&self) {
        #[cfg(debug_assertions)]
        {
            self.check_parent(self.root);
            self.check_degree(self.root);
            let mut leaf_depth = None;
            self.check_balance(self.root, 1, &mut leaf_depth);
            self.check_mbr(self.root);
        }
    }

    //
    // Arena plumbing
    //

    fn alloc(&mut self, node: Node<T>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = node;
                id
            }
            None => {
                self.nodes.push(node);
                NodeId(self.nodes.len() - 1)
            }
        }
    }

    fn release(&mut self, id: NodeId) {
        self.nodes[id.0] = Node {
            mbr: Rectangle::from_edges(0, 0, 0, 0),
            parent: None,
            kind: NodeKind::Leaf(Vec::new()),
        };
        self.free.push(id);
    }

    fn occupant_count(&self, n: NodeId) -> usize {
        match &self.nodes[n.0].kind {
            NodeKind::Leaf(entries) => entries.len(),
            NodeKind::Branch(children) => children.len(),
        }
    }

    fn subtree_height(&self, mut n: NodeId) -> usize {
        let mut height = 1;
        loop {
            match &self.nodes[n.0].kind {
                NodeKind::Leaf(_) => return height,
                NodeKind::Branch(children) => {
                    n = children[0];
                    height += 1;
                }
            }
        }
    }

    /// Full recalculation of a node's mbr from its occupants. An empty node (only the
    /// root leaf can be empty) keeps its previous mbr.
    fn recompute_mbr(&mut self, n: NodeId) {
        let mbr = match &self.nodes[n.0].kind {
            NodeKind::Leaf(entries) => {
                let mut it = entries.iter().map(|e| e.bbox);
                let Some(first) = it.next() else { return };
                it.fold(first, |acc, b| acc.mbr(&b))
            }
            NodeKind::Branch(children) => {
                let mut it = children.iter().map(|&c| self.nodes[c.0].mbr);
                let Some(first) = it.next() else { return };
                it.fold(first, |acc, b| acc.mbr(&b))
            }
        };
        self.nodes[n.0].mbr = mbr;
    }

    //
    // Insertion
    //

    /// Descends from the root to the leaf best suited to hold an entry bounded by
    /// `bbox`: at each branch, the child whose mbr needs least enlargement, ties broken
    /// by smallest area, then by first encountered.
    fn choose_leaf(&self, bbox: &Rectangle) -> NodeId {
        let mut n = self.root;
        loop {
            match &self.nodes[n.0].kind {
                NodeKind::Leaf(_) => return n,
                NodeKind::Branch(children) => n = self.choose_child(children, bbox),
            }
        }
    }

    fn choose_child(&self, children: &[NodeId], bbox: &Rectangle) -> NodeId {
        let mut best = children[0];
        let mut min = self.nodes[best.0].mbr.enlargement(bbox);
        for &c in &children[1..] {
            let d = self.nodes[c.0].mbr.enlargement(bbox);
            if d < min || (d == min && self.nodes[c.0].mbr.area() < self.nodes[best.0].mbr.area()) {
                min = d;
                best = c;
            }
        }
        best
    }

    /// Places `entry` in `leaf`, splitting the leaf when it is already full. Returns the
    /// new sibling when a split occurred.
    fn place_entry(&mut self, leaf: NodeId, entry: Entry<T>) -> Option<NodeId> {
        let node = &mut self.nodes[leaf.0];
        let NodeKind::Leaf(entries) = &mut node.kind else {
            unreachable!("entry placed in a branch");
        };
        if entries.len() < MAX_ENTRIES {
            debug!("Placing entry in leaf with {} entries", entries.len());
            let mbr = if entries.is_empty() {
                entry.bbox
            } else {
                node.mbr.mbr(&entry.bbox)
            };
            entries.push(entry);
            node.mbr = mbr;
            return None;
        }

        debug!("Leaf is full; splitting");
        let mut staged: Vec<(Rectangle, Entry<T>)> = Vec::with_capacity(MAX_ENTRIES + 1);
        staged.push((entry.bbox, entry));
        staged.extend(std::mem::take(entries).into_iter().map(|e| (e.bbox, e)));
        let (mbr_a, group_a, mbr_b, group_b) = quadratic_split(staged);

        let parent = node.parent;
        node.mbr = mbr_a;
        node.kind = NodeKind::Leaf(group_a.into_iter().map(|(_, e)| e).collect());
        let sibling = self.alloc(Node {
            mbr: mbr_b,
            parent,
            kind: NodeKind::Leaf(group_b.into_iter().map(|(_, e)| e).collect()),
        });
        Some(sibling)
    }

    /// Places `child` under `branch`, splitting the branch when it is already full.
    /// Returns the new sibling when a split occurred. Parent references are fixed up on
    /// every reassignment.
    fn place_child(&mut self, branch: NodeId, child: NodeId) -> Option<NodeId> {
        self.nodes[child.0].parent = Some(branch);
        let child_mbr = self.nodes[child.0].mbr;

        let count = self.occupant_count(branch);
        if count < MAX_ENTRIES {
            debug!("Placing child in branch with {} children", count);
            let node = &mut self.nodes[branch.0];
            let NodeKind::Branch(children) = &mut node.kind else {
                unreachable!("child placed in a leaf");
            };
            children.push(child);
            node.mbr.grow(&child_mbr);
            return None;
        }

        debug!("Branch is full; splitting");
        let existing = match &mut self.nodes[branch.0].kind {
            NodeKind::Branch(children) => std::mem::take(children),
            NodeKind::Leaf(_) => unreachable!("child placed in a leaf"),
        };
        let mut staged: Vec<(Rectangle, NodeId)> = Vec::with_capacity(MAX_ENTRIES + 1);
        staged.push((child_mbr, child));
        staged.extend(existing.into_iter().map(|id| (self.nodes[id.0].mbr, id)));
        let (mbr_a, group_a, mbr_b, group_b) = quadratic_split(staged);

        let group_b: Vec<NodeId> = group_b.into_iter().map(|(_, id)| id).collect();
        let parent = self.nodes[branch.0].parent;
        let node = &mut self.nodes[branch.0];
        node.mbr = mbr_a;
        node.kind = NodeKind::Branch(group_a.iter().map(|&(_, id)| id).collect());
        for &(_, id) in &group_a {
            self.nodes[id.0].parent = Some(branch);
        }
        let sibling = self.alloc(Node {
            mbr: mbr_b,
            parent,
            kind: NodeKind::Branch(group_b.clone()),
        });
        for &id in &group_b {
            self.nodes[id.0].parent = Some(sibling);
        }
        Some(sibling)
    }

    /// Ascends from `n` to the root, recomputing each node's mbr from its occupants and
    /// propagating a pending split into the parent, splitting the parent in turn when it
    /// is full. A split that reaches the root grows the tree one level.
    fn adjust_tree(&mut self, mut n: NodeId, mut split: Option<NodeId>) {
        loop {
            self.recompute_mbr(n);
            let Some(parent) = self.nodes[n.0].parent else {
                if let Some(sibling) = split {
                    self.grow_root(n, sibling);
                }
                return;
            };
            split = match split {
                Some(sibling) => self.place_child(parent, sibling),
                None => None,
            };
            n = parent;
        }
    }

    /// Handles a split of the root: the old root and its sibling become the two children
    /// of a freshly allocated branch root. This is the only way the tree grows in
    /// height.
    fn grow_root(&mut self, old_root: NodeId, sibling: NodeId) {
        let mbr = self.nodes[old_root.0].mbr.mbr(&self.nodes[sibling.0].mbr);
        let new_root = self.alloc(Node {
            mbr,
            parent: None,
            kind: NodeKind::Branch(vec![old_root, sibling]),
        });
        self.nodes[old_root.0].parent = Some(new_root);
        self.nodes[sibling.0].parent = Some(new_root);
        self.root = new_root;
        debug!("Root has split; tree height is now {}", self.height());
    }

    //
    // Deletion
    //

    /// Finds the leaf holding an entry that equals `object`, guided by containment of
    /// the target bbox: a branch child is descended only when its mbr contains the bbox.
    /// Returns the leaf and the entry's position within it.
    fn find_leaf(&self, n: NodeId, bbox: &Rectangle, object: &T) -> Option<(NodeId, usize)>
    where
        T: PartialEq,
    {
        match &self.nodes[n.0].kind {
            NodeKind::Leaf(entries) => entries
                .iter()
                .position(|e| &e.object == object)
                .map(|pos| (n, pos)),
            NodeKind::Branch(children) => children.iter().find_map(|&c| {
                if bbox.is_subset(&self.nodes[c.0].mbr) {
                    self.find_leaf(c, bbox, object)
                } else {
                    None
                }
            }),
        }
    }

    /// Ascends from the affected leaf to the root. Nodes left with fewer than
    /// `MIN_ENTRIES` occupants are detached from their parents and queued; surviving
    /// nodes on the path get their mbr recomputed. The queued nodes' occupants are then
    /// reinserted at their original level.
    fn condense_tree(&mut self, leaf: NodeId) {
        let mut orphans: Vec<NodeId> = Vec::new();
        let mut n = leaf;
        while let Some(parent) = self.nodes[n.0].parent {
            if self.occupant_count(n) < MIN_ENTRIES {
                debug!("Node is under-full after deletion; detaching for reinsertion");
                match &mut self.nodes[parent.0].kind {
                    NodeKind::Branch(children) => children.retain(|&c| c != n),
                    NodeKind::Leaf(_) => unreachable!("leaf as parent"),
                }
                orphans.push(n);
            } else {
                self.recompute_mbr(n);
            }
            n = parent;
        }
        self.recompute_mbr(n);
        self.reinsert_orphans(orphans);
    }

    /// Reinserts the occupants of each detached node: leaf entries through the normal
    /// insertion path, child subtrees at the level matching their height so that all
    /// leaves stay at equal depth. The detached nodes themselves return to the free
    /// list.
    fn reinsert_orphans(&mut self, orphans: Vec<NodeId>) {
        for orphan in orphans {
            let kind =
                std::mem::replace(&mut self.nodes[orphan.0].kind, NodeKind::Leaf(Vec::new()));
            match kind {
                NodeKind::Leaf(entries) => {
                    debug!("Reinserting {} orphaned entries", entries.len());
                    for entry in entries {
                        let leaf = self.choose_leaf(&entry.bbox);
                        let split = self.place_entry(leaf, entry);
                        self.adjust_tree(leaf, split);
                    }
                }
                NodeKind::Branch(children) => {
                    debug!("Reattaching {} orphaned subtrees", children.len());
                    for child in children {
                        let height = self.subtree_height(child);
                        self.reinsert_node(child, height);
                    }
                }
            }
            self.release(orphan);
        }
    }

    /// Reattaches a detached subtree of the given height as the child of a branch one
    /// level above it, chosen by least enlargement on the way down.
    fn reinsert_node(&mut self, child: NodeId, child_height: usize) {
        let bbox = self.nodes[child.0].mbr;
        let mut n = self.root;
        while self.subtree_height(n) > child_height + 1 {
            match &self.nodes[n.0].kind {
                NodeKind::Branch(children) => n = self.choose_child(children, &bbox),
                NodeKind::Leaf(_) => unreachable!("descent past a leaf"),
            }
        }
        let split = self.place_child(n, child);
        self.adjust_tree(n, split);
    }

    /// Replaces a branch root holding a single child with that child, repeatedly,
    /// shrinking the tree as it condenses. A leaf root is left alone even when empty.
    fn contract_root(&mut self) {
        loop {
            let child = match &self.nodes[self.root.0].kind {
                NodeKind::Branch(children) if children.len() == 1 => children[0],
                _ => return,
            };
            let old_root = self.root;
            self.nodes[child.0].parent = None;
            self.root = child;
            self.release(old_root);
            debug!("Root contracted; tree height is now {}", self.height());
        }
    }

    //
    // Debugging assertions
    //

    #[cfg(debug_assertions)]
    fn check_parent(&self, n: NodeId) {
        if let NodeKind::Branch(children) = &self.nodes[n.0].kind {
            for &c in children {
                assert_eq!(
                    self.nodes[c.0].parent,
                    Some(n),
                    "child does not reference its parent"
                );
                self.check_parent(c);
            }
        }
    }

    #[cfg(debug_assertions)]
    fn check_degree(&self, n: NodeId) {
        let count = self.occupant_count(n);
        assert!(count <= MAX_ENTRIES, "node over max occupancy");
        if self.nodes[n.0].parent.is_some() {
            assert!(count >= MIN_ENTRIES, "non-root node under min occupancy");
        } else if matches!(self.nodes[n.0].kind, NodeKind::Branch(_)) {
            assert!(count >= 2, "branch root with fewer than two children");
        }
        if let NodeKind::Branch(children) = &self.nodes[n.0].kind {
            for &c in children {
                self.check_degree(c);
            }
        }
    }

    #[cfg(debug_assertions)]
    fn check_balance(&self, n: NodeId, depth: usize, leaf_depth: &mut Option<usize>) {
        match &self.nodes[n.0].kind {
            NodeKind::Leaf(_) => match *leaf_depth {
                Some(d) => assert_eq!(depth, d, "leaves at unequal depths"),
                None => *leaf_depth = Some(depth),
            },
            NodeKind::Branch(children) => {
                for &c in children {
                    self.check_balance(c, depth + 1, leaf_depth);
                }
            }
        }
    }

    #[cfg(debug_assertions)]
    fn check_mbr(&self, n: NodeId) {
        match &self.nodes[n.0].kind {
            NodeKind::Leaf(entries) => {
                for e in entries {
                    assert!(
                        e.bbox.is_subset(&self.nodes[n.0].mbr),
                        "entry not contained in node mbr"
                    );
                }
            }
            NodeKind::Branch(children) => {
                for &c in children {
                    self.check_mbr(c);
                    assert!(
                        self.nodes[c.0].mbr.is_subset(&self.nodes[n.0].mbr),
                        "child mbr not contained in node mbr"
                    );
                }
            }
        }
        assert!(self.is_mbr(n), "node mbr not minimally bounding");
    }

    /// True when the node's stored mbr equals, edge for edge, the mbr recomputed from
    /// scratch over its occupants. An empty node is trivially minimal.
    #[cfg(debug_assertions)]
    fn is_mbr(&self, n: NodeId) -> bool {
        let node = &self.nodes[n.0];
        let expected = match &node.kind {
            NodeKind::Leaf(entries) => {
                let mut it = entries.iter().map(|e| e.bbox);
                let Some(first) = it.next() else { return true };
                it.fold(first, |acc, b| acc.mbr(&b))
            }
            NodeKind::Branch(children) => {
                let mut it = children.iter().map(|&c| self.nodes[c.0].mbr);
                let Some(first) = it.next() else { return true };
                it.fold(first, |acc, b| acc.mbr(&b))
            }
        };
        expected.left() == node.mbr.left()
            && expected.right() == node.mbr.right()
            && expected.top() == node.mbr.top()
            && expected.bottom() == node.mbr.bottom()
    }

    fn dump(&self, f: &mut fmt::Formatter<'_>, n: NodeId, depth: usize) -> fmt::Result {
        let node = &self.nodes[n.0];
        for _ in 0..depth {
            write!(f, "-")?;
        }
        let label = if node.parent.is_none() {
            "ROOT"
        } else if matches!(node.kind, NodeKind::Branch(_)) {
            "BRANCH"
        } else {
            "LEAF"
        };
        writeln!(
            f,
            "{:<8}({:03},{:03})({:03},{:03}) x{}",
            label,
            node.mbr.left(),
            node.mbr.top(),
            node.mbr.right(),
            node.mbr.bottom(),
            self.occupant_count(n)
        )?;
        if let NodeKind::Branch(children) = &node.kind {
            for &c in children {
                self.dump(f, c, depth + 1)?;
            }
        }
        Ok(())
    }
}

impl<T: RTreeObject> Default for RTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RTreeObject> fmt::Debug for RTree<T> {
    /// The default format prints a summary; the alternate format (`{:#?}`) dumps the
    /// tree preorder, one node per line, indented by depth.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            self.dump(f, self.root, 0)
        } else {
            f.debug_struct("RTree")
                .field("len", &self.len)
                .field("height", &self.height())
                .field("nodes", &(self.nodes.len() - self.free.len()))
                .finish()
        }
    }
}

/// Distributes `MAX_ENTRIES + 1` staged occupants between two groups in quadratic time.
///
/// The groups are seeded with the least compatible pair (the pair wasting the most area
/// in a shared mbr). Remaining occupants are assigned one at a time, most decided first,
/// to the group whose mbr needs less enlargement; ties fall to the smaller mbr, then the
/// smaller group. When one group must take every remaining occupant to reach
/// `MIN_ENTRIES`, the rest are poured into it outright.
///
/// The routine works on `(rect, occupant)` pairs and is oblivious to whether the
/// occupants are leaf entries or child links, so it serves every level of the tree.
#[allow(clippy::type_complexity)]
fn quadratic_split<O>(
    mut staged: Vec<(Rectangle, O)>,
) -> (Rectangle, Vec<(Rectangle, O)>, Rectangle, Vec<(Rectangle, O)>) {
    debug_assert_eq!(staged.len(), MAX_ENTRIES + 1);

    let (i, j) = pick_seeds(&staged);
    let seed_b = staged.remove(j);
    let seed_a = staged.remove(i);
    let mut mbr_a = seed_a.0;
    let mut mbr_b = seed_b.0;
    let mut group_a = vec![seed_a];
    let mut group_b = vec![seed_b];

    while !staged.is_empty() {
        // A group that needs every remaining occupant to reach the minimum takes them
        // all, keeping the fan-out invariant.
        if group_a.len() + staged.len() == MIN_ENTRIES {
            for (rect, occupant) in staged.drain(..) {
                mbr_a.grow(&rect);
                group_a.push((rect, occupant));
            }
            break;
        }
        if group_b.len() + staged.len() == MIN_ENTRIES {
            for (rect, occupant) in staged.drain(..) {
                mbr_b.grow(&rect);
                group_b.push((rect, occupant));
            }
            break;
        }

        let next = pick_next(&staged, &mbr_a, &mbr_b);
        let (rect, occupant) = staged.remove(next);
        let enl_a = mbr_a.enlargement(&rect);
        let enl_b = mbr_b.enlargement(&rect);
        let to_a = if enl_a != enl_b {
            enl_a < enl_b
        } else if mbr_a.area() != mbr_b.area() {
            mbr_a.area() < mbr_b.area()
        } else {
            group_a.len() <= group_b.len()
        };
        if to_a {
            mbr_a.grow(&rect);
            group_a.push((rect, occupant));
        } else {
            mbr_b.grow(&rect);
            group_b.push((rect, occupant));
        }
    }

    (mbr_a, group_a, mbr_b, group_b)
}

/// Indices of the most wasteful pairing among the staged occupants, `i < j`.
fn pick_seeds<O>(staged: &[(Rectangle, O)]) -> (usize, usize) {
    let mut max = i64::MIN;
    let (mut si, mut sj) = (0, 1);
    for i in 0..staged.len() {
        for j in (i + 1)..staged.len() {
            let d = staged[i].0.waste(&staged[j].0);
            if d > max {
                max = d;
                si = i;
                sj = j;
            }
        }
    }
    (si, sj)
}

/// Index of the staged occupant with the strongest preference between the two group
/// mbrs, measured as the absolute difference in enlargement.
fn pick_next<O>(staged: &[(Rectangle, O)], mbr_a: &Rectangle, mbr_b: &Rectangle) -> usize {
    let mut max = i64::MIN;
    let mut imax = 0;
    for (i, (rect, _)) in staged.iter().enumerate() {
        let d = (mbr_a.enlargement(rect) as i64 - mbr_b.enlargement(rect) as i64).abs();
        if d > max {
            max = d;
            imax = i;
        }
    }
    imax
}

/// A lazy overlap-search iterator borrowing the tree.
///
/// Branches are expanded onto an explicit stack; leaves are scanned entry by entry. The
/// iterator is finite and can be recreated from [`RTree::search`] at any time.
pub struct Search<'a, T: RTreeObject> {
    tree: &'a RTree<T>,
    window: Rectangle,
    stack: Vec<NodeId>,
    entries: &'a [Entry<T>],
    cursor: usize,
}

impl<'a, T: RTreeObject> Iterator for Search<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            while self.cursor < self.entries.len() {
                let entry = &self.entries[self.cursor];
                self.cursor += 1;
                if entry.bbox.overlaps(&self.window) {
                    return Some(&entry.object);
                }
            }
            let n = self.stack.pop()?;
            match &self.tree.nodes[n.0].kind {
                NodeKind::Leaf(entries) => {
                    self.entries = entries;
                    self.cursor = 0;
                }
                NodeKind::Branch(children) => {
                    for &c in children {
                        if self.tree.nodes[c.0].mbr.overlaps(&self.window) {
                            self.stack.push(c);
                        }
                    }
                }
            }
        }
    }
}
