use core::borrow::Borrow;
use core::cmp::Ordering::{Equal, Greater, Less};

use log::{debug, trace};

use super::arena::Arena;
use super::cursor::{InOrder, PreOrder};
use super::handle::Handle;
use super::node::Node;

/// The size-augmented AVL tree backing `AvlMultiset`.
#[derive(Clone)]
pub(crate) struct RawAvlTree<K> {
    /// Arena storing one node per distinct key.
    nodes: Arena<Node<K>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// Total number of elements, duplicates included.
    len: usize,
}

impl<K> RawAvlTree<K> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` distinct keys.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of distinct keys (nodes).
    pub(crate) const fn distinct_len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Returns the height of the whole tree; 0 when empty.
    pub(crate) fn height(&self) -> usize {
        self.height_of(self.root)
    }

    /// Releases every node, children before parents, and leaves the tree empty.
    /// Arena storage is retained for reuse.
    pub(crate) fn clear(&mut self) {
        let released = self.root.take().map_or(0, |root| self.release(root));
        self.len = 0;
        debug_assert!(self.nodes.is_empty(), "`RawAvlTree::clear()` - unreachable nodes survived!");
        debug!("released {released} nodes");
    }

    fn release(&mut self, handle: Handle) -> usize {
        let node = self.nodes.get(handle);
        let (left, right) = (node.left(), node.right());
        let released = left.map_or(0, |left| self.release(left)) + right.map_or(0, |right| self.release(right));
        self.nodes.free(handle);
        released + 1
    }

    /// Ascending iteration, each key repeated per its multiplicity.
    pub(crate) fn iter(&self) -> InOrder<'_, K> {
        InOrder::new(&self.nodes, self.root, self.len)
    }

    /// Pre-order iteration, each key repeated per its multiplicity.
    pub(crate) fn traverse(&self) -> PreOrder<'_, K> {
        PreOrder::new(&self.nodes, self.root, self.len)
    }

    /// Finds the `k`-th largest element (1-based), also reporting how many
    /// nodes the descent visited.
    pub(crate) fn kth_largest(&self, mut k: usize) -> Option<(&K, usize)> {
        let mut current = self.root;
        let mut probes = 0;

        while let Some(handle) = current {
            probes += 1;
            let node = self.nodes.get(handle);
            if k <= node.right_size() {
                current = node.right();
            } else if k <= node.right_size() + node.count() {
                return Some((node.key(), probes));
            } else {
                k -= node.right_size() + node.count();
                current = node.left();
            }
        }
        None
    }

    /// Finds the `k`-th smallest element (1-based).
    pub(crate) fn kth_smallest(&self, mut k: usize) -> Option<&K> {
        let mut current = self.root;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            if k <= node.left_size() {
                current = node.left();
            } else if k <= node.left_size() + node.count() {
                return Some(node.key());
            } else {
                k -= node.left_size() + node.count();
                current = node.right();
            }
        }
        None
    }

    /// Rank `(N + 1) / 2` counted from the largest; for even `N` that is the
    /// upper of the two middle elements.
    pub(crate) fn median(&self) -> Option<&K> {
        let total = self.nodes.get(self.root?).total();
        self.kth_largest(total.div_ceil(2)).map(|(key, _)| key)
    }

    fn height_of(&self, subtree: Option<Handle>) -> usize {
        subtree.map_or(0, |handle| self.nodes.get(handle).height())
    }

    #[allow(clippy::cast_possible_wrap)]
    fn balance_factor(&self, subtree: Option<Handle>) -> isize {
        let Some(handle) = subtree else {
            return 0;
        };
        let node = self.nodes.get(handle);
        self.height_of(node.left()) as isize - self.height_of(node.right()) as isize
    }

    fn update_height(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let height = 1 + self.height_of(node.left()).max(self.height_of(node.right()));
        self.nodes.get_mut(handle).set_height(height);
    }

    /// Rotates the subtree at `y` right and returns its new root, the former
    /// left child `x`.
    ///
    /// `x`'s old right subtree moves under `y`, so `y.left_size` becomes that
    /// subtree's size and `x.right_size` becomes everything now under `y`.
    fn rotate_right(&mut self, y: Handle) -> Handle {
        let x = self.nodes.get(y).left().expect("`RawAvlTree::rotate_right()` - pivot has no left child!");
        let x_node = self.nodes.get(x);
        let (inner, inner_size) = (x_node.right(), x_node.right_size());

        let y_node = self.nodes.get_mut(y);
        y_node.set_left(inner);
        y_node.set_left_size(inner_size);
        let y_total = y_node.total();
        self.update_height(y);

        let x_node = self.nodes.get_mut(x);
        x_node.set_right(Some(y));
        x_node.set_right_size(y_total);
        self.update_height(x);

        trace!("rotate_right: {y:?} -> {x:?}");
        x
    }

    /// Mirror of [`Self::rotate_right`].
    fn rotate_left(&mut self, x: Handle) -> Handle {
        let y = self.nodes.get(x).right().expect("`RawAvlTree::rotate_left()` - pivot has no right child!");
        let y_node = self.nodes.get(y);
        let (inner, inner_size) = (y_node.left(), y_node.left_size());

        let x_node = self.nodes.get_mut(x);
        x_node.set_right(inner);
        x_node.set_right_size(inner_size);
        let x_total = x_node.total();
        self.update_height(x);

        let y_node = self.nodes.get_mut(y);
        y_node.set_left(Some(x));
        y_node.set_left_size(x_total);
        self.update_height(y);

        trace!("rotate_left: {x:?} -> {y:?}");
        y
    }
}

impl<K: Ord> RawAvlTree<K> {
    pub(crate) fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.count(key) > 0
    }

    /// Returns the multiplicity of `key`, 0 if absent.
    pub(crate) fn count<Q>(&self, key: &Q) -> usize
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => node.right(),
                Equal => return node.count(),
            };
        }
        0
    }

    /// Returns the number of elements strictly smaller than `key`, if `key` is present.
    pub(crate) fn rank_of<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        let mut rank = 0;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key().borrow()) {
                Less => node.left(),
                Greater => {
                    rank += node.left_size() + node.count();
                    node.right()
                }
                Equal => return Some(rank + node.left_size()),
            };
        }
        None
    }

    /// Inserts one copy of `key` and returns its multiplicity afterwards.
    pub(crate) fn insert(&mut self, key: K) -> usize {
        let (root, landed) = self.insert_at(self.root, key);
        self.root = Some(root);
        self.len += 1;
        self.nodes.get(landed).count()
    }

    /// Returns the new subtree root and the node now holding `key`. The holder
    /// never changes handle during rebalancing, so ancestors compare against
    /// it instead of needing their own copy of the key.
    fn insert_at(&mut self, subtree: Option<Handle>, key: K) -> (Handle, Handle) {
        let Some(handle) = subtree else {
            let leaf = self.nodes.alloc(Node::new(key));
            return (leaf, leaf);
        };

        let node = self.nodes.get(handle);
        let (ordering, left, right) = (key.cmp(node.key()), node.left(), node.right());
        let landed = match ordering {
            Less => {
                let (child, landed) = self.insert_at(left, key);
                let node = self.nodes.get_mut(handle);
                node.set_left(Some(child));
                node.set_left_size(node.left_size() + 1);
                landed
            }
            Greater => {
                let (child, landed) = self.insert_at(right, key);
                let node = self.nodes.get_mut(handle);
                node.set_right(Some(child));
                node.set_right_size(node.right_size() + 1);
                landed
            }
            Equal => {
                self.nodes.get_mut(handle).increment_count();
                return (handle, handle);
            }
        };

        (self.rebalance_after_insert(handle, landed), landed)
    }

    fn rebalance_after_insert(&mut self, handle: Handle, landed: Handle) -> Handle {
        self.update_height(handle);
        let balance = self.balance_factor(Some(handle));
        let node = self.nodes.get(handle);
        let inserted = self.nodes.get(landed).key();

        if balance > 1 {
            let left = node.left().expect("`RawAvlTree::rebalance_after_insert()` - left-heavy without left child!");
            match inserted.cmp(self.nodes.get(left).key()) {
                Less => return self.rotate_right(handle),
                Greater => {
                    let pivot = self.rotate_left(left);
                    self.nodes.get_mut(handle).set_left(Some(pivot));
                    return self.rotate_right(handle);
                }
                Equal => {}
            }
        } else if balance < -1 {
            let right = node.right().expect("`RawAvlTree::rebalance_after_insert()` - right-heavy without right child!");
            match inserted.cmp(self.nodes.get(right).key()) {
                Greater => return self.rotate_left(handle),
                Less => {
                    let pivot = self.rotate_right(right);
                    self.nodes.get_mut(handle).set_right(Some(pivot));
                    return self.rotate_left(handle);
                }
                Equal => {}
            }
        }
        handle
    }

    /// Removes one copy of `key`. Returns `false`, leaving the tree untouched,
    /// if `key` is absent.
    pub(crate) fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let Some(root) = self.root else {
            return false;
        };
        if !self.contains(key) {
            return false;
        }

        self.root = self.remove_at(root, key);
        self.len -= 1;
        true
    }

    fn remove_at<Q>(&mut self, handle: Handle, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let node = self.nodes.get(handle);
        let (ordering, count) = (key.cmp(node.key().borrow()), node.count());
        let (left, right) = (node.left(), node.right());

        match ordering {
            Less => {
                let left = left.expect("`RawAvlTree::remove_at()` - key missing from left subtree!");
                let child = self.remove_at(left, key);
                let node = self.nodes.get_mut(handle);
                node.set_left(child);
                node.set_left_size(node.left_size() - 1);
            }
            Greater => {
                let right = right.expect("`RawAvlTree::remove_at()` - key missing from right subtree!");
                let child = self.remove_at(right, key);
                let node = self.nodes.get_mut(handle);
                node.set_right(child);
                node.set_right_size(node.right_size() - 1);
            }
            Equal if count > 1 => {
                self.nodes.get_mut(handle).decrement_count();
                return Some(handle);
            }
            Equal => match (left, right) {
                (None, None) => {
                    self.nodes.free(handle);
                    trace!("released leaf {handle:?}");
                    return None;
                }
                (Some(child), None) | (None, Some(child)) => {
                    // The caller relinks to the only child; it is already balanced.
                    self.nodes.free(handle);
                    trace!("released {handle:?}, promoted {child:?}");
                    return Some(child);
                }
                (Some(left), Some(_)) => self.replace_with_predecessor(handle, left),
            },
        }

        Some(self.rebalance_after_remove(handle))
    }

    /// Moves the in-order predecessor's key block into `handle` and releases
    /// the predecessor's node.
    fn replace_with_predecessor(&mut self, handle: Handle, left: Handle) {
        let (new_left, predecessor) = self.detach_max(left);
        let (key, count) = self.nodes.take(predecessor).into_block();

        let node = self.nodes.get_mut(handle);
        node.set_left(new_left);
        node.set_left_size(node.left_size() - count);
        node.replace_block(key, count);
        trace!("released predecessor {predecessor:?} into {handle:?}");
    }

    /// Unlinks the rightmost node of the subtree at `handle`, splicing its left
    /// child into its place. Every node passed on the way down loses the
    /// detached block from its `right_size` and is rebalanced on the way back.
    ///
    /// Returns the new subtree root and the detached (still allocated) node.
    fn detach_max(&mut self, handle: Handle) -> (Option<Handle>, Handle) {
        let node = self.nodes.get(handle);
        let Some(right) = node.right() else {
            return (node.left(), handle);
        };

        let (new_right, max) = self.detach_max(right);
        let moved = self.nodes.get(max).count();
        let node = self.nodes.get_mut(handle);
        node.set_right(new_right);
        node.set_right_size(node.right_size() - moved);

        (Some(self.rebalance_after_remove(handle)), max)
    }

    fn rebalance_after_remove(&mut self, handle: Handle) -> Handle {
        self.update_height(handle);
        let balance = self.balance_factor(Some(handle));
        let node = self.nodes.get(handle);

        if balance > 1 {
            let left = node.left().expect("`RawAvlTree::rebalance_after_remove()` - left-heavy without left child!");
            if self.balance_factor(Some(left)) < 0 {
                let pivot = self.rotate_left(left);
                self.nodes.get_mut(handle).set_left(Some(pivot));
            }
            return self.rotate_right(handle);
        }
        if balance < -1 {
            let right = node.right().expect("`RawAvlTree::rebalance_after_remove()` - right-heavy without right child!");
            if self.balance_factor(Some(right)) > 0 {
                let pivot = self.rotate_right(right);
                self.nodes.get_mut(handle).set_right(Some(pivot));
            }
            return self.rotate_left(handle);
        }
        handle
    }
}
