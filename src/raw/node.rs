use super::handle::Handle;

/// One distinct key and the block of duplicates it stands for.
///
/// `left_size` and `right_size` count elements (sums of `count`), not nodes,
/// and exclude this node's own block.
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    key: K,
    count: usize,
    left: Option<Handle>,
    right: Option<Handle>,
    height: usize,
    left_size: usize,
    right_size: usize,
}

impl<K> Node<K> {
    /// Creates a leaf holding a single copy of `key`.
    pub(crate) const fn new(key: K) -> Self {
        Self {
            key,
            count: 1,
            left: None,
            right: None,
            height: 1,
            left_size: 0,
            right_size: 0,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> &K {
        &self.key
    }

    /// Multiplicity of the key.
    #[inline]
    pub(crate) const fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub(crate) const fn left_size(&self) -> usize {
        self.left_size
    }

    #[inline]
    pub(crate) const fn right_size(&self) -> usize {
        self.right_size
    }

    /// Elements in the subtree rooted here, duplicates included.
    #[inline]
    pub(crate) const fn total(&self) -> usize {
        self.left_size + self.count + self.right_size
    }

    pub(crate) fn set_left(&mut self, left: Option<Handle>) {
        self.left = left;
    }

    pub(crate) fn set_right(&mut self, right: Option<Handle>) {
        self.right = right;
    }

    pub(crate) fn set_height(&mut self, height: usize) {
        self.height = height;
    }

    pub(crate) fn set_left_size(&mut self, size: usize) {
        self.left_size = size;
    }

    pub(crate) fn set_right_size(&mut self, size: usize) {
        self.right_size = size;
    }

    pub(crate) fn increment_count(&mut self) {
        self.count += 1;
    }

    pub(crate) fn decrement_count(&mut self) {
        debug_assert!(self.count > 1, "`Node::decrement_count()` - block would become empty!");
        self.count -= 1;
    }

    /// Overwrites the key block, keeping links, height and subtree sizes.
    /// Returns the previous key.
    pub(crate) fn replace_block(&mut self, key: K, count: usize) -> K {
        self.count = count;
        core::mem::replace(&mut self.key, key)
    }

    /// Consumes the node, returning its key block.
    pub(crate) fn into_block(self) -> (K, usize) {
        (self.key, self.count)
    }
}
