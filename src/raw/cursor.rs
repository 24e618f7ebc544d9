use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::Node;

// AVL height stays under 1.44 * log2(n + 2), so 32 inline slots cover any
// tree with fewer than ~2^22 distinct keys before spilling to the heap.
const INLINE_DEPTH: usize = 32;

type Stack = SmallVec<[Handle; INLINE_DEPTH]>;

/// A key together with how many of its copies are still to be yielded.
type Block<'a, K> = Option<(&'a K, usize)>;

/// Pre-order walk (node, left subtree, right subtree), each key repeated per
/// its multiplicity.
pub(crate) struct PreOrder<'a, K> {
    nodes: &'a Arena<Node<K>>,
    stack: Stack,
    block: Block<'a, K>,
    remaining: usize,
}

impl<'a, K> PreOrder<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<Node<K>>, root: Option<Handle>, len: usize) -> Self {
        let mut stack = Stack::new();
        stack.extend(root);
        Self {
            nodes,
            stack,
            block: None,
            remaining: len,
        }
    }

    pub(crate) const fn len(&self) -> usize {
        self.remaining
    }
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        loop {
            if let Some((key, copies)) = &mut self.block
                && *copies > 0
            {
                *copies -= 1;
                self.remaining -= 1;
                return Some(*key);
            }

            let nodes = self.nodes;
            let node = nodes.get(self.stack.pop()?);
            // Right goes first so the left subtree is popped first.
            self.stack.extend(node.right());
            self.stack.extend(node.left());
            self.block = Some((node.key(), node.count()));
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> Clone for PreOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            stack: self.stack.clone(),
            block: self.block,
            remaining: self.remaining,
        }
    }
}

/// Ascending walk from both ends, each key repeated per its multiplicity.
///
/// The two ends keep independent spines; `remaining` stops them once they
/// have jointly yielded every element, so they never cross.
pub(crate) struct InOrder<'a, K> {
    nodes: &'a Arena<Node<K>>,
    front: Stack,
    front_block: Block<'a, K>,
    back: Stack,
    back_block: Block<'a, K>,
    remaining: usize,
}

impl<'a, K> InOrder<'a, K> {
    pub(crate) fn new(nodes: &'a Arena<Node<K>>, root: Option<Handle>, len: usize) -> Self {
        let mut cursor = Self {
            nodes,
            front: Stack::new(),
            front_block: None,
            back: Stack::new(),
            back_block: None,
            remaining: len,
        };
        cursor.descend_left(root);
        cursor.descend_right(root);
        cursor
    }

    pub(crate) const fn len(&self) -> usize {
        self.remaining
    }

    fn descend_left(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            self.front.push(handle);
            current = self.nodes.get(handle).left();
        }
    }

    fn descend_right(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            self.back.push(handle);
            current = self.nodes.get(handle).right();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some((key, copies)) = &mut self.front_block
                && *copies > 0
            {
                *copies -= 1;
                self.remaining -= 1;
                return Some(*key);
            }

            let nodes = self.nodes;
            let node = nodes.get(self.front.pop()?);
            self.front_block = Some((node.key(), node.count()));
            self.descend_left(node.right());
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> DoubleEndedIterator for InOrder<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        loop {
            if let Some((key, copies)) = &mut self.back_block
                && *copies > 0
            {
                *copies -= 1;
                self.remaining -= 1;
                return Some(*key);
            }

            let nodes = self.nodes;
            let node = nodes.get(self.back.pop()?);
            self.back_block = Some((node.key(), node.count()));
            self.descend_right(node.left());
        }
    }
}

impl<K> Clone for InOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes,
            front: self.front.clone(),
            front_block: self.front_block,
            back: self.back.clone(),
            back_block: self.back_block,
            remaining: self.remaining,
        }
    }
}
