mod arena;
mod cursor;
mod handle;
mod node;
mod raw_avl_tree;

pub(crate) use cursor::{InOrder, PreOrder};
pub(crate) use raw_avl_tree::RawAvlTree;
