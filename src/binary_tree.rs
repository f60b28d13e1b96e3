//! This module implements an arena-backed binary tree.
//!
//! Nodes live in one vector and refer to their children by index. The decision
//! tree stores its false branch as the left child and its true branch as the
//! right child.

use serde_derive::{Deserialize, Serialize};

/// The node of the binary tree. `value` is the payload, the children are
/// indices into the owning [`BinaryTree`].
///
/// [`BinaryTree`]: struct.BinaryTree.html
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryTreeNode<T> {
    /// The payload of the node.
    pub value: T,
    index: TreeIndex,
    left: Option<TreeIndex>,
    right: Option<TreeIndex>,
}

impl<T> BinaryTreeNode<T> {
    /// Build a detached node with the given value.
    ///
    /// # Example
    /// ```
    /// use dtboost::binary_tree::BinaryTreeNode;
    /// let root = BinaryTreeNode::new(10);
    /// assert_eq!(10, root.value);
    /// ```
    pub fn new(value: T) -> Self {
        BinaryTreeNode {
            value,
            index: 0,
            left: None,
            right: None,
        }
    }

    /// Index of this node in its tree.
    pub fn index(&self) -> TreeIndex {
        self.index
    }

    /// Whether the node has neither child.
    pub fn is_terminal(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// The index to retrieve a tree node. Always get the index value from [`BinaryTree`] APIs.
///
/// [`BinaryTree`]: struct.BinaryTree.html
pub type TreeIndex = usize;

/// The binary tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryTree<T> {
    tree: Vec<BinaryTreeNode<T>>,
}

impl<T> Default for BinaryTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BinaryTree<T> {
    /// Build a new empty binary tree.
    pub fn new() -> Self {
        BinaryTree { tree: Vec::new() }
    }

    /// Add a node as the root node. Return the index of the root node.
    ///
    /// # Example
    /// ``` rust
    /// use dtboost::binary_tree::{BinaryTree, BinaryTreeNode};
    /// let mut tree: BinaryTree<u8> = BinaryTree::new();
    /// let root_index = tree.add_root(BinaryTreeNode::new(1));
    /// assert_eq!(root_index, tree.get_root_index());
    /// ```
    pub fn add_root(&mut self, root: BinaryTreeNode<T>) -> TreeIndex {
        self.add_node(None, root)
    }

    /// Return the index of the root node.
    pub fn get_root_index(&self) -> TreeIndex {
        0
    }

    /// Return the root node, or `None` for an empty tree.
    pub fn get_root(&self) -> Option<&BinaryTreeNode<T>> {
        self.tree.first()
    }

    /// Return the left child of the given `node`.
    ///
    /// # Example
    /// ``` rust
    /// use dtboost::binary_tree::{BinaryTree, BinaryTreeNode};
    /// let mut tree: BinaryTree<u8> = BinaryTree::new();
    /// let root_index = tree.add_root(BinaryTreeNode::new(1));
    /// let _ = tree.add_left_node(root_index, BinaryTreeNode::new(2));
    /// let root = tree.get_node(root_index).expect("Didn't find root node");
    /// let left = tree.get_left_child(root).expect("Didn't find left child");
    /// assert_eq!(2, left.value);
    /// assert!(tree.get_right_child(root).is_none());
    /// ```
    pub fn get_left_child(&self, node: &BinaryTreeNode<T>) -> Option<&BinaryTreeNode<T>> {
        node.left.and_then(|i| self.tree.get(i))
    }

    /// Return the right child of the given `node`.
    pub fn get_right_child(&self, node: &BinaryTreeNode<T>) -> Option<&BinaryTreeNode<T>> {
        node.right.and_then(|i| self.tree.get(i))
    }

    /// Return the node with the given index.
    pub fn get_node(&self, index: TreeIndex) -> Option<&BinaryTreeNode<T>> {
        self.tree.get(index)
    }

    /// Add a node as the left child of a given `parent` node. Return the index of the added node.
    pub fn add_left_node(&mut self, parent: TreeIndex, child: BinaryTreeNode<T>) -> TreeIndex {
        self.add_node(Some((parent, true)), child)
    }

    /// Add a node as the right child of a given `parent` node. Return the index of the added node.
    pub fn add_right_node(&mut self, parent: TreeIndex, child: BinaryTreeNode<T>) -> TreeIndex {
        self.add_node(Some((parent, false)), child)
    }

    /// `parent` is the parent's index and whether the child goes left. A
    /// root is added with `None` and only lands at index 0 when the tree is empty.
    fn add_node(
        &mut self,
        parent: Option<(TreeIndex, bool)>,
        mut child: BinaryTreeNode<T>,
    ) -> TreeIndex {
        let position = self.tree.len();
        child.index = position;
        self.tree.push(child);

        if let Some((parent, is_left)) = parent {
            if let Some(n) = self.tree.get_mut(parent) {
                if is_left {
                    n.left = Some(position);
                } else {
                    n.right = Some(position);
                }
            }
        }
        position
    }

    /// Visit the nodes in pre-order (node, left subtree, right subtree) together
    /// with their depth. The root is at depth 0.
    pub fn walk<F>(&self, mut visit: F)
    where
        F: FnMut(usize, &BinaryTreeNode<T>),
    {
        let mut stack: Vec<(usize, &BinaryTreeNode<T>)> = Vec::new();
        if let Some(root) = self.get_root() {
            stack.push((0, root));
        }
        while let Some((deep, node)) = stack.pop() {
            visit(deep, node);
            if let Some(right) = self.get_right_child(node) {
                stack.push((deep + 1, right));
            }
            if let Some(left) = self.get_left_child(node) {
                stack.push((deep + 1, left));
            }
        }
    }

    /// Number of edges on the longest root-to-node path. An empty or single
    /// node tree has depth 0.
    pub fn depth(&self) -> usize {
        let mut max = 0;
        self.walk(|deep, _| max = max.max(deep));
        max
    }

    pub fn len(&self) -> usize {
        self.tree.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_tree() {
        let mut tree: BinaryTree<u32> = BinaryTree::new();
        let root_index = tree.add_root(BinaryTreeNode::new(10));

        let n1_index = tree.add_left_node(root_index, BinaryTreeNode::new(5));
        let n2_index = tree.add_right_node(root_index, BinaryTreeNode::new(6));

        tree.add_left_node(n2_index, BinaryTreeNode::new(7));
        tree.add_right_node(n2_index, BinaryTreeNode::new(8));
        tree.add_left_node(n1_index, BinaryTreeNode::new(9));

        let mut visited = Vec::new();
        tree.walk(|deep, node| visited.push((deep, node.value)));
        assert_eq!(
            visited,
            vec![(0, 10), (1, 5), (2, 9), (1, 6), (2, 7), (2, 8)]
        );
        assert_eq!(tree.depth(), 2);
        assert_eq!(tree.len(), 6);
    }

    #[test]
    fn missing_children_are_none() {
        let mut tree: BinaryTree<u32> = BinaryTree::new();
        let root_index = tree.add_root(BinaryTreeNode::new(1));
        tree.add_right_node(root_index, BinaryTreeNode::new(2));

        let root = tree.get_root().expect("root");
        assert!(tree.get_left_child(root).is_none());
        assert_eq!(tree.get_right_child(root).map(|n| n.value), Some(2));
        assert!(!root.is_terminal());
    }

    #[test]
    fn empty_tree() {
        let tree: BinaryTree<u32> = BinaryTree::new();
        assert!(tree.is_empty());
        assert!(tree.get_root().is_none());
        assert_eq!(tree.depth(), 0);
    }
}
