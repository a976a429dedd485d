//! Address-keyed index of allocated extents.
//!
//! Plain unbalanced binary search tree. Insertion sends keys greater than or
//! equal to a node's key to the right; lookup does the same after the
//! equality check, so a duplicate key always resolves to the node inserted
//! first. Deletion promotes the smallest node of the right subtree by
//! copying its payload into the deleted slot. No rebalancing: degenerate
//! insertion orders make every operation O(n).

use std::cmp::Ordering;

/// One contiguous block run owned by a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extent {
    /// Content handle (logical storage address) the extent is indexed by.
    pub key: u32,
    pub block_index: u32,
    pub block_count: u32,
    pub owner: String,
}

impl Extent {
    pub fn new(key: u32, block_index: u32, block_count: u32, owner: impl Into<String>) -> Self {
        Self {
            key,
            block_index,
            block_count,
            owner: owner.into(),
        }
    }
}

struct TreeNode {
    extent: Extent,
    left: Link,
    right: Link,
}

type Link = Option<Box<TreeNode>>;

#[derive(Default)]
pub struct ExtentTree {
    root: Link,
    len: usize,
}

impl ExtentTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn insert(&mut self, extent: Extent) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if extent.key < node.extent.key {
                &mut node.left
            } else {
                &mut node.right
            };
        }
        *link = Some(Box::new(TreeNode {
            extent,
            left: None,
            right: None,
        }));
        self.len += 1;
    }

    pub fn find(&self, key: u32) -> Option<&Extent> {
        let mut link = &self.root;
        while let Some(node) = link {
            if node.extent.key == key {
                return Some(&node.extent);
            }
            link = if key >= node.extent.key {
                &node.right
            } else {
                &node.left
            };
        }
        None
    }

    pub fn find_mut(&mut self, key: u32) -> Option<&mut Extent> {
        let mut link = &mut self.root;
        while let Some(node) = link {
            if node.extent.key == key {
                return Some(&mut node.extent);
            }
            link = if key >= node.extent.key {
                &mut node.right
            } else {
                &mut node.left
            };
        }
        None
    }

    /// Removes the node keyed `key` and returns its extent.
    pub fn delete(&mut self, key: u32) -> Option<Extent> {
        let mut link = &mut self.root;
        loop {
            let ordering = key.cmp(&link.as_deref()?.extent.key);
            match ordering {
                Ordering::Less => link = &mut link.as_mut()?.left,
                Ordering::Greater => link = &mut link.as_mut()?.right,
                Ordering::Equal => break,
            }
        }

        let mut node = link.take()?;
        let removed = match (node.left.take(), node.right.take()) {
            (left, None) => {
                *link = left;
                node.extent
            }
            (None, right) => {
                *link = right;
                node.extent
            }
            (left, Some(right)) => {
                let mut right = Some(right);
                let successor = Self::delete_smallest(&mut right)?;
                let removed = std::mem::replace(&mut node.extent, successor.extent);
                node.left = left;
                node.right = right;
                *link = Some(node);
                removed
            }
        };
        self.len -= 1;
        Some(removed)
    }

    // Splices out the leftmost node of the subtree and hands it back.
    fn delete_smallest(link: &mut Link) -> Option<Box<TreeNode>> {
        let mut link = link;
        while link.as_ref()?.left.is_some() {
            link = &mut link.as_mut()?.left;
        }
        let mut node = link.take()?;
        *link = node.right.take();
        Some(node)
    }

    /// Longest root-to-leaf path in edges; -1 for an empty tree.
    pub fn height(&self) -> i32 {
        let mut height = -1;
        let mut level: Vec<&TreeNode> = self.root.as_deref().into_iter().collect();
        while !level.is_empty() {
            height += 1;
            level = level
                .into_iter()
                .flat_map(|n| [n.left.as_deref(), n.right.as_deref()])
                .flatten()
                .collect();
        }
        height
    }

    /// Extents in ascending key order.
    pub fn in_order(&self) -> Vec<&Extent> {
        let mut out = Vec::with_capacity(self.len);
        let mut stack: Vec<&TreeNode> = Vec::new();
        let mut current = self.root.as_deref();
        loop {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            match stack.pop() {
                Some(node) => {
                    out.push(&node.extent);
                    current = node.right.as_deref();
                }
                None => break,
            }
        }
        out
    }

    pub fn find_by_owner(&self, owner: &str) -> Option<&Extent> {
        self.in_order().into_iter().find(|e| e.owner == owner)
    }

    pub fn clear(&mut self) {
        // Iterative teardown, a degenerate tree would overflow the stack on drop.
        let mut pending: Vec<Box<TreeNode>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
        self.len = 0;
    }
}

impl Drop for ExtentTree {
    fn drop(&mut self) {
        self.clear();
    }
}
