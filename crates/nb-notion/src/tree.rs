//! Page hierarchy reconstruction.
//!
//! Chunks list blocks in no particular order: a child may arrive before its
//! parent, and a parent may be outside the fetched set entirely. [`build_forest`]
//! rebuilds the hierarchy in a single pass, re-parenting blocks that were
//! parked at the top level once their parent shows up.
//!
//! # Child order
//!
//! A node's children are listed in the order they were attached: first the
//! parked blocks it adopted when it arrived (in top-level order), then the
//! blocks that arrived after it. This follows arrival order, not necessarily
//! the page's visual order (which lives in the parent's `content` field).

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::types::Block;

/// A block and its children.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BlockNode {
    /// The block record.
    pub value: Block,
    /// Child nodes in attachment order.
    pub children: Vec<BlockNode>,
}

impl Drop for BlockNode {
    fn drop(&mut self) {
        // Flatten descendants so each node is dropped childless.
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}

/// Top-level nodes of a reconstructed page.
///
/// Roots are blocks whose parent was not among the input records.
/// Building, iterating and dropping do not recurse on depth; serializing
/// does, once per nesting level.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Forest {
    roots: Vec<BlockNode>,
}

impl Forest {
    /// Root nodes in insertion order.
    pub fn roots(&self) -> &[BlockNode] {
        &self.roots
    }

    /// Take ownership of the root nodes.
    pub fn into_roots(self) -> Vec<BlockNode> {
        self.roots
    }

    /// Whether the forest has no nodes.
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Total number of nodes, at any depth.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    /// Depth-first, pre-order traversal yielding `(depth, node)`.
    ///
    /// Roots have depth 0.
    pub fn iter(&self) -> ForestIter<'_> {
        ForestIter {
            stack: self.roots.iter().rev().map(|node| (0, node)).collect(),
        }
    }

    /// Find the node for a block id.
    pub fn find(&self, id: &str) -> Option<&BlockNode> {
        self.iter()
            .find_map(|(_, node)| (node.value.id == id).then_some(node))
    }
}

impl<'a> IntoIterator for &'a Forest {
    type Item = (usize, &'a BlockNode);
    type IntoIter = ForestIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Pre-order iterator over a [`Forest`].
pub struct ForestIter<'a> {
    stack: Vec<(usize, &'a BlockNode)>,
}

impl<'a> Iterator for ForestIter<'a> {
    type Item = (usize, &'a BlockNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Working node, linked by arena index.
struct Slot {
    block: Block,
    parent: Option<usize>,
    children: Vec<usize>,
}

/// Rebuild the block hierarchy from records in arbitrary order.
///
/// For each record, in input order:
///
/// 1. every current top-level node whose `parent_id` is this record's id is
///    moved under it, in top-level order;
/// 2. if a node for this record's `parent_id` already exists anywhere in the
///    structure, the record is appended to its children; otherwise it becomes
///    a new top-level node.
///
/// A node is never attached inside the subtree it just adopted, so
/// self-parented records and parent cycles end up as roots instead of
/// looping. Later records repeating an id already seen are skipped.
///
/// Every input record with a distinct id appears exactly once in the result.
pub fn build_forest<I>(records: I) -> Forest
where
    I: IntoIterator<Item = Block>,
{
    let mut slots: Vec<Slot> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut roots: Vec<usize> = Vec::new();

    for block in records {
        if index.contains_key(&block.id) {
            debug!("Skipping duplicate block {}", block.id);
            continue;
        }
        let this = slots.len();

        // Nested nodes never match: their parent is already present and ids
        // are unique, so only parked top-level nodes can be waiting for us.
        let mut adopted = Vec::new();
        roots.retain(|&root| {
            let waiting = slots[root].block.parent_id == block.id;
            if waiting {
                adopted.push(root);
            }
            !waiting
        });
        for &child in &adopted {
            slots[child].parent = Some(this);
        }

        let parent = index
            .get(&block.parent_id)
            .copied()
            .filter(|&candidate| adopted.is_empty() || !is_within(&slots, candidate, this));
        match parent {
            Some(parent) => slots[parent].children.push(this),
            None => roots.push(this),
        }
        if !adopted.is_empty() || parent.is_none() {
            debug!(
                "Block {}: adopted {}, {}",
                block.id,
                adopted.len(),
                if parent.is_some() { "attached" } else { "root" }
            );
        }

        index.insert(block.id.clone(), this);
        slots.push(Slot {
            block,
            parent,
            children: adopted,
        });
    }

    assemble(slots, &roots)
}

/// Whether `node` is `ancestor` or lies below it.
///
/// `ancestor` may be the index of the slot under construction, which is not
/// in `slots` yet but is already referenced by the nodes it adopted.
fn is_within(slots: &[Slot], node: usize, ancestor: usize) -> bool {
    let mut current = Some(node);
    while let Some(index) = current {
        if index == ancestor {
            return true;
        }
        current = slots[index].parent;
    }
    false
}

/// Convert the arena into owned nodes without recursing on tree depth.
fn assemble(slots: Vec<Slot>, roots: &[usize]) -> Forest {
    let mut blocks = Vec::with_capacity(slots.len());
    let mut children = Vec::with_capacity(slots.len());
    for slot in slots {
        blocks.push(Some(slot.block));
        children.push(slot.children);
    }

    // Pre-order: every parent is listed before its children.
    let mut order = Vec::with_capacity(blocks.len());
    let mut stack: Vec<usize> = roots.to_vec();
    while let Some(index) = stack.pop() {
        order.push(index);
        stack.extend(children[index].iter().copied());
    }

    let mut built: Vec<Option<BlockNode>> = (0..blocks.len()).map(|_| None).collect();
    for &index in order.iter().rev() {
        let nodes = children[index]
            .iter()
            .filter_map(|&child| built[child].take())
            .collect();
        built[index] = blocks[index].take().map(|value| BlockNode {
            value,
            children: nodes,
        });
    }

    Forest {
        roots: roots
            .iter()
            .filter_map(|&root| built[root].take())
            .collect(),
    }
}
