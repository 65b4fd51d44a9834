//! Typed accessors over a page buffer, interpreted as a B-tree node.
//!
//! These are pure views: every accessor range-checks its slice but never
//! verifies that the underlying buffer is exactly [`PAGE_SIZE`] bytes —
//! that invariant is the pager's responsibility.
use std::mem;

pub const PAGE_SIZE: usize = 4096;

/// Node type tag. Internal nodes exist in the on-disk format but this
/// revision never creates or searches one — see [`Error::Unimplemented`](crate::errors::Error::Unimplemented).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeType {
    Leaf,
    Internal,
}

// Common node header: node_type (1) | is_root (1) | parent_page_num (4).
const NODE_TYPE_SIZE: usize = mem::size_of::<u8>();
const NODE_TYPE_OFFSET: usize = 0;
const IS_ROOT_SIZE: usize = mem::size_of::<u8>();
const IS_ROOT_OFFSET: usize = NODE_TYPE_OFFSET + NODE_TYPE_SIZE;
const PARENT_POINTER_SIZE: usize = mem::size_of::<u32>();
const PARENT_POINTER_OFFSET: usize = IS_ROOT_OFFSET + IS_ROOT_SIZE;
pub const COMMON_NODE_HEADER_SIZE: usize = NODE_TYPE_SIZE + IS_ROOT_SIZE + PARENT_POINTER_SIZE;

// Leaf node header: num_cells (4), following the common header.
const LEAF_NODE_NUM_CELLS_SIZE: usize = mem::size_of::<u32>();
const LEAF_NODE_NUM_CELLS_OFFSET: usize = COMMON_NODE_HEADER_SIZE;
pub const LEAF_NODE_HEADER_SIZE: usize = COMMON_NODE_HEADER_SIZE + LEAF_NODE_NUM_CELLS_SIZE;

// Leaf node body: an array of (key: 4, value: ROW_SIZE) cells.
const LEAF_NODE_KEY_SIZE: usize = mem::size_of::<u32>();
const LEAF_NODE_KEY_OFFSET: usize = 0;
const LEAF_NODE_VALUE_OFFSET: usize = LEAF_NODE_KEY_OFFSET + LEAF_NODE_KEY_SIZE;
pub const LEAF_NODE_VALUE_SIZE: usize = super::row::ROW_SIZE;
pub const LEAF_NODE_CELL_SIZE: usize = LEAF_NODE_KEY_SIZE + LEAF_NODE_VALUE_SIZE;
pub const LEAF_NODE_SPACE_FOR_CELLS: usize = PAGE_SIZE - LEAF_NODE_HEADER_SIZE;
pub const LEAF_NODE_MAX_CELLS: usize = LEAF_NODE_SPACE_FOR_CELLS / LEAF_NODE_CELL_SIZE;

/// A raw page buffer, viewed through typed accessors.
pub type Page = [u8; PAGE_SIZE];

/// Stamps a fresh, empty leaf into `page`: not root, zero cells.
pub fn initialize_leaf_node(page: &mut Page) {
    set_node_type(page, NodeType::Leaf);
    set_is_root(page, false);
    set_parent_page_num(page, 0);
    set_num_cells(page, 0);
}

pub fn node_type(page: &Page) -> NodeType {
    match page[NODE_TYPE_OFFSET] {
        0 => NodeType::Leaf,
        _ => NodeType::Internal,
    }
}

pub fn set_node_type(page: &mut Page, node_type: NodeType) {
    page[NODE_TYPE_OFFSET] = match node_type {
        NodeType::Leaf => 0,
        NodeType::Internal => 1,
    };
}

pub fn is_root(page: &Page) -> bool {
    page[IS_ROOT_OFFSET] == 1
}

pub fn set_is_root(page: &mut Page, is_root: bool) {
    page[IS_ROOT_OFFSET] = is_root as u8;
}

pub fn parent_page_num(page: &Page) -> u32 {
    u32::from_le_bytes(
        page[PARENT_POINTER_OFFSET..PARENT_POINTER_OFFSET + PARENT_POINTER_SIZE]
            .try_into()
            .unwrap(),
    )
}

pub fn set_parent_page_num(page: &mut Page, parent: u32) {
    page[PARENT_POINTER_OFFSET..PARENT_POINTER_OFFSET + PARENT_POINTER_SIZE]
        .copy_from_slice(&parent.to_le_bytes());
}

/// Reads `num_cells` from a leaf node header.
pub fn num_cells(page: &Page) -> u32 {
    u32::from_le_bytes(
        page[LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE]
            .try_into()
            .unwrap(),
    )
}

pub fn set_num_cells(page: &mut Page, num_cells: u32) {
    page[LEAF_NODE_NUM_CELLS_OFFSET..LEAF_NODE_NUM_CELLS_OFFSET + LEAF_NODE_NUM_CELLS_SIZE]
        .copy_from_slice(&num_cells.to_le_bytes());
}

fn cell_offset(cell_num: usize) -> usize {
    LEAF_NODE_HEADER_SIZE + cell_num * LEAF_NODE_CELL_SIZE
}

/// Returns the 295-byte cell slice at `cell_num`, unchecked against
/// `num_cells` (callers are expected to have already range-checked
/// against the leaf's current cell count or `LEAF_NODE_MAX_CELLS`).
pub fn cell(page: &Page, cell_num: usize) -> &[u8] {
    let offset = cell_offset(cell_num);
    &page[offset..offset + LEAF_NODE_CELL_SIZE]
}

pub fn cell_mut(page: &mut Page, cell_num: usize) -> &mut [u8] {
    let offset = cell_offset(cell_num);
    &mut page[offset..offset + LEAF_NODE_CELL_SIZE]
}

pub fn key(page: &Page, cell_num: usize) -> u32 {
    let cell = cell(page, cell_num);
    u32::from_le_bytes(cell[..LEAF_NODE_KEY_SIZE].try_into().unwrap())
}

pub fn set_key(page: &mut Page, cell_num: usize, key: u32) {
    let cell = cell_mut(page, cell_num);
    cell[..LEAF_NODE_KEY_SIZE].copy_from_slice(&key.to_le_bytes());
}

pub fn value(page: &Page, cell_num: usize) -> &[u8] {
    &cell(page, cell_num)[LEAF_NODE_VALUE_OFFSET..]
}

pub fn value_mut(page: &mut Page, cell_num: usize) -> &mut [u8] {
    &mut cell_mut(page, cell_num)[LEAF_NODE_VALUE_OFFSET..]
}

/// Shifts cells `[from, num_cells)` one slot to the right, tail first, so
/// that overlapping source/destination ranges never clobber unread data.
pub fn shift_cells_right(page: &mut Page, from: usize, num_cells: usize) {
    for i in (from..num_cells).rev() {
        let offset = cell_offset(i);
        let (head, tail) = page.split_at_mut(offset + LEAF_NODE_CELL_SIZE);
        let src = &head[offset..offset + LEAF_NODE_CELL_SIZE];
        tail[..LEAF_NODE_CELL_SIZE].copy_from_slice(src);
    }
}
