//! Leaf-node mutation. This revision only ever materialises a single leaf
//! root page: a leaf at capacity is a hard stop ([`Error::TableFull`]), not
//! a split, and nothing here ever touches an internal node.
use super::node::{self, Page};
use crate::errors::Error;

/// Inserts `(key, value)` at `cell_num` in `page`, shifting any cells at
/// or past `cell_num` one slot to the right.
///
/// # Errors
/// Returns [`Error::TableFull`] if the leaf is already at
/// [`node::LEAF_NODE_MAX_CELLS`].
pub fn leaf_insert(page: &mut Page, cell_num: u32, key: u32, value: &[u8]) -> Result<(), Error> {
    let num_cells = node::num_cells(page);
    if num_cells as usize >= node::LEAF_NODE_MAX_CELLS {
        return Err(Error::TableFull);
    }

    if cell_num < num_cells {
        node::shift_cells_right(page, cell_num as usize, num_cells as usize);
    }

    node::set_num_cells(page, num_cells + 1);
    node::set_key(page, cell_num as usize, key);
    node::value_mut(page, cell_num as usize).copy_from_slice(value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::node::{initialize_leaf_node, key, num_cells, value, LEAF_NODE_MAX_CELLS};
    use crate::storage::node::PAGE_SIZE;
    use crate::storage::row::{self, Row, ROW_SIZE};

    fn row_bytes(id: u32) -> [u8; ROW_SIZE] {
        let row = Row::new(id, "u", "e@example.com").unwrap();
        let mut buf = [0u8; ROW_SIZE];
        row::serialize(&row, &mut buf);
        buf
    }

    #[test]
    fn inserts_in_order_without_shifting() {
        let mut page = [0u8; PAGE_SIZE];
        initialize_leaf_node(&mut page);
        leaf_insert(&mut page, 0, 1, &row_bytes(1)).unwrap();
        leaf_insert(&mut page, 1, 2, &row_bytes(2)).unwrap();
        assert_eq!(num_cells(&page), 2);
        assert_eq!(key(&page, 0), 1);
        assert_eq!(key(&page, 1), 2);
    }

    #[test]
    fn inserting_out_of_order_shifts_tail() {
        let mut page = [0u8; PAGE_SIZE];
        initialize_leaf_node(&mut page);
        leaf_insert(&mut page, 0, 1, &row_bytes(1)).unwrap();
        leaf_insert(&mut page, 1, 3, &row_bytes(3)).unwrap();
        leaf_insert(&mut page, 1, 2, &row_bytes(2)).unwrap();
        assert_eq!(key(&page, 0), 1);
        assert_eq!(key(&page, 1), 2);
        assert_eq!(key(&page, 2), 3);
        assert_eq!(value(&page, 1)[..4], row_bytes(2)[..4]);
    }

    #[test]
    fn full_leaf_is_an_error() {
        let mut page = [0u8; PAGE_SIZE];
        initialize_leaf_node(&mut page);
        for i in 0..LEAF_NODE_MAX_CELLS as u32 {
            leaf_insert(&mut page, i, i, &row_bytes(i)).unwrap();
        }
        assert!(matches!(
            leaf_insert(&mut page, LEAF_NODE_MAX_CELLS as u32, 999, &row_bytes(999)),
            Err(Error::TableFull)
        ));
    }
}
