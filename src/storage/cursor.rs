//! Cursor-based navigation over a table's single leaf.
use super::node;
use super::table::Table;
use crate::errors::Error;

/// A position within a table, either at a specific cell or one past the
/// last cell ([`Cursor::end_of_table`]).
pub struct Cursor<'a> {
    table: &'a mut Table,
    page_num: u32,
    cell_num: u32,
    end_of_table: bool,
}

impl<'a> Cursor<'a> {
    pub(super) fn new(table: &'a mut Table, page_num: u32, cell_num: u32, end_of_table: bool) -> Self {
        Cursor {
            table,
            page_num,
            cell_num,
            end_of_table,
        }
    }

    pub fn cell_num(&self) -> u32 {
        self.cell_num
    }

    pub fn end_of_table(&self) -> bool {
        self.end_of_table
    }

    /// Positions a cursor at cell 0 of the root page.
    pub fn table_start(table: &'a mut Table) -> Result<Self, Error> {
        let root_page_num = table.root_page_num();
        let page = table.pager_mut().get_page(root_page_num)?;
        let end_of_table = node::num_cells(page) == 0;
        Ok(Cursor::new(table, root_page_num, 0, end_of_table))
    }

    /// Binary searches the root leaf for `key`, returning a cursor
    /// positioned at `key`'s cell if present, otherwise at the cell it
    /// would occupy so insertion can shift the tail forward.
    pub fn table_find(table: &'a mut Table, key: u32) -> Result<Self, Error> {
        let root_page_num = table.root_page_num();
        let page = table.pager_mut().get_page(root_page_num)?;
        if node::node_type(page) != node::NodeType::Leaf {
            return Err(Error::Unimplemented(
                "searching an internal node is not supported".into(),
            ));
        }

        let mut min_index = 0u32;
        let mut one_past_max_index = node::num_cells(page);
        while min_index != one_past_max_index {
            let index = (min_index + one_past_max_index) / 2;
            let key_at_index = node::key(page, index as usize);
            if key == key_at_index {
                return Ok(Cursor::new(table, root_page_num, index, false));
            }
            if key < key_at_index {
                one_past_max_index = index;
            } else {
                min_index = index + 1;
            }
        }
        Ok(Cursor::new(table, root_page_num, min_index, false))
    }

    /// Advances to the next cell, setting `end_of_table` once the last
    /// cell has been passed.
    pub fn advance(&mut self) -> Result<(), Error> {
        let page = self.table.pager_mut().get_page(self.page_num)?;
        self.cell_num += 1;
        if self.cell_num >= node::num_cells(page) {
            self.end_of_table = true;
        }
        Ok(())
    }

    /// Returns the row bytes at the cursor's current cell.
    pub fn value(&mut self) -> Result<&[u8], Error> {
        let page = self.table.pager_mut().get_page(self.page_num)?;
        Ok(node::value(page, self.cell_num as usize))
    }

    pub fn table_mut(&mut self) -> &mut Table {
        self.table
    }

    pub fn page_num(&self) -> u32 {
        self.page_num
    }
}
