//! A single table: one root page, reachable through a [`Pager`].
use tracing::{debug, instrument};

use super::btree;
use super::cursor::Cursor;
use super::node;
use super::pager::Pager;
use super::row::{self, Row, ROW_SIZE};
use crate::errors::Error;
use std::path::Path;

pub struct Table {
    pager: Pager,
    root_page_num: u32,
}

impl Table {
    /// Opens `path`, creating it if absent. A freshly created file gets a
    /// single empty leaf root at page 0.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Table, Error> {
        let mut pager = Pager::open(path)?;
        let root_page_num = 0;
        if pager.num_pages() == 0 {
            let page = pager.get_page(root_page_num)?;
            node::initialize_leaf_node(page);
            node::set_is_root(page, true);
        }
        debug!(num_pages = pager.num_pages(), "table opened");
        Ok(Table { pager, root_page_num })
    }

    pub fn root_page_num(&self) -> u32 {
        self.root_page_num
    }

    pub(super) fn pager_mut(&mut self) -> &mut Pager {
        &mut self.pager
    }

    /// Inserts `row`, failing on a duplicate id or a full leaf.
    ///
    /// The root's cell count is checked against capacity before any
    /// lookup runs, so a full table short-circuits ahead of the
    /// duplicate-key check.
    #[instrument(skip(self, row), fields(id = row.id))]
    pub fn insert(&mut self, row: &Row) -> Result<(), Error> {
        let key = row.id;
        let root_page_num = self.root_page_num;
        let root = self.pager.get_page(root_page_num)?;
        if node::num_cells(root) as usize >= node::LEAF_NODE_MAX_CELLS {
            return Err(Error::TableFull);
        }

        let mut cursor = Cursor::table_find(self, key)?;
        let page_num = cursor.page_num();
        let cell_num = cursor.cell_num();

        let page = cursor.table_mut().pager_mut().get_page(page_num)?;
        if cell_num < node::num_cells(page) && node::key(page, cell_num as usize) == key {
            return Err(Error::DuplicateKey);
        }

        let mut buf = [0u8; ROW_SIZE];
        row::serialize(row, &mut buf);
        btree::leaf_insert(page, cell_num, key, &buf)
    }

    /// Returns every row in ascending key order.
    #[instrument(skip(self))]
    pub fn select(&mut self) -> Result<Vec<Row>, Error> {
        let mut rows = Vec::new();
        let mut cursor = Cursor::table_start(self)?;
        while !cursor.end_of_table() {
            rows.push(row::deserialize(cursor.value()?));
            cursor.advance()?;
        }
        Ok(rows)
    }

    /// Flushes every touched page to disk.
    pub fn close(&mut self) -> Result<(), Error> {
        self.pager.close()
    }

    /// Diagnostic dump for the `.btree` meta-command: one line per cell,
    /// in on-disk order. Fatal if the root is not a leaf, since this
    /// revision never builds anything else.
    pub fn describe_btree(&mut self) -> Result<Vec<String>, Error> {
        let root_page_num = self.root_page_num;
        let page = self.pager.get_page(root_page_num)?;
        if node::node_type(page) != node::NodeType::Leaf {
            return Err(Error::Unimplemented(
                "printing a non-leaf tree is not supported".into(),
            ));
        }
        let num_cells = node::num_cells(page);
        let mut lines = vec![format!("leaf (size {})", num_cells)];
        for i in 0..num_cells {
            lines.push(format!("  - {} : {}", i, node::key(page, i as usize)));
        }
        Ok(lines)
    }

    /// Diagnostic dump for the `.constants` meta-command.
    pub fn describe_constants() -> Vec<(&'static str, usize)> {
        vec![
            ("ROW_SIZE", ROW_SIZE),
            ("COMMON_NODE_HEADER_SIZE", node::COMMON_NODE_HEADER_SIZE),
            ("LEAF_NODE_HEADER_SIZE", node::LEAF_NODE_HEADER_SIZE),
            ("LEAF_NODE_CELL_SIZE", node::LEAF_NODE_CELL_SIZE),
            ("LEAF_NODE_SPACE_FOR_CELLS", node::LEAF_NODE_SPACE_FOR_CELLS),
            ("LEAF_NODE_MAX_CELLS", node::LEAF_NODE_MAX_CELLS),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_table_selects_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = Table::open(dir.path().join("db.tbl")).unwrap();
        assert!(table.select().unwrap().is_empty());
    }

    #[test]
    fn insert_then_select_round_trips_in_key_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = Table::open(dir.path().join("db.tbl")).unwrap();
        table.insert(&Row::new(2, "bob", "bob@example.com").unwrap()).unwrap();
        table.insert(&Row::new(1, "alice", "alice@example.com").unwrap()).unwrap();
        let rows = table.select().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, 1);
        assert_eq!(rows[1].id, 2);
    }

    #[test]
    fn duplicate_key_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = Table::open(dir.path().join("db.tbl")).unwrap();
        table.insert(&Row::new(1, "a", "a@example.com").unwrap()).unwrap();
        assert!(matches!(
            table.insert(&Row::new(1, "b", "b@example.com").unwrap()),
            Err(Error::DuplicateKey)
        ));
    }

    #[test]
    fn leaf_full_is_table_full_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = Table::open(dir.path().join("db.tbl")).unwrap();
        for i in 0..node::LEAF_NODE_MAX_CELLS as u32 {
            table
                .insert(&Row::new(i, "u", "e@example.com").unwrap())
                .unwrap();
        }
        assert!(matches!(
            table.insert(&Row::new(999, "u", "e@example.com").unwrap()),
            Err(Error::TableFull)
        ));
    }

    #[test]
    fn persists_across_close_and_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("db.tbl");
        {
            let mut table = Table::open(&path).unwrap();
            table.insert(&Row::new(1, "a", "a@example.com").unwrap()).unwrap();
            table.close().unwrap();
        }
        {
            let mut table = Table::open(&path).unwrap();
            let rows = table.select().unwrap();
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].id, 1);
        }
    }

    #[test]
    fn constants_match_layout() {
        let constants = Table::describe_constants();
        assert!(constants.iter().any(|(name, value)| *name == "ROW_SIZE" && *value == ROW_SIZE));
    }

    #[test]
    fn describe_btree_reports_actual_cell_count() {
        let dir = tempfile::tempdir().unwrap();
        let mut table = Table::open(dir.path().join("db.tbl")).unwrap();
        let lines = table.describe_btree().unwrap();
        assert_eq!(lines[0], "leaf (size 0)");

        table.insert(&Row::new(1, "a", "a@example.com").unwrap()).unwrap();
        table.insert(&Row::new(2, "b", "b@example.com").unwrap()).unwrap();
        let lines = table.describe_btree().unwrap();
        assert_eq!(lines[0], "leaf (size 2)");
    }
}
