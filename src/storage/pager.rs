//! Bounded page cache backed by a single file.
//!
//! No eviction: capacity is a hard 100 slots. Reads are lazy (a page is
//! only faulted in from disk the first time it is touched); writes are
//! write-back (dirty buffers live in memory until [`Pager::close`]).
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;
use tracing::{debug, warn};

use super::node::{Page, PAGE_SIZE};
use crate::errors::Error;

pub const TABLE_MAX_PAGES: usize = 100;

pub struct Pager {
    file: File,
    file_length: u64,
    /// Number of pages materialised or known to exist on disk.
    num_pages: u32,
    pages: heapless::Vec<Option<Box<Page>>, TABLE_MAX_PAGES>,
}

impl Pager {
    /// Opens or creates `path` read/write. Fails with [`Error::Corrupt`]
    /// if the file length is not a whole multiple of [`PAGE_SIZE`].
    pub fn open(path: impl AsRef<Path>) -> Result<Pager, Error> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        let file_length = file.metadata()?.len();
        if file_length % PAGE_SIZE as u64 != 0 {
            return Err(Error::Corrupt(format!(
                "db file is corrupt: length {} is not a multiple of page size {}",
                file_length, PAGE_SIZE
            )));
        }
        let num_pages = (file_length / PAGE_SIZE as u64) as u32;

        let mut pages = heapless::Vec::new();
        for _ in 0..TABLE_MAX_PAGES {
            // Capacity is fixed at TABLE_MAX_PAGES, so this can never fail.
            let _ = pages.push(None);
        }

        debug!(file_length, num_pages, "opened pager");
        Ok(Pager {
            file,
            file_length,
            num_pages,
            pages,
        })
    }

    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Returns a stable mutable reference to the cached buffer for page
    /// `page_num`, faulting it in from disk on first touch.
    ///
    /// # Errors
    /// Returns [`Error::Corrupt`] if `page_num >= TABLE_MAX_PAGES`.
    pub fn get_page(&mut self, page_num: u32) -> Result<&mut Page, Error> {
        if page_num as usize >= TABLE_MAX_PAGES {
            return Err(Error::Corrupt(format!(
                "tried to fetch page number out of bounds: {} >= {}",
                page_num, TABLE_MAX_PAGES
            )));
        }

        let slot = &mut self.pages[page_num as usize];
        if slot.is_none() {
            let mut page: Box<Page> = Box::new([0u8; PAGE_SIZE]);

            // A partial trailing page still counts as present on disk.
            let mut num_pages_on_disk = self.file_length / PAGE_SIZE as u64;
            if self.file_length % PAGE_SIZE as u64 != 0 {
                num_pages_on_disk += 1;
            }

            if (page_num as u64) < num_pages_on_disk {
                self.file
                    .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
                self.file.read_exact(&mut *page)?;
            }
            *slot = Some(page);
        }

        if page_num >= self.num_pages {
            self.num_pages = page_num + 1;
        }

        Ok(self.pages[page_num as usize].as_mut().unwrap())
    }

    /// Writes the first `size` bytes of page `page_num`'s buffer to disk.
    ///
    /// # Errors
    /// Returns [`Error::Corrupt`] if the slot was never materialised.
    pub fn flush(&mut self, page_num: u32, size: usize) -> Result<(), Error> {
        let page = self.pages[page_num as usize].as_ref().ok_or_else(|| {
            Error::Corrupt(format!("tried to flush an empty page slot {}", page_num))
        })?;

        self.file
            .seek(SeekFrom::Start(page_num as u64 * PAGE_SIZE as u64))?;
        self.file.write_all(&page[..size])?;
        Ok(())
    }

    /// Flushes every materialised page and releases every buffer.
    pub fn close(&mut self) -> Result<(), Error> {
        for page_num in 0..self.num_pages {
            if self.pages[page_num as usize].is_some() {
                if let Err(e) = self.flush(page_num, PAGE_SIZE) {
                    warn!(page_num, error = %e, "failed to flush page on close");
                    return Err(e);
                }
            }
        }
        for slot in self.pages.iter_mut() {
            *slot = None;
        }
        debug!(num_pages = self.num_pages, "closed pager");
        Ok(())
    }
}
