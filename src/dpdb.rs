//! Reads and writes disjoint pattern database files: dense, one byte per entry, in
//! database-hash order.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::error::{Error, Result};
use crate::pattern::TABLE_SIZE;

/// A loaded disjoint pattern database: `25^6` bytes, indexed by
/// [`crate::pattern::Pattern::dpdb_index`].
#[derive(Clone)]
pub struct Database {
    table: Box<[u8]>,
}

impl Database {
    /// Wraps an already-built table, as produced by [`crate::bfs::build`].
    ///
    /// # Panics
    ///
    /// Panics if `table` does not have exactly [`TABLE_SIZE`] entries; this indicates
    /// a bug in the caller, not a recoverable runtime condition.
    #[must_use]
    pub fn from_table(table: Box<[u8]>) -> Self {
        assert_eq!(table.len(), TABLE_SIZE, "database table has the wrong size");
        Self { table }
    }

    /// Reads a database file. Fails if its size is not exactly [`TABLE_SIZE`] bytes.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on any file access failure, or if the file size does not
    /// match [`TABLE_SIZE`].
    pub fn load(path: &Path) -> Result<Self> {
        let mut file = File::open(path)?;
        let len = file.metadata()?.len();
        if len != TABLE_SIZE as u64 {
            return Err(Error::Io(std::io::Error::other(format!(
                "database file {} has {len} bytes, expected {TABLE_SIZE}",
                path.display(),
            ))));
        }
        let mut table = vec![0u8; TABLE_SIZE].into_boxed_slice();
        file.read_exact(&mut table)?;
        Ok(Self { table })
    }

    /// Writes the database to `path` as a dense `25^6`-byte file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] on any file access failure.
    pub fn write(&self, path: &Path) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(&self.table)?;
        Ok(())
    }

    /// The move count at `index`, or 255 if that placement was never reached.
    #[must_use]
    pub fn get(&self, index: usize) -> u8 {
        self.table[index]
    }
}
