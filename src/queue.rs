//! A single append-only frontier file with a fixed-size in-memory block buffer.
//!
//! The BFS engine owns two [`Queue`]s and alternates which one is "current" and which
//! is "next" by layer parity. Each queue's buffer serves both roles at once, the way
//! the original retrograde searcher's single `cur_buf` vector does: same-layer pushes
//! land directly in the buffer `pop` drains from, so a node pushed this layer is
//! visible to `pop` immediately, whether or not it was ever written to disk. The
//! buffer only spills to its file once it reaches [`BLOCK_NODES`] entries, and is only
//! refilled from the file once the buffer itself runs dry.
//!
//! A queue finishes a layer in one of two ways: the queue that was drained (`pop`
//! returned `None`) is fully exhausted, so its file is truncated and its read offset
//! reset for reuse; the queue accumulating next-layer nodes still holds unflushed
//! pushes in its buffer, so those are flushed to disk (without truncating) before it
//! becomes the queue that gets drained next.

use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::Path;

use crate::bfs::Node;

/// Number of [`Node`]s held in a queue's in-memory buffer; chosen so a full block is
/// 4 KiB (`Node` is 8 bytes).
pub const BLOCK_NODES: usize = 512;

/// One frontier file plus its read offset and in-memory buffer.
///
/// `buf` is a stack: [`Queue::push`] appends to it and [`Queue::pop`] removes from
/// its end, so nodes pushed and popped within the same layer never have to touch
/// disk at all. `read_offset` tracks how much of the file has already been consumed,
/// since pushes and pops interleave and each must seek to its own position.
pub struct Queue {
    file: File,
    read_offset: u64,
    buf: Vec<Node>,
}

impl Queue {
    /// Opens `path` truncated, ready for a fresh layer.
    pub fn create(path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)?;
        Ok(Self {
            file,
            read_offset: 0,
            buf: Vec::with_capacity(BLOCK_NODES),
        })
    }

    /// Appends `node` to the buffer, flushing it to disk once it fills.
    pub fn push(&mut self, node: Node) -> std::io::Result<()> {
        self.buf.push(node);
        if self.buf.len() == BLOCK_NODES {
            self.flush()?;
        }
        Ok(())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        if self.buf.is_empty() {
            return Ok(());
        }
        self.file.seek(SeekFrom::End(0))?;
        for node in &self.buf {
            self.file.write_all(&node.to_bytes())?;
        }
        self.buf.clear();
        Ok(())
    }

    /// Pops the most recently available node, refilling the buffer from disk once it
    /// runs dry. Returns `None` once both the buffer and the unread portion of the
    /// file are exhausted. Pop order within a layer is otherwise unspecified, which is
    /// fine: only the partition into layers matters for BFS correctness.
    pub fn pop(&mut self) -> std::io::Result<Option<Node>> {
        if self.buf.is_empty() {
            self.refill()?;
        }
        Ok(self.buf.pop())
    }

    fn refill(&mut self) -> std::io::Result<()> {
        debug_assert!(self.buf.is_empty());
        self.file.seek(SeekFrom::Start(self.read_offset))?;
        let mut block = [0u8; BLOCK_NODES * Node::BYTES];
        let read = self.file.read(&mut block)?;
        let whole_nodes = read / Node::BYTES;
        for i in 0..whole_nodes {
            let start = i * Node::BYTES;
            let bytes: [u8; Node::BYTES] = block[start..start + Node::BYTES]
                .try_into()
                .expect("slice has exactly Node::BYTES length");
            self.buf.push(Node::from_bytes(bytes));
        }
        self.read_offset += (whole_nodes * Node::BYTES) as u64;
        Ok(())
    }

    /// Called on the queue that was just drained to exhaustion (`pop` returned
    /// `None`): truncates its file and resets its read offset so it can be reused as
    /// the other role's queue for the next layer.
    pub fn finish_drained(&mut self) -> std::io::Result<()> {
        debug_assert!(self.buf.is_empty());
        self.file.set_len(0)?;
        self.read_offset = 0;
        Ok(())
    }

    /// Called on the queue that accumulated next-layer nodes throughout the layer
    /// just finished: flushes any residual buffered pushes to disk so they survive
    /// into the layer where this queue becomes the one being drained. Does not
    /// truncate or reset the read offset; the data just flushed is what that next
    /// layer will read back.
    pub fn finish_accumulating(&mut self) -> std::io::Result<()> {
        self.flush()
    }
}
