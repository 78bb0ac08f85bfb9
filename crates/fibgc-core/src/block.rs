//! The atomic unit of the heap: a fixed-capacity, Fibonacci-sized block.

/// Maximum length of a block name, in bytes.
pub const MAX_NAME_LEN: usize = 19;

/// Whether a block is available for allocation or already claimed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockState {
    Free,
    Used,
}

/// A single block in the heap's linear block list.
///
/// `name`, `allocated_size`, `is_root`, and `references` are only meaningful
/// while `state == Used`; they are reset to their zero values whenever a
/// block transitions back to `Free` (by manual free, sweep, or merge).
#[derive(Debug, Clone)]
pub struct Block {
    pub size: u64,
    pub state: BlockState,
    pub name: Option<String>,
    pub allocated_size: u64,
    pub is_root: bool,
    pub references: Vec<String>,
    pub mark: bool,
    /// True once this block has ever been a product of a split.
    ///
    /// The blocks created at heap initialisation are never considered
    /// buddies of one another — two of them happening to sit adjacent with
    /// Fibonacci-paired sizes (which, along the canonical sequence, every
    /// neighbouring pair trivially is) must not merge, or freeing a single
    /// block would cascade-collapse the untouched rest of the heap. Only
    /// blocks descended from an actual split are eligible to merge back
    /// together.
    pub from_split: bool,
}

impl Block {
    /// A fresh free block of the given Fibonacci size, as created at heap
    /// initialisation.
    pub fn free(size: u64) -> Self {
        Self {
            size,
            state: BlockState::Free,
            name: None,
            allocated_size: 0,
            is_root: false,
            references: Vec::new(),
            mark: false,
            from_split: false,
        }
    }

    pub fn is_free(&self) -> bool {
        matches!(self.state, BlockState::Free)
    }

    pub fn is_used(&self) -> bool {
        matches!(self.state, BlockState::Used)
    }

    /// Resets every `Used`-only field. Called on manual free, GC sweep, and
    /// merge-absorption, after the block transitions to `Free`.
    pub fn reset_to_free(&mut self) {
        self.state = BlockState::Free;
        self.name = None;
        self.allocated_size = 0;
        self.is_root = false;
        self.references.clear();
        self.mark = false;
    }
}
