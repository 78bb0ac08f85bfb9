//! The linear, ordered list of blocks that backs a heap.

use crate::block::{Block, BlockState};
use crate::fib;

/// The ordered sequence of blocks spanning the heap's total budget.
///
/// Blocks are kept in list order from heap-initialisation position onward;
/// splitting inserts new blocks immediately after the block being split,
/// merging removes a block and absorbs its size into its predecessor.
#[derive(Debug, Default)]
pub struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    /// Builds the initial free-block chain for a given budget: every
    /// Fibonacci number `<= budget`, each present exactly once, ascending.
    pub fn new(budget: u64) -> Self {
        let blocks = fib::sequence_upto(budget)
            .into_iter()
            .map(Block::free)
            .collect();
        Self { blocks }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    pub fn get(&self, idx: usize) -> Option<&Block> {
        self.blocks.get(idx)
    }

    pub fn get_mut(&mut self, idx: usize) -> Option<&mut Block> {
        self.blocks.get_mut(idx)
    }

    /// Finds the index of the smallest free block whose size is `>= target`.
    pub fn find_best_fit(&self, target: u64) -> Option<usize> {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, b)| b.is_free() && b.size >= target)
            .min_by_key(|(_, b)| b.size)
            .map(|(idx, _)| idx)
    }

    /// Finds the index of the used block carrying `name`, if any.
    pub fn find_used(&self, name: &str) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| b.is_used() && b.name.as_deref() == Some(name))
    }

    /// Shrinks the free block at `idx` down to exactly `target`, inserting
    /// the Fibonacci-decomposed remainder as new free blocks immediately
    /// after it.
    ///
    /// `target` must be a Fibonacci number no larger than the block's
    /// current size. Each step peels the smaller member of the Fibonacci
    /// pair straddling the current size off into a new block, and descends
    /// the block itself to the pair's larger member — a descent that always
    /// lands exactly on `target` by the Zeckendorf structure of the
    /// sequence.
    pub fn split(&mut self, idx: usize, target: u64) {
        loop {
            let current = self.blocks[idx].size;
            if current <= target {
                break;
            }
            let larger = fib::prev_fib_of(current);
            let smaller = current - larger;
            let mut new_block = Block::free(smaller);
            new_block.from_split = true;
            self.blocks.insert(idx + 1, new_block);
            self.blocks[idx].size = larger;
            self.blocks[idx].from_split = true;
        }
    }

    /// Scans the list once for adjacent free blocks whose sizes form a
    /// Fibonacci pair, merging each such pair into a single free block sized
    /// at their sum. Repeats until a full pass makes no merge, so that a
    /// chain of several small free blocks coalesces back into one large one.
    ///
    /// A pair only merges if at least one side is itself a product of a
    /// split (`from_split`); the blocks a heap is initialised with are
    /// neighbours by construction, not buddies, so they never collapse into
    /// each other just because their sizes happen to be consecutive
    /// Fibonacci numbers.
    ///
    /// Returns the number of merges performed.
    pub fn merge_adjacent(&mut self) -> usize {
        let mut merges = 0;
        loop {
            let mut merged_this_pass = false;
            let mut i = 0;
            while i + 1 < self.blocks.len() {
                let (a, b) = (&self.blocks[i], &self.blocks[i + 1]);
                let eligible = a.is_free()
                    && b.is_free()
                    && (a.from_split || b.from_split)
                    && fib::is_fib_pair(a.size, b.size);
                if eligible {
                    let merged_size = a.size + b.size;
                    self.blocks[i].size = merged_size;
                    self.blocks[i].from_split = true;
                    self.blocks.remove(i + 1);
                    merges += 1;
                    merged_this_pass = true;
                } else {
                    i += 1;
                }
            }
            if !merged_this_pass {
                break;
            }
        }
        merges
    }

    /// Marks the block at `idx` `Used`, installing its name, requested size,
    /// and root flag. The caller is responsible for having already verified
    /// `blocks[idx].size == target`.
    pub fn commit_used(&mut self, idx: usize, name: String, requested_size: u64, is_root: bool) {
        let block = &mut self.blocks[idx];
        block.state = BlockState::Used;
        block.name = Some(name);
        block.allocated_size = requested_size;
        block.is_root = is_root;
    }

    /// Resets every block whose `mark` bit is unset back to `Free`,
    /// clearing marks on the blocks that survive. Returns the count of
    /// blocks swept.
    pub fn sweep(&mut self) -> usize {
        let mut freed = 0;
        for block in &mut self.blocks {
            if block.is_used() {
                if block.mark {
                    block.mark = false;
                } else {
                    block.reset_to_free();
                    freed += 1;
                }
            }
        }
        freed
    }
}
