//! Heap Module - The Owned Root Value
//!
//! `Heap` is the single owned value threading the block list and lifetime
//! statistics through every operation; there is no process-wide singleton.

use crate::allocator;
use crate::block::Block;
use crate::error::{EdgeOutcome, Result};
use crate::gc;
use crate::list::BlockList;
use crate::refs;
use crate::stats::HeapStats;

/// A Fibonacci-sized buddy heap with a tracing mark-and-sweep collector.
pub struct Heap {
    blocks: BlockList,
    stats: HeapStats,
}

impl Heap {
    /// Builds the initial free-block chain covering every Fibonacci number
    /// `<= total_budget`.
    pub fn init(total_budget: u64) -> Self {
        Self {
            blocks: BlockList::new(total_budget),
            stats: HeapStats::default(),
        }
    }

    /// Allocates `size` units under `name`. See [`allocator::allocate`].
    pub fn allocate(&mut self, name: &str, size: u64, is_root: bool) -> Result<()> {
        allocator::allocate(&mut self.blocks, &mut self.stats, name, size, is_root)
    }

    /// Frees the used block named `name`, running the merge pass afterward.
    pub fn free(&mut self, name: &str) -> Result<()> {
        allocator::free(&mut self.blocks, &mut self.stats, name)
    }

    /// Adds the edge `from_name -> to_name`.
    pub fn add_reference(&mut self, from_name: &str, to_name: &str) -> Result<EdgeOutcome> {
        refs::add_reference(&mut self.blocks, from_name, to_name)
    }

    /// Removes the edge `from_name -> to_name`.
    pub fn remove_reference(&mut self, from_name: &str, to_name: &str) -> Result<EdgeOutcome> {
        refs::remove_reference(&mut self.blocks, from_name, to_name)
    }

    /// Sets or clears the root flag on the used block named `name`.
    pub fn set_root(&mut self, name: &str, flag: bool) -> Result<()> {
        refs::set_root(&mut self.blocks, name, flag)
    }

    /// Runs one mark-and-sweep cycle, returning the number of blocks freed.
    pub fn collect(&mut self) -> u64 {
        gc::collect(&mut self.blocks, &mut self.stats)
    }

    /// Enumerates blocks in list order, for display collaborators.
    pub fn iterate_blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// Number of blocks currently in the list.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Total budget of the heap: the sum of every block's size, which is
    /// invariant across splits, merges, and GC cycles.
    pub fn total_budget(&self) -> u64 {
        self.blocks.iter().map(|b| b.size).sum()
    }

    /// Cumulative lifetime counters.
    pub fn stats(&self) -> HeapStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_builds_scenario_one_sequence() {
        let heap = Heap::init(16000);
        let sizes: Vec<u64> = heap.iterate_blocks().map(|b| b.size).collect();
        assert_eq!(sizes.iter().sum::<u64>(), 28654);
        assert_eq!(heap.total_budget(), 28654);
    }

    #[test]
    fn total_budget_is_conserved_across_operations() {
        let mut heap = Heap::init(30);
        let budget = heap.total_budget();
        heap.allocate("a", 4, true).unwrap();
        heap.allocate("b", 4, false).unwrap();
        heap.add_reference("a", "b").unwrap();
        heap.collect();
        heap.free("a").unwrap();
        assert_eq!(heap.total_budget(), budget);
    }

    #[test]
    fn stats_track_allocations_frees_and_collections() {
        let mut heap = Heap::init(30);
        heap.allocate("a", 1, true).unwrap();
        heap.allocate("b", 1, false).unwrap();
        heap.free("b").unwrap();
        heap.collect();

        let stats = heap.stats();
        assert_eq!(stats.total_allocations, 2);
        assert_eq!(stats.total_manual_frees, 1);
        assert_eq!(stats.total_collections, 1);
    }
}
