//! Allocator Module - Best-Fit Allocation Over Fibonacci Blocks
//!
//! Implements `allocate`: name/size validation, best-fit search with one
//! GC-triggered retry on exhaustion, and the split that shapes an
//! oversized fit down to the requested target.

use log::{debug, info, warn};

use crate::block::MAX_NAME_LEN;
use crate::error::{HeapError, Result};
use crate::fib;
use crate::gc;
use crate::list::BlockList;
use crate::stats::HeapStats;

/// Allocates `size` units under `name`, retrying once via GC on exhaustion.
///
/// See module docs for the algorithm; this mirrors the five numbered steps
/// of the allocation contract: validate, fit, GC-on-failure, shape, commit.
pub fn allocate(
    list: &mut BlockList,
    stats: &mut HeapStats,
    name: &str,
    size: u64,
    is_root: bool,
) -> Result<()> {
    if name.len() > MAX_NAME_LEN {
        warn!("allocate rejected: name '{name}' exceeds {MAX_NAME_LEN} characters");
        return Err(HeapError::NameTooLong(name.to_string()));
    }
    if list.find_used(name).is_some() {
        warn!("allocate rejected: duplicate name '{name}'");
        return Err(HeapError::DuplicateName(name.to_string()));
    }
    if size == 0 {
        warn!("allocate rejected: size must be at least 1");
        return Err(HeapError::InvalidSize);
    }

    let target = fib::closest_fib_ge(size);
    debug!("allocate '{name}' size={size} target_fib={target}");

    let mut chosen = list.find_best_fit(target);
    if chosen.is_none() {
        debug!("no free block >= {target}, running collector before retrying");
        let freed = gc::collect(list, stats);
        info!("collector freed {freed} block(s) during allocation retry");
        chosen = list.find_best_fit(target);
    }

    let idx = chosen.ok_or(HeapError::OutOfMemory)?;

    if list.get(idx).expect("index from find_best_fit is valid").size > target {
        let original_size = list.get(idx).unwrap().size;
        debug!("splitting block of size {original_size} down to {target}");
        list.split(idx, fib::prev_fib_of(original_size));
    }

    list.commit_used(idx, name.to_string(), size, is_root);
    stats.record_allocation();
    info!("allocated '{name}' (requested {size}, block size {target}, root={is_root})");
    Ok(())
}

/// Frees the used block named `name`, running the merge pass afterward.
pub fn free(list: &mut BlockList, stats: &mut HeapStats, name: &str) -> Result<()> {
    let idx = list
        .find_used(name)
        .ok_or_else(|| HeapError::NotFound(name.to_string()))?;

    list.get_mut(idx).expect("index just located").reset_to_free();
    let merges = list.merge_adjacent();
    stats.record_manual_free();
    info!("freed '{name}' ({merges} merge(s) followed)");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_list(budget: u64) -> (BlockList, HeapStats) {
        (BlockList::new(budget), HeapStats::default())
    }

    #[test]
    fn best_fit_tie_break_scenario_two() {
        let (mut list, mut stats) = new_list(30);
        allocate(&mut list, &mut stats, "a", 4, false).unwrap();
        let idx = list.find_used("a").unwrap();
        assert_eq!(list.get(idx).unwrap().size, 5);
        assert_eq!(list.get(idx).unwrap().allocated_size, 4);
    }

    #[test]
    fn split_chain_scenario_three() {
        let (mut list, mut stats) = new_list(30);
        allocate(&mut list, &mut stats, "a", 4, false).unwrap();
        allocate(&mut list, &mut stats, "b", 4, false).unwrap();

        let b_idx = list.find_used("b").unwrap();
        assert_eq!(list.get(b_idx).unwrap().size, 5);

        let sizes: Vec<u64> = list.iter().filter(|b| b.is_free()).map(|b| b.size).collect();
        assert!(sizes.contains(&3));
    }

    #[test]
    fn duplicate_name_is_rejected() {
        let (mut list, mut stats) = new_list(30);
        allocate(&mut list, &mut stats, "a", 1, false).unwrap();
        let err = allocate(&mut list, &mut stats, "a", 1, false).unwrap_err();
        assert_eq!(err, HeapError::DuplicateName("a".to_string()));
    }

    #[test]
    fn name_too_long_is_rejected() {
        let (mut list, mut stats) = new_list(30);
        let long_name = "a".repeat(MAX_NAME_LEN + 1);
        let err = allocate(&mut list, &mut stats, &long_name, 1, false).unwrap_err();
        assert_eq!(err, HeapError::NameTooLong(long_name));
    }

    #[test]
    fn zero_size_is_invalid() {
        let (mut list, mut stats) = new_list(30);
        let err = allocate(&mut list, &mut stats, "a", 0, false).unwrap_err();
        assert_eq!(err, HeapError::InvalidSize);
    }

    #[test]
    fn out_of_memory_when_exhausted_even_after_collection() {
        // budget 5 -> blocks {2, 3, 5}, each consumed by a root: nothing for
        // the collector to reclaim, so the retry still fails.
        let (mut list, mut stats) = new_list(5);
        allocate(&mut list, &mut stats, "a", 2, true).unwrap();
        allocate(&mut list, &mut stats, "b", 3, true).unwrap();
        allocate(&mut list, &mut stats, "c", 5, true).unwrap();
        let err = allocate(&mut list, &mut stats, "d", 1, false).unwrap_err();
        assert_eq!(err, HeapError::OutOfMemory);
    }

    #[test]
    fn gc_triggered_allocation_succeeds_scenario_five() {
        // budget 5 -> blocks {2, 3, 5}. a/b are non-root and unreferenced,
        // so once the heap is full, allocating d forces a collection that
        // reclaims them; neither block was ever split, so merge_adjacent's
        // from_split gate leaves them as separate frees (5 and 3), and the
        // retry's best-fit search for target=3 lands directly on b's
        // reclaimed size-3 block.
        let (mut list, mut stats) = new_list(5);
        allocate(&mut list, &mut stats, "a", 5, false).unwrap();
        allocate(&mut list, &mut stats, "b", 3, false).unwrap();
        allocate(&mut list, &mut stats, "c", 2, true).unwrap();

        allocate(&mut list, &mut stats, "d", 3, false).unwrap();
        assert!(list.find_used("d").is_some());
        assert!(list.find_used("a").is_none());
        assert!(list.find_used("b").is_none());
        assert!(list.find_used("c").is_some());
    }

    #[test]
    fn free_then_merge_scenario_six() {
        // budget 20 -> blocks {2, 3, 5, 8, 13}. b's allocation splits the
        // size-8 block into (used 5, free 3); freeing both a and b lets the
        // collector-free'd pair recombine with the split leftover.
        let (mut list, mut stats) = new_list(20);
        allocate(&mut list, &mut stats, "a", 4, false).unwrap();
        allocate(&mut list, &mut stats, "b", 4, false).unwrap();
        let total_free_before = list.iter().filter(|b| b.is_free()).map(|b| b.size).sum::<u64>();

        free(&mut list, &mut stats, "a").unwrap();
        free(&mut list, &mut stats, "b").unwrap();

        let total_free_after = list.iter().filter(|b| b.is_free()).map(|b| b.size).sum::<u64>();
        assert_eq!(total_free_after, total_free_before + 10);

        // a's block (never split) stays its own standalone free block; only
        // split-descended pieces (b plus its leftover) recombine.
        assert!(list.iter().any(|blk| blk.is_free() && blk.size == 5));
        assert!(list.iter().filter(|blk| blk.is_free() && blk.size == 3).count() <= 1);
    }

    #[test]
    fn allocate_then_free_restores_free_capacity_round_trip() {
        let (mut list, mut stats) = new_list(16000);
        let before: Vec<u64> = list.iter().map(|b| b.size).collect();

        allocate(&mut list, &mut stats, "x", 1, false).unwrap();
        free(&mut list, &mut stats, "x").unwrap();

        let mut after: Vec<u64> = list.iter().map(|b| b.size).collect();
        let mut before_sorted = before;
        after.sort_unstable();
        before_sorted.sort_unstable();
        assert_eq!(after, before_sorted);
    }

    #[test]
    fn free_of_unknown_name_is_not_found() {
        let (mut list, mut stats) = new_list(30);
        let err = free(&mut list, &mut stats, "ghost").unwrap_err();
        assert_eq!(err, HeapError::NotFound("ghost".to_string()));
    }
}
