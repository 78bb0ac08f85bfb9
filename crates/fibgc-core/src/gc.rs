//! GC Module - Mark-and-Sweep Collection Cycle
//!
//! Traces the reachability graph from every root, reclaims everything
//! unmarked, then runs the merge pass over whatever the sweep freed.

use std::collections::HashSet;

use log::{debug, info};

use crate::list::BlockList;
use crate::stats::HeapStats;

/// Runs one full mark-and-sweep cycle and returns the number of blocks
/// reclaimed.
pub fn collect(list: &mut BlockList, stats: &mut HeapStats) -> u64 {
    mark(list);
    let freed = list.sweep() as u64;
    if freed > 0 {
        let merges = list.merge_adjacent();
        debug!("post-sweep merge pass folded {merges} block pair(s)");
    }
    stats.record_collection(freed);
    info!("collect() freed {freed} block(s)");
    freed
}

/// Marks every block transitively reachable from a root, using an explicit
/// worklist rather than native recursion so a pathological reference graph
/// cannot blow the call stack. References are pushed in their stored order
/// so the traversal matches a recursive reading of the same algorithm.
fn mark(list: &mut BlockList) {
    let root_names: Vec<String> = list
        .iter()
        .filter(|b| b.is_used() && b.is_root)
        .filter_map(|b| b.name.clone())
        .collect();

    let mut visited: HashSet<String> = HashSet::new();
    let mut worklist: Vec<String> = root_names;

    while let Some(name) = worklist.pop() {
        if visited.contains(&name) {
            continue;
        }
        let idx = match list.find_used(&name) {
            Some(idx) => idx,
            None => continue,
        };

        visited.insert(name.clone());
        list.get_mut(idx).expect("index just located").mark = true;

        let refs = list.get(idx).expect("index just located").references.clone();
        for r in refs.into_iter().rev() {
            if !visited.contains(&r) {
                worklist.push(r);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator::allocate;
    use crate::refs::add_reference;

    fn new_list(budget: u64) -> (BlockList, HeapStats) {
        (BlockList::new(budget), HeapStats::default())
    }

    #[test]
    fn reclaims_unreachable_cycle_scenario_four() {
        let (mut list, mut stats) = new_list(30);
        allocate(&mut list, &mut stats, "a", 1, true).unwrap();
        allocate(&mut list, &mut stats, "b", 1, false).unwrap();
        allocate(&mut list, &mut stats, "c", 1, false).unwrap();
        add_reference(&mut list, "b", "c").unwrap();
        add_reference(&mut list, "c", "b").unwrap();

        let freed = collect(&mut list, &mut stats);

        assert_eq!(freed, 2);
        assert!(list.find_used("a").is_some());
        assert!(list.find_used("b").is_none());
        assert!(list.find_used("c").is_none());
    }

    #[test]
    fn zero_roots_reclaims_everything() {
        let (mut list, mut stats) = new_list(30);
        allocate(&mut list, &mut stats, "a", 1, false).unwrap();
        allocate(&mut list, &mut stats, "b", 1, false).unwrap();

        let freed = collect(&mut list, &mut stats);

        assert_eq!(freed, 2);
        assert!(list.find_used("a").is_none());
        assert!(list.find_used("b").is_none());
    }

    #[test]
    fn self_reference_does_not_prevent_reclamation() {
        let (mut list, mut stats) = new_list(30);
        allocate(&mut list, &mut stats, "a", 1, false).unwrap();
        add_reference(&mut list, "a", "a").unwrap();

        let freed = collect(&mut list, &mut stats);
        assert_eq!(freed, 1);
    }

    #[test]
    fn running_collect_twice_in_a_row_frees_nothing_the_second_time() {
        let (mut list, mut stats) = new_list(30);
        allocate(&mut list, &mut stats, "a", 1, true).unwrap();
        allocate(&mut list, &mut stats, "b", 1, false).unwrap();

        assert_eq!(collect(&mut list, &mut stats), 1);
        assert_eq!(collect(&mut list, &mut stats), 0);
    }

    #[test]
    fn dangling_reference_does_not_traverse() {
        let (mut list, mut stats) = new_list(30);
        allocate(&mut list, &mut stats, "a", 1, true).unwrap();
        add_reference(&mut list, "a", "nowhere").unwrap();

        // Must not panic, and must not mark "nowhere" into existence.
        let freed = collect(&mut list, &mut stats);
        assert_eq!(freed, 0);
        assert!(list.find_used("a").is_some());
    }

    #[test]
    fn marks_are_cleared_after_cycle() {
        let (mut list, mut stats) = new_list(30);
        allocate(&mut list, &mut stats, "a", 1, true).unwrap();
        collect(&mut list, &mut stats);
        assert!(list.iter().all(|b| !b.mark));
    }
}
