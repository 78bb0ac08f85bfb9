//! Reference Graph Module - Edge Edits Over Named Blocks
//!
//! `add_reference`, `remove_reference`, and `set_root`: the only operations
//! that mutate the reachability graph the collector later traces.

use log::{info, warn};

use crate::error::{EdgeOutcome, HeapError, Result};
use crate::list::BlockList;

/// Adds the edge `from_name -> to_name`.
///
/// `from_name` must resolve to a `Used` block; `to_name` need not (dangling
/// edges are legal and simply don't traverse during marking). A duplicate
/// edge is reported via [`EdgeOutcome::AlreadyExists`] rather than failing.
pub fn add_reference(list: &mut BlockList, from_name: &str, to_name: &str) -> Result<EdgeOutcome> {
    let idx = list
        .find_used(from_name)
        .ok_or_else(|| HeapError::NotFound(from_name.to_string()))?;

    let block = list.get_mut(idx).expect("index just located");
    if block.references.iter().any(|r| r == to_name) {
        warn!("add_reference: edge {from_name} -> {to_name} already exists");
        return Ok(EdgeOutcome::AlreadyExists);
    }
    block.references.push(to_name.to_string());
    info!("added reference {from_name} -> {to_name}");
    Ok(EdgeOutcome::Added)
}

/// Removes the edge `from_name -> to_name`, preserving order of the
/// remaining references.
///
/// `from_name` must resolve to a `Used` block. A missing edge is reported
/// via [`EdgeOutcome::Absent`] rather than failing.
pub fn remove_reference(
    list: &mut BlockList,
    from_name: &str,
    to_name: &str,
) -> Result<EdgeOutcome> {
    let idx = list
        .find_used(from_name)
        .ok_or_else(|| HeapError::NotFound(from_name.to_string()))?;

    let block = list.get_mut(idx).expect("index just located");
    let before = block.references.len();
    block.references.retain(|r| r != to_name);
    if block.references.len() == before {
        warn!("remove_reference: edge {from_name} -> {to_name} absent");
        return Ok(EdgeOutcome::Absent);
    }
    info!("removed reference {from_name} -> {to_name}");
    Ok(EdgeOutcome::Removed)
}

/// Sets or clears the root flag on the used block named `name`.
pub fn set_root(list: &mut BlockList, name: &str, flag: bool) -> Result<()> {
    let idx = list
        .find_used(name)
        .ok_or_else(|| HeapError::NotFound(name.to_string()))?;
    list.get_mut(idx).expect("index just located").is_root = flag;
    info!("set_root('{name}', {flag})");
    Ok(())
}
