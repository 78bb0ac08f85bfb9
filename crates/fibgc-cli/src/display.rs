//! Heap visualisation and statistics rendering.
//!
//! A read-only collaborator: every function here borrows `Heap` or
//! `AuditLog` and prints, never mutates.

use colored::{Color, Colorize};
use fibgc_core::{BlockState, Heap, HeapStats};

use crate::audit::AuditLog;

const RULE_WIDTH: usize = 76;

fn banner(title: &str, color: Color, use_color: bool) {
    let bar = "\u{2550}".repeat(RULE_WIDTH);
    let line = format!("\u{2551} {title:<width$} \u{2551}", width = RULE_WIDTH - 2);
    if use_color {
        println!("{}", format!("\u{2554}{bar}\u{2557}").color(color).bold());
        println!("{}", line.color(color).bold());
        println!("{}", format!("\u{255a}{bar}\u{255d}").color(color).bold());
    } else {
        println!("\u{2554}{bar}\u{2557}");
        println!("{line}");
        println!("\u{255a}{bar}\u{255d}");
    }
}

/// Renders every block as a labelled, colour-coded row, free and used blocks
/// distinguished, root-flagged blocks marked, followed by a summary.
pub fn render_heap(heap: &Heap, use_color: bool) {
    println!();
    banner("HEAP MEMORY MAP", Color::Magenta, use_color);

    let (mut used_count, mut used_total) = (0u64, 0u64);
    let (mut free_count, mut free_total) = (0u64, 0u64);

    for block in heap.iterate_blocks() {
        match block.state {
            BlockState::Used => {
                used_count += 1;
                used_total += block.size;
                let root_tag = if block.is_root { " [ROOT]" } else { "" };
                let row = format!(
                    "  [ALLOCATED] {:<15} | size {:<5} | used {:<5}{root_tag}",
                    block.name.as_deref().unwrap_or("?"),
                    block.size,
                    block.allocated_size,
                );
                if use_color {
                    println!("{}", row.green());
                } else {
                    println!("{row}");
                }
                if !block.references.is_empty() {
                    let refs = block.references.join(", ");
                    println!("               references: [{refs}]");
                }
            }
            BlockState::Free => {
                free_count += 1;
                free_total += block.size;
                let row = format!("  [FREE]      available       | size {:<5}", block.size);
                if use_color {
                    println!("{}", row.red());
                } else {
                    println!("{row}");
                }
            }
        }
    }

    println!();
    println!("  Summary:");
    println!("  - Allocated blocks: {used_count} (total {used_total})");
    println!("  - Free blocks:      {free_count} (total {free_total})");
    println!("  - Total budget:     {}", heap.total_budget());
}

/// Renders cumulative lifetime counters.
pub fn render_stats(stats: HeapStats, use_color: bool) {
    println!();
    banner("SYSTEM STATISTICS", Color::Magenta, use_color);
    println!("  Memory operations:");
    println!("    Total allocations: {}", stats.total_allocations);
    println!("    Manual frees:      {}", stats.total_manual_frees);
    println!("  Garbage collection:");
    println!("    Total GC runs:     {}", stats.total_collections);
    println!("    Total freed:       {}", stats.total_freed);
    println!("    Last GC freed:     {}", stats.last_freed_count);
}

/// Renders the most recent 20 audit-log entries, newest first.
pub fn render_audit_log(log: &AuditLog, use_color: bool) {
    println!();
    banner("AUDIT LOG", Color::Cyan, use_color);
    if log.is_empty() {
        println!("  No operations recorded yet.");
        return;
    }
    for (timestamp, description) in log.recent() {
        println!("  {} | {description}", timestamp.format("%Y-%m-%d %H:%M:%S"));
    }
}

pub fn print_menu(use_color: bool) {
    banner(
        "FIBONACCI HEAP MANAGER WITH MARK-AND-SWEEP GC",
        Color::Blue,
        use_color,
    );
    println!("  1. Allocate memory           5. Remove reference");
    println!("  2. Free memory               6. Set/unset root status");
    println!("  3. Display heap layout       7. Run garbage collection");
    println!("  4. Add reference (A -> B)    8. Show statistics");
    println!("                               9. Show audit log");
    println!("  0. Quit");
    print!("Enter your choice: ");
}
