//! The menu-driven command loop.
//!
//! Dispatches numeric choices `0..9` onto `Heap` operations, logging every
//! mutating call to the audit log and reporting core errors without
//! treating them as fatal.

use std::io::{self, Write};

use fibgc_core::Heap;

use crate::audit::AuditLog;
use crate::config::Config;
use crate::display;
use crate::error::Result;

/// Runs the interactive loop to completion, returning once the user quits or
/// stdin is exhausted.
pub fn run(config: &Config) -> Result<()> {
    let mut heap = Heap::init(config.budget);
    let mut audit = AuditLog::new();

    println!();
    println!("Fibonacci heap manager with garbage collection");
    println!("Total memory: {} units", config.budget);

    loop {
        display::print_menu(config.color);
        io::stdout().flush()?;

        let Some(line) = read_line()? else {
            println!();
            return Ok(());
        };

        let Ok(choice) = line.trim().parse::<u32>() else {
            println!("Invalid input. Please enter a number 0-9.");
            continue;
        };

        match choice {
            1 => allocate(&mut heap, &mut audit)?,
            2 => free(&mut heap, &mut audit)?,
            3 => display::render_heap(&heap, config.color),
            4 => add_reference(&mut heap, &mut audit)?,
            5 => remove_reference(&mut heap, &mut audit)?,
            6 => set_root(&mut heap, &mut audit)?,
            7 => {
                let freed = heap.collect();
                audit.record(format!("Ran garbage collection, freed {freed} block(s)"));
                println!("Collector freed {freed} block(s).");
            }
            8 => display::render_stats(heap.stats(), config.color),
            9 => display::render_audit_log(&audit, config.color),
            0 => {
                println!("Thank you for using the Fibonacci heap manager!");
                display::render_stats(heap.stats(), config.color);
                return Ok(());
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
}

fn allocate(heap: &mut Heap, audit: &mut AuditLog) -> Result<()> {
    let Some(name) = prompt("Enter variable name: ")? else {
        return Ok(());
    };
    let Some(size) = prompt_parsed::<u64>("Enter size to allocate: ")? else {
        return Ok(());
    };
    let Some(is_root) = prompt_parsed::<u32>("Is this a root reference? (1=Yes, 0=No): ")? else {
        return Ok(());
    };

    match heap.allocate(&name, size, is_root == 1) {
        Ok(()) => {
            audit.record(format!("Allocated '{name}' (size {size})"));
            println!("Allocated '{name}'.");
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn free(heap: &mut Heap, audit: &mut AuditLog) -> Result<()> {
    let Some(name) = prompt("Enter variable name to free: ")? else {
        return Ok(());
    };
    match heap.free(&name) {
        Ok(()) => {
            audit.record(format!("Freed '{name}'"));
            println!("Freed '{name}'.");
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn add_reference(heap: &mut Heap, audit: &mut AuditLog) -> Result<()> {
    let Some(from) = prompt("Enter source block name: ")? else {
        return Ok(());
    };
    let Some(to) = prompt("Enter target block name: ")? else {
        return Ok(());
    };
    match heap.add_reference(&from, &to) {
        Ok(outcome) => {
            audit.record(format!("Reference added: '{from}' -> '{to}'"));
            println!("{outcome:?}: '{from}' -> '{to}'");
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn remove_reference(heap: &mut Heap, audit: &mut AuditLog) -> Result<()> {
    let Some(from) = prompt("Enter source block name: ")? else {
        return Ok(());
    };
    let Some(to) = prompt("Enter target block name: ")? else {
        return Ok(());
    };
    match heap.remove_reference(&from, &to) {
        Ok(outcome) => {
            audit.record(format!("Reference removed: '{from}' -> '{to}'"));
            println!("{outcome:?}: '{from}' -> '{to}'");
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

fn set_root(heap: &mut Heap, audit: &mut AuditLog) -> Result<()> {
    let Some(name) = prompt("Enter block name: ")? else {
        return Ok(());
    };
    let Some(flag) = prompt_parsed::<u32>("Set as root? (1=Yes, 0=No): ")? else {
        return Ok(());
    };
    let is_root = flag == 1;
    match heap.set_root(&name, is_root) {
        Ok(()) => {
            audit.record(format!("Block '{name}' root status: {is_root}"));
            println!("'{name}' is now {}a root.", if is_root { "" } else { "not " });
        }
        Err(err) => println!("Error: {err}"),
    }
    Ok(())
}

/// Prompts with `message`, returning the trimmed line, or `None` at EOF.
fn prompt(message: &str) -> Result<Option<String>> {
    print!("{message}");
    io::stdout().flush()?;
    Ok(read_line()?.map(|line| line.trim().to_string()))
}

fn prompt_parsed<T: std::str::FromStr>(message: &str) -> Result<Option<T>> {
    loop {
        let Some(line) = prompt(message)? else {
            return Ok(None);
        };
        if let Ok(value) = line.trim().parse() {
            return Ok(Some(value));
        }
        println!("Invalid value, try again.");
    }
}

fn read_line() -> Result<Option<String>> {
    let mut line = String::new();
    let bytes_read = io::stdin().read_line(&mut line)?;
    if bytes_read == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}
