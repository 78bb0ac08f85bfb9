//! # fibgc-core — A Fibonacci-Sized Buddy Allocator with a Tracing Collector
//!
//! `fibgc-core` partitions a fixed budget into blocks whose sizes are
//! consecutive Fibonacci numbers, satisfies allocation requests by best-fit
//! over those blocks, and splits/merges blocks along Fibonacci-pair
//! boundaries (not the binary buddy system: splits follow the Fibonacci
//! recurrence `F(n) = F(n-1) + F(n-2)`). A mark-and-sweep collector traces a
//! user-declared reachability graph of named blocks and reclaims whatever
//! a root cannot reach.
//!
//! ## Quick start
//!
//! ```rust
//! use fibgc_core::Heap;
//!
//! let mut heap = Heap::init(30);
//! heap.allocate("a", 4, true).unwrap();
//! heap.allocate("b", 4, false).unwrap();
//! heap.add_reference("a", "b").unwrap();
//! let freed = heap.collect();
//! assert_eq!(freed, 0); // b is reachable from root a
//! ```
//!
//! ## Architecture
//!
//! - [`block`] — the atomic unit: size, state, name, references, mark bit.
//! - [`list`] — the ordered block list: split, merge, best-fit, lookup.
//! - [`fib`] — the Fibonacci arithmetic the list and allocator build on.
//! - [`allocator`] — `allocate`/`free`, including the GC-on-failure retry.
//! - [`refs`] — reference-graph edits: `add_reference`, `remove_reference`,
//!   `set_root`.
//! - [`gc`] — the mark-and-sweep cycle, `collect`.
//! - [`stats`] — cumulative lifetime counters.
//! - [`heap`] — [`Heap`], the single owned value threading all of the above.
//! - [`error`] — [`HeapError`] and the crate's `Result` alias.
//!
//! This crate is single-threaded and non-suspending by design: there is no
//! scheduler, no concurrent mutator, and no persisted state. A block is a
//! named *capacity*, not a byte buffer — callers track payloads themselves
//! if they need to.

pub mod allocator;
pub mod block;
pub mod error;
pub mod fib;
pub mod gc;
pub mod heap;
pub mod list;
pub mod refs;
pub mod stats;

pub use block::{Block, BlockState};
pub use error::{EdgeOutcome, HeapError, Result};
pub use heap::Heap;
pub use stats::HeapStats;
