//! Configuration module for the fibgc CLI.
//!
//! Unlike a build tool reading project config from disk, this shell's
//! configuration is constructed once from CLI flags at startup and held for
//! the life of the process — there is no file to load or save.

/// Default total budget handed to `Heap::init` when `--budget` is omitted.
const DEFAULT_BUDGET: u64 = 16000;

/// Application configuration for the interactive shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Whether debug-level log records are emitted.
    pub verbose: bool,

    /// Whether ANSI color codes are used in the heap visualisation and menu.
    pub color: bool,

    /// Total budget the heap is initialised with.
    pub budget: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            verbose: false,
            color: true,
            budget: DEFAULT_BUDGET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_the_classic_heap_size() {
        let config = Config::default();
        assert!(!config.verbose);
        assert!(config.color);
        assert_eq!(config.budget, 16000);
    }
}
