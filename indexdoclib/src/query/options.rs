//! Sort options for building sections.

use serde::{Deserialize, Serialize};

/// How sort-key values are compared and labeled.
///
/// All flags are off by default, so values sort by their raw text and
/// section labels keep their original case.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOptions {
    /// Compare lower-cased values and upper-case section labels
    pub ignore_case: bool,
    /// Compare values with everything but `[A-Za-z0-9]` removed
    pub ignore_symbols: bool,
    /// Collapse digit labels into a single `#` section
    pub group_numbers: bool,
}

impl SortOptions {
    /// Raw text comparison (default)
    pub fn new() -> Self {
        Self::default()
    }

    /// Case-insensitive, symbol-insensitive, numbers grouped under `#`
    pub fn recommended() -> Self {
        Self {
            ignore_case: true,
            ignore_symbols: true,
            group_numbers: true,
        }
    }

    /// Builder: set case-insensitive comparison
    pub fn with_ignore_case(mut self, enabled: bool) -> Self {
        self.ignore_case = enabled;
        self
    }

    /// Builder: set symbol-insensitive comparison
    pub fn with_ignore_symbols(mut self, enabled: bool) -> Self {
        self.ignore_symbols = enabled;
        self
    }

    /// Builder: set number grouping
    pub fn with_group_numbers(mut self, enabled: bool) -> Self {
        self.group_numbers = enabled;
        self
    }
}
