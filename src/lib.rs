//! A skiplist is a way of storing elements in such a way that elements can be
//! efficiently accessed, inserted and removed, all in `O(log(n))` on average.
//!
//! Conceptually, a skiplist resembles something like:
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! where each node `[x]` has references to nodes further down the list,
//! allowing the algorithm to effectively skip ahead.
//!
//! Every link of this skiplist also records its *span*: the number of
//! bottom-level steps it covers. Summing spans along a search path gives the
//! rank of the element reached, so besides ordered insertion, removal and
//! membership, [`SkipList`] answers "which element is at index `i`"
//! ([`SkipList::at_index`]) and "at which index is this element"
//! ([`SkipList::rank_of`]) in `O(log(n))` as well.
//!
//! ```
//! use ranked_skiplist::{Config, Policy, SkipList};
//!
//! let mut scores = SkipList::with_config(Config::for_capacity(1_000).with_policy(Policy::UniqueSet))?;
//! for score in [70, 95, 70, 40] {
//!     scores.insert(score)?;
//! }
//! assert_eq!(scores.len(), 3);
//! assert_eq!(scores.at_index(2)?, &95);
//! assert_eq!(scores.rank_of(&70), Some(1));
//! # Ok::<(), ranked_skiplist::SkipListError>(())
//! ```
//!
//! The ordering is supplied by a [`Compare`] implementation, and node heights
//! by a [`LevelGenerator`]. The default generator is deterministic, so two
//! skiplists fed the same elements end up with the same shape.
//!
//! Structural events are logged through [`tracing`](https://docs.rs/tracing)
//! when the `tracing` feature is enabled.

#[macro_use]
mod tracing_helpers;

mod compare;
mod config;
mod dot;
mod error;
mod iter;
pub mod level_generator;
mod skiplist;
mod skipnode;

pub use compare::{Compare, NaturalOrder};
pub use config::{Config, DEFAULT_LEVELS, MAX_LEVELS, Policy, levels_required};
pub use error::{ErrorKind, SkipListError};
pub use iter::{Cursor, Iter};
pub use level_generator::{Geometric, LeadingZeros, LevelGenerator, MultiplyWithCarry};
pub use skiplist::SkipList;
