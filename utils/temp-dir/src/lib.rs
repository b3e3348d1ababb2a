//! Allocation of uniquely named temporary directories.
//!
//! The base directory and name prefix come from the `TmpFileDir` and
//! `TmpFilePrefix` settings. Each directory name ends in a random six
//! character suffix drawn from `A-Z0-9`.

mod allocator;
mod error;
mod suffix;

pub use allocator::{AllocatorOptions, ResolvedNaming, TempDirAllocator, DEFAULT_MAX_ATTEMPTS};
pub use error::{Result, TempDirError};
pub use suffix::{
    is_valid_suffix, RandomSuffix, SuffixGenerator, SUFFIX_ALPHABET, SUFFIX_LEN,
};
