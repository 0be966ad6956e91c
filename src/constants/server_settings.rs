//! How many sessions may read a single file at the same time.
pub const DEFAULT_READER_CAPACITY: u32 = 4;
