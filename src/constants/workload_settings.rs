/// Number of concurrent clients spawned by a default workload.
pub const DEFAULT_CLIENTS: usize = 20;

/// Number of open / read / write / close rounds each client performs.
pub const DEFAULT_ACTIONS: usize = 20;

pub const DEFAULT_TEXT_LEN: usize = 1000;

/// Generated text sticks to printable ASCII, space excluded.
pub const ASCII_LOWER_BOUND: u8 = 33;
pub const ASCII_UPPER_BOUND: u8 = 126;
