mod server_settings;
pub use server_settings::DEFAULT_READER_CAPACITY;

mod workload_settings;
pub use workload_settings::ASCII_LOWER_BOUND;
pub use workload_settings::ASCII_UPPER_BOUND;
pub use workload_settings::DEFAULT_ACTIONS;
pub use workload_settings::DEFAULT_CLIENTS;
pub use workload_settings::DEFAULT_TEXT_LEN;
