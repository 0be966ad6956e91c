//! The file server itself: a table of named files, each guarded by its own
//! fair multiple-reader / single-writer controller.

mod access_handle;
pub use access_handle::AccessHandle;
pub use access_handle::AccessHandleError;

mod access_token;
pub use access_token::AccessToken;

mod mode;
pub use mode::Mode;

mod resource_control;
pub use resource_control::Occupancy;
pub use resource_control::ResourceControl;
pub use resource_control::ResourceControlError;

mod resource_table;
pub use resource_table::ResourceTable;
pub use resource_table::ResourceTableError;

mod server_config;
pub use server_config::ServerConfig;
pub use server_config::ServerConfigError;
