mod account;
mod backup;
mod lang;
mod record;
mod status;

// Status commands
pub use status::show_api_info;

// Backup commands
pub use backup::{list_options, refresh_token, run_backup, run_recover, show_local_dir};

// Record commands
pub use record::handle_record_command;

// Account commands
pub use account::handle_account_command;

// Lang commands
pub use lang::handle_lang;
