//! Output module for console output.
//!
//! Provides:
//! - Colored console output and error dialogs
//! - Statistics reporting

pub mod console;
pub mod stats;

pub use console::{
    dialog_lines, print_banner, print_config_summary, print_dialog, print_error, print_info,
    print_warning,
};
pub use stats::{print_registry_summary, print_session_stats, SessionStats};
