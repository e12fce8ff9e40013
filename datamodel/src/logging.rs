//! FILENAME: datamodel/src/logging.rs
// PURPOSE: Category logging macros shared by every crate in the workspace.
//
// Each macro takes a category ("PIVOT", "HTTP", "MODEL", "JOB") followed by
// format arguments. The category becomes the `log` target, so a host
// application can filter per subsystem with whatever logger it installs.

#[doc(hidden)]
pub use log as __log;

// ============================================================================
// LEVEL MACROS
// ============================================================================

#[macro_export]
macro_rules! log_debug {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::__log::debug!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_info {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::__log::info!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_warn {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::__log::warn!(target: $cat, $($arg)*)
    };
}

#[macro_export]
macro_rules! log_error {
    ($cat:expr, $($arg:tt)*) => {
        $crate::logging::__log::error!(target: $cat, $($arg)*)
    };
}

// ENTER/EXIT macros for request tracing

#[macro_export]
macro_rules! log_enter {
    ($cat:expr, $func:expr) => {
        $crate::logging::__log::debug!(target: $cat, "ENTER {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::__log::debug!(target: $cat, "ENTER {} {}", $func, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_exit {
    ($cat:expr, $func:expr) => {
        $crate::logging::__log::debug!(target: $cat, "EXIT {}", $func)
    };
    ($cat:expr, $func:expr, $($arg:tt)*) => {
        $crate::logging::__log::debug!(target: $cat, "EXIT {} {}", $func, format_args!($($arg)*))
    };
}

// Re-export the macros so they can be imported via `use datamodel::logging::log_info;`
pub use log_debug;
pub use log_enter;
pub use log_error;
pub use log_exit;
pub use log_info;
pub use log_warn;
