//! Internal settings for rtree2d.
//!
//! This module initializes the logging configuration for the crate at startup.
//! The logging behavior is controlled by the `DEBUG_RTREE2D` environment variable.
//! If `DEBUG_RTREE2D` is not set or is set to a falsy value ("0", "false", or empty),
//! logging will remain disabled. Otherwise, logging is enabled with a maximum level of DEBUG.

use ctor::ctor;
use tracing::Level;

#[ctor]
fn set_debug_level() {
    // If DEBUG_RTREE2D is not set or set to a falsy value, disable logging.
    // Otherwise, initialize a debug-level subscriber.
    if std::env::var("DEBUG_RTREE2D").map_or(true, |v| v == "0" || v == "false" || v.is_empty()) {
        // Logging macros will not output without a subscriber
    } else {
        tracing_subscriber::fmt()
            .with_max_level(Level::DEBUG)
            .init();
    }
}
