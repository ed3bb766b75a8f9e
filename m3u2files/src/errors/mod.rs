// Adapted from lcsm-server project
#[macro_export]
macro_rules! something_with_error_log {
    ($value:expr) => {
        |e| {
            use log::warn;

            warn!("{}", e);
            $value
        }
    };

    ($position:expr, $value:expr) => {
        |e| {
            use log::warn;

            warn!("{}: {}", $position, e);
            $value
        }
    };
}

/// Maps a target error into a [`SkipReason::TargetWriteFailure`](crate::materialize::SkipReason)
/// carrying the error text, logging it on the way.
#[macro_export]
macro_rules! write_failure_with_log {
    ($position:expr) => {
        |e| {
            use log::warn;

            warn!("{}: {}", $position, e);
            $crate::materialize::SkipReason::TargetWriteFailure(format!("{}: {}", $position, e))
        }
    };
}

pub use something_with_error_log;
pub use write_failure_with_log;
