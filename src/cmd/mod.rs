//! CLI command implementations.
//!
//! | Module    | Flags handled                |
//! |-----------|------------------------------|
//! | `build`   | `--stage` (pre, post)        |
//! | `clean`   | `--clean`                    |
//! | `subdirs` | `--stage --print-subdirs`    |

pub mod build;
pub mod clean;
pub mod subdirs;

pub use build::cmd_run;
pub use clean::cmd_clean;
pub use subdirs::cmd_subdirs;
