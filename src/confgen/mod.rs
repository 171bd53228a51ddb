//! Configuration header generation.
//!
//! [`render_header`] turns a [`ConfigurationRecord`](crate::core::ConfigurationRecord)
//! into `config.h` text; [`ConfigWriter`] puts it on disk with
//! write-once-if-absent semantics.

mod header;
mod writer;

pub use header::{render_header, DARWIN_LIBPATH, NAMESPACE};
pub use writer::{ConfigError, ConfigWriter, StalePolicy, WriteOutcome};
