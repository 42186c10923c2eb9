//! External morphological parsers run as subprocesses

pub mod adapter;
pub mod limiter;
pub mod output;

pub use adapter::{ExternalParserAdapter, ParsedSentence};
pub use limiter::{SpawnLimiter, SpawnPermit};
