//! Testing utilities and harness for reelfeed

pub mod fake_media;
pub mod feed_assertions;
pub mod feed_rule;

// Re-export testing utilities
pub use fake_media::*;
pub use feed_rule::*;

pub mod prelude {
    pub use crate::fake_media::*;
    pub use crate::feed_assertions;
    pub use crate::feed_rule::*;
}

#[cfg(test)]
#[path = "tests/fake_media_tests.rs"]
mod tests;
