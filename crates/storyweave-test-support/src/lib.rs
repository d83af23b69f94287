//! Shared test mocks and utilities for the storyweave engine.

mod clock;
mod sink;
mod store;

pub use clock::FixedClock;
pub use sink::FailingSink;
pub use store::FailingStore;
