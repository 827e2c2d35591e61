//! Reactive value store for the whitelabel form-state engine.
//!
//! [`Store`] holds one state value behind a cheaply clonable handle and
//! notifies selector-filtered subscribers synchronously after every
//! committed write. `Store<serde_json::Value>` additionally supports
//! path-scoped reads and writes, including *silent* writes that skip
//! notification entirely.
//!
//! # Change detection
//!
//! A subscriber is a `(selector, listener)` pair. After each notifying write
//! the selector is re-run against the new state and the listener fires only
//! when the selected value differs from the previously seen one under deep
//! equality (`PartialEq`).
//!
//! # Threading
//!
//! Stores are single-threaded (`Rc`/`RefCell`). Every write commits before
//! any listener runs, so listeners always observe the value just written.

mod path_ops;
mod store;

pub use path_ops::{get_at, get_at_mut, set_at};
pub use store::{SetOptions, Store, SubscriptionId};
