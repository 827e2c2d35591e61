//! Scenario runner components for the whitelabel form-state engine.
//!
//! A scenario is a JSON or TOML file describing an initial form state, form
//! options, a list of fields and a sequence of interaction events. The
//! runner builds a [`FormController`](wlf_form::FormController) from it,
//! replays the events and reports every field's final state.

pub mod logging;
pub mod runner;
pub mod scenario;
pub mod summary;
