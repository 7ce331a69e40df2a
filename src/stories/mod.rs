//! Story catalog.
//!
//! This module provides:
//! - Named presets of each widget's configuration ("stories")
//! - A registry with lookup by id and search
//!
//! Stories exist for manual visual inspection. They add no behavior to the
//! widgets themselves.

mod registry;

pub use registry::{Component, Story, StoryRegistry, StoryWidget};
