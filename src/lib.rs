//! Hierarchical checklist engine.
//!
//! The core is a set of pure, stateless edits over arbitrarily nested
//! task trees (`ops`): locate a node by id anywhere in the forest and
//! toggle, rename, reprioritize, expand/collapse, insert a child or
//! delete the subtree, always returning a new forest value. `store`
//! holds a collection of named lists and applies one edit per user
//! action; `io` reads and writes the collection as JSON.

pub mod io;
pub mod model;
pub mod ops;
pub mod store;
