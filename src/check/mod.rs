//! Health checks.
//!
//! A check inspects a [`Runtime`](crate::runtime::Runtime) and emits zero or
//! more [`Outcome`]s. Checks are registered in a [`CheckRegistry`] and
//! evaluated in order by a [`CheckRunner`].

pub mod builtin;
pub mod definition;
pub mod guard;
pub mod outcome;
pub mod registry;
pub mod runner;

pub use builtin::BuiltinOptions;
pub use definition::{Check, CheckContext, CheckDescriptor, CheckId, Severity};
pub use guard::{AbortFlagGuard, SettingGuard};
pub use outcome::Outcome;
pub use registry::CheckRegistry;
pub use runner::{CheckRunner, Selection};
