//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path)
//!     → router.rs (trailing-slash normalization, ordered scan)
//!     → pattern.rs (evaluate compiled path template, decode captures)
//!     → Return: matched handler + captures, or the fallback
//!
//! Route Compilation (at startup):
//!     path templates ("/crm/fans/:id")
//!     → Compile to anchored regex + ordered capture names
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Routes compiled at startup, immutable at runtime
//! - Literal segments are regex-escaped; a template is never pattern syntax
//! - First match wins (registration order is the priority order)
//! - Resolution is total: a fallback handler always exists, so callers
//!   never see a "no route" case

pub mod pattern;
pub mod router;

pub use pattern::{PathPattern, PatternError};
pub use router::{Matched, Route, Router};
