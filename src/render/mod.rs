//! Template rendering subsystem.
//!
//! # Data Flow
//! ```text
//! built-in sources (templates.rs)
//!     → engine.rs (registered into Tera at startup)
//!     → render(name, data) → HTML text
//!
//! Page composition (http/context.rs):
//!     render(content template, page data + product schema)
//!     → render(layout, chrome data + inner HTML as `content`)
//! ```
//!
//! # Design Decisions
//! - Template table is built once at startup; no file or network I/O at
//!   render time
//! - An unknown template name degrades to inline diagnostic text so the
//!   response itself never fails
//! - Exactly one level of inclusion is used (the nav fragment inside the
//!   layout); this is not general recursive templating

pub mod engine;
pub mod templates;

pub use engine::TemplateCache;
