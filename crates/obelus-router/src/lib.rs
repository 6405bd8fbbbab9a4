//! # Obelus Router
//!
//! Pattern-path library for the Obelus framework:
//! - Pattern parsing (`/blog/[slug]`, `/docs/[...path]`) into typed segment lists
//! - Exact-inverse rendering back to pattern strings
//! - Concrete path matching with slug binding extraction
//!
//! ## Pattern Syntax
//!
//! `/`-separated; `[name]` captures exactly one path component (a *group*),
//! `[...name]` captures zero-or-more components as an ordered list (a
//! *wildcard*, at most one per pattern, at any position); anything else is a
//! literal. `/` alone is the root.
//!
//! ## Example
//!
//! ```
//! use obelus_router::{PathSpec, SlugValue};
//!
//! let spec = PathSpec::parse("/shop/[category]/[...rest]").unwrap();
//! assert_eq!(spec.render(), "/shop/[category]/[...rest]");
//!
//! let slugs = spec.matches("/shop/tools/saws/bow").unwrap();
//! assert_eq!(slugs.get("category"), Some(&SlugValue::One("tools".into())));
//! assert_eq!(
//!     slugs.get("rest"),
//!     Some(&SlugValue::Many(vec!["saws".into(), "bow".into()]))
//! );
//! ```

mod error;
mod matching;
mod segment;
mod spec;

pub use error::InvalidPathError;
pub use matching::{split_path, SlugMapping, SlugValue};
pub use segment::PathSegment;
pub use spec::PathSpec;
