//! Content-Security-Policy directive model.
//!
//! This module provides:
//! - [`DirectiveSet`], the insertion-ordered mapping of directive names to values
//! - Parsing a header value into a directive set
//! - Serializing a directive set back into a header value

mod codec;
mod directive;

pub use codec::{split_tokens, CLAUSE_SEPARATOR};
pub use directive::DirectiveSet;
