//! # sovran-attributes
//!
//! A type-erased attribute store for attaching typed values to a context.
//!
//! `sovran-attributes` lets the parts of a request pipeline (or any other
//! long-lived context) hang arbitrary values off a shared store, keyed by
//! string, without the context knowing those types in advance. Each value keeps
//! a runtime type tag that is checked on every typed read.
//!
//! ## Key Features
//!
//! - **Lenient reads**: `get` never fails; a missing key or a wrong type yields
//!   the type's default value, and the wrong-type case is logged via `tracing`
//! - **Strict reads**: `try_get` tells a missing key apart from a type mismatch
//! - **Raw cells**: `raw_access` exposes the type-erased cell for any key
//! - **Shared handle**: `SharedAttributes` passes one store between components
//!
//! ## Usage Examples
//!
//! ### Basic Usage
//!
//! ```rust
//! use sovran_attributes::Attributes;
//!
//! let mut attrs = Attributes::new();
//!
//! attrs.insert("user_id", 42i32);
//! attrs.insert("user_name", "alice".to_string());
//!
//! assert_eq!(*attrs.get::<i32>("user_id"), 42);
//! assert_eq!(attrs.get::<String>("user_name"), "alice");
//!
//! // Missing keys read as defaults
//! assert_eq!(*attrs.get::<u64>("missing"), 0);
//! ```
//!
//! ### Telling Failures Apart
//!
//! ```rust
//! use sovran_attributes::{AttributeError, Attributes};
//!
//! let mut attrs = Attributes::new();
//! attrs.insert("flag", true);
//!
//! match attrs.try_get::<String>("flag") {
//!     Ok(value) => println!("Flag: {}", value),
//!     Err(AttributeError::KeyNotFound(key)) => println!("{} is not set", key),
//!     Err(AttributeError::TypeMismatch { expected, found, .. }) => {
//!         println!("wanted {}, stored {}", expected, found)
//!     }
//!     Err(e) => println!("Other error: {}", e),
//! }
//! ```
//!
//! ### Sharing Attributes Between Components
//!
//! ```rust
//! use sovran_attributes::{AttributeError, SharedAttributes};
//!
//! struct Auth {
//!     attrs: SharedAttributes,
//! }
//!
//! struct Handler {
//!     attrs: SharedAttributes,
//! }
//!
//! impl Auth {
//!     fn authenticate(&self, token: &str) -> Result<(), AttributeError> {
//!         self.attrs.insert("user", token.trim_start_matches("token-").to_string())
//!     }
//! }
//!
//! impl Handler {
//!     fn greet(&self) -> Result<String, AttributeError> {
//!         let user = self.attrs.get::<String>("user")?;
//!         Ok(format!("Hello, {}!", user))
//!     }
//! }
//!
//! fn main() -> Result<(), AttributeError> {
//!     let attrs = SharedAttributes::new();
//!     let auth = Auth { attrs: attrs.clone() };
//!     let handler = Handler { attrs: attrs.clone() };
//!
//!     auth.authenticate("token-alice")?;
//!     assert_eq!(handler.greet()?, "Hello, alice!");
//!     Ok(())
//! }
//! ```

mod any_value;
mod attributes;
mod defaults;
mod error;
mod shared;

pub use any_value::AnyValue;
pub use attributes::Attributes;
pub use error::AttributeError;
pub use shared::SharedAttributes;

// Re-export std::any for convenience
pub use std::any::{Any, TypeId};
