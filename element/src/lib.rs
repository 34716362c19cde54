//! A type-erased single value container.
//!
//! Usage:
//! ```
//! extern crate element;
//! use element::Element;
//!
//! let a = Element::new(10);
//! let b = Element::new(10.0);
//!
//! assert!(a.equal(&10).unwrap());
//! assert!(a.equal(&b).is_err()); // i32 and f64 never compare
//! ```
#[macro_use]
extern crate log;

#[macro_use]
mod capability;
mod element;
mod error;

pub use crate::capability::{compare_sequences, probe, type_tag, Capabilities, Operator};
pub use crate::element::Element;
pub use crate::error::{
    err_access, err_bounds, err_cast, err_missing_capability, err_type_compare, ErrorKind,
    RuntimeError,
};
