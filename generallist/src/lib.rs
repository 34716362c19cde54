//! An ordered, heterogeneous list of `Element`s.
//!
//! Usage:
//! ```
//! #[macro_use]
//! extern crate generallist;
//! use generallist::{Element, InsertContainer};
//!
//! # fn main() {
//! let mut list = list![1, "a", 2.5];
//! list.insert(0, Element::new(list![true])).unwrap();
//!
//! assert_eq!(format!("{}", list), "[[true], 1, a, 2.5]");
//! # }
//! ```
extern crate element;
extern crate itertools;
#[macro_use]
extern crate log;

mod containers;
#[macro_use]
mod list;

pub use element::{Capabilities, Element, ErrorKind, Operator, RuntimeError};

pub use crate::containers::{
    Container, ContainerFromSlice, IndexedContainer, InsertContainer, StackContainer,
};
pub use crate::list::GeneralList;
