/// GeneralList is an ordered sequence of `Element`s, each of which may hold a value of any
/// type, including another GeneralList.
use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut};
use std::slice;
use std::vec;

use itertools::Itertools;

use element::{compare_sequences, err_bounds, Capabilities, Element, Operator, RuntimeError};

use crate::containers::{
    Container, ContainerFromSlice, IndexedContainer, InsertContainer, StackContainer,
};

/// A List can contain a mixed sequence of any type of value
// ANCHOR: DefGeneralList
#[derive(Clone, Default)]
pub struct GeneralList {
    items: Vec<Element>,
}
// ANCHOR_END: DefGeneralList

impl GeneralList {
    /// Return a bounds error unless `index < limit`
    fn check_index(&self, index: usize, limit: usize) -> Result<(), RuntimeError> {
        if index < limit {
            Ok(())
        } else {
            debug!("index {} refused, list length is {}", index, self.items.len());
            Err(err_bounds(index, self.items.len()))
        }
    }

    pub fn iter(&self) -> slice::Iter<Element> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Element] {
        &self.items
    }
}

impl Container<Element> for GeneralList {
    fn new() -> GeneralList {
        GeneralList { items: Vec::new() }
    }

    fn with_capacity(capacity: usize) -> GeneralList {
        GeneralList {
            items: Vec::with_capacity(capacity),
        }
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn length(&self) -> usize {
        self.items.len()
    }
}

impl StackContainer<Element> for GeneralList {
    fn push(&mut self, item: Element) {
        self.items.push(item);
    }

    fn pop(&mut self) -> Result<Element, RuntimeError> {
        self.items.pop().ok_or_else(|| err_bounds(0, 0))
    }

    fn top(&self) -> Result<&Element, RuntimeError> {
        self.items.last().ok_or_else(|| err_bounds(0, 0))
    }
}

impl IndexedContainer<Element> for GeneralList {
    fn get(&self, index: usize) -> Result<&Element, RuntimeError> {
        self.check_index(index, self.items.len())?;
        Ok(&self.items[index])
    }

    fn get_mut(&mut self, index: usize) -> Result<&mut Element, RuntimeError> {
        self.check_index(index, self.items.len())?;
        Ok(&mut self.items[index])
    }

    fn set(&mut self, index: usize, item: Element) -> Result<Element, RuntimeError> {
        let slot = IndexedContainer::get_mut(self, index)?;
        Ok(std::mem::replace(slot, item))
    }
}

impl InsertContainer<Element> for GeneralList {
    fn insert(&mut self, index: usize, item: Element) -> Result<(), RuntimeError> {
        // inserting at the length appends
        self.check_index(index, self.items.len() + 1)?;
        self.items.insert(index, item);
        Ok(())
    }

    fn erase(&mut self, index: usize) -> Result<Element, RuntimeError> {
        self.check_index(index, self.items.len())?;
        Ok(self.items.remove(index))
    }
}

impl ContainerFromSlice<Element> for GeneralList {
    fn from_slice(data: &[Element]) -> GeneralList {
        GeneralList {
            items: data.to_vec(),
        }
    }
}

/// Unchecked indexing, panics like a slice when out of bounds
impl Index<usize> for GeneralList {
    type Output = Element;

    fn index(&self, index: usize) -> &Element {
        &self.items[index]
    }
}

impl IndexMut<usize> for GeneralList {
    fn index_mut(&mut self, index: usize) -> &mut Element {
        &mut self.items[index]
    }
}

impl From<Vec<Element>> for GeneralList {
    fn from(items: Vec<Element>) -> GeneralList {
        GeneralList { items }
    }
}

impl FromIterator<Element> for GeneralList {
    fn from_iter<I: IntoIterator<Item = Element>>(iter: I) -> GeneralList {
        GeneralList {
            items: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for GeneralList {
    type Item = Element;
    type IntoIter = vec::IntoIter<Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a GeneralList {
    type Item = &'a Element;
    type IntoIter = slice::Iter<'a, Element>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// A GeneralList can itself be stored in an Element, giving nested lists. Lists compare
/// element by element; the first unequal pair decides, then the shorter list is less.
impl Capabilities for GeneralList {
    fn display(&self) -> Option<&dyn fmt::Display> {
        Some(self)
    }

    fn equal(&self, other: &Self) -> Result<bool, RuntimeError> {
        compare_sequences(Operator::Equal, &self.items, &other.items)
    }

    fn less(&self, other: &Self) -> Result<bool, RuntimeError> {
        compare_sequences(Operator::Less, &self.items, &other.items)
    }

    fn greater(&self, other: &Self) -> Result<bool, RuntimeError> {
        compare_sequences(Operator::Greater, &self.items, &other.items)
    }

    fn less_equal(&self, other: &Self) -> Result<bool, RuntimeError> {
        compare_sequences(Operator::LessEqual, &self.items, &other.items)
    }

    fn greater_equal(&self, other: &Self) -> Result<bool, RuntimeError> {
        compare_sequences(Operator::GreaterEqual, &self.items, &other.items)
    }
}

impl fmt::Display for GeneralList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "[{}]", self.items.iter().format(", "))
    }
}

impl fmt::Debug for GeneralList {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}

/// Build a GeneralList from a literal sequence of values of any `Capabilities` type.
/// Elements are taken as they are, anything else is wrapped in a new Element.
#[macro_export]
macro_rules! list {
    () => {
        $crate::GeneralList::from(::std::vec::Vec::<$crate::Element>::new())
    };

    ($($item:expr),+ $(,)?) => {
        $crate::GeneralList::from(vec![$($crate::Element::new($item)),+])
    };
}
