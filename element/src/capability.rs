/// Capability probes for values stored behind an `Element`.
///
/// Every stored type implements `Capabilities`. Each method defaults to reporting the
/// capability as absent, so a type that cannot be printed or compared still has a
/// well-defined behavior: printing falls back to the type tag, and comparisons are
/// refused with a `MissingCapability` error.
///
/// The impl is resolved once per concrete type when its adapter is instantiated. Std
/// containers (`Vec`, `Option`, `Box`, arrays and tuples) derive their capabilities from
/// their contents.
use std::any::{type_name, Any, TypeId};
use std::fmt;
use std::slice;

use crate::error::{err_missing_capability, RuntimeError};

/// Comparison operators an `Element` can dispatch. `!=` is derived from `Equal`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Operator {
    Equal,
    Less,
    Greater,
    LessEqual,
    GreaterEqual,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Equal => "==",
            Operator::Less => "<",
            Operator::Greater => ">",
            Operator::LessEqual => "<=",
            Operator::GreaterEqual => ">=",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Display-friendly name of a concrete type
pub fn type_tag<T: ?Sized>() -> &'static str {
    type_name::<T>()
}

/// The set of optional capabilities of a storable type.
// ANCHOR: DefCapabilities
pub trait Capabilities: Any + Clone {
    /// Return a textual rendering of the value if the type has one
    fn display(&self) -> Option<&dyn fmt::Display> {
        None
    }

    fn equal(&self, _other: &Self) -> Result<bool, RuntimeError> {
        Err(err_missing_capability(type_tag::<Self>(), Operator::Equal))
    }

    fn less(&self, _other: &Self) -> Result<bool, RuntimeError> {
        Err(err_missing_capability(type_tag::<Self>(), Operator::Less))
    }

    fn greater(&self, _other: &Self) -> Result<bool, RuntimeError> {
        Err(err_missing_capability(type_tag::<Self>(), Operator::Greater))
    }

    fn less_equal(&self, _other: &Self) -> Result<bool, RuntimeError> {
        Err(err_missing_capability(type_tag::<Self>(), Operator::LessEqual))
    }

    fn greater_equal(&self, _other: &Self) -> Result<bool, RuntimeError> {
        Err(err_missing_capability(type_tag::<Self>(), Operator::GreaterEqual))
    }
}
// ANCHOR_END: DefCapabilities

/// Run the same-type comparison named by `op`
pub fn probe<T: Capabilities>(op: Operator, lhs: &T, rhs: &T) -> Result<bool, RuntimeError> {
    match op {
        Operator::Equal => lhs.equal(rhs),
        Operator::Less => lhs.less(rhs),
        Operator::Greater => lhs.greater(rhs),
        Operator::LessEqual => lhs.less_equal(rhs),
        Operator::GreaterEqual => lhs.greater_equal(rhs),
    }
}

/// Lexicographic comparison of two sequences. The first unequal pair decides, otherwise the
/// shorter sequence orders first. Errors from any visited pair are returned as they are.
pub fn compare_sequences<T: Capabilities>(
    op: Operator,
    lhs: &[T],
    rhs: &[T],
) -> Result<bool, RuntimeError> {
    for (left, right) in lhs.iter().zip(rhs.iter()) {
        if !left.equal(right)? {
            return probe(op, left, right);
        }
    }

    probe(op, &lhs.len(), &rhs.len())
}

/// Implement `Capabilities` for each listed concrete type, enabling the capabilities named in
/// brackets. Recognized capabilities are `Display`, `PartialEq` and `PartialOrd`.
///
/// ```
/// #[macro_use]
/// extern crate element;
///
/// #[derive(Clone, PartialEq)]
/// struct Token(u8);
///
/// #[derive(Clone)]
/// struct Opaque;
///
/// capabilities! {
///     [PartialEq] Token;
///     [] Opaque;
/// }
/// # fn main() {}
/// ```
#[macro_export]
macro_rules! capabilities {
    (@impl [$($cap:ident),*] $t:ty) => {
        impl $crate::Capabilities for $t {
            $( $crate::capabilities!(@$cap); )*
        }
    };

    (@each $caps:tt $($t:ty),+) => {
        $( $crate::capabilities!(@impl $caps $t); )+
    };

    (@Display) => {
        fn display(&self) -> Option<&dyn ::std::fmt::Display> {
            Some(self)
        }
    };

    (@PartialEq) => {
        fn equal(&self, other: &Self) -> ::std::result::Result<bool, $crate::RuntimeError> {
            Ok(*self == *other)
        }
    };

    (@PartialOrd) => {
        fn less(&self, other: &Self) -> ::std::result::Result<bool, $crate::RuntimeError> {
            Ok(*self < *other)
        }

        fn greater(&self, other: &Self) -> ::std::result::Result<bool, $crate::RuntimeError> {
            Ok(*self > *other)
        }

        fn less_equal(&self, other: &Self) -> ::std::result::Result<bool, $crate::RuntimeError> {
            Ok(*self <= *other)
        }

        fn greater_equal(&self, other: &Self) -> ::std::result::Result<bool, $crate::RuntimeError> {
            Ok(*self >= *other)
        }
    };

    ($([$($cap:ident),*] $($t:ty),+;)+) => {
        $( $crate::capabilities!(@each [$($cap),*] $($t),+); )+
    };
}

capabilities! {
    [Display, PartialEq, PartialOrd]
        i8, i16, i32, i64, i128, isize,
        u8, u16, u32, u64, u128, usize,
        f32, f64,
        bool, char,
        String, &'static str;
    [PartialEq, PartialOrd] (), TypeId;
}

/// Forward each comparison to `compare_sequences` over a slice view of the value
macro_rules! sequence_capabilities {
    ($as_slice:expr) => {
        fn equal(&self, other: &Self) -> Result<bool, RuntimeError> {
            compare_sequences(Operator::Equal, $as_slice(self), $as_slice(other))
        }

        fn less(&self, other: &Self) -> Result<bool, RuntimeError> {
            compare_sequences(Operator::Less, $as_slice(self), $as_slice(other))
        }

        fn greater(&self, other: &Self) -> Result<bool, RuntimeError> {
            compare_sequences(Operator::Greater, $as_slice(self), $as_slice(other))
        }

        fn less_equal(&self, other: &Self) -> Result<bool, RuntimeError> {
            compare_sequences(Operator::LessEqual, $as_slice(self), $as_slice(other))
        }

        fn greater_equal(&self, other: &Self) -> Result<bool, RuntimeError> {
            compare_sequences(Operator::GreaterEqual, $as_slice(self), $as_slice(other))
        }
    };
}

/// `None` is an empty sequence, so it orders before any `Some`
fn option_slice<T>(option: &Option<T>) -> &[T] {
    match option {
        Some(value) => slice::from_ref(value),
        None => &[],
    }
}

fn array_slice<T, const N: usize>(array: &[T; N]) -> &[T] {
    array
}

impl<T: Capabilities> Capabilities for Vec<T> {
    sequence_capabilities!(Vec::as_slice);
}

impl<T: Capabilities, const N: usize> Capabilities for [T; N] {
    sequence_capabilities!(array_slice);
}

impl<T: Capabilities> Capabilities for Option<T> {
    sequence_capabilities!(option_slice);
}

impl<T: Capabilities> Capabilities for Box<T> {
    fn display(&self) -> Option<&dyn fmt::Display> {
        (**self).display()
    }

    fn equal(&self, other: &Self) -> Result<bool, RuntimeError> {
        (**self).equal(&**other)
    }

    fn less(&self, other: &Self) -> Result<bool, RuntimeError> {
        (**self).less(&**other)
    }

    fn greater(&self, other: &Self) -> Result<bool, RuntimeError> {
        (**self).greater(&**other)
    }

    fn less_equal(&self, other: &Self) -> Result<bool, RuntimeError> {
        (**self).less_equal(&**other)
    }

    fn greater_equal(&self, other: &Self) -> Result<bool, RuntimeError> {
        (**self).greater_equal(&**other)
    }
}

/// Tuples compare field by field, like the std lexicographic ordering
macro_rules! tuple_capabilities {
    (@method $method:ident $op:ident $($idx:tt)+) => {
        fn $method(&self, other: &Self) -> Result<bool, RuntimeError> {
            $(
                if !self.$idx.equal(&other.$idx)? {
                    return probe(Operator::$op, &self.$idx, &other.$idx);
                }
            )+
            probe(Operator::$op, &(), &())
        }
    };

    ($(($($name:ident $idx:tt),+))+) => {$(
        impl<$($name: Capabilities),+> Capabilities for ($($name,)+) {
            tuple_capabilities!(@method equal Equal $($idx)+);
            tuple_capabilities!(@method less Less $($idx)+);
            tuple_capabilities!(@method greater Greater $($idx)+);
            tuple_capabilities!(@method less_equal LessEqual $($idx)+);
            tuple_capabilities!(@method greater_equal GreaterEqual $($idx)+);
        }
    )+};
}

tuple_capabilities! {
    (A 0)
    (A 0, B 1)
    (A 0, B 1, C 2)
    (A 0, B 1, C 2, D 3)
    (A 0, B 1, C 2, D 3, E 4)
    (A 0, B 1, C 2, D 3, E 4, F 5)
}
