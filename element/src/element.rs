/// Defines `Element`, a cell that owns at most one value of any `Capabilities` type.
///
/// The value is stored behind a `Holder` trait object, one implementation per concrete
/// type, which knows how to print, compare and clone the value it owns. Comparisons
/// dispatch through the left operand's holder and are only defined between occupants of
/// the same concrete type.
use std::any::{Any, TypeId};
use std::fmt;

use crate::capability::{probe, type_tag, Capabilities, Operator};
use crate::error::{err_access, err_cast, err_type_compare, RuntimeError};

/// The per-type adapter behind an occupied `Element`
// ANCHOR: DefHolder
trait Holder {
    /// Print the value, or the type tag if the type has no textual form
    fn print(&self, f: &mut fmt::Formatter) -> fmt::Result;

    /// Compare against a right operand that must be of the same concrete type
    fn compare(
        &self,
        op: Operator,
        rhs: &dyn Any,
        rhs_tag: &'static str,
    ) -> Result<bool, RuntimeError>;

    fn type_tag(&self) -> &'static str;

    fn value_type(&self) -> TypeId;

    fn clone_holder(&self) -> Box<dyn Holder>;

    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;

    fn into_any(self: Box<Self>) -> Box<dyn Any>;
}
// ANCHOR_END: DefHolder

struct HolderImpl<T: Capabilities> {
    value: T,
}

impl<T: Capabilities> Holder for HolderImpl<T> {
    fn print(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.value.display() {
            Some(printable) => fmt::Display::fmt(printable, f),
            None => f.write_str(type_tag::<T>()),
        }
    }

    fn compare(
        &self,
        op: Operator,
        rhs: &dyn Any,
        rhs_tag: &'static str,
    ) -> Result<bool, RuntimeError> {
        let rhs = match rhs.downcast_ref::<T>() {
            Some(rhs) => rhs,
            None => {
                debug!("refusing {} {} {}", type_tag::<T>(), op, rhs_tag);
                return Err(err_type_compare(type_tag::<T>(), op, rhs_tag));
            }
        };

        probe(op, &self.value, rhs).map_err(|err| {
            debug!("{} {} refused: {}", type_tag::<T>(), op, err);
            err
        })
    }

    fn type_tag(&self) -> &'static str {
        type_tag::<T>()
    }

    fn value_type(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn clone_holder(&self) -> Box<dyn Holder> {
        trace!("cloning {}", type_tag::<T>());
        Box::new(HolderImpl {
            value: self.value.clone(),
        })
    }

    fn as_any(&self) -> &dyn Any {
        &self.value
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        &mut self.value
    }

    fn into_any(self: Box<Self>) -> Box<dyn Any> {
        Box::new(self.value)
    }
}

/// A type-erased value cell. Either empty, or the exclusive owner of one value.
///
/// Cloning an `Element` deep-clones its occupant; no state is shared between copies.
// ANCHOR: DefElement
#[derive(Default)]
pub struct Element {
    holder: Option<Box<dyn Holder>>,
}
// ANCHOR_END: DefElement

impl Element {
    /// An Element holding nothing
    pub fn empty() -> Element {
        Element { holder: None }
    }

    /// Wrap a value. Wrapping an `Element` returns that Element rather than nesting it.
    pub fn new<T: Capabilities>(value: T) -> Element {
        let mut slot = Some(value);

        if let Some(element) = (&mut slot as &mut dyn Any).downcast_mut::<Option<Element>>() {
            return element.take().unwrap_or_default();
        }

        Element {
            holder: slot.map(|value| Box::new(HolderImpl { value }) as Box<dyn Holder>),
        }
    }

    /// Replace the occupant, which may change the Element's type
    pub fn set<T: Capabilities>(&mut self, value: T) {
        *self = Element::new(value);
    }

    pub fn has_value(&self) -> bool {
        self.holder.is_some()
    }

    /// Release the occupant, if any
    pub fn reset(&mut self) {
        if let Some(holder) = self.holder.take() {
            trace!("releasing {}", holder.type_tag());
        }
    }

    /// Move the occupant out into a new Element, leaving this one empty
    pub fn take(&mut self) -> Element {
        Element {
            holder: self.holder.take(),
        }
    }

    /// Run-time type of the occupant. An empty Element reports the unit type.
    pub fn value_type(&self) -> TypeId {
        match self.holder {
            Some(ref holder) => holder.value_type(),
            None => TypeId::of::<()>(),
        }
    }

    /// Display tag of the occupant's type, or "Null" when empty
    pub fn id(&self) -> &'static str {
        match self.holder {
            Some(ref holder) => holder.type_tag(),
            None => "Null",
        }
    }

    /// True if the occupant is exactly of type `T`
    pub fn is<T: Any>(&self) -> bool {
        self.has_value() && self.value_type() == TypeId::of::<T>()
    }

    fn holder(&self) -> Result<&dyn Holder, RuntimeError> {
        match self.holder {
            Some(ref holder) => Ok(holder.as_ref()),
            None => Err(err_access()),
        }
    }

    /// Borrow the occupant as `T`. `T = Element` borrows the Element itself.
    pub fn cast_ref<T: Any>(&self) -> Result<&T, RuntimeError> {
        if let Some(this) = (self as &dyn Any).downcast_ref::<T>() {
            return Ok(this);
        }

        let holder = self.holder()?;
        holder.as_any().downcast_ref::<T>().ok_or_else(|| {
            debug!("cast of {} to {} refused", holder.type_tag(), type_tag::<T>());
            err_cast(type_tag::<T>(), holder.type_tag())
        })
    }

    /// Mutably borrow the occupant as `T`
    pub fn cast_mut<T: Any>(&mut self) -> Result<&mut T, RuntimeError> {
        if TypeId::of::<T>() == TypeId::of::<Element>() {
            return (self as &mut dyn Any)
                .downcast_mut::<T>()
                .ok_or_else(|| err_cast(type_tag::<T>(), type_tag::<Element>()));
        }

        let holder = self.holder.as_mut().ok_or_else(err_access)?;
        let found = holder.type_tag();
        holder
            .as_any_mut()
            .downcast_mut::<T>()
            .ok_or_else(|| err_cast(type_tag::<T>(), found))
    }

    /// Recover a copy of the occupant as `T`
    pub fn cast<T: Capabilities>(&self) -> Result<T, RuntimeError> {
        self.cast_ref::<T>().map(|value| value.clone())
    }

    /// Move the occupant out as `T`. The Element is left empty only on success.
    pub fn take_value<T: Any>(&mut self) -> Result<T, RuntimeError> {
        let found = self.holder()?.type_tag();
        if !self.is::<T>() {
            return Err(err_cast(type_tag::<T>(), found));
        }

        match self.holder.take() {
            Some(holder) => holder
                .into_any()
                .downcast::<T>()
                .map(|value| *value)
                .map_err(|_| err_cast(type_tag::<T>(), found)),
            None => Err(err_access()),
        }
    }

    /// Compare against another `Element` or a raw value, dispatching on the run-time type of
    /// the left operand. Both operands must be occupied and of the same concrete type.
    pub fn compare<R: Capabilities>(&self, op: Operator, rhs: &R) -> Result<bool, RuntimeError> {
        let lhs = self.holder()?;

        match (rhs as &dyn Any).downcast_ref::<Element>() {
            Some(element) => {
                let rhs = element.holder()?;
                lhs.compare(op, rhs.as_any(), rhs.type_tag())
            }
            None => lhs.compare(op, rhs, type_tag::<R>()),
        }
    }

    pub fn equal<R: Capabilities>(&self, rhs: &R) -> Result<bool, RuntimeError> {
        self.compare(Operator::Equal, rhs)
    }

    pub fn not_equal<R: Capabilities>(&self, rhs: &R) -> Result<bool, RuntimeError> {
        self.equal(rhs).map(|equal| !equal)
    }

    pub fn less<R: Capabilities>(&self, rhs: &R) -> Result<bool, RuntimeError> {
        self.compare(Operator::Less, rhs)
    }

    pub fn greater<R: Capabilities>(&self, rhs: &R) -> Result<bool, RuntimeError> {
        self.compare(Operator::Greater, rhs)
    }

    pub fn less_equal<R: Capabilities>(&self, rhs: &R) -> Result<bool, RuntimeError> {
        self.compare(Operator::LessEqual, rhs)
    }

    pub fn greater_equal<R: Capabilities>(&self, rhs: &R) -> Result<bool, RuntimeError> {
        self.compare(Operator::GreaterEqual, rhs)
    }
}

impl Clone for Element {
    fn clone(&self) -> Element {
        Element {
            holder: self.holder.as_ref().map(|holder| holder.clone_holder()),
        }
    }
}

/// An Element can stand in for a raw value, e.g. as the right operand of a comparison, and
/// compares by its occupant when it sits inside a sequence
impl Capabilities for Element {
    fn display(&self) -> Option<&dyn fmt::Display> {
        Some(self)
    }

    fn equal(&self, other: &Self) -> Result<bool, RuntimeError> {
        self.compare(Operator::Equal, other)
    }

    fn less(&self, other: &Self) -> Result<bool, RuntimeError> {
        self.compare(Operator::Less, other)
    }

    fn greater(&self, other: &Self) -> Result<bool, RuntimeError> {
        self.compare(Operator::Greater, other)
    }

    fn less_equal(&self, other: &Self) -> Result<bool, RuntimeError> {
        self.compare(Operator::LessEqual, other)
    }

    fn greater_equal(&self, other: &Self) -> Result<bool, RuntimeError> {
        self.compare(Operator::GreaterEqual, other)
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.holder {
            Some(ref holder) => holder.print(f),
            None => write!(f, "Null"),
        }
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Element<{}>({})", self.id(), self)
    }
}

#[cfg(test)]
mod test {
    use std::any::TypeId;

    use super::Element;
    use crate::capability::{Capabilities, Operator};
    use crate::error::{ErrorKind, RuntimeError};

    /// A type with no capabilities at all
    #[derive(Clone)]
    struct Opaque {
        tag: u8,
    }

    impl Capabilities for Opaque {}

    /// A generic type that only knows equality
    #[derive(Clone, PartialEq)]
    struct Wrapper<T> {
        val: T,
    }

    impl<T: Capabilities + PartialEq> Capabilities for Wrapper<T> {
        fn equal(&self, other: &Self) -> Result<bool, RuntimeError> {
            Ok(self == other)
        }
    }

    fn test_helper(test_fn: fn() -> Result<(), RuntimeError>) {
        test_fn().unwrap();
    }

    fn kind_of<T>(result: Result<T, RuntimeError>) -> ErrorKind {
        match result {
            Ok(_) => panic!("expected an error"),
            Err(e) => e.error_kind().clone(),
        }
    }

    #[test]
    fn round_trip_cast() {
        fn test_inner() -> Result<(), RuntimeError> {
            assert!(Element::new(10).cast::<i32>()? == 10);
            assert!(Element::new(1.2).cast::<f64>()? == 1.2);
            assert!(Element::new(String::from("abcdefg")).cast::<String>()? == "abcdefg");
            assert!(Element::new('x').cast::<char>()? == 'x');

            let wrapped = Element::new(Wrapper {
                val: String::from("hello"),
            });
            let mut copy = wrapped.cast::<Wrapper<String>>()?;
            assert!(copy.val == "hello");

            // the copy is independent of the occupant
            copy.val = String::from("world");
            assert!(wrapped.cast_ref::<Wrapper<String>>()?.val == "hello");

            Ok(())
        }

        test_helper(test_inner)
    }

    #[test]
    fn type_preserved_across_copies() {
        let original = Element::new(7u64);
        let copy = original.clone();

        assert!(original.value_type() == TypeId::of::<u64>());
        assert!(copy.value_type() == TypeId::of::<u64>());
        assert!(copy.is::<u64>());
        assert!(!copy.is::<u32>());
        assert!(copy.id() == original.id());
    }

    #[test]
    fn clone_is_deep() {
        fn test_inner() -> Result<(), RuntimeError> {
            let first = Element::new(String::from("abc"));
            let mut second = first.clone();

            second.cast_mut::<String>()?.push_str("def");

            assert!(first.cast_ref::<String>()? == "abc");
            assert!(second.cast_ref::<String>()? == "abcdef");

            Ok(())
        }

        test_helper(test_inner)
    }

    #[test]
    fn empty_contract() {
        let mut elements = vec![Element::empty(), Element::default(), Element::new(3)];
        elements[2].reset();

        for element in elements.iter() {
            assert!(!element.has_value());
            assert!(element.id() == "Null");
            assert!(element.value_type() == TypeId::of::<()>());
            assert!(format!("{}", element) == "Null");

            assert!(kind_of(element.cast::<i32>()) == ErrorKind::AccessError);
            assert!(kind_of(element.equal(&Element::new(3))) == ErrorKind::AccessError);
            assert!(kind_of(Element::new(3).less(element)) == ErrorKind::AccessError);
        }

        // reset on an already-empty element is harmless
        let mut empty = Element::empty();
        empty.reset();
        assert!(!empty.has_value());
    }

    #[test]
    fn cast_mismatch() {
        let element = Element::new(Opaque { tag: 1 });

        assert!(element.cast_ref::<Opaque>().map(|o| o.tag).ok() == Some(1));

        match kind_of(element.cast::<i32>()) {
            ErrorKind::CastError { expected, found } => {
                assert!(expected == "i32");
                assert!(found.ends_with("Opaque"));
            }
            other => panic!("unexpected {:?}", other),
        }

        // integers of different widths are different types
        assert!(kind_of(Element::new(1i32).cast::<i64>()) != ErrorKind::AccessError);
    }

    #[test]
    fn cast_to_element_is_identity() {
        fn test_inner() -> Result<(), RuntimeError> {
            let element = Element::new(5);
            let same = element.cast::<Element>()?;
            assert!(same.equal(&5)?);

            let empty = Element::empty();
            assert!(!empty.cast_ref::<Element>()?.has_value());

            Ok(())
        }

        test_helper(test_inner)
    }

    #[test]
    fn wrapping_an_element_does_not_nest() {
        let inner = Element::new(2.5);
        let outer = Element::new(inner.clone());

        assert!(outer.is::<f64>());
        assert!(format!("{}", outer) == "2.5");
    }

    #[test]
    fn move_leaves_source_empty() {
        fn test_inner() -> Result<(), RuntimeError> {
            let mut source = Element::new(String::from("moved"));
            let target = source.take();

            assert!(!source.has_value());
            assert!(target.cast_ref::<String>()? == "moved");

            let mut holder = target;
            match kind_of(holder.take_value::<i32>()) {
                ErrorKind::CastError { expected, found } => {
                    assert!(expected == "i32");
                    assert!(found.ends_with("String"));
                }
                other => panic!("unexpected {:?}", other),
            }
            assert!(holder.has_value());
            assert!(holder.take_value::<String>()? == "moved");
            assert!(!holder.has_value());

            Ok(())
        }

        test_helper(test_inner)
    }

    #[test]
    fn assignment_replaces_type() {
        let mut element = Element::new(1);
        element.set(String::from("now a string"));

        assert!(element.is::<String>());
        assert!(format!("{}", element) == "now a string");
    }

    #[test]
    fn same_type_comparisons() {
        fn test_inner() -> Result<(), RuntimeError> {
            let a = Element::new(1.2);
            let b = Element::new(1.5);
            let ten = Element::new(10);
            let also_ten = Element::new(10);

            assert!(!a.greater(&b)?);
            assert!(a.less(&b)?);
            assert!(a.not_equal(&b)?);
            assert!(ten.greater_equal(&also_ten)?);
            assert!(ten.less_equal(&also_ten)?);
            assert!(!ten.not_equal(&also_ten)?);
            assert!(ten.compare(Operator::Equal, &also_ten)?);

            Ok(())
        }

        test_helper(test_inner)
    }

    #[test]
    fn heterogeneous_comparison_is_an_error() {
        let int = Element::new(1);
        let float = Element::new(10.0);

        match kind_of(int.equal(&float)) {
            ErrorKind::TypeCompareError { lhs, op, rhs } => {
                assert!(lhs == "i32");
                assert!(op == Operator::Equal);
                assert!(rhs == "f64");
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(kind_of(float.less(&int)).ne(&ErrorKind::AccessError));
        assert!(kind_of(int.not_equal(&float)).ne(&ErrorKind::AccessError));

        // string literal and owned String are distinct concrete types
        let literal = Element::new("abc");
        match kind_of(literal.equal(&String::from("abc"))) {
            ErrorKind::TypeCompareError { .. } => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn missing_capability() {
        let x = Element::new(Opaque { tag: 1 });
        let y = Element::new(Opaque { tag: 2 });

        match kind_of(x.less(&y)) {
            ErrorKind::MissingCapability { op, .. } => assert!(op == Operator::Less),
            other => panic!("unexpected {:?}", other),
        }

        match kind_of(x.equal(&y)) {
            ErrorKind::MissingCapability { op, .. } => assert!(op == Operator::Equal),
            other => panic!("unexpected {:?}", other),
        }

        let w = Element::new(Wrapper { val: 3 });
        assert!(w.equal(&Wrapper { val: 3 }) == Ok(true));
        match kind_of(w.greater(&Wrapper { val: 1 })) {
            ErrorKind::MissingCapability { op, .. } => assert!(op == Operator::Greater),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn compare_against_raw_value() {
        fn test_inner() -> Result<(), RuntimeError> {
            assert!(Element::new(1).equal(&1)?);
            assert!(Element::new("1236546").equal(&"1236546")?);
            assert!(Element::new(1.5).greater(&1.2)?);
            assert!(Element::new(3u8).not_equal(&4u8)?);

            Ok(())
        }

        test_helper(test_inner)
    }

    #[test]
    fn std_containers_are_storable() {
        fn test_inner() -> Result<(), RuntimeError> {
            let numbers = Element::new(vec![1, 2, 3]);
            assert!(numbers.is::<Vec<i32>>());
            assert!(numbers.cast_ref::<Vec<i32>>()?.len() == 3);
            assert!(numbers.equal(&vec![1, 2, 3])?);
            assert!(numbers.less(&vec![1, 2, 4])?);
            assert!(numbers.greater(&vec![1, 2])?);
            assert!(format!("{}", numbers) == numbers.id());

            let name = Element::new(Some(String::from("abc")));
            assert!(name.cast::<Option<String>>()? == Some(String::from("abc")));
            assert!(name.equal(&Some(String::from("abc")))?);
            assert!(name.greater(&None::<String>)?);

            let pair = Element::new((1, "a"));
            assert!(pair.cast::<(i32, &str)>()? == (1, "a"));
            assert!(pair.less(&(1, "b"))?);

            let boxed = Element::new(Box::new(2.5));
            assert!(boxed.greater_equal(&Box::new(2.5))?);
            assert!(format!("{}", boxed) == "2.5");

            assert!(Element::new([1u8, 2]).not_equal(&[1u8, 3])?);

            Ok(())
        }

        test_helper(test_inner)
    }

    #[test]
    fn container_comparisons_report_element_errors() {
        let opaque = Element::new(vec![Opaque { tag: 1 }]);

        match kind_of(opaque.equal(&vec![Opaque { tag: 1 }])) {
            ErrorKind::MissingCapability { type_tag, op } => {
                assert!(type_tag.ends_with("Opaque"));
                assert!(op == Operator::Equal);
            }
            other => panic!("unexpected {:?}", other),
        }

        // the container type itself must still match
        match kind_of(Element::new(vec![1]).equal(&vec![1i64])) {
            ErrorKind::TypeCompareError { .. } => (),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn elements_compare_inside_sequences() {
        fn test_inner() -> Result<(), RuntimeError> {
            let left = vec![Element::new(1), Element::new("a")];
            let right = vec![Element::new(1), Element::new("b")];

            assert!(Element::new(left.clone()).less(&right)?);
            assert!(!Element::new(left.clone()).equal(&right)?);

            let mixed = vec![Element::new(1), Element::new(2.0)];
            match kind_of(Element::new(left).equal(&mixed)) {
                ErrorKind::TypeCompareError { lhs, rhs, .. } => {
                    assert!(lhs == "&str");
                    assert!(rhs == "f64");
                }
                other => panic!("unexpected {:?}", other),
            }

            Ok(())
        }

        test_helper(test_inner)
    }

    #[test]
    fn print_fallback() {
        let opaque = Element::new(Opaque { tag: 0 });
        let printed = format!("{}", opaque);

        assert!(printed == opaque.id());
        assert!(printed.ends_with("Opaque"));

        assert!(format!("{}", Element::new(String::from("abcdefg"))) == "abcdefg");
        assert!(format!("{:?}", Element::new(4)) == "Element<i32>(4)");
    }
}
