/// Container traits
///
/// Positional operations are bounds-checked and report `ErrorKind::BoundsError` rather than
/// panicking.
use element::RuntimeError;

/// Base container-type trait. All container types are subtypes of `Container`.
pub trait Container<T: Sized + Clone>: Sized {
    /// Create a new, empty container instance.
    fn new() -> Self;

    /// Create a new container instance with the given capacity.
    fn with_capacity(capacity: usize) -> Self;

    /// Reset the size of the container to zero - empty
    fn clear(&mut self);

    /// Count of items in the container
    fn length(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.length() == 0
    }
}

/// Generic stack trait. If implemented, the container can function as a stack
// ANCHOR: DefStackContainer
pub trait StackContainer<T: Sized + Clone>: Container<T> {
    /// Append an item to the end of the container
    fn push(&mut self, item: T);

    /// Pop returns a bounds error if the container is empty, otherwise moves the last item of the
    /// container out to the caller.
    fn pop(&mut self) -> Result<T, RuntimeError>;

    /// Return the value at the top of the stack without removing it
    fn top(&self) -> Result<&T, RuntimeError>;
}
// ANCHOR_END: DefStackContainer

/// Generic indexed-access trait. If implemented, the container can function as an indexable vector
pub trait IndexedContainer<T: Sized + Clone>: Container<T> {
    /// Return a reference to the object at the given index. Bounds-checked.
    fn get(&self, index: usize) -> Result<&T, RuntimeError>;

    /// Return a mutable reference to the object at the given index. Bounds-checked.
    fn get_mut(&mut self, index: usize) -> Result<&mut T, RuntimeError>;

    /// Move an object into the container at the given index, returning the replaced object.
    /// Bounds-checked.
    fn set(&mut self, index: usize, item: T) -> Result<T, RuntimeError>;
}

/// Positional insertion and removal, shifting the following items
pub trait InsertContainer<T: Sized + Clone>: Container<T> {
    /// Insert before the given index. An index equal to the length appends.
    fn insert(&mut self, index: usize, item: T) -> Result<(), RuntimeError>;

    /// Remove and return the object at the given index
    fn erase(&mut self, index: usize) -> Result<T, RuntimeError>;
}

/// Replace the contents of a container with the values in the slice
pub trait ContainerFromSlice<T: Sized + Clone>: Container<T> {
    fn from_slice(data: &[T]) -> Self;
}
