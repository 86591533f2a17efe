//! `Ref<T>`: a value that commands can read and write without owning it.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

/// A getter/setter pair over storage owned elsewhere.
///
/// Tweens write through a `Ref` on every tick, so the host keeps ownership of
/// the value being animated. Clones share the same storage.
pub struct Ref<T> {
    getter: Rc<dyn Fn() -> T>,
    setter: Rc<dyn Fn(T)>,
}

impl<T> Clone for Ref<T> {
    fn clone(&self) -> Self {
        Self {
            getter: Rc::clone(&self.getter),
            setter: Rc::clone(&self.setter),
        }
    }
}

impl<T: 'static> Ref<T> {
    pub fn new<G, S>(getter: G, setter: S) -> Self
    where
        G: Fn() -> T + 'static,
        S: Fn(T) + 'static,
    {
        Self {
            getter: Rc::new(getter),
            setter: Rc::new(setter),
        }
    }

    #[inline]
    pub fn get(&self) -> T {
        (self.getter)()
    }

    #[inline]
    pub fn set(&self, value: T) {
        (self.setter)(value)
    }

    /// Reads, transforms and writes back the value.
    pub fn modify(&self, f: impl FnOnce(T) -> T) {
        self.set(f(self.get()));
    }
}

impl<T: Clone + 'static> Ref<T> {
    /// A `Ref` over fresh storage holding `value`.
    pub fn create(value: T) -> Self {
        Self::from_cell(Rc::new(RefCell::new(value)))
    }

    /// A `Ref` over an existing shared cell.
    pub fn from_cell(cell: Rc<RefCell<T>>) -> Self {
        let read = Rc::clone(&cell);
        Self::new(move || read.borrow().clone(), move |value| *cell.borrow_mut() = value)
    }

    /// A `Ref` to one field of a shared struct.
    ///
    /// ```
    /// use std::{cell::RefCell, rc::Rc};
    /// use cadence_core::Ref;
    ///
    /// struct Sprite { alpha: f64 }
    ///
    /// let sprite = Rc::new(RefCell::new(Sprite { alpha: 1.0 }));
    /// let alpha = Ref::project(sprite.clone(), |s| s.alpha, |s, v| s.alpha = v);
    /// alpha.set(0.5);
    /// assert_eq!(sprite.borrow().alpha, 0.5);
    /// ```
    pub fn project<S, R, W>(owner: Rc<RefCell<S>>, read: R, write: W) -> Self
    where
        S: 'static,
        R: Fn(&S) -> T + 'static,
        W: Fn(&mut S, T) + 'static,
    {
        let reader = Rc::clone(&owner);
        Self::new(
            move || read(&reader.borrow()),
            move |value| write(&mut owner.borrow_mut(), value),
        )
    }
}

impl<T: fmt::Debug + 'static> fmt::Debug for Ref<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Ref").field(&self.get()).finish()
    }
}
