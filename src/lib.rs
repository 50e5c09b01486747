#![doc = include_str!("../README.md")]
#![no_std]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]

#[cfg(test)]
extern crate std;

use core::{
    alloc::Layout,
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::{self, MaybeUninit},
};

pub mod catalog;
pub mod derive;
mod error;
mod macros;
mod monostate;
pub mod repr;
pub mod tag;

pub use self::{
    catalog::{Catalog, IndexOf, MAX_ALTERNATIVES},
    error::BadVariantAccess,
    monostate::Monostate,
};
use self::{
    catalog::TypeList,
    derive::{
        CloneList, DebugList, DisplayList, HashList, OrdList, PartialEqList, PartialOrdList,
    },
    tag::{Tag, UTerm},
};

pub type Repr<L> = <L as TypeList>::Repr;

const VALUELESS: u8 = u8::MAX;

/// A tagged union holding exactly one value out of the alternatives `L`.
///
/// `L` is a type list built with [`T!`]; the [`Variant!`] macro spells the
/// whole type, e.g. `Variant![i32, char, String]`. The value is stored inline,
/// in a slot sized and aligned for the largest alternative.
///
/// A variant is either *active*, holding a value of the alternative at
/// [`index`](Self::index), or *valueless*. It only becomes valueless after
/// its value has been moved out with [`take`](Self::take) or
/// [`extract`](Self::extract), or when the destructor of the old value
/// panics during [`assign`](Self::assign). A valueless variant holds
/// nothing, runs no destructor, and fails every typed access.
///
/// Types are resolved to alternatives exactly: a `&str` never selects a
/// `String` alternative by itself. [`emplace`](Self::emplace) converts
/// explicitly.
///
/// # Examples
///
/// ```rust
/// use tvariant::{BadVariantAccess, Variant};
///
/// let mut v = <Variant![i32, char, String]>::default();
/// assert_eq!(v.index(), Some(0));
/// assert_eq!(v.get::<i32, _>(), Ok(&0));
///
/// v.assign('c');
/// assert_eq!(v.index(), Some(1));
/// assert_eq!(v.get::<i32, _>(), Err(BadVariantAccess));
///
/// v.emplace::<String, _>("hello");
/// assert_eq!(v.get::<String, _>().map(String::as_str), Ok("hello"));
/// ```
///
/// Types outside the alternatives are rejected at compile time:
///
/// ```rust,compile_fail
/// use tvariant::Variant;
///
/// let mut v = <Variant![i32, char]>::default();
/// v.assign(1.5f64);
/// ```
///
/// [`T!`]: crate::T
/// [`Variant!`]: crate::Variant!
pub struct Variant<L: Catalog> {
    tag: u8,
    data: MaybeUninit<Repr<L>>,
    _marker: PhantomData<L>,
}

impl<Head, Tail> Default for Variant<(Head, Tail)>
where
    Head: Default,
    Tail: TypeList,
{
    /// Constructs the first alternative with its default value.
    fn default() -> Self {
        Variant::new::<Head, UTerm>(Head::default())
    }
}

impl<L: Catalog> Variant<L> {
    /// Constructs a variant holding `value`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tvariant::Variant;
    ///
    /// let v = <Variant![i32, char, String]>::new('c');
    /// assert_eq!(v.index(), Some(1));
    /// ```
    pub fn new<T, U>(value: T) -> Self
    where
        L: IndexOf<T, U>,
        U: Tag,
    {
        let () = L::CHECK;
        Self::debug_assert_slot::<T, U>();
        let mut data = MaybeUninit::<Repr<L>>::uninit();
        unsafe { data.as_mut_ptr().cast::<T>().write(value) };
        Variant {
            tag: U::VALUE,
            data,
            _marker: PhantomData,
        }
    }

    /// The position of the active alternative, or `None` if the variant is
    /// valueless.
    pub fn index(&self) -> Option<usize> {
        (!self.is_valueless()).then_some(self.tag as usize)
    }

    pub fn is_valueless(&self) -> bool {
        self.tag == VALUELESS
    }

    /// Whether the active alternative is `T`.
    pub fn holds<T, U>(&self) -> bool
    where
        L: IndexOf<T, U>,
        U: Tag,
    {
        self.tag == U::VALUE
    }

    /// The name of the active alternative's type.
    pub fn type_name(&self) -> Option<&'static str> {
        L::entry(self.tag).map(|entry| (entry.name)())
    }

    pub fn get<T, U>(&self) -> Result<&T, BadVariantAccess>
    where
        L: IndexOf<T, U>,
        U: Tag,
    {
        (self.tag == U::VALUE)
            .then(|| unsafe { &*self.data.as_ptr().cast::<T>() })
            .ok_or(BadVariantAccess)
    }

    pub fn get_mut<T, U>(&mut self) -> Result<&mut T, BadVariantAccess>
    where
        L: IndexOf<T, U>,
        U: Tag,
    {
        (self.tag == U::VALUE)
            .then(|| unsafe { &mut *self.data.as_mut_ptr().cast::<T>() })
            .ok_or(BadVariantAccess)
    }

    /// Replaces the held value with `value`.
    ///
    /// The old value is dropped first. If its destructor panics, the variant
    /// is left valueless and `value` is dropped during unwinding.
    pub fn assign<T, U>(&mut self, value: T)
    where
        L: IndexOf<T, U>,
        U: Tag,
    {
        tracing::trace!(from = ?self.index(), to = U::INDEX, "assigning variant");
        self.reset();
        Self::debug_assert_slot::<T, U>();
        unsafe { self.data.as_mut_ptr().cast::<T>().write(value) };
        self.tag = U::VALUE;
    }

    /// Converts `value` into alternative `T`, then assigns it.
    ///
    /// The conversion runs before the old value is touched, so a panicking
    /// conversion leaves the variant unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tvariant::Variant;
    ///
    /// let mut v = <Variant![i32, String]>::default();
    /// v.emplace::<String, _>("hello");
    /// assert_eq!(v.index(), Some(1));
    /// ```
    pub fn emplace<T, U>(&mut self, value: impl Into<T>)
    where
        L: IndexOf<T, U>,
        U: Tag,
    {
        let value = value.into();
        self.assign::<T, U>(value);
    }

    /// Assigns `value` and returns the previous state.
    pub fn replace<T, U>(&mut self, value: T) -> Self
    where
        L: IndexOf<T, U>,
        U: Tag,
    {
        mem::replace(self, Variant::new::<T, U>(value))
    }

    /// Moves the held value into a new variant, leaving `self` valueless.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tvariant::Variant;
    ///
    /// let mut v1 = <Variant![i32, String]>::new(String::from("abc"));
    /// let v2 = v1.take();
    /// assert_eq!(v2.index(), Some(1));
    /// assert!(v1.is_valueless());
    /// ```
    pub fn take(&mut self) -> Self {
        let tag = mem::replace(&mut self.tag, VALUELESS);
        if tag != VALUELESS {
            tracing::debug!(index = tag, "variant moved from");
        }
        Variant {
            tag,
            data: mem::replace(&mut self.data, MaybeUninit::uninit()),
            _marker: PhantomData,
        }
    }

    /// Moves the value of alternative `T` out, leaving the variant valueless.
    ///
    /// On failure the variant is left untouched.
    pub fn extract<T, U>(&mut self) -> Result<T, BadVariantAccess>
    where
        L: IndexOf<T, U>,
        U: Tag,
    {
        if self.tag != U::VALUE {
            return Err(BadVariantAccess);
        }
        self.tag = VALUELESS;
        tracing::debug!(index = U::INDEX, "value extracted from variant");
        Ok(unsafe { self.data.as_ptr().cast::<T>().read() })
    }

    /// Consumes the variant, returning the value of alternative `T`.
    pub fn into_inner<T, U>(self) -> Result<T, BadVariantAccess>
    where
        L: IndexOf<T, U>,
        U: Tag,
    {
        let mut this = self;
        this.extract::<T, U>()
    }

    /// # Safety
    ///
    /// The variant must not be valueless.
    unsafe fn repr(&self) -> &Repr<L> {
        unsafe { self.data.assume_init_ref() }
    }

    /// Tag `U` must name an alternative laid out like `T`.
    fn debug_assert_slot<T, U: Tag>() {
        debug_assert!(
            L::entry(U::VALUE).is_some_and(|entry| entry.layout == Layout::new::<T>()),
            "tag {} does not name an alternative laid out like `{}`",
            U::VALUE,
            core::any::type_name::<T>(),
        );
    }

    /// Drops the held value, if any, leaving the variant valueless.
    fn reset(&mut self) {
        let tag = mem::replace(&mut self.tag, VALUELESS);
        if let Some(entry) = L::entry(tag) {
            unsafe { (entry.drop_in_place)(self.data.as_mut_ptr().cast()) }
        }
    }
}

impl<L: Catalog> Drop for Variant<L> {
    fn drop(&mut self) {
        self.reset();
    }
}

impl<L: Catalog + CloneList> Clone for Variant<L> {
    fn clone(&self) -> Self {
        let mut data = MaybeUninit::uninit();
        if !self.is_valueless() {
            data.write(unsafe { L::clone_at(self.repr(), self.tag) });
        }
        Variant {
            tag: self.tag,
            data,
            _marker: PhantomData,
        }
    }
}

impl<L: Catalog + DebugList> fmt::Debug for Variant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valueless() {
            return f.write_str("Valueless");
        }
        unsafe { L::debug_at(self.repr(), self.tag, f) }
    }
}

impl<L: Catalog + DisplayList> fmt::Display for Variant<L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valueless() {
            return f.write_str("valueless");
        }
        unsafe { L::display_at(self.repr(), self.tag, f) }
    }
}

impl<L: Catalog + PartialEqList> PartialEq for Variant<L> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag
            && (self.is_valueless() || unsafe { L::eq_at(self.repr(), other.repr(), self.tag) })
    }
}

impl<L: Catalog + PartialEqList + Eq> Eq for Variant<L> {}

impl<L: Catalog + PartialOrdList> PartialOrd for Variant<L> {
    /// Valueless variants order first, then by alternative position, then by
    /// value.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        match self.index().cmp(&other.index()) {
            Ordering::Equal if !self.is_valueless() => unsafe {
                L::partial_cmp_at(self.repr(), other.repr(), self.tag)
            },
            ordering => Some(ordering),
        }
    }
}

impl<L: Catalog + OrdList + Eq> Ord for Variant<L> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.index().cmp(&other.index()).then_with(|| {
            if self.is_valueless() {
                Ordering::Equal
            } else {
                unsafe { L::cmp_at(self.repr(), other.repr(), self.tag) }
            }
        })
    }
}

impl<L: Catalog + HashList> Hash for Variant<L> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        if !self.is_valueless() {
            unsafe { L::hash_at(self.repr(), self.tag, state) }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        format,
        rc::Rc,
        string::{String, ToString},
    };

    use super::*;

    type Abc = Variant![i32, char, String];

    #[test]
    fn default_is_first_alternative() {
        let v = Abc::default();
        assert_eq!(v.index(), Some(0));
        assert_eq!(v.get::<i32, _>(), Ok(&0));
        assert_eq!(v.type_name(), Some("i32"));
    }

    #[test]
    fn assign_switches_alternative() {
        let mut v = Abc::default();

        v.assign(5i32);
        assert_eq!(v.index(), Some(0));
        assert_eq!(v.get::<i32, _>(), Ok(&5));

        v.assign('c');
        assert_eq!(v.index(), Some(1));
        assert_eq!(v.get::<char, _>(), Ok(&'c'));
        assert_eq!(v.get::<i32, _>(), Err(BadVariantAccess));

        v.assign("String".to_string());
        assert_eq!(v.index(), Some(2));
        assert!(v.holds::<String, _>());
        assert_eq!(v.get::<String, _>(), Ok(&"String".to_string()));
    }

    #[test]
    fn get_mut_writes_through() {
        let mut v = Abc::new("abc".to_string());
        v.get_mut::<String, _>().unwrap().push('d');
        assert_eq!(v.get::<String, _>().unwrap(), "abcd");
        assert_eq!(v.get_mut::<char, _>(), Err(BadVariantAccess));
    }

    #[test]
    fn clone_is_independent() {
        let v1 = Abc::new("abc".to_string());
        let mut v2 = v1.clone();
        assert_eq!(v2.index(), Some(2));

        v2.get_mut::<String, _>().unwrap().push_str("def");
        assert_eq!(v1.get::<String, _>().unwrap(), "abc");
        assert_eq!(v2.get::<String, _>().unwrap(), "abcdef");
    }

    #[test]
    fn take_leaves_valueless() {
        let mut v1 = Abc::new("abc".to_string());
        let v2 = v1.take();

        assert_eq!(v2.get::<String, _>().unwrap(), "abc");
        assert!(v1.is_valueless());
        assert_eq!(v1.index(), None);
        assert_eq!(v1.type_name(), None);
        assert_eq!(v1.get::<String, _>(), Err(BadVariantAccess));

        let v3 = v1.take();
        assert!(v3.is_valueless());
        assert!(v1.clone().is_valueless());
    }

    #[test]
    fn extract_and_into_inner() {
        let mut v = Abc::new('x');
        assert_eq!(v.extract::<i32, _>(), Err(BadVariantAccess));
        assert_eq!(v.index(), Some(1));
        assert_eq!(v.extract::<char, _>(), Ok('x'));
        assert!(v.is_valueless());
        assert_eq!(v.extract::<char, _>(), Err(BadVariantAccess));

        v.assign(7i32);
        assert_eq!(v.into_inner::<i32, _>(), Ok(7));
        assert_eq!(
            Abc::new(7i32).into_inner::<String, _>(),
            Err(BadVariantAccess)
        );
    }

    #[test]
    fn replace_returns_previous() {
        let mut v = Abc::new(1i32);
        let old = v.replace('z');
        assert_eq!(old.get::<i32, _>(), Ok(&1));
        assert_eq!(v.get::<char, _>(), Ok(&'z'));
    }

    #[test]
    fn slots_match_alternatives() {
        type L = T![u8, String, [u64; 3]];

        assert_eq!(L::entry(0).map(|e| e.layout), Some(Layout::new::<u8>()));
        assert_eq!(L::entry(1).map(|e| e.layout), Some(Layout::new::<String>()));
        assert_eq!(L::entry(2).map(|e| e.layout), Some(Layout::new::<[u64; 3]>()));
        assert!(L::entry(VALUELESS).is_none());

        let mut v = Variant::<L>::new([1u64, 2, 3]);
        Variant::<L>::debug_assert_slot::<String, tag::U1>();
        v.assign(String::from("slot"));
        assert_eq!(v.type_name(), Some(core::any::type_name::<String>()));
    }

    #[test]
    fn monostate_first() {
        struct NoDefault(#[allow(dead_code)] u8);

        let mut v = <Variant![Monostate, NoDefault]>::default();
        assert!(v.holds::<Monostate, _>());
        v.assign(NoDefault(3));
        assert_eq!(v.index(), Some(1));
    }

    struct Counted(Rc<Cell<isize>>);

    impl Counted {
        fn new(live: &Rc<Cell<isize>>) -> Self {
            live.set(live.get() + 1);
            Counted(Rc::clone(live))
        }
    }

    impl Drop for Counted {
        fn drop(&mut self) {
            self.0.set(self.0.get() - 1);
        }
    }

    #[test]
    fn drops_exactly_once() {
        let live = Rc::new(Cell::new(0));
        {
            let mut v = <Variant![u8, Counted]>::new(Counted::new(&live));
            assert_eq!(live.get(), 1);

            v.assign(Counted::new(&live));
            assert_eq!(live.get(), 1);

            v.assign(3u8);
            assert_eq!(live.get(), 0);

            v.assign(Counted::new(&live));
            let moved = v.take();
            assert_eq!(live.get(), 1);
            drop(v);
            assert_eq!(live.get(), 1);
            drop(moved);
            assert_eq!(live.get(), 0);

            let mut v = <Variant![u8, Counted]>::new(Counted::new(&live));
            let extracted = v.extract::<Counted, _>().ok();
            assert_eq!(live.get(), 1);
            drop(extracted);
            assert_eq!(live.get(), 0);

            v.assign(Counted::new(&live));
        }
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn structural_traits() {
        let a = Abc::new(1i32);
        let b = Abc::new('a');
        let mut c = Abc::new(2i32);

        assert_eq!(a, Abc::new(1i32));
        assert_ne!(a, c);
        assert!(a < c);
        assert!(c < b);
        assert_eq!(a.cmp(&a.clone()), Ordering::Equal);

        let _moved = c.take();
        let mut d = Abc::new(0i32);
        let _ = d.take();
        assert!(c < a);
        assert_eq!(c, d);
        assert_eq!(c.partial_cmp(&c.clone()), Some(Ordering::Equal));

        assert_eq!(format!("{a:?}"), "1");
        assert_eq!(format!("{b}"), "a");
        assert_eq!(format!("{c:?}"), "Valueless");
        assert_eq!(format!("{c}"), "valueless");
    }
}
