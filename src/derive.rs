//! Structural traits of type lists, dispatched to the active alternative.
//!
//! Each trait is implemented for a list when every type in it implements the
//! corresponding `core` trait, and walks the list down to the position named
//! by the tag.
//!
//! The methods are `unsafe`: callers guarantee that `tag` names the
//! alternative that is live in the storage (and, for the binary ones, in both
//! storages).

use core::{cmp::Ordering, fmt, hash::Hash, hash::Hasher, mem::ManuallyDrop};

use crate::{
    catalog::TypeList,
    repr::{Cons, Nil},
};

pub trait CloneList: TypeList {
    #[doc(hidden)]
    unsafe fn clone_at(this: &Self::Repr, tag: u8) -> Self::Repr;
}

pub trait DebugList: TypeList {
    #[doc(hidden)]
    unsafe fn debug_at(this: &Self::Repr, tag: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

pub trait DisplayList: TypeList {
    #[doc(hidden)]
    unsafe fn display_at(this: &Self::Repr, tag: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result;
}

pub trait PartialEqList: TypeList {
    #[doc(hidden)]
    unsafe fn eq_at(this: &Self::Repr, other: &Self::Repr, tag: u8) -> bool;
}

pub trait PartialOrdList: PartialEqList {
    #[doc(hidden)]
    unsafe fn partial_cmp_at(this: &Self::Repr, other: &Self::Repr, tag: u8)
    -> Option<Ordering>;
}

pub trait OrdList: PartialOrdList {
    #[doc(hidden)]
    unsafe fn cmp_at(this: &Self::Repr, other: &Self::Repr, tag: u8) -> Ordering;
}

pub trait HashList: TypeList {
    #[doc(hidden)]
    unsafe fn hash_at<H: Hasher>(this: &Self::Repr, tag: u8, state: &mut H);
}

impl CloneList for () {
    unsafe fn clone_at(this: &Nil, _: u8) -> Nil {
        match this.0 {}
    }
}

impl<Head: Clone, Tail: CloneList> CloneList for (Head, Tail) {
    unsafe fn clone_at(this: &Self::Repr, tag: u8) -> Self::Repr {
        match tag.checked_sub(1) {
            None => Cons {
                data: ManuallyDrop::new(Head::clone(unsafe { &this.data })),
            },
            Some(tag) => Cons {
                next: ManuallyDrop::new(unsafe { Tail::clone_at(&this.next, tag) }),
            },
        }
    }
}

impl DebugList for () {
    unsafe fn debug_at(this: &Nil, _: u8, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match this.0 {}
    }
}

impl<Head: fmt::Debug, Tail: DebugList> DebugList for (Head, Tail) {
    unsafe fn debug_at(this: &Self::Repr, tag: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match tag.checked_sub(1) {
            None => fmt::Debug::fmt(unsafe { &*this.data }, f),
            Some(tag) => unsafe { Tail::debug_at(&this.next, tag, f) },
        }
    }
}

impl DisplayList for () {
    unsafe fn display_at(this: &Nil, _: u8, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match this.0 {}
    }
}

impl<Head: fmt::Display, Tail: DisplayList> DisplayList for (Head, Tail) {
    unsafe fn display_at(this: &Self::Repr, tag: u8, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match tag.checked_sub(1) {
            None => fmt::Display::fmt(unsafe { &*this.data }, f),
            Some(tag) => unsafe { Tail::display_at(&this.next, tag, f) },
        }
    }
}

impl PartialEqList for () {
    unsafe fn eq_at(this: &Nil, _: &Nil, _: u8) -> bool {
        match this.0 {}
    }
}

impl<Head: PartialEq, Tail: PartialEqList> PartialEqList for (Head, Tail) {
    unsafe fn eq_at(this: &Self::Repr, other: &Self::Repr, tag: u8) -> bool {
        match tag.checked_sub(1) {
            None => unsafe { *this.data == *other.data },
            Some(tag) => unsafe { Tail::eq_at(&this.next, &other.next, tag) },
        }
    }
}

impl PartialOrdList for () {
    unsafe fn partial_cmp_at(this: &Nil, _: &Nil, _: u8) -> Option<Ordering> {
        match this.0 {}
    }
}

impl<Head: PartialOrd, Tail: PartialOrdList> PartialOrdList for (Head, Tail) {
    unsafe fn partial_cmp_at(
        this: &Self::Repr,
        other: &Self::Repr,
        tag: u8,
    ) -> Option<Ordering> {
        match tag.checked_sub(1) {
            None => unsafe { (*this.data).partial_cmp(&*other.data) },
            Some(tag) => unsafe { Tail::partial_cmp_at(&this.next, &other.next, tag) },
        }
    }
}

impl OrdList for () {
    unsafe fn cmp_at(this: &Nil, _: &Nil, _: u8) -> Ordering {
        match this.0 {}
    }
}

impl<Head: Ord, Tail: OrdList> OrdList for (Head, Tail) {
    unsafe fn cmp_at(this: &Self::Repr, other: &Self::Repr, tag: u8) -> Ordering {
        match tag.checked_sub(1) {
            None => unsafe { (*this.data).cmp(&*other.data) },
            Some(tag) => unsafe { Tail::cmp_at(&this.next, &other.next, tag) },
        }
    }
}

impl HashList for () {
    unsafe fn hash_at<H: Hasher>(this: &Nil, _: u8, _: &mut H) {
        match this.0 {}
    }
}

impl<Head: Hash, Tail: HashList> HashList for (Head, Tail) {
    unsafe fn hash_at<H: Hasher>(this: &Self::Repr, tag: u8, state: &mut H) {
        match tag.checked_sub(1) {
            None => unsafe { (*this.data).hash(state) },
            Some(tag) => unsafe { Tail::hash_at(&this.next, tag, state) },
        }
    }
}
