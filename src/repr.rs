//! The module dealing with the underlying storage of the [`Variant`] type.
//!
//! # Implementation details
//!
//! The storage of a variant is a hand-written union chain:
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use core::mem::{ManuallyDrop, MaybeUninit};
//!
//! struct Nil(Infallible);
//! #[repr(C)]
//! union Cons<T, Next> {
//!     data: ManuallyDrop<T>,
//!     next: ManuallyDrop<Next>,
//! }
//!
//! // For example only. Not actually defined.
//! struct RawVariant2<T1, T2> {
//!     tag: u8,
//!     data: MaybeUninit<Cons<T1, Cons<T2, Nil>>>,
//! }
//! ```
//!
//! A `#[repr(C)]` union places every field at offset 0 and takes the largest
//! size and alignment of its fields, so the chain is exactly one slot sized
//! and aligned for the largest alternative, and a pointer to the storage is a
//! pointer to whichever alternative is live in it.
//!
//! Lifecycle operations that every alternative supports (destruction, naming)
//! go through an [`Entry`] of function pointers looked up by tag.
//!
//! [`Variant`]: crate::Variant

use core::{alloc::Layout, any, convert::Infallible, mem::ManuallyDrop, ptr};

/// The terminator type of the underlying union of the [`Variant`] type.
///
/// [`Variant`]: crate::Variant
pub struct Nil(pub(crate) Infallible);

/// The accumulator type of the underlying union of the [`Variant`] type.
///
/// [`Variant`]: crate::Variant
#[repr(C)]
pub union Cons<T, U> {
    pub(crate) data: ManuallyDrop<T>,
    pub(crate) next: ManuallyDrop<U>,
}

/// Per-alternative dispatch record.
#[doc(hidden)]
#[derive(Clone, Copy)]
pub struct Entry {
    pub(crate) name: fn() -> &'static str,
    pub(crate) layout: Layout,
    pub(crate) drop_in_place: unsafe fn(*mut u8),
}

impl Entry {
    pub(crate) const fn of<T>() -> Self {
        Entry {
            name: any::type_name::<T>,
            layout: Layout::new::<T>(),
            drop_in_place: drop_erased::<T>,
        }
    }
}

/// # Safety
///
/// `ptr` must point to a live, properly aligned `T` that is not used again.
unsafe fn drop_erased<T>(ptr: *mut u8) {
    unsafe { ptr::drop_in_place(ptr.cast::<T>()) }
}
