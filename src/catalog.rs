//! Compile-time ordered lists of alternative types.
//!
//! A catalog is a cons list of pairs ending in `()`, usually spelled with the
//! [`T!`] macro: `T![i32, char, String]` is `(i32, (char, (String, ())))`. It
//! has no runtime representation; everything here is resolved by the trait
//! system, and positions are named by the [`tag`] types.
//!
//! [`T!`]: crate::T
//! [`tag`]: crate::tag

use core::{
    alloc::Layout,
    any::{self, TypeId},
    fmt,
    marker::PhantomData,
};

use crate::{
    repr::{Cons, Entry, Nil},
    tag::{Tag, UInt, UTerm},
};

/// The largest number of alternatives a [`Variant`] can hold. One tag value
/// is reserved for the valueless state.
///
/// Longer lists fail to build:
///
/// ```rust,compile_fail
/// #![recursion_limit = "1024"]
///
/// use tvariant::{Variant, tag::UTerm};
///
/// type X4<T> = (u8, (u8, (u8, (u8, T))));
/// type X16<T> = X4<X4<X4<X4<T>>>>;
/// type X256 = X16<X16<X16<X16<X16<X16<X16<X16<
///     X16<X16<X16<X16<X16<X16<X16<X16<()>>>>>>>>>>>>>>>>;
///
/// let v = Variant::<X256>::new::<u8, UTerm>(0);
/// ```
///
/// [`Variant`]: crate::Variant
pub const MAX_ALTERNATIVES: usize = u8::MAX as usize;

mod sealed {
    pub trait Sealed {}

    impl Sealed for () {}

    impl<Head, Tail: Sealed> Sealed for (Head, Tail) {}

    pub trait SealedAt<U> {}

    pub trait SealedIndexOf<T, U> {}
}

/// A possibly empty list of types.
///
/// This trait is sealed: only `()` and cons cells `(Head, Tail)` implement
/// it.
pub trait TypeList: sealed::Sealed {
    /// The number of types in the list.
    const LEN: usize;

    /// The inline storage able to hold any one type of the list.
    type Repr;

    #[doc(hidden)]
    fn entry(tag: u8) -> Option<Entry>;
}

impl TypeList for () {
    const LEN: usize = 0;
    type Repr = Nil;

    fn entry(_: u8) -> Option<Entry> {
        None
    }
}

impl<Head, Tail> TypeList for (Head, Tail)
where
    Tail: TypeList,
{
    const LEN: usize = Tail::LEN + 1;
    type Repr = Cons<Head, Tail::Repr>;

    fn entry(tag: u8) -> Option<Entry> {
        match tag.checked_sub(1) {
            None => Some(Entry::of::<Head>()),
            Some(tag) => Tail::entry(tag),
        }
    }
}

/// A non-empty list of types, usable as the alternatives of a [`Variant`].
///
/// [`Variant`]: crate::Variant
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a non-empty list of alternatives",
    label = "a variant needs at least one alternative"
)]
pub trait Catalog: TypeList {
    #[doc(hidden)]
    const CHECK: () = assert!(
        Self::LEN <= MAX_ALTERNATIVES,
        "too many alternatives for a variant"
    );
}

impl<Head, Tail> Catalog for (Head, Tail) where Tail: TypeList {}

/// The type at position `U` of a list.
pub trait At<U: Tag>: TypeList + sealed::SealedAt<U> {
    type Output;
}

impl<Head, Tail> sealed::SealedAt<UTerm> for (Head, Tail) where Tail: TypeList {}

impl<Head, Tail> At<UTerm> for (Head, Tail)
where
    Tail: TypeList,
{
    type Output = Head;
}

impl<Head, Tail, U: Tag> sealed::SealedAt<UInt<U>> for (Head, Tail) where Tail: At<U> {}

impl<Head, Tail, U: Tag> At<UInt<U>> for (Head, Tail)
where
    Tail: At<U>,
{
    type Output = <Tail as At<U>>::Output;
}

pub type TypeAt<L, U> = <L as At<U>>::Output;

/// Resolves type `T` to its position `U` in the list.
///
/// Only exact matches resolve. `U` is left for the compiler to infer, which
/// succeeds as long as `T` occurs in the list exactly once.
///
/// [`Variant`](crate::Variant) reads and writes its storage as `T` on the
/// strength of this trait, so it is sealed: the impls below are the only
/// ones.
///
/// ```rust,compile_fail
/// use tvariant::{IndexOf, tag::UTerm};
///
/// struct Words(usize, usize, usize);
///
/// impl IndexOf<Words, UTerm> for (String, ()) {}
/// ```
#[diagnostic::on_unimplemented(message = "`{T}` is not an alternative of `{Self}`")]
pub trait IndexOf<T, U: Tag>: TypeList + sealed::SealedIndexOf<T, U> {
    const INDEX: usize = U::INDEX;
}

impl<Head, Tail> sealed::SealedIndexOf<Head, UTerm> for (Head, Tail) where Tail: TypeList {}

impl<Head, Tail> IndexOf<Head, UTerm> for (Head, Tail) where Tail: TypeList {}

impl<Head, Tail, T, U: Tag> sealed::SealedIndexOf<T, UInt<U>> for (Head, Tail) where
    Tail: IndexOf<T, U>
{
}

impl<Head, Tail, T, U: Tag> IndexOf<T, UInt<U>> for (Head, Tail) where Tail: IndexOf<T, U> {}

/// A zero-sized handle standing for type `T` during [`ForEach`] traversal.
pub struct Token<T>(PhantomData<fn() -> T>);

impl<T> Token<T> {
    pub const fn new() -> Self {
        Token(PhantomData)
    }

    pub fn name(self) -> &'static str {
        any::type_name::<T>()
    }

    pub const fn layout(self) -> Layout {
        Layout::new::<T>()
    }
}

impl<T: 'static> Token<T> {
    pub fn type_id(self) -> TypeId {
        TypeId::of::<T>()
    }

    /// Whether this token stands for exactly `X`.
    pub fn is<X: 'static>(self) -> bool {
        self.type_id() == TypeId::of::<X>()
    }
}

impl<T> Clone for Token<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Token<T> {}

impl<T> Default for Token<T> {
    fn default() -> Self {
        Token::new()
    }
}

impl<T> fmt::Debug for Token<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Token").field(&self.name()).finish()
    }
}

/// An action invoked once per type of a list.
pub trait Visit {
    fn visit<T: 'static>(&mut self, token: Token<T>);
}

impl<V: Visit + ?Sized> Visit for &mut V {
    fn visit<T: 'static>(&mut self, token: Token<T>) {
        (**self).visit(token)
    }
}

/// Visits every type of a list in position order.
pub trait ForEach: TypeList {
    /// Calls `visitor` once per type, from position 0 upwards, and hands the
    /// visitor back.
    fn for_each<V: Visit>(visitor: V) -> V;
}

impl ForEach for () {
    fn for_each<V: Visit>(visitor: V) -> V {
        visitor
    }
}

impl<Head, Tail> ForEach for (Head, Tail)
where
    Head: 'static,
    Tail: ForEach,
{
    fn for_each<V: Visit>(mut visitor: V) -> V {
        visitor.visit(Token::<Head>::new());
        Tail::for_each(visitor)
    }
}

/// The number of types in `L`.
pub const fn len<L: TypeList>() -> usize {
    L::LEN
}

/// The token of the type at position `U` of `L`.
///
/// # Examples
///
/// ```rust
/// use tvariant::{T, catalog, tag::U1};
///
/// let token = catalog::at::<T![i32, char, String], U1>();
/// assert!(token.is::<char>());
/// ```
///
/// Positions past the end do not compile:
///
/// ```rust,compile_fail
/// use tvariant::{T, catalog, tag::U3};
///
/// let token = catalog::at::<T![i32, char, String], U3>();
/// ```
pub const fn at<L: At<U>, U: Tag>() -> Token<TypeAt<L, U>> {
    Token::new()
}

/// The position of `T` in `L`, resolved at compile time.
///
/// ```rust,compile_fail
/// use tvariant::{T, catalog};
///
/// let i = catalog::index_of::<T![i32, char], u64, _>();
/// ```
pub const fn index_of<L: IndexOf<T, U>, T, U: Tag>() -> usize {
    L::INDEX
}

/// The first position of `T` in `L`, or `L::LEN` when `T` is not in the
/// list.
pub fn position_of<L: ForEach, T: 'static>() -> usize {
    struct Find {
        target: TypeId,
        seen: usize,
        found: Option<usize>,
    }

    impl Visit for Find {
        fn visit<A: 'static>(&mut self, token: Token<A>) {
            if self.found.is_none() && token.type_id() == self.target {
                self.found = Some(self.seen);
            }
            self.seen += 1;
        }
    }

    let find = Find {
        target: TypeId::of::<T>(),
        seen: 0,
        found: None,
    };
    L::for_each(find).found.unwrap_or(L::LEN)
}

pub fn for_each<L: ForEach, V: Visit>(visitor: V) -> V {
    L::for_each(visitor)
}

/// The layout of the inline storage for `L`: as large as its largest type and
/// as aligned as its most aligned type.
pub const fn storage_layout<L: TypeList>() -> Layout {
    Layout::new::<L::Repr>()
}
