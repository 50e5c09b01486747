//! Type-level positions into a type list.
//!
//! Positions are Peano numbers: [`UTerm`] is zero and [`UInt<U>`] is the
//! successor of `U`. They are what the compiler infers when resolving a type
//! to its alternative, e.g. the `_` in `variant.get::<String, _>()`.

use core::marker::PhantomData;

/// Position zero.
pub struct UTerm;

/// The position after `U`.
pub struct UInt<U>(PhantomData<U>);

mod sealed {
    pub trait Sealed {}

    impl Sealed for super::UTerm {}

    impl<U: Sealed> Sealed for super::UInt<U> {}
}

/// A position. Sealed: only [`UTerm`] and [`UInt`] are positions.
///
/// ```rust,compile_fail
/// use tvariant::tag::Tag;
///
/// struct Three;
///
/// impl Tag for Three {
///     const VALUE: u8 = 3;
/// }
/// ```
pub trait Tag: sealed::Sealed {
    /// The position as stored in a variant's tag.
    const VALUE: u8;

    /// The position as a `usize`.
    const INDEX: usize = Self::VALUE as usize;
}

impl Tag for UTerm {
    const VALUE: u8 = 0;
}

impl<U: Tag> Tag for UInt<U> {
    const VALUE: u8 = 1 + U::VALUE;
}

pub type U0 = UTerm;

macro_rules! successors {
    ($($name:ident = $prev:ident),* $(,)?) => {
        $(pub type $name = UInt<$prev>;)*
    };
}

successors! {
    U1 = U0, U2 = U1, U3 = U2, U4 = U3, U5 = U4, U6 = U5, U7 = U6, U8 = U7,
    U9 = U8, U10 = U9, U11 = U10, U12 = U11, U13 = U12, U14 = U13, U15 = U14,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_count_up() {
        assert_eq!(U0::VALUE, 0);
        assert_eq!(U1::VALUE, 1);
        assert_eq!(U9::INDEX, 9);
        assert_eq!(U15::VALUE, 15);
    }
}
