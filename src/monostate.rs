use core::fmt;

/// An empty alternative.
///
/// Putting `Monostate` first makes a variant default-constructible even when
/// none of the other alternatives are.
///
/// # Examples
///
/// ```rust
/// use tvariant::{Monostate, Variant};
///
/// struct Port(u16);
///
/// let v = <Variant![Monostate, Port]>::default();
/// assert!(v.holds::<Monostate, _>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Monostate;

impl fmt::Display for Monostate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("monostate")
    }
}
