/// Constructs a [`struct@Variant`] type from a list of alternative types.
///
/// # Examples
///
/// ```rust
/// use tvariant::Variant;
///
/// type Value = Variant![i32, char, String];
/// let v = Value::new(42i32);
/// assert_eq!(v.index(), Some(0));
/// ```
///
/// A variant needs at least one alternative:
///
/// ```rust,compile_fail
/// use tvariant::Variant;
///
/// let v = <Variant![]>::default();
/// ```
#[macro_export]
macro_rules! Variant {
    [$($t:ty),* $(,)?] => [$crate::Variant::<$crate::T![$($t,)*]>];
}

/// Constructs a type list (a cons list of pairs ending in `()`) from a list
/// of types.
///
/// # Examples
///
/// ```rust
/// use tvariant::{T, catalog};
///
/// type Alternatives = T![i32, u32, f64];
/// let _: Option<(i32, (u32, (f64, ())))> = None::<Alternatives>;
/// assert_eq!(catalog::len::<Alternatives>(), 3);
/// ```
#[macro_export]
macro_rules! T {
    [] => [()];
    [$head:ty $(, $t:ty)* $(,)?] => [($head, $crate::T!($($t,)*))];
}
