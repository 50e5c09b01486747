use thiserror::Error;

/// Returned by the typed accessors of [`Variant`] when the requested
/// alternative is not the active one, or when the variant is valueless.
///
/// [`Variant`]: crate::Variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Error)]
#[error("Bad variant access")]
pub struct BadVariantAccess;
