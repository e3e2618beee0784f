//! Errors raised while building single-use guards.

use thiserror::Error;

/// A guard was requested for a routine that is not a type initializer.
///
/// Returned by [`QualifiedName::parse`](crate::QualifiedName::parse) and
/// [`SingleUseInit::named`](crate::SingleUseInit::named) when the name does
/// not have the `<Type>::init` shape. This is a programming error and is
/// reported when the guard is built, never when it is called.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("the '{0}' method is not a type initializer")]
pub struct NotAnInitializer(String);

impl NotAnInitializer {
   pub(crate) fn new(qualified_name: impl Into<String>) -> Self {
      Self(qualified_name.into())
   }

   /// The rejected qualified name.
   #[inline]
   pub fn qualified_name(&self) -> &str {
      &self.0
   }
}
