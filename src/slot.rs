//! Identities of guarded initializers.
//!
//! A guard is keyed by an *initializer slot*: any value that names one guarded
//! routine. The preferred slot is a small enum with one variant per guarded
//! initializer, which lets the compiler check every key. [`QualifiedName`] is
//! the string-based alternative, validated once when the guard is built.

use core::fmt;
use core::hash::Hash;

use crate::error::NotAnInitializer;

/// Method name recognized as a type initializer.
pub const INITIALIZER_METHOD: &str = "init";

/// Separator between the owning type path and the method name.
const PATH_SEPARATOR: &str = "::";

/// A non-empty owner path segment without separators or whitespace.
fn is_path_segment(seg: &str) -> bool {
   !seg.is_empty() && !seg.chars().any(|c| c == ':' || c.is_whitespace())
}

/// Key identifying one guarded initializer in a ledger.
///
/// Implemented for every `Clone + Eq + Hash + Debug` type.
pub trait InitSlot: Clone + Eq + Hash + fmt::Debug {}

impl<T: Clone + Eq + Hash + fmt::Debug> InitSlot for T {}

/// A validated `<Type>::init` name.
///
/// The owning type may be a full path (`app::model::Widget::init`); only the
/// final segment is checked against [`INITIALIZER_METHOD`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct QualifiedName {
   name: &'static str,
   split: usize,
}

impl QualifiedName {
   /// Validates `name` as a type initializer.
   ///
   /// Returns [`NotAnInitializer`] if the last path segment is not
   /// [`INITIALIZER_METHOD`], or if any owner segment is empty or contains
   /// `:` or whitespace.
   pub fn parse(name: &'static str) -> Result<Self, NotAnInitializer> {
      let parsed = name
         .rsplit_once(PATH_SEPARATOR)
         .filter(|(owner, method)| {
            *method == INITIALIZER_METHOD
               && owner.split(PATH_SEPARATOR).all(is_path_segment)
         })
         .map(|(owner, _)| Self {
            name,
            split: owner.len(),
         });

      match parsed {
         Some(qualified) => Ok(qualified),
         None => {
            #[cfg(feature = "tracing")]
            tracing::debug!(name, "rejected non-initializer for single-use guard");
            Err(NotAnInitializer::new(name))
         }
      }
   }

   /// The full qualified name, e.g. `"Widget::init"`.
   #[inline]
   pub const fn as_str(&self) -> &'static str {
      self.name
   }

   /// The owning type path, e.g. `"Widget"`.
   #[inline]
   pub fn owner(&self) -> &'static str {
      &self.name[..self.split]
   }

   /// The method name; always [`INITIALIZER_METHOD`].
   #[inline]
   pub fn method(&self) -> &'static str {
      &self.name[self.split + PATH_SEPARATOR.len()..]
   }
}

impl fmt::Display for QualifiedName {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.write_str(self.name)
   }
}

impl fmt::Debug for QualifiedName {
   fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
      f.debug_tuple("QualifiedName").field(&self.name).finish()
   }
}

impl TryFrom<&'static str> for QualifiedName {
   type Error = NotAnInitializer;

   fn try_from(name: &'static str) -> Result<Self, Self::Error> {
      Self::parse(name)
   }
}

impl AsRef<str> for QualifiedName {
   fn as_ref(&self) -> &str {
      self.name
   }
}

#[cfg(test)]
mod tests {
   use super::*;

   #[test]
   fn test_parse_simple() {
      let name = QualifiedName::parse("Widget::init").unwrap();
      assert_eq!(name.as_str(), "Widget::init");
      assert_eq!(name.owner(), "Widget");
      assert_eq!(name.method(), "init");
   }

   #[test]
   fn test_parse_nested_owner() {
      let name = QualifiedName::parse("app::model::Widget::init").unwrap();
      assert_eq!(name.owner(), "app::model::Widget");
      assert_eq!(name.method(), INITIALIZER_METHOD);
   }

   #[test]
   fn test_parse_rejects() {
      for bad in [
         "",
         "init",
         "::init",
         "Widget::new",
         "Widget::init_more",
         "Widget::initialize",
         "Widget.init",
         "app::::init",
         "Widget::init::",
         "Widget:::init",
         "Widget:::::init",
         "Wid get::init",
         " Widget::init",
         "app::\tWidget::init",
      ] {
         let err = QualifiedName::parse(bad).unwrap_err();
         assert_eq!(err.qualified_name(), bad);
      }
   }

   #[test]
   fn test_display_and_debug() {
      let name: QualifiedName = "Widget::init".try_into().unwrap();
      assert_eq!(name.to_string(), "Widget::init");
      assert_eq!(format!("{name:?}"), "QualifiedName(\"Widget::init\")");
   }
}
