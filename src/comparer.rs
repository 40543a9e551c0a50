use std::{fmt, rc::Rc};

use derive_ex::derive_ex;


type Predicate<T> = Rc<dyn Fn(&T, &T) -> bool>;

/// A pair of equality predicates used to compare the items of two snapshots.
///
/// - `identity` decides whether two values represent the same logical entity.
/// - `version` decides whether two instances of the same entity are fully equal.
///   When it returns `false`, the item is reported as replaced.
///   Without a version predicate, identity-equal items are always kept.
///
/// Both predicates must be reflexive, symmetric and consistent while a diff is computed.
#[derive_ex(Clone, bound())]
pub struct ItemComparer<T: ?Sized> {
    identity: Predicate<T>,
    version: Option<Predicate<T>>,
}

impl<T: PartialEq + ?Sized + 'static> ItemComparer<T> {
    /// Comparer using `==` as identity, without version.
    pub fn new() -> Self {
        Self::from_identity(|a, b| a == b)
    }

    pub fn with_version_eq(self) -> Self {
        self.with_version(|a, b| a == b)
    }
}
impl<T: PartialEq + ?Sized + 'static> Default for ItemComparer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized + 'static> ItemComparer<T> {
    pub fn from_identity(identity: impl Fn(&T, &T) -> bool + 'static) -> Self {
        Self {
            identity: Rc::new(identity),
            version: None,
        }
    }
    pub fn by_key<K: PartialEq + 'static>(key: impl Fn(&T) -> K + 'static) -> Self {
        Self::from_identity(move |a, b| key(a) == key(b))
    }

    pub fn with_version(self, version: impl Fn(&T, &T) -> bool + 'static) -> Self {
        Self {
            identity: self.identity,
            version: Some(Rc::new(version)),
        }
    }
    pub fn with_version_key<K: PartialEq + 'static>(self, key: impl Fn(&T) -> K + 'static) -> Self {
        self.with_version(move |a, b| key(a) == key(b))
    }
}

impl<T: ?Sized> ItemComparer<T> {
    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }

    pub fn is_same_entity(&self, a: &T, b: &T) -> bool {
        (self.identity)(a, b)
    }

    /// Returns `true` if no version predicate is set.
    pub fn is_same_version(&self, a: &T, b: &T) -> bool {
        match &self.version {
            Some(version) => version(a, b),
            None => true,
        }
    }

    pub(crate) fn identity(&self) -> &dyn Fn(&T, &T) -> bool {
        &*self.identity
    }
}

impl<T: ?Sized> fmt::Debug for ItemComparer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemComparer")
            .field("version", &self.has_version())
            .finish_non_exhaustive()
    }
}
