use std::collections::BTreeMap;
use std::iter::FromIterator;
use std::ops::{Deref, DerefMut};

use crate::error::Result;
use crate::{de, ser, Value};

/// A `BTreeMap<String, Value>`.
///
/// Keys are unique and iterate in byte order, which is also the order the
/// codec writes them in.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Object {
    inner: BTreeMap<String, Value>,
}

impl Object {
    pub fn new() -> Self {
        Object {
            inner: BTreeMap::new(),
        }
    }
}

impl Deref for Object {
    type Target = BTreeMap<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Object {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = <BTreeMap<String, Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = (&'a String, &'a Value);
    type IntoIter = <&'a BTreeMap<String, Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Object {
    type Item = (&'a String, &'a mut Value);
    type IntoIter = <&'a mut BTreeMap<String, Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        Object {
            inner: BTreeMap::from_iter(iter),
        }
    }
}

/// Non-owning handle to an object stored in an [`ObjectTable`].
///
/// Two handles are equal only when they name the same slot; the contents of
/// the objects are never compared.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectRef(usize);

impl ObjectRef {
    pub fn new(index: usize) -> Self {
        ObjectRef(index)
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only storage for the objects that `Object` values refer to.
///
/// The table owns the objects; values only hold [`ObjectRef`]s into it, so
/// an object may be shared by any number of values (or refer to itself).
#[derive(Clone, Debug, Default)]
pub struct ObjectTable {
    objects: Vec<Object>,
}

impl ObjectTable {
    pub fn new() -> Self {
        ObjectTable {
            objects: Vec::new(),
        }
    }

    pub fn insert(&mut self, object: Object) -> ObjectRef {
        self.objects.push(object);
        ObjectRef(self.objects.len() - 1)
    }

    pub fn get(&self, r: ObjectRef) -> Option<&Object> {
        self.objects.get(r.0)
    }

    pub fn get_mut(&mut self, r: ObjectRef) -> Option<&mut Object> {
        self.objects.get_mut(r.0)
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl ser::Context for ObjectTable {
    fn object(&self, r: ObjectRef) -> Option<&Object> {
        self.get(r)
    }
}

impl de::Context for ObjectTable {
    fn insert(&mut self, object: Object) -> Result<ObjectRef> {
        Ok(ObjectTable::insert(self, object))
    }

    fn discard(&mut self, inserted: &[ObjectRef]) {
        // Everything inserted by one call sits at the tail.
        if let Some(first) = inserted.iter().min() {
            self.objects.truncate(first.0);
        }
    }
}
