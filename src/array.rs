use std::iter::FromIterator;
use std::mem;
use std::ops::{Deref, DerefMut};

use crate::drop;
use crate::Value;

/// A `Vec<Value>` with a non-recursive drop impl.
#[derive(Clone, Debug, Default)]
pub struct Array {
    inner: Vec<Value>,
}

impl Drop for Array {
    fn drop(&mut self) {
        self.inner.drain(..).for_each(drop::safely);
    }
}

impl Array {
    pub fn new() -> Self {
        Array { inner: Vec::new() }
    }

    /// Array of `n` slots, all `Undefined`.
    pub fn with_len(n: usize) -> Self {
        let mut inner = Vec::with_capacity(n);
        inner.resize_with(n, || Value::Undefined);
        Array { inner }
    }
}

impl Deref for Array {
    type Target = Vec<Value>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for Array {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = <Vec<Value> as IntoIterator>::IntoIter;

    fn into_iter(mut self) -> Self::IntoIter {
        // `self` drops empty afterwards
        mem::take(&mut self.inner).into_iter()
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = <&'a Vec<Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &'a mut Array {
    type Item = &'a mut Value;
    type IntoIter = <&'a mut Vec<Value> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Array {
            inner: Vec::from_iter(iter),
        }
    }
}

impl From<Vec<Value>> for Array {
    fn from(inner: Vec<Value>) -> Self {
        Array { inner }
    }
}
