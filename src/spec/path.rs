//! Spec path: the sibling indices from a root spec down to a nested spec.
//!
//! Example: the second child of the first root  =>  SpecPath(vec![0, 1])
//!
//! We store it as a Vec<u32> and derive ordering so it can be used in BTreeSet/Map
//! as well as a HashMap key.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct SpecPath(pub Vec<u32>);

impl SpecPath {
    pub fn new(path: Vec<u32>) -> Self {
        Self(path)
    }

    /// Path of a root spec declared at `index`.
    pub fn root(index: u32) -> Self {
        Self(vec![index])
    }

    /// Path of the `index`th child declared under this spec.
    pub fn child(&self, index: u32) -> Self {
        let mut v = self.0.clone();
        v.push(index);
        Self(v)
    }

    /// Enclosing spec's path, or None for a root (or empty) path.
    pub fn parent(&self) -> Option<SpecPath> {
        match self.0.len() {
            0 | 1 => None,
            n => Some(Self(self.0[..n - 1].to_vec())),
        }
    }

    /// Position among siblings.
    pub fn last_index(&self) -> Option<u32> {
        self.0.last().copied()
    }

    pub fn depth(&self) -> usize {
        self.0.len().saturating_sub(1)
    }

    pub fn is_root(&self) -> bool {
        self.0.len() == 1
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SpecPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, idx) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", idx)?;
        }
        write!(f, "]")
    }
}
