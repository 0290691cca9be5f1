//! One spec as seen during a single execution of the spec declaration.
//!
//! A fresh tree of `SpecRun`s is produced by every execution. Children are
//! created through their parent (`parent.child(name)`), which owns the sibling
//! counter, so each child's path is computed and frozen at construction time.
//! Executions must declare children in the same order for paths to line up.
//!
//! Root specs are told apart by name; every root sits at path `[0]` and its
//! descendants carry the root's name along with their own path.

use crate::spec::SpecPath;

#[derive(Debug, Clone)]
pub struct SpecRun {
    root: String,
    name: String,
    path: SpecPath,
    errors: Vec<String>,
    /// Index handed to the next child created against this instance.
    next_child: u32,
}

impl SpecRun {
    pub fn root(name: impl Into<String>) -> Self {
        let name = name.into();
        Self::with_path(name.clone(), name, SpecPath::root(0))
    }

    /// Rebuild a spec outside a live execution, e.g. from a run log.
    pub fn with_path(root: impl Into<String>, name: impl Into<String>, path: SpecPath) -> Self {
        Self {
            root: root.into(),
            name: name.into(),
            path,
            errors: Vec::new(),
            next_child: 0,
        }
    }

    /// Declare the next nested spec under this one.
    ///
    /// Siblings must be created against the same parent instance; another
    /// instance of the same spec has its own counter and hands out colliding paths.
    pub fn child(&mut self, name: impl Into<String>) -> SpecRun {
        let path = self.path.child(self.next_child);
        self.next_child += 1;
        Self::with_path(self.root.clone(), name, path)
    }

    pub fn add_error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    /// Name of the root spec this one was declared under.
    pub fn root_name(&self) -> &str {
        &self.root
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn path(&self) -> &SpecPath {
        &self.path
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }
}
