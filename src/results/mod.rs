//! Aggregation model: fold repeated executions of the spec tree into one
//! canonical result tree.
//!
//! Every execution of the spec declaration produces fresh `SpecRun`s. The
//! collector resolves each run to a single `SpecResult` (root by name, then one
//! sibling index per level), so the same logical spec seen by many executions
//! lands on one node whose failure messages are merged. Canonical results live
//! in an arena and never borrow from the runs.
//!
//! Report order is computed on demand:
//! - roots are sorted by name
//! - children are sorted by declaration order (their sibling index)

pub mod errors;

use crate::spec::{SpecPath, SpecRun};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

pub use errors::merge_errors;

/// Index of a `SpecResult` in the collector's arena.
pub type SpecId = usize;

/// Canonical, merged outcome of one logical spec.
#[derive(Debug, Clone)]
pub struct SpecResult {
    id: SpecId,
    /// None until a run at this path has been observed (ancestors may be
    /// created on behalf of a descendant that arrived first).
    name: Option<String>,
    /// Position among siblings; roots are always 0.
    index: u32,
    parent: Option<SpecId>,
    /// Keyed by sibling index, so iteration follows declaration order.
    children: BTreeMap<u32, SpecId>,
    /// Global creation sequence; breaks ordering ties between roots.
    first_seen: usize,
    errors: Vec<String>,
}

impl SpecResult {
    pub fn id(&self) -> SpecId {
        self.id
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn parent(&self) -> Option<SpecId> {
        self.parent
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn is_failing(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// A later run reused a path under a different name. The first name is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameConflict {
    pub root: String,
    pub path: SpecPath,
    pub kept: String,
    pub ignored: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub specs: usize,
    pub failures: usize,
}

/// Receives the canonical tree in report order.
pub trait SpecVisitor {
    type Error;

    /// Called once per spec, parents before children. Roots have depth 0.
    fn visit_spec(&mut self, spec: &SpecResult, depth: usize) -> Result<(), Self::Error>;

    /// Called after the last spec.
    fn visit_end(&mut self, summary: Summary) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Default)]
pub struct ResultCollector {
    specs: Vec<SpecResult>,
    /// Root specs by name; every root sits at path `[0]`.
    roots: HashMap<String, SpecId>,
    conflicts: Vec<NameConflict>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one execution's view of a spec into the canonical tree.
    ///
    /// Ancestors may be updated before or after their descendants. The first
    /// path element is ignored: the root is found by name. Never fails; runs
    /// whose paths were assigned inconsistently corrupt the tree silently.
    pub fn update(&mut self, run: &SpecRun) {
        let id = self.lookup_or_create(run.root_name(), run.path());

        match self.specs[id].name.clone() {
            None => self.specs[id].name = Some(run.name().to_string()),
            Some(kept) if kept != run.name() => {
                self.record_conflict(id, run.root_name(), kept, run.name())
            }
            Some(_) => {}
        }

        merge_errors(&mut self.specs[id].errors, run.errors());
    }

    fn lookup_or_create(&mut self, root: &str, path: &SpecPath) -> SpecId {
        let mut id = match self.roots.get(root) {
            Some(&id) => id,
            None => {
                let id = self.push(0, None);
                self.roots.insert(root.to_string(), id);
                id
            }
        };

        // One step per nesting level, creating missing ancestors on the way.
        for &index in path.0.iter().skip(1) {
            id = match self.specs[id].children.get(&index) {
                Some(&child) => child,
                None => {
                    let child = self.push(index, Some(id));
                    self.specs[id].children.insert(index, child);
                    child
                }
            };
        }
        id
    }

    fn push(&mut self, index: u32, parent: Option<SpecId>) -> SpecId {
        let id = self.specs.len();
        self.specs.push(SpecResult {
            id,
            name: None,
            index,
            parent,
            children: BTreeMap::new(),
            first_seen: id,
            errors: Vec::new(),
        });
        id
    }

    fn record_conflict(&mut self, id: SpecId, root: &str, kept: String, ignored: &str) {
        let path = self.path_of(id);
        let seen = self
            .conflicts
            .iter()
            .any(|c| c.root == root && c.path == path && c.ignored == ignored);
        if !seen {
            self.conflicts.push(NameConflict {
                root: root.to_string(),
                path,
                kept,
                ignored: ignored.to_string(),
            });
        }
    }

    fn path_of(&self, mut id: SpecId) -> SpecPath {
        let mut indices = vec![self.specs[id].index];
        while let Some(parent) = self.specs[id].parent {
            indices.push(self.specs[parent].index);
            id = parent;
        }
        indices.reverse();
        SpecPath::new(indices)
    }

    /// Full path of `spec` from its root.
    pub fn path(&self, spec: &SpecResult) -> SpecPath {
        self.path_of(spec.id)
    }

    pub fn get(&self, id: SpecId) -> Option<&SpecResult> {
        self.specs.get(id)
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Root specs sorted alphabetically.
    pub fn roots(&self) -> Vec<&SpecResult> {
        let mut roots: Vec<&SpecResult> = self.roots.values().map(|&id| &self.specs[id]).collect();
        roots.sort_by(|a, b| {
            a.name()
                .cmp(b.name())
                .then_with(|| a.first_seen.cmp(&b.first_seen))
        });
        roots
    }

    /// Children of `spec` in declaration order.
    pub fn children(&self, spec: &SpecResult) -> Vec<&SpecResult> {
        spec.children.values().map(|&id| &self.specs[id]).collect()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            specs: self.specs.len(),
            failures: self.specs.iter().filter(|s| s.is_failing()).count(),
        }
    }

    pub fn name_conflicts(&self) -> &[NameConflict] {
        &self.conflicts
    }

    /// Walk the tree pre-order in report order, then report the totals.
    pub fn visit<V: SpecVisitor>(&self, visitor: &mut V) -> Result<Summary, V::Error> {
        let mut summary = Summary::default();
        let mut stack: Vec<(&SpecResult, usize)> =
            self.roots().into_iter().rev().map(|root| (root, 0)).collect();

        while let Some((spec, depth)) = stack.pop() {
            summary.specs += 1;
            if spec.is_failing() {
                summary.failures += 1;
            }
            visitor.visit_spec(spec, depth)?;
            stack.extend(
                self.children(spec)
                    .into_iter()
                    .rev()
                    .map(|child| (child, depth + 1)),
            );
        }

        visitor.visit_end(summary)?;
        Ok(summary)
    }
}
