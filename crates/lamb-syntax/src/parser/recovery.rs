//! Least-cost repair search.
//!
//! A [`Branch`] is one hypothesis about how the statement should be read: the
//! diagnostics it has accumulated so far plus, optionally, the rules it
//! visited. Branches are cloned before every hypothesis, so sibling
//! hypotheses never observe each other's diagnostics.
//!
//! The [`RepairMemo`] caches what a rule appends to a branch. Rules are pure
//! in `(position, diagnostic count)` and only ever append, so replaying a
//! cached suffix gives the same result as re-running the search.

use rustc_hash::FxHashMap;

use super::grammar::Nonterminal;
use crate::diagnostic::Diagnostic;

/// One repair hypothesis being completed.
#[derive(Debug, Clone, Default)]
pub struct Branch {
    pub diagnostics: Vec<Diagnostic>,
    /// Rules visited, in order; `None` when tracing is off
    pub derivation: Option<Vec<Nonterminal>>,
    /// Set when a guard abandoned the rest of the statement
    pub halted: bool,
}

/// Length of a branch at some point, used to cut suffixes.
#[derive(Debug, Clone, Copy)]
pub struct Mark {
    diagnostics: usize,
    derivation: usize,
}

/// What a rule appended to a branch.
#[derive(Debug, Clone)]
pub struct Suffix {
    diagnostics: Vec<Diagnostic>,
    derivation: Vec<Nonterminal>,
    halted: bool,
}

impl Branch {
    pub fn new(trace: bool) -> Self {
        Self {
            diagnostics: Vec::new(),
            derivation: trace.then(Vec::new),
            halted: false,
        }
    }

    /// Cost of the branch: its diagnostic count.
    #[inline]
    pub fn cost(&self) -> usize {
        self.diagnostics.len()
    }

    #[inline]
    pub fn visit(&mut self, rule: Nonterminal) {
        if let Some(derivation) = &mut self.derivation {
            derivation.push(rule);
        }
    }

    #[inline]
    pub fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Copy of this branch with one more diagnostic.
    pub fn hypothesis(&self, diagnostic: Diagnostic) -> Branch {
        let mut branch = self.clone();
        branch.report(diagnostic);
        branch
    }

    pub fn mark(&self) -> Mark {
        Mark {
            diagnostics: self.diagnostics.len(),
            derivation: self.derivation.as_ref().map_or(0, Vec::len),
        }
    }

    pub fn suffix_since(&self, mark: Mark) -> Suffix {
        Suffix {
            diagnostics: self.diagnostics[mark.diagnostics..].to_vec(),
            derivation: self
                .derivation
                .as_ref()
                .map(|d| d[mark.derivation..].to_vec())
                .unwrap_or_default(),
            halted: self.halted,
        }
    }

    pub fn extend(&mut self, suffix: &Suffix) {
        self.diagnostics.extend(suffix.diagnostics.iter().cloned());
        if let Some(derivation) = &mut self.derivation {
            derivation.extend_from_slice(&suffix.derivation);
        }
        self.halted |= suffix.halted;
    }
}

/// Pick the branch with the fewest diagnostics.
///
/// Ties go to the earlier argument: Insert, then Replace, then Delete.
pub fn cheapest(insert: Branch, replace: Branch, delete: Branch) -> Branch {
    if insert.cost() <= replace.cost() && insert.cost() <= delete.cost() {
        insert
    } else if replace.cost() <= delete.cost() {
        replace
    } else {
        delete
    }
}

/// Cache of rule results keyed by `(rule, position, diagnostic count)`.
#[derive(Debug, Default)]
pub struct RepairMemo<K> {
    entries: FxHashMap<(K, usize, usize), Suffix>,
    hits: usize,
}

impl<K: Copy + Eq + std::hash::Hash> RepairMemo<K> {
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
            hits: 0,
        }
    }

    /// Replay a cached suffix onto `branch`, if there is one.
    pub fn replay(&mut self, rule: K, pos: usize, branch: &mut Branch) -> bool {
        match self.entries.get(&(rule, pos, branch.cost())) {
            Some(suffix) => {
                branch.extend(suffix);
                self.hits += 1;
                true
            }
            None => false,
        }
    }

    pub fn store(&mut self, rule: K, pos: usize, cost: usize, suffix: Suffix) {
        self.entries.insert((rule, pos, cost), suffix);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}
