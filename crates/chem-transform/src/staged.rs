//! A stage result paired with the diagnostics it raised.

use chem_model::Diagnostic;

/// Output of one transformation stage.
///
/// Stages never log; they hand their diagnostics back to the caller, which
/// composes them in order.
#[derive(Debug, Clone, PartialEq)]
pub struct Staged<T> {
    pub value: T,
    pub diagnostics: Vec<Diagnostic>,
}

impl<T> Staged<T> {
    pub fn new(value: T, diagnostics: Vec<Diagnostic>) -> Self {
        Self { value, diagnostics }
    }

    /// A result without diagnostics.
    pub fn clean(value: T) -> Self {
        Self::new(value, Vec::new())
    }

    pub fn with_diagnostic(value: T, diagnostic: Diagnostic) -> Self {
        Self::new(value, vec![diagnostic])
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Staged<U> {
        Staged::new(f(self.value), self.diagnostics)
    }

    /// Chain a stage; earlier diagnostics come first.
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Staged<U>) -> Staged<U> {
        let next = f(self.value);
        let mut diagnostics = self.diagnostics;
        diagnostics.extend(next.diagnostics);
        Staged::new(next.value, diagnostics)
    }

    /// Apply `f` to every diagnostic, e.g. to attach a column.
    #[must_use]
    pub fn map_diagnostics(self, f: impl Fn(Diagnostic) -> Diagnostic) -> Self {
        Self::new(self.value, self.diagnostics.into_iter().map(f).collect())
    }

    pub fn into_parts(self) -> (T, Vec<Diagnostic>) {
        (self.value, self.diagnostics)
    }
}
