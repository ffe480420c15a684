//! Warnings
//!
//! Non-fatal advisories returned by the Cloud Controller in the
//! `X-Cf-Warnings` response header, and the [`Warned`] result type that
//! carries them next to every success or failure.

use super::error::Error;
use serde::Serialize;
use std::ops::Deref;

/// Response header carrying server advisories
pub const WARNINGS_HEADER: &str = "X-Cf-Warnings";

/// Ordered, append-only list of advisory messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Warnings(Vec<String>);

impl Warnings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append another sequence, keeping its order
    pub fn append(&mut self, mut other: Warnings) {
        self.0.append(&mut other.0);
    }

    /// Move the warnings of a finished step into this sequence and hand back
    /// its result. Used to thread warnings through multi-step operations:
    /// `let org = warnings.absorb(step)?;`
    pub fn absorb<T>(&mut self, step: Warned<T>) -> Result<T, Error> {
        self.append(step.warnings);
        step.value
    }

    /// Parse the value of the warnings header.
    ///
    /// The header is a comma separated list of query-escaped messages.
    pub fn from_header(value: &str) -> Self {
        let warnings = value
            .split(',')
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(|w| {
                let spaced = w.replace('+', " ");
                match urlencoding::decode(&spaced) {
                    Ok(decoded) => decoded.into_owned(),
                    Err(_) => spaced,
                }
            })
            .collect();
        Self(warnings)
    }
}

impl Deref for Warnings {
    type Target = [String];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl From<Vec<String>> for Warnings {
    fn from(warnings: Vec<String>) -> Self {
        Self(warnings)
    }
}

impl<S: Into<String>> FromIterator<S> for Warnings {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl IntoIterator for Warnings {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Warnings {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Outcome of an API operation: the warnings gathered while running it,
/// plus either the value or the error that stopped it.
///
/// Warnings are present on both paths, so callers can always render them.
#[derive(Debug)]
#[must_use]
pub struct Warned<T> {
    pub value: Result<T, Error>,
    pub warnings: Warnings,
}

impl<T> Warned<T> {
    pub fn new(value: Result<T, Error>, warnings: Warnings) -> Self {
        Self { value, warnings }
    }

    pub fn ok(value: T, warnings: Warnings) -> Self {
        Self::new(Ok(value), warnings)
    }

    pub fn err(error: impl Into<Error>, warnings: Warnings) -> Self {
        Self::new(Err(error.into()), warnings)
    }

    /// Transform the success value, keeping warnings untouched
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Warned<U> {
        Warned {
            value: self.value.map(f),
            warnings: self.warnings,
        }
    }

    /// Chain a fallible step that does not issue requests
    pub fn and_then<U>(self, f: impl FnOnce(T) -> Result<U, Error>) -> Warned<U> {
        Warned {
            value: self.value.and_then(f),
            warnings: self.warnings,
        }
    }
}
