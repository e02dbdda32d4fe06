// oob-layout: Out-of-Band Assembly Layout Generator
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable container.

use std::cmp::Ordering;
use std::collections::BTreeMap;

/// A case-insensitive environment variable key.
///
/// The original spelling is kept for display; ordering and equality ignore
/// ASCII case.
#[derive(Debug, Clone, Eq)]
struct EnvKey(String);

impl EnvKey {
    fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.0.bytes().map(|b| b.to_ascii_lowercase());
        let rhs = other.0.bytes().map(|b| b.to_ascii_lowercase());
        lhs.cmp(rhs)
    }
}

/// A set of environment variables passed to a child process.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    vars: BTreeMap<EnvKey, String>,
}

impl Env {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            vars: BTreeMap::new(),
        }
    }

    /// Sets an environment variable, replacing any value stored under a
    /// key that differs only in case.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = EnvKey::new(key);
        // Drop the old entry first so the new spelling of the key wins.
        self.vars.remove(&key);
        self.vars.insert(key, value.into());
        self
    }

    /// Builder-style variant of [`Env::set`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars.get(&EnvKey::new(key)).map(String::as_str)
    }

    /// Returns an iterator over environment variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.vars.len()
    }
}

impl<K, V> FromIterator<(K, V)> for Env
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut env = Self::new();
        for (key, value) in iter {
            env.set(key, value);
        }
        env
    }
}
