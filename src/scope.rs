//! Alias definition scopes
//!
//! Scopes form a chain of borrowed frames, one per schema node visited on
//! the way down. Merging pushes a frame and leaves the parent untouched, so
//! siblings never observe each other's aliases.

use std::collections::BTreeSet;

use crate::schema::{Aliases, SchemaNode};

/// Aliases visible at one point of a validation descent
#[derive(Debug, Clone, Copy, Default)]
pub struct DefinitionScope<'p, 'a> {
    parent: Option<&'p DefinitionScope<'p, 'a>>,
    aliases: Option<&'a Aliases>,
}

impl<'p, 'a> DefinitionScope<'p, 'a> {
    /// The empty scope a validation run starts from
    pub fn root() -> Self {
        Self {
            parent: None,
            aliases: None,
        }
    }

    /// Overlay `aliases` on top of this scope. Names in `aliases` shadow
    /// any ancestor definition with the same name.
    pub fn merge<'s>(&'s self, aliases: &'a Aliases) -> DefinitionScope<'s, 'a> {
        DefinitionScope {
            parent: Some(self),
            aliases: Some(aliases),
        }
    }

    /// Resolve an alias name, innermost definition first
    pub fn lookup(&self, name: &str) -> Option<&'a SchemaNode> {
        let mut frame = Some(self);
        while let Some(scope) = frame {
            if let Some(node) = scope.aliases.and_then(|a| a.get(name)) {
                return Some(node);
            }
            frame = scope.parent;
        }
        None
    }

    /// All alias names visible from this scope, sorted
    pub fn names(&self) -> BTreeSet<&'a str> {
        let mut names = BTreeSet::new();
        let mut frame = Some(self);
        while let Some(scope) = frame {
            if let Some(aliases) = scope.aliases {
                names.extend(aliases.keys().map(String::as_str));
            }
            frame = scope.parent;
        }
        names
    }
}
