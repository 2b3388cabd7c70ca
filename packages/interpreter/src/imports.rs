use crate::graph::PackageRef;
use crate::types::sanitize_identifier;
use std::collections::BTreeMap;

/// Import aliases for a single generated file.
///
/// Types from the file's own package render unqualified; everything else is
/// spelled `alias.Name`. Aliases are unique within the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportTable {
    local_path: String,
    /// path -> alias
    aliases: BTreeMap<String, String>,
}

/// One line of the import block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSpec {
    pub alias: String,
    pub path: String,
}

impl ImportSpec {
    /// Whether `alias` differs from what Go would infer from the path.
    pub fn needs_alias(&self) -> bool {
        last_segment(&self.path) != self.alias
    }

    /// Standard library paths have no dot in their first element.
    pub fn is_stdlib(&self) -> bool {
        let first = self.path.split('/').next().unwrap_or_default();
        !first.contains('.')
    }
}

fn last_segment(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

impl ImportTable {
    pub fn new(local_path: impl Into<String>) -> Self {
        Self {
            local_path: local_path.into(),
            aliases: BTreeMap::new(),
        }
    }

    pub fn local_path(&self) -> &str {
        &self.local_path
    }

    /// Registers `path` under a preferred alias, returning the alias in use.
    ///
    /// A path already present keeps its first alias.
    pub fn register(&mut self, alias: &str, path: &str) -> String {
        if path == self.local_path {
            return String::new();
        }
        if let Some(existing) = self.aliases.get(path) {
            return existing.clone();
        }
        let alias = self.unique_alias(&sanitize_identifier(alias));
        self.aliases.insert(path.to_string(), alias.clone());
        alias
    }

    /// Ensures `package` is importable, guessing an alias from its name.
    pub fn require(&mut self, package: &PackageRef) -> String {
        let seed = if package.name.is_empty() {
            guess_alias(&package.path)
        } else {
            package.name.clone()
        };
        self.register(&seed, &package.path)
    }

    pub fn alias_for(&self, path: &str) -> Option<&str> {
        self.aliases.get(path).map(String::as_str)
    }

    /// Spells `name` from package `path` as seen from this file.
    pub fn qualify(&self, path: &str, name: &str) -> String {
        if path.is_empty() || path == self.local_path {
            return name.to_string();
        }
        match self.aliases.get(path) {
            Some(alias) => format!("{}.{}", alias, name),
            // Unregistered packages fall back to the guessed alias so that
            // rendering stays total; `collect_imports` should have added it.
            None => format!("{}.{}", guess_alias(path), name),
        }
    }

    /// Imports ordered the way gofmt groups them: stdlib first, then the rest,
    /// each sorted by path.
    pub fn specs(&self) -> Vec<ImportSpec> {
        let mut specs: Vec<ImportSpec> = self
            .aliases
            .iter()
            .map(|(path, alias)| ImportSpec {
                alias: alias.clone(),
                path: path.clone(),
            })
            .collect();
        specs.sort_by(|a, b| {
            (!a.is_stdlib(), &a.path).cmp(&(!b.is_stdlib(), &b.path))
        });
        specs
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    fn unique_alias(&self, seed: &str) -> String {
        let taken = |candidate: &str| self.aliases.values().any(|a| a == candidate);
        if !taken(seed) {
            return seed.to_string();
        }
        let mut n = 2;
        loop {
            let candidate = format!("{}{}", seed, n);
            if !taken(&candidate) {
                return candidate;
            }
            n += 1;
        }
    }
}

/// Alias derived from the last path element, e.g. `zipkin-go` -> `zipkingo`.
fn guess_alias(path: &str) -> String {
    let segment = last_segment(path).to_lowercase();
    sanitize_identifier(&segment)
}
