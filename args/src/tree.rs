//! The command tree: branches owning positionals, flags, and children.

use crate::extract::Extractor;

/// A positional argument spec bound to one option.
pub(crate) struct PositionalSpec {
    /// Name of the target option in the store.
    pub option: String,
    /// Usage fragment, already wrapped in `[...]` when optional.
    pub usage: String,
    pub extractor: Box<dyn Extractor>,
    pub optional: bool,
    pub help: Option<String>,
}

/// A flag spec bound to one option under one or more alias names.
pub(crate) struct FlagSpec {
    /// Alias names without dashes; one character means short form.
    pub names: Vec<String>,
    /// Name of the target option in the store.
    pub option: String,
    /// Full usage fragment: rendered aliases plus the value placeholder.
    pub usage: String,
    pub extractor: Box<dyn Extractor>,
    pub help: Option<String>,
}

/// Renders alias names with their dash prefixes, joined by `,`.
pub(crate) fn render_aliases(names: &[String]) -> String {
    names
        .iter()
        .map(|name| {
            if name.len() > 1 {
                format!("--{name}")
            } else {
                format!("-{name}")
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// One node of the command tree.
///
/// Child lookup is exact-match; the children keep insertion order for help
/// rendering.
#[derive(Default)]
pub(crate) struct Branch {
    pub children: Vec<(String, Branch)>,
    pub positionals: Vec<PositionalSpec>,
    pub flags: Vec<FlagSpec>,
    pub help: Option<String>,
}

impl Branch {
    pub fn child(&self, name: &str) -> Option<&Branch> {
        self.children
            .iter()
            .find(|(child, _)| child == name)
            .map(|(_, branch)| branch)
    }

    /// Walks `path`, creating missing branches along the way.
    pub fn descend_mut(&mut self, path: &[&str]) -> &mut Branch {
        let mut branch = self;
        for part in path {
            let index = match branch.children.iter().position(|(name, _)| name == part) {
                Some(index) => index,
                None => {
                    branch
                        .children
                        .push((part.to_string(), Branch::default()));
                    branch.children.len() - 1
                }
            };
            branch = &mut branch.children[index].1;
        }
        branch
    }

    /// The positional usage fragments of this branch, each preceded by a
    /// space, for the `usage:` line.
    pub fn positionals_usage(&self) -> String {
        let mut usage = String::new();
        for positional in &self.positionals {
            if positional.usage.is_empty() {
                continue;
            }
            usage.push(' ');
            usage.push_str(&positional.usage);
        }
        usage
    }
}
