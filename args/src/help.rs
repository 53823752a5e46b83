//! Help text rendering for the active branch chain.

use crate::parser::ArgParser;
use crate::tree::{Branch, render_aliases};

/// Indent and alignment settings for help output.
///
/// Each section has an indent (spaces before the fragment) and an alignment
/// pad (the column help text starts at). A fragment longer than its pad is
/// put on its own line with the help text wrapped underneath.
#[derive(Debug, Clone, Copy)]
pub struct HelpLayout {
    /// Indent for the `commands:` section.
    pub command_indent: usize,
    /// Alignment pad for the `commands:` section.
    pub command_pad: usize,
    /// Indent for the `options:` section.
    pub flag_indent: usize,
    /// Alignment pad for the `options:` section.
    pub flag_pad: usize,
    /// Indent for the `arguments:` section.
    pub positional_indent: usize,
    /// Alignment pad for the `arguments:` section.
    pub positional_pad: usize,
}

impl Default for HelpLayout {
    fn default() -> Self {
        Self {
            command_indent: 4,
            command_pad: 13,
            flag_indent: 2,
            flag_pad: 25,
            positional_indent: 2,
            positional_pad: 13,
        }
    }
}

impl ArgParser {
    /// Renders help for the branch chain at `path` (empty for the root).
    ///
    /// Sections, in order: branch help (falling back to the program
    /// description), the `usage:` line, `arguments:`, `options:` (with the
    /// help aliases appended as a final synthetic entry), `commands:` when
    /// the branch has children, and the footer.
    ///
    /// Unknown path segments end the walk early, rendering help for the
    /// deepest branch reached.
    pub fn render_help(&self, path: &[String]) -> String {
        let mut branch = &self.root;
        let mut active: Vec<&Branch> = vec![branch];
        let mut branch_usage = String::new();
        for name in path {
            let Some(child) = branch.child(name) else {
                break;
            };
            branch = child;
            active.push(branch);
            branch_usage.push(' ');
            branch_usage.push_str(name);
            branch_usage.push_str(&branch.positionals_usage());
        }

        let mut out = String::new();

        if let Some(text) = branch.help.as_deref().or(self.description.as_deref()) {
            out.push_str(text);
            out.push_str("\n\n");
        }

        out.push_str("usage: ");
        out.push_str(&self.program);
        out.push_str(&branch_usage);
        let has_children = !branch.children.is_empty();
        if has_children {
            out.push_str(" <command>");
        }
        out.push_str(" [options]\n");

        let positionals: Vec<_> = active
            .iter()
            .flat_map(|branch| branch.positionals.iter())
            .collect();
        if !positionals.is_empty() {
            out.push_str("\narguments:\n");
            for positional in positionals {
                write_row(
                    &mut out,
                    self.layout.positional_indent,
                    self.layout.positional_pad,
                    &positional.usage,
                    positional.help.as_deref(),
                );
            }
        }

        let flags: Vec<_> = active
            .iter()
            .flat_map(|branch| branch.flags.iter())
            .collect();
        if !flags.is_empty() {
            out.push_str("\noptions:\n");
            for flag in &flags {
                write_row(
                    &mut out,
                    self.layout.flag_indent,
                    self.layout.flag_pad,
                    &flag.usage,
                    flag.help.as_deref(),
                );
            }
            if !self.help_aliases.is_empty() {
                write_row(
                    &mut out,
                    self.layout.flag_indent,
                    self.layout.flag_pad,
                    &render_aliases(&self.help_aliases),
                    Some("Show this help"),
                );
            }
        }

        if has_children {
            out.push_str("\ncommands:\n");
            for (name, child) in &branch.children {
                write_row(
                    &mut out,
                    self.layout.command_indent,
                    self.layout.command_pad,
                    name,
                    child.help.as_deref(),
                );
            }
        }

        if let Some(footer) = &self.footer {
            out.push('\n');
            out.push_str(footer);
            out.push('\n');
        }

        out
    }
}

/// One aligned row: indent, fragment padded to the align column, then help.
/// Overlong fragments get their own line, with the help wrapped underneath.
fn write_row(out: &mut String, indent: usize, pad: usize, fragment: &str, help: Option<&str>) {
    out.push_str(&" ".repeat(indent));
    match help {
        Some(text) if fragment.len() > pad => {
            out.push_str(fragment);
            out.push('\n');
            out.push_str(&" ".repeat(indent + pad + 1));
            out.push_str(text);
        }
        _ => {
            out.push_str(&format!("{fragment:<pad$}"));
            out.push(' ');
            out.push_str(help.unwrap_or(""));
        }
    }
    out.push('\n');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_pads_to_align_column() {
        let mut out = String::new();
        write_row(&mut out, 2, 10, "-v", Some("verbose output"));
        assert_eq!(out, "  -v         verbose output\n");
    }

    #[test]
    fn test_overlong_fragment_wraps_help() {
        let mut out = String::new();
        write_row(&mut out, 2, 4, "--very-long", Some("help"));
        assert_eq!(out, "  --very-long\n       help\n");
    }

    #[test]
    fn test_overlong_fragment_without_help_stays_inline() {
        let mut out = String::new();
        write_row(&mut out, 2, 4, "--very-long", None);
        assert_eq!(out, "  --very-long \n");
    }
}
