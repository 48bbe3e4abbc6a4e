//! Tree-drawing dump for diagnostics.

use std::fmt;

use crate::tree::{SuffixTree, SymbolKind};
use crate::{CharType, NodeID, ROOT};

const LINK_POINTER: &str = "├──";
const TERMINAL_POINTER: &str = "└──";

impl SuffixTree {
    /// Draws every explicit node as `[creation]` and every edge with its
    /// current label, followed by the suffix-link table.
    ///
    /// ```text
    /// [1]
    /// ├──<a$>──[2]
    /// └──<$>──[3]
    /// {}
    /// ```
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.render_node(&mut out, "", "", ROOT, false);
        out.push('{');
        for (i, (from, to)) in self.suffix_links.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&format!("{from}={to}"));
        }
        out.push('}');
        out
    }

    pub fn pretty_print(&self) {
        println!("{}", self.render());
    }

    fn render_node(&self, out: &mut String, padding: &str, pointer: &str, node: NodeID, has_next: bool) {
        let creation = self.creation(node);
        out.push_str(padding);
        out.push_str(pointer);
        out.push_str(&format!("[{creation}]\n"));

        let Some(branch) = self.get_node(node).branch() else {
            return;
        };
        let child_padding = if self.get_node(node).is_root() {
            String::new()
        } else {
            let width = pointer.chars().count() + creation.to_string().len();
            let rail = if has_next { '|' } else { ' ' };
            format!("{padding}{rail}{}", " ".repeat(width))
        };

        let last = branch.transitions.len().saturating_sub(1);
        for (i, edge) in branch.transitions.values().enumerate() {
            let connector = if i == last { TERMINAL_POINTER } else { LINK_POINTER };
            let child_pointer = format!("{connector}<{}>──", self.format_label(self.edge_label(edge)));
            self.render_node(out, &child_padding, &child_pointer, edge.to, i != last);
        }
    }

    fn format_label(&self, label: &[CharType]) -> String {
        match self.symbols {
            SymbolKind::Text => label
                .iter()
                .map(|&ch| {
                    u32::try_from(ch)
                        .ok()
                        .and_then(char::from_u32)
                        .unwrap_or(char::REPLACEMENT_CHARACTER)
                })
                .collect(),
            SymbolKind::Numeric => format!("{label:?}"),
        }
    }
}

impl fmt::Display for SuffixTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_single_symbol() {
        let tree = SuffixTree::from_text("a$").unwrap();
        assert_eq!(tree.render(), "[1]\n├──<a$>──[2]\n└──<$>──[3]\n{}");
    }

    #[test]
    fn renders_nested_nodes_and_links() {
        let tree = SuffixTree::from_text("abab$").unwrap();
        let expected = "\
[1]
├──<ab>──[4]
|          ├──<ab$>──[2]
|          └──<$>──[5]
├──<b>──[6]
|         ├──<ab$>──[3]
|         └──<$>──[7]
└──<$>──[8]
{4=6, 6=1}";
        assert_eq!(tree.render(), expected);
    }

    #[test]
    fn numeric_labels_use_lists() {
        let tree = SuffixTree::new(vec![7, 9]).unwrap();
        assert_eq!(tree.to_string(), "[1]\n├──<[7, 9]>──[2]\n└──<[9]>──[3]\n{}");
    }
}
