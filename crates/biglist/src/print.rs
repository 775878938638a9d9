//! ASCII rendering of tree structure, for debugging.

use std::fmt::Debug;
use std::fmt::Write;

use crate::handle::Handle;
use crate::store::{Node, SlotId};
use crate::BigList;

impl<E, O, F> BigList<E, O, F>
where
    E: Debug,
    O: Clone + Debug,
    F: Fn(&E) -> O,
{
    /// Renders the node structure under `h`, one child per line with the
    /// cached size and leftmost ordinal.
    pub fn print_tree(&self, h: &Option<Handle<O>>) -> String {
        let Some(h) = h.as_ref() else {
            return "nil".to_string();
        };
        let mut out = format!("root slot={} size={} leftmost={:?}", h.slot, h.size, h.leftmost);
        self.print_node(h.slot, "", &mut out);
        out
    }

    fn print_node(&self, slot: SlotId, tab: &str, out: &mut String) {
        match self.arena.read(slot) {
            Node::Leaf(elems) => {
                let _ = write!(out, " {elems:?}");
            }
            Node::Inner { children, .. } => {
                let last = children.len() - 1;
                for (i, c) in children.iter().enumerate() {
                    let branch = if i == last { "└─" } else { "├─" };
                    let _ = write!(
                        out,
                        "\n{tab}{branch} slot={} size={} leftmost={:?}",
                        c.slot, c.size, c.leftmost
                    );
                    let child_tab = format!("{tab}{}  ", if i == last { " " } else { "│" });
                    self.print_node(c.slot, &child_tab, out);
                }
            }
        }
    }
}
