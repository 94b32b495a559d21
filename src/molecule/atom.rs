//! Atoms: labeled, positioned lattice vertices.

use glam::Vec2;

use crate::molecule::element::Label;

/// A positioned atom with its primary label and optional substituent
/// labels on the four sides.
///
/// Substituents render offset from the primary label (e.g. an `HO` prefix
/// to the left of an `O` vertex) and contribute to the atom's footprint
/// for bounds and bond clipping. The index is unique per graph and
/// assigned in append order.
#[derive(Debug, Clone, PartialEq)]
pub struct Atom {
    /// Index within the graph, assigned at append time.
    pub index: usize,
    /// Primary label, drawn centered on the atom position.
    pub label: Label,
    /// Substituent drawn one line above the primary label.
    pub above: Option<Label>,
    /// Substituent drawn to the right of the primary label.
    pub right: Option<Label>,
    /// Substituent drawn one line below the primary label.
    pub below: Option<Label>,
    /// Substituent drawn to the left of the primary label.
    pub left: Option<Label>,
    /// Final Cartesian position, baked at append time.
    pub position: Vec2,
}

impl Atom {
    /// Whether this atom is an invisible routing placeholder.
    pub fn is_invisible(&self) -> bool {
        self.label.is_invisible()
    }

    /// The same atom under a new index.
    pub(crate) fn with_index(&self, index: usize) -> Self {
        Self {
            index,
            ..self.clone()
        }
    }
}
