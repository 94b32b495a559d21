//! The molecule graph data model.
//!
//! A [`Molecule`] is an ordered, heterogeneous sequence of atoms, bonds,
//! bracket groups, and ring annotations. Order is both the declaration
//! order (atom indices are assigned sequentially at append time) and the
//! z-order for rendering. Graphs are built once through the append-only
//! [`MoleculeBuilder`] and are immutable afterwards.

mod annotation;
mod atom;
mod bond;
mod element;
pub mod json;
mod lattice;

pub use annotation::{Brackets, Ring};
pub use atom::Atom;
pub use bond::{Bond, LineStyle};
pub use element::{Element, ElementColor, ElementTable, Label, BULLET_SYMBOL};
pub use lattice::Lattice;

use glam::Vec2;
use rustc_hash::{FxHashMap, FxHashSet};

/// One entry in a molecule's ordered contents.
#[derive(Debug, Clone, PartialEq)]
pub enum Item {
    /// A positioned atom.
    Atom(Atom),
    /// A bond between two atom indices.
    Bond(Bond),
    /// A bracket group around a set of atoms.
    Brackets(Brackets),
    /// A ring annotation around a set of atoms.
    Ring(Ring),
}

impl Item {
    /// Atom indices this item covers or references.
    fn covered_atoms(&self) -> Vec<usize> {
        match self {
            Self::Atom(a) => vec![a.index],
            Self::Bond(b) => vec![b.a, b.b],
            Self::Brackets(p) => p.atoms.clone(),
            Self::Ring(r) => r.atoms.clone(),
        }
    }

    /// The same item with every covered atom index passed through `map`.
    fn relabeled(&self, map: &dyn Fn(usize) -> usize) -> Self {
        match self {
            Self::Atom(a) => Self::Atom(a.with_index(map(a.index))),
            Self::Bond(b) => Self::Bond(Bond {
                a: map(b.a),
                b: map(b.b),
                ..b.clone()
            }),
            Self::Brackets(p) => Self::Brackets(Brackets {
                atoms: p.atoms.iter().map(|&i| map(i)).collect(),
                ..p.clone()
            }),
            Self::Ring(r) => Self::Ring(Ring {
                atoms: r.atoms.iter().map(|&i| map(i)).collect(),
                radius: r.radius,
            }),
        }
    }
}

/// An immutable molecule graph, ready for rendering.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Molecule {
    contents: Vec<Item>,
}

impl Molecule {
    pub(crate) fn from_items(contents: Vec<Item>) -> Self {
        Self { contents }
    }

    /// The ordered contents (declaration order = z-order).
    pub fn contents(&self) -> &[Item] {
        &self.contents
    }

    /// All atoms, in declaration order.
    pub fn atoms(&self) -> impl Iterator<Item = &Atom> {
        self.contents.iter().filter_map(|item| match item {
            Item::Atom(a) => Some(a),
            _ => None,
        })
    }

    /// Look up an atom by index.
    pub fn atom(&self, index: usize) -> Option<&Atom> {
        self.atoms().find(|a| a.index == index)
    }

    /// A new graph with every atom index passed through `map`.
    pub fn relabeled(&self, map: impl Fn(usize) -> usize) -> Self {
        Self {
            contents: self
                .contents
                .iter()
                .map(|item| item.relabeled(&map))
                .collect(),
        }
    }

    /// A new graph with every atom index shifted by `n`. Used when
    /// concatenating graphs.
    pub fn increment(&self, n: usize) -> Self {
        self.relabeled(|i| i + n)
    }

    /// The subgraph covering exactly the given atom indices.
    ///
    /// Kept atoms are renumbered to `0..k` preserving their relative
    /// declaration order. Any bond, bracket group, or ring referencing an
    /// atom outside the subset is dropped entirely.
    pub fn subset(&self, keep: &[usize]) -> Self {
        let keep: FxHashSet<usize> = keep.iter().copied().collect();
        let mut mapping: FxHashMap<usize, usize> = FxHashMap::default();
        for atom in self.atoms() {
            if keep.contains(&atom.index) {
                let next = mapping.len();
                let _ = mapping.entry(atom.index).or_insert(next);
            }
        }
        let contents = self
            .contents
            .iter()
            .filter(|item| {
                item.covered_atoms()
                    .iter()
                    .all(|i| mapping.contains_key(i))
            })
            .map(|item| item.relabeled(&|i| *mapping.get(&i).unwrap_or(&i)))
            .collect();
        Self { contents }
    }

    /// Min/max corners of the atom positions alone (no label footprints).
    /// Returns a zero-size box at the origin for an empty graph.
    pub fn bounds(&self) -> (Vec2, Vec2) {
        let mut atoms = self.atoms();
        let Some(first) = atoms.next() else {
            return (Vec2::ZERO, Vec2::ZERO);
        };
        let mut min = first.position;
        let mut max = first.position;
        for atom in atoms {
            min = min.min(atom.position);
            max = max.max(atom.position);
        }
        (min, max)
    }

    /// Min/max corners of the graph with per-atom footprints applied.
    ///
    /// `translate` maps a Cartesian position to a pre-origin canvas
    /// coordinate; `size_of` returns the `(left/top, right/bottom)`
    /// extents each atom's labels contribute. Running this on a
    /// [`subset`](Self::subset) graph yields the tight box around just
    /// those atoms' labels.
    pub fn bounds_with_size(
        &self,
        translate: impl Fn(Vec2) -> Vec2,
        size_of: impl Fn(&Atom) -> (Vec2, Vec2),
    ) -> (Vec2, Vec2) {
        let mut atoms = self.atoms();
        let Some(first) = atoms.next() else {
            return (Vec2::ZERO, Vec2::ZERO);
        };
        let t = translate(first.position);
        let (lo, hi) = size_of(first);
        let mut min = t - lo;
        let mut max = t + hi;
        for atom in atoms {
            let t = translate(atom.position);
            let (lo, hi) = size_of(atom);
            min = min.min(t - lo);
            max = max.max(t + hi);
        }
        (min, max)
    }
}

/// Optional substituent labels for the four sides of an atom.
#[derive(Debug, Clone, Default)]
pub struct Substituents {
    /// Label above the primary label.
    pub above: Option<Label>,
    /// Label to the right of the primary label.
    pub right: Option<Label>,
    /// Label below the primary label.
    pub below: Option<Label>,
    /// Label to the left of the primary label.
    pub left: Option<Label>,
}

/// Fluent append-only builder producing an immutable [`Molecule`].
///
/// Atom indices are assigned sequentially as atoms are appended; the
/// active [`Lattice`] is captured per append, so switching it mid-build
/// affects later atoms only.
#[derive(Debug, Default)]
pub struct MoleculeBuilder {
    lattice: Lattice,
    next_index: usize,
    contents: Vec<Item>,
}

impl MoleculeBuilder {
    /// A fresh builder on the orthogonal lattice.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select the lattice for subsequent atom appends.
    pub fn lattice(mut self, lattice: Lattice) -> Self {
        self.lattice = lattice;
        self
    }

    /// Append an atom at lattice coordinate `(u, v)`.
    pub fn atom(self, label: impl Into<Label>, u: f32, v: f32) -> Self {
        self.atom_full(label, Substituents::default(), u, v)
    }

    /// Append an atom with substituent labels at lattice coordinate
    /// `(u, v)`.
    pub fn atom_full(
        mut self,
        label: impl Into<Label>,
        subs: Substituents,
        u: f32,
        v: f32,
    ) -> Self {
        let position = self.lattice.to_cartesian(Vec2::new(u, v));
        let index = self.next_index;
        self.next_index += 1;
        self.contents.push(Item::Atom(Atom {
            index,
            label: label.into(),
            above: subs.above,
            right: subs.right,
            below: subs.below,
            left: subs.left,
            position,
        }));
        self
    }

    /// Append an invisible routing placeholder at `(u, v)`.
    pub fn invisible_atom(self, u: f32, v: f32) -> Self {
        self.atom(Element::invisible(), u, v)
    }

    /// Consume an index without placing an atom.
    pub fn skip_atom(mut self) -> Self {
        self.next_index += 1;
        self
    }

    /// Set the index the next appended atom will receive.
    pub fn start_index(mut self, index: usize) -> Self {
        self.next_index = index;
        self
    }

    /// Append a single solid bond.
    pub fn bond(mut self, a: usize, b: usize) -> Self {
        self.contents.push(Item::Bond(Bond::single(a, b)));
        self
    }

    /// Append a bond with an explicit line-style list.
    pub fn bond_with(mut self, a: usize, b: usize, centered: bool, lines: Vec<LineStyle>) -> Self {
        self.contents
            .push(Item::Bond(Bond::with_lines(a, b, centered, lines)));
        self
    }

    /// Append a bracket group.
    pub fn brackets(mut self, brackets: Brackets) -> Self {
        self.contents.push(Item::Brackets(brackets));
        self
    }

    /// Append a ring annotation.
    pub fn ring(mut self, atoms: Vec<usize>, radius: f32) -> Self {
        self.contents.push(Item::Ring(Ring { atoms, radius }));
        self
    }

    /// Append every item of another molecule as-is. Shift the other
    /// graph's indices first (see [`Molecule::increment`]) when
    /// concatenating.
    pub fn extend(mut self, other: &Molecule) -> Self {
        self.contents.extend(other.contents.iter().cloned());
        self.next_index = self
            .next_index
            .max(other.atoms().map(|a| a.index + 1).max().unwrap_or(0));
        self
    }

    /// Finish the graph.
    pub fn build(self) -> Molecule {
        Molecule {
            contents: self.contents,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> Molecule {
        let mut b = MoleculeBuilder::new();
        for i in 0..n {
            b = b.invisible_atom(i as f32, 0.0);
        }
        for i in 1..n {
            b = b.bond(i - 1, i);
        }
        b.build()
    }

    #[test]
    fn builder_assigns_indices_in_append_order() {
        let mol = MoleculeBuilder::new()
            .atom(Element::new("C"), 0.0, 0.0)
            .skip_atom()
            .atom(Element::new("O"), 1.0, 0.0)
            .build();
        let indices: Vec<usize> = mol.atoms().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 2]);
    }

    #[test]
    fn lattice_is_captured_per_append() {
        let mol = MoleculeBuilder::new()
            .atom(Element::new("C"), 1.0, 0.0)
            .lattice(Lattice::Triangular)
            .atom(Element::new("C"), 1.0, 0.0)
            .build();
        let positions: Vec<Vec2> = mol.atoms().map(|a| a.position).collect();
        assert_eq!(positions[0], Vec2::new(1.0, 0.0));
        assert!((positions[1] - Vec2::new(3.0_f32.sqrt() / 2.0, 0.5)).length() < 1e-6);
    }

    #[test]
    fn subset_renumbers_contiguously_in_declared_order() {
        let mol = chain(4);
        let sub = mol.subset(&[3, 1]);
        let indices: Vec<usize> = sub.atoms().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 1]);
        // Atom 1 was declared before atom 3, so keeps the lower index.
        let positions: Vec<f32> = sub.atoms().map(|a| a.position.x).collect();
        assert_eq!(positions, vec![1.0, 3.0]);
    }

    #[test]
    fn subset_drops_items_crossing_the_boundary() {
        let mol = chain(4);
        let sub = mol.subset(&[1, 2]);
        let bonds: Vec<&Bond> = sub
            .contents()
            .iter()
            .filter_map(|item| match item {
                Item::Bond(b) => Some(b),
                _ => None,
            })
            .collect();
        // Only the 1-2 bond survives, renumbered to 0-1.
        assert_eq!(bonds.len(), 1);
        assert_eq!((bonds[0].a, bonds[0].b), (0, 1));
    }

    #[test]
    fn subset_drops_bracket_groups_partially_outside() {
        let mol = MoleculeBuilder::new()
            .invisible_atom(0.0, 0.0)
            .invisible_atom(1.0, 0.0)
            .invisible_atom(2.0, 0.0)
            .brackets(Brackets::polymer(vec![1, 2]))
            .build();
        let sub = mol.subset(&[0, 1]);
        assert!(!sub
            .contents()
            .iter()
            .any(|item| matches!(item, Item::Brackets(_))));
    }

    #[test]
    fn increment_shifts_every_reference() {
        let mol = chain(2).increment(5);
        let indices: Vec<usize> = mol.atoms().map(|a| a.index).collect();
        assert_eq!(indices, vec![5, 6]);
        let Item::Bond(bond) = &mol.contents()[2] else {
            panic!("expected a bond");
        };
        assert_eq!((bond.a, bond.b), (5, 6));
    }

    #[test]
    fn concatenation_via_extend_keeps_both_halves() {
        let left = chain(2);
        let right = chain(2).increment(2);
        let joined = MoleculeBuilder::new()
            .extend(&left)
            .extend(&right)
            .bond(1, 2)
            .build();
        assert_eq!(joined.atoms().count(), 4);
        let indices: Vec<usize> = joined.atoms().map(|a| a.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_bounds_are_zero() {
        let mol = MoleculeBuilder::new().build();
        assert_eq!(mol.bounds(), (Vec2::ZERO, Vec2::ZERO));
    }

    #[test]
    fn bounds_cover_all_atom_positions() {
        let mol = MoleculeBuilder::new()
            .invisible_atom(-1.0, 2.0)
            .invisible_atom(3.0, -0.5)
            .build();
        let (min, max) = mol.bounds();
        assert_eq!(min, Vec2::new(-1.0, -0.5));
        assert_eq!(max, Vec2::new(3.0, 2.0));
    }

    #[test]
    fn bounds_with_size_expands_by_per_atom_extents() {
        let mol = MoleculeBuilder::new()
            .invisible_atom(0.0, 0.0)
            .invisible_atom(2.0, 0.0)
            .build();
        let (min, max) = mol.bounds_with_size(
            |p| p * 10.0,
            |_atom| (Vec2::new(3.0, 4.0), Vec2::new(5.0, 6.0)),
        );
        assert_eq!(min, Vec2::new(-3.0, -4.0));
        assert_eq!(max, Vec2::new(25.0, 6.0));
    }
}
