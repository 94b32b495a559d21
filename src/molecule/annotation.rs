//! Bracket-group and ring annotations.

/// A bracket group: corner marks and sub/superscript text drawn around a
/// subset of atoms (polymer repeat unit, ion charge).
#[derive(Debug, Clone, PartialEq)]
pub struct Brackets {
    /// Subscript placed at the bottom-right of the group box.
    pub sub: String,
    /// Superscript placed at the top-right of the group box.
    pub sup: String,
    /// Indices of the enclosed atoms.
    pub atoms: Vec<usize>,
}

impl Brackets {
    /// Polymer repeat unit: subscript `n`.
    pub fn polymer(atoms: Vec<usize>) -> Self {
        Self {
            sub: "n".to_string(),
            sup: String::new(),
            atoms,
        }
    }

    /// Negative ion: superscript `-`.
    pub fn neg_ion(atoms: Vec<usize>) -> Self {
        Self {
            sub: String::new(),
            sup: "-".to_string(),
            atoms,
        }
    }

    /// Positive ion: superscript `+`.
    pub fn pos_ion(atoms: Vec<usize>) -> Self {
        Self {
            sub: String::new(),
            sup: "+".to_string(),
            atoms,
        }
    }
}

/// A ring annotation: a sampled circle of the given radius around the
/// centroid of the covered atoms (aromatic-ring marker).
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    /// Indices of the atoms whose centroid centers the circle.
    pub atoms: Vec<usize>,
    /// Circle radius in Cartesian units.
    pub radius: f32,
}
