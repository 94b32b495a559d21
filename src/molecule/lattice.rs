//! Lattice → Cartesian coordinate transforms.

use glam::{Mat2, Vec2};

/// Coordinate lattice for declarative atom placement.
///
/// The transform is applied exactly once, when an atom is appended to a
/// builder; atoms store only the resulting Cartesian position. Switching
/// the lattice mid-build affects later appends only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lattice {
    /// Triangular lattice for hexagonal/triangular skeletal structures:
    /// `u` and `v` both advance by 60° steps around the horizontal.
    Triangular,
    /// Identity transform for tetrahedral/square layouts.
    #[default]
    Orthogonal,
}

impl Lattice {
    /// The 2×2 lattice → Cartesian matrix.
    pub fn matrix(self) -> Mat2 {
        match self {
            Self::Triangular => {
                let h = 3.0_f32.sqrt() / 2.0;
                Mat2::from_cols(Vec2::new(h, 0.5), Vec2::new(h, -0.5))
            }
            Self::Orthogonal => Mat2::IDENTITY,
        }
    }

    /// Map a lattice coordinate to Cartesian space.
    pub fn to_cartesian(self, uv: Vec2) -> Vec2 {
        self.matrix() * uv
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orthogonal_is_identity() {
        let p = Vec2::new(2.5, -1.0);
        assert_eq!(Lattice::Orthogonal.to_cartesian(p), p);
    }

    #[test]
    fn triangular_basis_vectors_mirror_about_the_horizontal() {
        let h = 3.0_f32.sqrt() / 2.0;
        let u = Lattice::Triangular.to_cartesian(Vec2::new(1.0, 0.0));
        let v = Lattice::Triangular.to_cartesian(Vec2::new(0.0, 1.0));
        assert!((u - Vec2::new(h, 0.5)).length() < 1e-6);
        assert!((v - Vec2::new(h, -0.5)).length() < 1e-6);
    }

    #[test]
    fn triangular_diagonal_lands_on_the_axis() {
        // u + v cancels the vertical components: a straight horizontal step.
        let p = Lattice::Triangular.to_cartesian(Vec2::new(1.0, 1.0));
        assert!((p - Vec2::new(3.0_f32.sqrt(), 0.0)).length() < 1e-6);
    }
}
