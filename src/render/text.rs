//! Label placement and measurement.
//!
//! The text phase walks atoms in declaration order, draws each visible
//! label, and records every label's pixel width keyed by label identity.
//! The width table feeds bounds computation and bond clipping in the
//! geometry phase, so this runs first.

use glam::Vec2;

use crate::molecule::{Atom, Label};
use crate::options::DEBUG_COLOR;
use crate::render::{RenderTarget, Renderer};

/// Leftward half-offset that centers a label of the given width:
/// `floor(-width / 2)`.
fn half_left(width: i32) -> i32 {
    (-width).div_euclid(2)
}

impl<T: RenderTarget> Renderer<'_, T> {
    /// Measured width of a label, zero when it was never placed.
    pub(super) fn width_of(&self, label: &Label) -> i32 {
        self.widths.get(label).copied().unwrap_or(0)
    }

    /// Measure a label and record it in the width table.
    fn measure(&mut self, label: &Label) -> i32 {
        let width = self.target.text_width(&label.text());
        let _ = self.widths.insert(label.clone(), width);
        width
    }

    /// Place an atom's primary label and its substituents.
    ///
    /// Invisible labels are measured but not drawn; their positions still
    /// anchor bond endpoints.
    pub(super) fn place_atom_text(&mut self, atom: &Atom) {
        let screen = self.layout.to_screen(atom.position);
        let width = self.measure(&atom.label);
        if !atom.label.is_invisible() {
            let color = self.options.colors.color_for(&atom.label.element);
            self.target.text(
                &atom.label.text(),
                screen.x + half_left(width) + 1,
                screen.y + 1,
                color,
            );
        }
        if let Some(right) = &atom.right {
            // Right labels hang off the primary label's half-width, not
            // their own.
            let _ = self.measure(right);
            if !right.is_invisible() {
                let color = self.options.colors.color_for(&right.element);
                self.target.text(
                    &right.text(),
                    screen.x + width.div_euclid(2) + 1,
                    screen.y + 1,
                    color,
                );
            }
        }
        if let Some(left) = &atom.left {
            let left_width = self.measure(left);
            if !left.is_invisible() {
                let color = self.options.colors.color_for(&left.element);
                self.target.text(
                    &left.text(),
                    screen.x - left_width + half_left(width),
                    screen.y + 1,
                    color,
                );
            }
        }
        let line_height = self.layout.line_height;
        if let Some(above) = &atom.above {
            let above_width = self.measure(above);
            if !above.is_invisible() {
                let color = self.options.colors.color_for(&above.element);
                self.target.text(
                    &above.text(),
                    screen.x + half_left(above_width) + 1,
                    screen.y - line_height + 1,
                    color,
                );
            }
        }
        if let Some(below) = &atom.below {
            let below_width = self.measure(below);
            if !below.is_invisible() {
                let color = self.options.colors.color_for(&below.element);
                self.target.text(
                    &below.text(),
                    screen.x + half_left(below_width) + 1,
                    screen.y + line_height + 1,
                    color,
                );
            }
        }
        if self.options.layout.debug {
            self.target.text(
                &atom.index.to_string(),
                screen.x - 5,
                screen.y - 2,
                DEBUG_COLOR,
            );
        }
    }

    /// The `(left/top, right/bottom)` extents an atom's labels contribute
    /// to its footprint, from the width table.
    pub(super) fn size_of_atom(&self, atom: &Atom) -> (Vec2, Vec2) {
        let lh = self.layout.line_height as f32;
        let mut x0 = 0.0_f32;
        let mut x1 = 0.0_f32;
        let mut y0 = 0.0_f32;
        let mut y1 = 0.0_f32;
        if !atom.is_invisible() {
            let half = self.width_of(&atom.label) as f32 / 2.0;
            x0 += half;
            x1 += half;
            y0 += lh / 2.0;
            y1 += lh / 2.0;
        }
        if let Some(right) = &atom.right {
            if !right.is_invisible() {
                x1 += 1.0 + self.width_of(right) as f32;
            }
        }
        if let Some(left) = &atom.left {
            if !left.is_invisible() {
                x0 += 1.0 + self.width_of(left) as f32;
            }
        }
        if let Some(above) = &atom.above {
            if !above.is_invisible() {
                y0 += 1.0 + lh;
                let half = self.width_of(above) as f32 / 2.0;
                x0 = x0.max(half);
                x1 = x1.max(half);
            }
        }
        if let Some(below) = &atom.below {
            if !below.is_invisible() {
                y1 += 1.0 + lh;
                let half = self.width_of(below) as f32 / 2.0;
                x0 = x0.max(half);
                x1 = x1.max(half);
            }
        }
        (Vec2::new(x0, y0), Vec2::new(x1, y1))
    }

    /// Canvas-space bounding box of a subset of atoms, labels included.
    pub(super) fn subset_bounds(&self, atoms: &[usize]) -> (Vec2, Vec2) {
        self.molecule.subset(atoms).bounds_with_size(
            |p| self.layout.to_scaled(p),
            |atom| self.size_of_atom(atom),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::molecule::{Element, MoleculeBuilder, Substituents};
    use crate::options::Options;
    use crate::render::test_target::Recorder;
    use crate::render::render;

    #[test]
    fn primary_labels_center_on_the_atom_position() {
        let mol = MoleculeBuilder::new()
            .atom(Element::new("C"), 0.0, 0.0)
            .atom(Element::new("C"), 1.0, 0.0)
            .bond(0, 1)
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        // Screens are (8,4) and (28,4); "C" is 6px wide, so each label
        // lands at floor(-6/2)+1 = -2 from its center, one row down.
        let positions: Vec<(i32, i32)> = target.texts.iter().map(|t| (t.1, t.2)).collect();
        assert!(positions.contains(&(6, 5)));
        assert!(positions.contains(&(26, 5)));
    }

    #[test]
    fn invisible_atoms_are_measured_but_not_drawn() {
        let mol = MoleculeBuilder::new()
            .invisible_atom(0.0, 0.0)
            .invisible_atom(1.0, 0.0)
            .bond(0, 1)
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        assert!(target.texts.is_empty());
    }

    #[test]
    fn substituents_offset_from_the_primary_label() {
        let mol = MoleculeBuilder::new()
            .atom_full(
                Element::new("O"),
                Substituents {
                    left: Some(Element::new("H").into()),
                    below: Some(Element::new("H").count(2)),
                    ..Substituents::default()
                },
                0.0,
                0.0,
            )
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        // The left substituent on the leftmost atom widens the left
        // margin, so the atom's screen position is (20, 4). "O" and "H"
        // are 6px wide, "H₂" is 12px.
        let find = |s: &str| {
            target
                .texts
                .iter()
                .find(|t| t.0 == s)
                .map(|t| (t.1, t.2))
                .unwrap()
        };
        assert_eq!(find("O"), (18, 5));
        // Left: x - left_width + floor(-w/2), no extra +1.
        assert_eq!(find("H"), (20 - 6 - 3, 5));
        // Below: centered on its own width, one line down.
        assert_eq!(find("H₂"), (20 - 6 + 1, 4 + 9 + 1));
    }

    #[test]
    fn debug_overlay_draws_atom_indices() {
        let mol = MoleculeBuilder::new()
            .atom(Element::new("C"), 0.0, 0.0)
            .build();
        let options = Options {
            layout: crate::options::LayoutOptions {
                debug: true,
                ..crate::options::LayoutOptions::default()
            },
            ..Options::default()
        };
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        assert!(!target.texts.iter().any(|t| t.0 == "0"));
        let mut target = Recorder::default();
        render(&mol, &options, &mut target);
        assert!(target.texts.iter().any(|t| t.0 == "0"));
    }
}
