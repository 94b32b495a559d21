//! Bracket groups and ring annotations.

use glam::{IVec2, Vec2};

use crate::molecule::{Brackets, Ring};
use crate::render::{RenderTarget, Renderer};

impl<T: RenderTarget> Renderer<'_, T> {
    /// Place a bracket group's sub/superscript at the right edge of the
    /// group's bounding box. Runs in the text phase.
    pub(super) fn place_bracket_text(&mut self, brackets: &Brackets) {
        let (min, max) = self.subset_bounds(&brackets.atoms);
        let lh = self.layout.line_height;
        let color = self.options.colors.default_argb();
        if !brackets.sub.is_empty() {
            self.target
                .text(&brackets.sub, max.x as i32 + 9, max.y as i32 + lh - 4, color);
        }
        if !brackets.sup.is_empty() {
            self.target
                .text(&brackets.sup, max.x as i32 + 9, min.y as i32 - 4, color);
        }
    }

    /// Draw four L-shaped corner marks just outside the group's bounding
    /// box.
    pub(super) fn draw_bracket_marks(&mut self, brackets: &Brackets) {
        let (min, max) = self.subset_bounds(&brackets.atoms);
        let lh = self.layout.line_height;
        let color = self.options.colors.default_argb();
        let xl = min.x as i32 - 3;
        let xr = max.x as i32 + 4;
        let yt = min.y as i32 - 1;
        let yb = max.y as i32 + lh + 3;
        for x in [xl, xr] {
            self.h_line(x - 2, x + 2, yt, color);
            self.h_line(x - 2, x + 2, yb, color);
        }
        self.v_line(xl - 2, yt, yt + 4, color);
        self.v_line(xl - 2, yb - 4, yb, color);
        self.v_line(xr + 2, yt, yt + 4, color);
        self.v_line(xr + 2, yb - 4, yb, color);
    }

    /// Plot a stylized ring: 128 single pixels sampled around a circle
    /// centered on the covered atoms' centroid.
    pub(super) fn draw_ring(&mut self, ring: &Ring) {
        let mut centroid = Vec2::ZERO;
        let mut found = 0;
        for &index in &ring.atoms {
            match self.molecule.atom(index) {
                Some(atom) => {
                    centroid += atom.position;
                    found += 1;
                }
                None => log::warn!("ring references missing atom {index}, skipping it"),
            }
        }
        if found == 0 {
            return;
        }
        let centroid = centroid / found as f32;
        let lh = self.layout.line_height;
        let color = self.options.colors.default_argb();
        for part in 0..128 {
            let angle = part as f32 / 64.0 * std::f32::consts::PI;
            let p = centroid + ring.radius * Vec2::new(angle.cos(), angle.sin());
            let r = self.layout.to_screen(p) + IVec2::new(0, lh / 2);
            self.target.pixel(r.x, r.y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::molecule::{Brackets, Element, MoleculeBuilder};
    use crate::options::Options;
    use crate::render::render;
    use crate::render::test_target::Recorder;

    #[test]
    fn bracket_marks_sit_just_outside_the_subset_box() {
        let mol = MoleculeBuilder::new()
            .atom(Element::new("C"), 0.0, 0.0)
            .atom(Element::new("C"), 1.0, 0.0)
            .bond(0, 1)
            .brackets(Brackets::polymer(vec![0, 1]))
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        // Bracketed leftmost atom widens the left margin: screens land at
        // (20,4) and (40,4). Label half-extents (3, 4.5) give a subset
        // box of (17,0)..(43,9), so the mark edges sit at x=14/47 and
        // y=-1/21.
        for (x, y) in [(12, -1), (16, -1), (12, 21), (45, -1), (49, 21)] {
            assert!(target.pixels.contains_key(&(x, y)), "missing mark at ({x},{y})");
        }
        // Corner stubs, not full-height bracket sides.
        assert!(target.pixels.contains_key(&(12, 3)));
        assert!(!target.pixels.contains_key(&(12, 10)));
    }

    #[test]
    fn polymer_subscript_lands_at_the_bottom_right() {
        let mol = MoleculeBuilder::new()
            .atom(Element::new("C"), 0.0, 0.0)
            .atom(Element::new("C"), 1.0, 0.0)
            .brackets(Brackets::polymer(vec![0, 1]))
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        let sub = target.texts.iter().find(|t| t.0 == "n").unwrap();
        assert_eq!((sub.1, sub.2), (43 + 9, 9 + 9 - 4));
    }

    #[test]
    fn ring_samples_a_circle_around_the_centroid() {
        let mol = MoleculeBuilder::new()
            .atom(Element::new("C"), 0.0, 0.0)
            .ring(vec![0], 0.5)
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        // Atom center is (8,8); radius 0.5 at scale 20 is 10px.
        assert!(target.pixels.contains_key(&(18, 8)));
        assert!(target.pixels.contains_key(&(-2, 8)));
    }

    #[test]
    fn ring_skips_missing_atoms_but_still_draws() {
        let mol = MoleculeBuilder::new()
            .atom(Element::new("C"), 0.0, 0.0)
            .ring(vec![0, 9], 0.5)
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        assert!(!target.pixels.is_empty());
    }

    #[test]
    fn ring_with_only_missing_atoms_draws_nothing() {
        let mol = MoleculeBuilder::new()
            .atom(Element::new("C"), 0.0, 0.0)
            .ring(vec![4, 5], 0.5)
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        assert!(target.pixels.is_empty());
    }
}
