//! Bond drawing: offset line derivation, label avoidance, and the
//! style-specific pixel procedures.

use glam::IVec2;

use crate::molecule::{Atom, Bond, LineStyle};
use crate::raster::{always, plot_line};
use crate::render::{RenderTarget, Renderer};

/// Round half-up, matching integer offset derivation everywhere in the
/// renderer (`-0.5` rounds to `0`, not `-1`).
fn round(v: f32) -> i32 {
    (v + 0.5).floor() as i32
}

/// Perpendicular offsets, in full line-spacing units, for each line of a
/// bond.
///
/// Lines stack at 0, 1, 2... on one side; a thick line reserves three
/// units so its wedge clears the neighbors. `centered` shifts the whole
/// stack so it straddles 0 symmetrically.
fn line_offsets(lines: &[LineStyle], centered: bool) -> Vec<f32> {
    let total: i32 = lines.iter().map(|l| l.units()).sum();
    let shift = if centered {
        (total - 1) as f32 / 2.0
    } else {
        0.0
    };
    let mut position = 0;
    lines
        .iter()
        .map(|line| {
            let offset = position as f32 - shift;
            position += line.units();
            offset
        })
        .collect()
}

/// Integer cap segment for hash/thick wedges: the pixels of a short
/// perpendicular line through the origin, half a spacing unit each way.
fn cap_targets(add: IVec2) -> Vec<IVec2> {
    let mut targets = Vec::new();
    plot_line(
        add.x / 2,
        add.y / 2,
        -add.x / 2,
        -add.y / 2,
        &mut always,
        &mut |x, y| targets.push(IVec2::new(x, y)),
    );
    targets
}

/// Label footprint of one bond endpoint, in canvas pixels.
struct EndpointZone {
    center: IVec2,
    width: i32,
    invisible: bool,
    above: Option<i32>,
    right: Option<i32>,
    below: Option<i32>,
    left: Option<i32>,
}

impl EndpointZone {
    /// Whether a pixel is clear of every label box around this endpoint.
    /// Boxes extend 2/3 of the label width and 2/3 of the line height.
    fn allows(&self, x: i32, y: i32, lh: i32) -> bool {
        let dx = (self.center.x - x).abs();
        let dy = (self.center.y - y).abs();
        if dx < self.width * 2 / 3 && !self.invisible && dy < lh * 2 / 3 {
            return false;
        }
        if let Some(w) = self.above {
            if dx < w * 2 / 3 && (self.center.y - lh - 1 - y).abs() < lh * 2 / 3 {
                return false;
            }
        }
        if let Some(w) = self.below {
            if dx < w * 2 / 3 && (self.center.y + lh + 1 - y).abs() < lh * 2 / 3 {
                return false;
            }
        }
        if let Some(w) = self.right {
            if (self.center.x + (self.width + w) / 2 + 1 - x).abs() < w * 2 / 3 && dy < lh * 2 / 3 {
                return false;
            }
        }
        if let Some(w) = self.left {
            if (self.center.x - (self.width + w) / 2 - 1 - x).abs() < w * 2 / 3 && dy < lh * 2 / 3 {
                return false;
            }
        }
        true
    }
}

/// Pixel-acceptance predicate for one bond: clear of both endpoints'
/// label boxes. A bond between two invisible placeholders has nothing to
/// avoid.
struct Exclusion {
    a: EndpointZone,
    b: EndpointZone,
    line_height: i32,
    both_invisible: bool,
}

impl Exclusion {
    fn allows(&self, x: i32, y: i32) -> bool {
        if self.both_invisible {
            return true;
        }
        self.a.allows(x, y, self.line_height) && self.b.allows(x, y, self.line_height)
    }
}

impl<T: RenderTarget> Renderer<'_, T> {
    fn endpoint_zone(&self, atom: &Atom, center: IVec2) -> EndpointZone {
        EndpointZone {
            center,
            width: self.width_of(&atom.label),
            invisible: atom.is_invisible(),
            above: atom.above.as_ref().map(|l| self.width_of(l)),
            right: atom.right.as_ref().map(|l| self.width_of(l)),
            below: atom.below.as_ref().map(|l| self.width_of(l)),
            left: atom.left.as_ref().map(|l| self.width_of(l)),
        }
    }

    /// Draw one bond as its list of offset lines.
    pub(super) fn draw_bond(&mut self, bond: &Bond) {
        let (Some(atom_a), Some(atom_b)) = (self.molecule.atom(bond.a), self.molecule.atom(bond.b))
        else {
            log::warn!(
                "bond between atoms {} and {} references a missing atom, skipping",
                bond.a,
                bond.b
            );
            return;
        };
        let lh = self.layout.line_height;
        let start = self.layout.to_screen(atom_a.position) + IVec2::new(0, lh / 2);
        let end = self.layout.to_screen(atom_b.position) + IVec2::new(0, lh / 2);
        if start == end {
            return;
        }
        let zones = Exclusion {
            a: self.endpoint_zone(atom_a, start),
            b: self.endpoint_zone(atom_b, end),
            line_height: lh,
            both_invisible: atom_a.is_invisible() && atom_b.is_invisible(),
        };
        let color_a = self.options.colors.color_for(&atom_a.label.element);
        let color_b = self.options.colors.color_for(&atom_b.label.element);
        // Bonds are two-tone: each pixel takes the nearer endpoint's color.
        let color_at = move |x: i32, y: i32| {
            let da = i64::from(x - start.x).pow(2) + i64::from(y - start.y).pow(2);
            let db = i64::from(x - end.x).pow(2) + i64::from(y - end.y).pow(2);
            if da < db {
                color_a
            } else {
                color_b
            }
        };
        let dxf = (end.x - start.x) as f32;
        let dyf = (end.y - start.y) as f32;
        let length = dxf.hypot(dyf);
        // Full perpendicular spacing between neighboring lines.
        let add_xf = dyf / length * 2.0;
        let add_yf = -dxf / length * 2.0;
        let add = IVec2::new(round(add_xf), round(add_yf));
        let caps = cap_targets(add);
        // Dash bands measure arc distance from the un-offset start so
        // parallel lines of one bond stay in phase.
        let on_band = |x: i32, y: i32, period: f64| {
            f64::from(x - start.x).hypot(f64::from(y - start.y)) % period < 1.0
        };
        let target = &mut *self.target;
        for (style, unit) in bond.lines.iter().zip(line_offsets(&bond.lines, bond.centered)) {
            let off = IVec2::new(round(unit * add_xf), round(unit * add_yf));
            match style {
                LineStyle::Solid => {
                    plot_line(
                        start.x + off.x,
                        start.y + off.y,
                        end.x + off.x,
                        end.y + off.y,
                        &mut |x, y, _| zones.allows(x, y),
                        &mut |x, y| target.pixel(x, y, color_at(x, y)),
                    );
                }
                LineStyle::Dotted => {
                    plot_line(
                        start.x + off.x,
                        start.y + off.y,
                        end.x + off.x,
                        end.y + off.y,
                        &mut |x, y, _| zones.allows(x, y) && on_band(x, y, 2.0),
                        &mut |x, y| target.pixel(x, y, color_at(x, y)),
                    );
                }
                LineStyle::Inward | LineStyle::Outward => {
                    // Fan from the bare start to a 2x2-supersampled cap
                    // around the far end; drawing halves the coordinates
                    // back down.
                    let mut draw_halved =
                        |x: i32, y: i32| target.pixel(x / 2, y / 2, color_at(x / 2, y / 2));
                    let inward = *style == LineStyle::Inward;
                    let mut pred = |x: i32, y: i32, _: i32| {
                        zones.allows(x / 2, y / 2) && (!inward || on_band(x / 2, y / 2, 3.0))
                    };
                    for p in &caps {
                        let tip = (end + off + *p) * 2;
                        for (ex, ey) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                            plot_line(
                                start.x * 2,
                                start.y * 2,
                                tip.x + ex,
                                tip.y + ey,
                                &mut pred,
                                &mut draw_halved,
                            );
                        }
                    }
                }
                LineStyle::Thick => {
                    // Same cap technique, but translating the whole line
                    // instead of fanning from a point: a filled
                    // double-width band.
                    let mut draw_halved =
                        |x: i32, y: i32| target.pixel(x / 2, y / 2, color_at(x / 2, y / 2));
                    let mut pred = |x: i32, y: i32, _: i32| zones.allows(x / 2, y / 2);
                    for p in &caps {
                        let from = (start + off + *p) * 2;
                        let to = (end + off + *p) * 2;
                        for (ex, ey) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
                            plot_line(
                                from.x + ex,
                                from.y + ey,
                                to.x + ex,
                                to.y + ey,
                                &mut pred,
                                &mut draw_halved,
                            );
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::molecule::{Element, Molecule, MoleculeBuilder};
    use crate::options::Options;
    use crate::render::render;
    use crate::render::test_target::Recorder;

    #[test]
    fn offsets_stack_one_per_unit_when_not_centered() {
        let lines = vec![LineStyle::Solid; 3];
        assert_eq!(line_offsets(&lines, false), vec![0.0, 1.0, 2.0]);
    }

    #[test]
    fn centered_offsets_are_symmetric_about_zero() {
        let double = vec![LineStyle::Solid; 2];
        assert_eq!(line_offsets(&double, true), vec![-0.5, 0.5]);
        let quadruple = vec![LineStyle::Solid; 4];
        assert_eq!(line_offsets(&quadruple, true), vec![-1.5, -0.5, 0.5, 1.5]);
    }

    #[test]
    fn thick_lines_reserve_three_units() {
        let lines = vec![LineStyle::Thick, LineStyle::Solid];
        assert_eq!(line_offsets(&lines, false), vec![0.0, 3.0]);
    }

    #[test]
    fn exclusion_zone_covers_two_thirds_of_the_label() {
        let zone = EndpointZone {
            center: IVec2::new(8, 8),
            width: 6,
            invisible: false,
            above: None,
            right: None,
            below: None,
            left: None,
        };
        // 6 * 2/3 = 4 wide, 9 * 2/3 = 6 tall.
        assert!(!zone.allows(8, 8, 9));
        assert!(!zone.allows(11, 12, 9));
        assert!(zone.allows(12, 8, 9));
        assert!(zone.allows(8, 14, 9));
    }

    #[test]
    fn invisible_pairs_have_no_exclusion() {
        let zone = |center| EndpointZone {
            center,
            width: 0,
            invisible: true,
            above: None,
            right: None,
            below: None,
            left: None,
        };
        let excl = Exclusion {
            a: zone(IVec2::new(0, 0)),
            b: zone(IVec2::new(20, 0)),
            line_height: 9,
            both_invisible: true,
        };
        assert!(excl.allows(0, 0));
        assert!(excl.allows(20, 0));
    }

    fn ethylene() -> Molecule {
        MoleculeBuilder::new()
            .atom(Element::new("C"), 0.0, 0.0)
            .atom(Element::new("C"), 1.0, 0.0)
            .bond_with(0, 1, false, vec![LineStyle::Solid; 2])
            .build()
    }

    #[test]
    fn double_bond_draws_two_parallel_rows() {
        let mut target = Recorder::default();
        render(&ethylene(), &Options::default(), &mut target);
        // Endpoints sit at (8,8) and (28,8); the second line offsets one
        // full spacing upward (add_y = -2).
        assert!(target.pixels.contains_key(&(16, 8)));
        assert!(target.pixels.contains_key(&(16, 6)));
        assert!(!target.pixels.contains_key(&(16, 7)));
    }

    #[test]
    fn bond_lines_clip_around_both_labels() {
        let mut target = Recorder::default();
        render(&ethylene(), &Options::default(), &mut target);
        // "C" is 6px wide: pixels within 4px horizontally and 6px
        // vertically of either endpoint are excluded.
        for y in [6, 8] {
            assert!(!target.pixels.contains_key(&(9, y)));
            assert!(!target.pixels.contains_key(&(27, y)));
            assert!(target.pixels.contains_key(&(12, y)));
            assert!(target.pixels.contains_key(&(24, y)));
        }
    }

    #[test]
    fn bonds_are_two_tone_split_at_the_midpoint() {
        // Table-resolved elements carry their CPK colors.
        let table = crate::molecule::ElementTable::standard();
        let mol = MoleculeBuilder::new()
            .atom(table.resolve("C"), 0.0, 0.0)
            .atom(table.resolve("O"), 1.0, 0.0)
            .bond(0, 1)
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        assert_eq!(target.pixels.get(&(13, 8)), Some(&0xff90_9090));
        assert_eq!(target.pixels.get(&(23, 8)), Some(&0xffff_0d0d));
    }

    #[test]
    fn dotted_bonds_skip_the_off_band() {
        let mol = MoleculeBuilder::new()
            .invisible_atom(0.0, 0.0)
            .invisible_atom(1.0, 0.0)
            .bond_with(0, 1, false, vec![LineStyle::Dotted])
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        // Endpoints (8,3)+(0,4) and (28,7): invisible atoms use the 3px
        // top margin. Distance from start alternates the 2px band.
        let row: Vec<i32> = {
            let mut xs: Vec<i32> = target.pixels.keys().map(|&(x, _)| x).collect();
            xs.sort_unstable();
            xs
        };
        assert!(!row.is_empty());
        // Every other pixel along the run is skipped.
        assert!(row.len() < 21);
    }

    #[test]
    fn bond_to_a_missing_atom_is_skipped() {
        let mol = MoleculeBuilder::new()
            .atom(Element::new("C"), 0.0, 0.0)
            .bond(0, 7)
            .build();
        let mut target = Recorder::default();
        render(&mol, &Options::default(), &mut target);
        assert!(target.pixels.is_empty());
    }

    #[test]
    fn cap_targets_span_the_perpendicular() {
        let targets = cap_targets(IVec2::new(0, -2));
        assert!(targets.contains(&IVec2::new(0, -1)));
        assert!(targets.contains(&IVec2::new(0, 0)));
        assert!(targets.contains(&IVec2::new(0, 1)));
    }
}
