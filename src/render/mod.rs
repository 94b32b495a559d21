//! Diagram rendering: label placement, canvas layout, bond and
//! annotation drawing.
//!
//! Rendering is a pure, single-threaded pass over a finished graph. Each
//! call runs two phases in declaration order: the text phase places and
//! measures every label (building the width table), then the geometry
//! phase draws bonds, bracket marks, and rings using those widths for
//! bounds and label avoidance. Pixels land wherever the caller's
//! [`RenderTarget`] puts them.

mod annotation;
mod bond;
mod text;

use glam::{IVec2, Vec2};
use rustc_hash::{FxHashMap, FxHashSet};

use crate::molecule::{Item, Label, Molecule};
use crate::options::Options;

/// Font measurements the layout depends on. Widths are unknown to the
/// engine until the host's font reports them.
pub trait FontMetrics {
    /// Height of one text line in pixels.
    fn line_height(&self) -> i32;
    /// Pixel width of a rendered string.
    fn text_width(&self, text: &str) -> i32;
}

/// Pixel-operation sink for one render pass.
///
/// The engine draws single pixels and text runs; the target owns the
/// surface and may clip or buffer however it likes. Later draws paint
/// over earlier ones at the same pixel.
pub trait RenderTarget: FontMetrics {
    /// Write one ARGB pixel.
    fn pixel(&mut self, x: i32, y: i32, argb: u32);
    /// Draw a text run with its top-left corner at `(x, y)`.
    fn text(&mut self, text: &str, x: i32, y: i32, argb: u32);
}

/// Canvas layout derived from a graph's bounds: scale, origin, margins.
#[derive(Debug, Clone)]
pub struct Layout {
    origin: Vec2,
    size: IVec2,
    scale: f32,
    line_height: i32,
    /// A visible atom sits on the top edge.
    top: bool,
    /// A visible atom on the top edge has an above-substituent.
    top_top: bool,
    /// A visible atom on the bottom edge has a below-substituent.
    bot_bot: bool,
    /// A visible atom on the left edge has a left-substituent or sits in
    /// a bracket group, so the left margin widens.
    left_left: bool,
}

impl Layout {
    /// Compute the layout for one graph at the given scale.
    pub fn new(molecule: &Molecule, scale: f32, line_height: i32) -> Self {
        let (min, max) = molecule.bounds();
        let diff = ((max - min) * scale).ceil();
        let origin = Vec2::new(min.x, max.y);
        let bracketed: FxHashSet<usize> = molecule
            .contents()
            .iter()
            .filter_map(|item| match item {
                Item::Brackets(p) => Some(p.atoms.iter().copied()),
                _ => None,
            })
            .flatten()
            .collect();
        let mut top = false;
        let mut top_top = false;
        let mut bot_bot = false;
        let mut left_left = false;
        for atom in molecule.atoms() {
            if atom.is_invisible() {
                continue;
            }
            if (origin.y - atom.position.y).abs() < 0.1 {
                top = true;
                top_top |= atom.above.is_some();
            }
            if (min.y - atom.position.y).abs() < 0.1 {
                bot_bot |= atom.below.is_some();
            }
            if (min.x - atom.position.x).abs() < 0.1 {
                left_left |= atom.left.is_some() || bracketed.contains(&atom.index);
            }
        }
        Self {
            origin,
            size: IVec2::new(diff.x as i32, diff.y as i32),
            scale,
            line_height,
            top,
            top_top,
            bot_bot,
            left_left,
        }
    }

    /// Total canvas width in pixels.
    pub fn width(&self) -> i32 {
        self.size.x + 32 + if self.left_left { 12 } else { 0 }
    }

    /// Total canvas height in pixels.
    pub fn height(&self) -> i32 {
        self.size.y + 20
            + if self.bot_bot { 10 } else { 0 }
            + if self.top_top { 10 } else { 0 }
    }

    /// Map a Cartesian position to integer canvas coordinates.
    ///
    /// Cartesian up becomes canvas down, and the top margin depends on
    /// what sits on the top edge.
    pub fn to_screen(&self, xy: Vec2) -> IVec2 {
        let r = (xy - self.origin) * self.scale;
        let lh = self.line_height;
        IVec2::new(
            r.x as i32 + 8 + if self.left_left { 12 } else { 0 },
            -(r.y as i32)
                + if self.top_top {
                    lh * 3 / 2
                } else if self.top {
                    lh / 2
                } else {
                    3
                },
        )
    }

    /// Float variant of [`to_screen`](Self::to_screen), used for subset
    /// bounds where fractional extents matter.
    pub fn to_scaled(&self, xy: Vec2) -> Vec2 {
        let r = (xy - self.origin) * self.scale;
        let lh = self.line_height as f32;
        Vec2::new(
            r.x + 8.0 + if self.left_left { 12.0 } else { 0.0 },
            -r.y + if self.top_top {
                lh * 3.0 / 2.0
            } else if self.top {
                lh / 2.0
            } else {
                3.0
            },
        )
    }
}

/// One render pass over one graph.
struct Renderer<'a, T: RenderTarget> {
    molecule: &'a Molecule,
    options: &'a Options,
    layout: Layout,
    widths: FxHashMap<Label, i32>,
    target: &'a mut T,
}

/// Render a molecule diagram onto a target.
///
/// The target's canvas should be at least [`Layout::width`] by
/// [`Layout::height`] pixels for the same molecule and scale.
pub fn render(molecule: &Molecule, options: &Options, target: &mut impl RenderTarget) {
    let layout = Layout::new(molecule, options.layout.scale, target.line_height());
    let mut renderer = Renderer {
        molecule,
        options,
        layout,
        widths: FxHashMap::default(),
        target,
    };
    renderer.text_phase();
    renderer.geometry_phase();
}

impl<T: RenderTarget> Renderer<'_, T> {
    /// Place and measure every label, in declaration order.
    fn text_phase(&mut self) {
        self.widths.clear();
        for item in self.molecule.contents() {
            match item {
                Item::Atom(atom) => self.place_atom_text(atom),
                Item::Brackets(brackets) => self.place_bracket_text(brackets),
                _ => {}
            }
        }
    }

    /// Draw bonds, bracket marks, and rings, in declaration order.
    fn geometry_phase(&mut self) {
        for item in self.molecule.contents() {
            match item {
                Item::Bond(bond) => self.draw_bond(bond),
                Item::Brackets(brackets) => self.draw_bracket_marks(brackets),
                Item::Ring(ring) => self.draw_ring(ring),
                Item::Atom(_) => {}
            }
        }
    }

    /// Draw a horizontal pixel run, inclusive on both ends.
    fn h_line(&mut self, x0: i32, x1: i32, y: i32, argb: u32) {
        for x in x0.min(x1)..=x0.max(x1) {
            self.target.pixel(x, y, argb);
        }
    }

    /// Draw a vertical pixel run, inclusive on both ends.
    fn v_line(&mut self, x: i32, y0: i32, y1: i32, argb: u32) {
        for y in y0.min(y1)..=y0.max(y1) {
            self.target.pixel(x, y, argb);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_target {
    use super::{FontMetrics, RenderTarget};
    use rustc_hash::FxHashMap;

    /// Recording target with fixed metrics: 6px per char, 9px lines.
    #[derive(Debug, Default)]
    pub struct Recorder {
        pub pixels: FxHashMap<(i32, i32), u32>,
        pub texts: Vec<(String, i32, i32, u32)>,
    }

    impl FontMetrics for Recorder {
        fn line_height(&self) -> i32 {
            9
        }

        fn text_width(&self, text: &str) -> i32 {
            text.chars().count() as i32 * 6
        }
    }

    impl RenderTarget for Recorder {
        fn pixel(&mut self, x: i32, y: i32, argb: u32) {
            let _ = self.pixels.insert((x, y), argb);
        }

        fn text(&mut self, text: &str, x: i32, y: i32, argb: u32) {
            self.texts.push((text.to_string(), x, y, argb));
        }
    }
}
