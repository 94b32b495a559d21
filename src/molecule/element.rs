//! Element symbols, display colors, and the standard element table.

use rustc_hash::FxHashMap;

/// Display color attached to an element symbol.
///
/// `Optional` colors apply only when the render options enable colored
/// atoms; `Always` colors apply unconditionally; `None` falls back to the
/// configured default color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ElementColor {
    /// No element-specific color.
    #[default]
    None,
    /// Use this ARGB color unconditionally.
    Always(u32),
    /// Use this ARGB color only when colored atoms are enabled.
    Optional(u32),
}

/// An element symbol as it appears in a diagram.
///
/// `invisible` marks placeholder lattice vertices: they are never drawn but
/// still occupy a position for bond routing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    /// Display symbol, e.g. `"C"` or `"Cl"`. Empty for the placeholder.
    pub symbol: String,
    /// Placeholder flag: occupies a lattice vertex but is never drawn.
    pub invisible: bool,
    /// Element display color.
    pub color: ElementColor,
}

impl Element {
    /// A visible, uncolored element with the given symbol.
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            invisible: false,
            color: ElementColor::None,
        }
    }

    /// The invisible placeholder element.
    pub fn invisible() -> Self {
        Self {
            symbol: String::new(),
            invisible: true,
            color: ElementColor::None,
        }
    }

    /// The `•` marker used for structureless molecules (e.g. methane drawn
    /// as a single dot).
    pub fn bullet() -> Self {
        Self::new(BULLET_SYMBOL)
    }

    /// Attach a count, forming a [`Label`].
    pub fn count(self, count: u32) -> Label {
        Label {
            element: self,
            count,
        }
    }
}

/// An element with a subscript count: the unit of text the renderer places
/// and measures (`CH₃` is the label `H` with count 3 next to a `C`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Label {
    /// The element being labeled.
    pub element: Element,
    /// Subscript multiplier; 1 renders without a subscript.
    pub count: u32,
}

impl Label {
    /// Whether this label is an invisible placeholder.
    pub fn is_invisible(&self) -> bool {
        self.element.invisible
    }

    /// The text this label renders as: the symbol followed by the count in
    /// subscript digits when the count exceeds one.
    pub fn text(&self) -> String {
        if self.count == 1 {
            return self.element.symbol.clone();
        }
        let mut out = self.element.symbol.clone();
        for digit in self.count.to_string().chars() {
            out.push(subscript_digit(digit));
        }
        out
    }
}

impl From<Element> for Label {
    fn from(element: Element) -> Self {
        element.count(1)
    }
}

impl From<(Element, u32)> for Label {
    fn from((element, count): (Element, u32)) -> Self {
        element.count(count)
    }
}

/// Map an ASCII digit to its Unicode subscript form.
fn subscript_digit(digit: char) -> char {
    char::from_u32('₀' as u32 + (digit as u32 - '0' as u32)).unwrap_or(digit)
}

/// Symbol of the bullet marker element.
pub const BULLET_SYMBOL: &str = "•";

/// Immutable symbol → element table.
///
/// Built once at startup from the standard set (CPK colors); custom
/// elements must be registered before any render call. There is no lazily
/// populated global registry; everything the renderer sees comes from an
/// explicit table.
#[derive(Debug, Clone)]
pub struct ElementTable {
    by_symbol: FxHashMap<String, Element>,
}

impl ElementTable {
    /// An empty table with no standard entries.
    pub fn empty() -> Self {
        Self {
            by_symbol: FxHashMap::default(),
        }
    }

    /// The standard table: all periodic-table symbols with CPK colors,
    /// plus the invisible placeholder and the `•` marker.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        for &(symbol, color) in STANDARD_ELEMENTS {
            table.register(Element {
                symbol: symbol.to_string(),
                invisible: false,
                color: color.map_or(ElementColor::None, ElementColor::Optional),
            });
        }
        table.register(Element::invisible());
        table.register(Element::bullet());
        table
    }

    /// Register a custom element. Replaces any existing entry for the same
    /// symbol.
    pub fn register(&mut self, element: Element) {
        let _ = self.by_symbol.insert(element.symbol.clone(), element);
    }

    /// Look up a registered element by symbol.
    pub fn get(&self, symbol: &str) -> Option<&Element> {
        self.by_symbol.get(symbol)
    }

    /// Resolve a symbol to an element: the registered entry if present,
    /// otherwise a plain visible uncolored element with that symbol.
    pub fn resolve(&self, symbol: &str) -> Element {
        self.get(symbol)
            .cloned()
            .unwrap_or_else(|| Element::new(symbol))
    }
}

impl Default for ElementTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Standard element symbols with their CPK display colors (opaque ARGB).
/// Symbols past Meitnerium have no conventional color.
const STANDARD_ELEMENTS: &[(&str, Option<u32>)] = &[
    ("H", Some(0xffff_ffff)),
    ("He", Some(0xffd9_ffff)),
    ("Li", Some(0xffcc_80ff)),
    ("Be", Some(0xffc2_ff00)),
    ("B", Some(0xffff_b5b5)),
    ("C", Some(0xff90_9090)),
    ("N", Some(0xff30_50f8)),
    ("O", Some(0xffff_0d0d)),
    ("F", Some(0xff90_e050)),
    ("Ne", Some(0xffb3_e3f5)),
    ("Na", Some(0xffab_5cf2)),
    ("Mg", Some(0xff8a_ff00)),
    ("Al", Some(0xffbf_a6a6)),
    ("Si", Some(0xfff0_c8a0)),
    ("P", Some(0xffff_8000)),
    ("S", Some(0xffff_ff30)),
    ("Cl", Some(0xff1f_f01f)),
    ("Ar", Some(0xff80_d1e3)),
    ("K", Some(0xff8f_40d4)),
    ("Ca", Some(0xff3d_ff00)),
    ("Sc", Some(0xffe6_e6e6)),
    ("Ti", Some(0xffbf_c2c7)),
    ("V", Some(0xffa6_a6ab)),
    ("Cr", Some(0xff8a_99c7)),
    ("Mn", Some(0xff9c_7ac7)),
    ("Fe", Some(0xffe0_6633)),
    ("Co", Some(0xfff0_90a0)),
    ("Ni", Some(0xff50_d050)),
    ("Cu", Some(0xffc8_8033)),
    ("Zn", Some(0xff7d_80b0)),
    ("Ga", Some(0xffc2_8f8f)),
    ("Ge", Some(0xff66_8f8f)),
    ("As", Some(0xffbd_80e3)),
    ("Se", Some(0xffff_a100)),
    ("Br", Some(0xffa6_2929)),
    ("Kr", Some(0xff5c_b8d1)),
    ("Rb", Some(0xff70_2eb0)),
    ("Sr", Some(0xff00_ff00)),
    ("Y", Some(0xff94_ffff)),
    ("Zr", Some(0xff94_e0e0)),
    ("Nb", Some(0xff73_c2c9)),
    ("Mo", Some(0xff54_b5b5)),
    ("Tc", Some(0xff3b_9e9e)),
    ("Ru", Some(0xff24_8f8f)),
    ("Rh", Some(0xff0a_7d8c)),
    ("Pd", Some(0xff00_6985)),
    ("Ag", Some(0xffc0_c0c0)),
    ("Cd", Some(0xffff_d98f)),
    ("In", Some(0xffa6_7573)),
    ("Sn", Some(0xff66_8080)),
    ("Sb", Some(0xff9e_63b5)),
    ("Te", Some(0xffd4_7a00)),
    ("I", Some(0xff94_0094)),
    ("Xe", Some(0xff42_9eb0)),
    ("Cs", Some(0xff57_178f)),
    ("Ba", Some(0xff00_c900)),
    ("La", Some(0xff70_d4ff)),
    ("Ce", Some(0xffff_ffc7)),
    ("Pr", Some(0xffd9_ffc7)),
    ("Nd", Some(0xffc7_ffc7)),
    ("Pm", Some(0xffa3_ffc7)),
    ("Sm", Some(0xff8f_ffc7)),
    ("Eu", Some(0xff61_ffc7)),
    ("Gd", Some(0xff45_ffc7)),
    ("Tb", Some(0xff30_ffc7)),
    ("Dy", Some(0xff1f_ffc7)),
    ("Ho", Some(0xff00_ff9c)),
    ("Er", Some(0xff00_e675)),
    ("Tm", Some(0xff00_d452)),
    ("Yb", Some(0xff00_bf38)),
    ("Lu", Some(0xff00_ab24)),
    ("Hf", Some(0xff4d_c2ff)),
    ("Ta", Some(0xff4d_a6ff)),
    ("W", Some(0xff21_94d6)),
    ("Re", Some(0xff26_7dab)),
    ("Os", Some(0xff26_6696)),
    ("Ir", Some(0xff17_5487)),
    ("Pt", Some(0xffd0_d0e0)),
    ("Au", Some(0xffff_d123)),
    ("Hg", Some(0xffb8_b8d0)),
    ("Tl", Some(0xffa6_544d)),
    ("Pb", Some(0xff57_5961)),
    ("Bi", Some(0xff9e_4fb5)),
    ("Po", Some(0xffab_5c00)),
    ("At", Some(0xff75_4f45)),
    ("Rn", Some(0xff42_8296)),
    ("Fr", Some(0xff42_0066)),
    ("Ra", Some(0xff00_7d00)),
    ("Ac", Some(0xff70_abfa)),
    ("Th", Some(0xff00_baff)),
    ("Pa", Some(0xff00_a1ff)),
    ("U", Some(0xff00_8fff)),
    ("Np", Some(0xff00_80ff)),
    ("Pu", Some(0xff00_6bff)),
    ("Am", Some(0xff54_5cf2)),
    ("Cm", Some(0xff78_5ce3)),
    ("Bk", Some(0xff8a_4fe3)),
    ("Cf", Some(0xffa1_36d4)),
    ("Es", Some(0xffb3_1fd4)),
    ("Fm", Some(0xffb3_1fba)),
    ("Md", Some(0xffb3_0da6)),
    ("No", Some(0xffbd_0d87)),
    ("Lr", Some(0xffc7_0066)),
    ("Rf", Some(0xffcc_0059)),
    ("Db", Some(0xffd1_004f)),
    ("Sg", Some(0xffd9_0045)),
    ("Bh", Some(0xffe0_0038)),
    ("Hs", Some(0xffe6_002e)),
    ("Mt", Some(0xffeb_0026)),
    ("Ds", None),
    ("Rg", None),
    ("Cn", None),
    ("Nh", None),
    ("Fl", None),
    ("Mc", None),
    ("Lv", None),
    ("Ts", None),
    ("Og", None),
];
