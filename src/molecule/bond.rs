//! Bonds and their line-style lists.

/// One drawable line within a bond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineStyle {
    /// Plain solid segment.
    Solid,
    /// Dashed segment (2px period, 1px on).
    Dotted,
    /// Double-width filled wedge.
    Thick,
    /// Tapered hash wedge pointing into the page.
    Inward,
    /// Solid wedge pointing out of the page.
    Outward,
}

impl LineStyle {
    /// Serialized token for this style.
    pub fn name(self) -> &'static str {
        match self {
            Self::Solid => "solid",
            Self::Dotted => "dotted",
            Self::Thick => "thick",
            Self::Inward => "inward",
            Self::Outward => "outward",
        }
    }

    /// Parse a serialized style token.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "solid" => Some(Self::Solid),
            "dotted" => Some(Self::Dotted),
            "thick" => Some(Self::Thick),
            "inward" => Some(Self::Inward),
            "outward" => Some(Self::Outward),
            _ => None,
        }
    }

    /// Perpendicular offset units this line reserves. Thick lines take
    /// three so neighbors clear the wedge.
    pub(crate) fn units(self) -> i32 {
        match self {
            Self::Thick => 3,
            _ => 1,
        }
    }
}

/// A bond between two atom indices, drawn as one or more offset lines.
///
/// The line list is never empty; multi-line lists produce double/triple
/// bonds and mixed styles. `centered` straddles the lines symmetrically
/// about the bond's centerline instead of stacking them to one side.
#[derive(Debug, Clone, PartialEq)]
pub struct Bond {
    /// First endpoint atom index.
    pub a: usize,
    /// Second endpoint atom index.
    pub b: usize,
    /// Whether the lines straddle the centerline symmetrically.
    pub centered: bool,
    /// Line styles, in offset order. Always non-empty.
    pub lines: Vec<LineStyle>,
}

impl Bond {
    /// A plain single solid bond.
    pub fn single(a: usize, b: usize) -> Self {
        Self {
            a,
            b,
            centered: false,
            lines: vec![LineStyle::Solid],
        }
    }

    /// A bond with an explicit line-style list.
    pub fn with_lines(a: usize, b: usize, centered: bool, lines: Vec<LineStyle>) -> Self {
        Self {
            a,
            b,
            centered,
            lines,
        }
    }

    /// Decode a legacy single-token bond type into `(centered, lines)`.
    ///
    /// These tokens predate explicit line lists and remain supported in
    /// definition files.
    pub fn legacy_lines(token: &str) -> Option<(bool, Vec<LineStyle>)> {
        use LineStyle::{Dotted, Inward, Outward, Solid, Thick};
        let (centered, lines) = match token {
            "single" => (false, vec![Solid]),
            "double" => (false, vec![Solid, Solid]),
            "double_centered" => (true, vec![Solid, Solid]),
            "triple" => (false, vec![Solid, Solid, Solid]),
            "one_and_half" => (false, vec![Solid, Dotted]),
            "quadruple" => (false, vec![Solid; 4]),
            "quadruple_centered" => (true, vec![Solid; 4]),
            "dotted" => (true, vec![Dotted]),
            "outward" => (false, vec![Outward]),
            "inward" => (false, vec![Inward]),
            "thick" => (false, vec![Thick]),
            _ => return None,
        };
        Some((centered, lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn legacy_quadruple_centered_maps_to_four_solid_lines() {
        let (centered, lines) = Bond::legacy_lines("quadruple_centered").unwrap();
        assert!(centered);
        assert_eq!(lines, vec![LineStyle::Solid; 4]);
    }

    #[test]
    fn legacy_one_and_half_mixes_solid_and_dotted() {
        let (centered, lines) = Bond::legacy_lines("one_and_half").unwrap();
        assert!(!centered);
        assert_eq!(lines, vec![LineStyle::Solid, LineStyle::Dotted]);
    }

    #[test]
    fn legacy_dotted_is_centered() {
        let (centered, lines) = Bond::legacy_lines("dotted").unwrap();
        assert!(centered);
        assert_eq!(lines, vec![LineStyle::Dotted]);
    }

    #[test]
    fn unknown_legacy_token_is_rejected() {
        assert!(Bond::legacy_lines("quintuple").is_none());
    }

    #[test]
    fn style_names_round_trip() {
        for style in [
            LineStyle::Solid,
            LineStyle::Dotted,
            LineStyle::Thick,
            LineStyle::Inward,
            LineStyle::Outward,
        ] {
            assert_eq!(LineStyle::from_name(style.name()), Some(style));
        }
    }
}
