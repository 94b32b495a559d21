//! The molecule definition format.
//!
//! One JSON object per structure: `{"contents": [...]}` where each entry
//! is a tagged object (`"type"`: `atom`, `bond`, `parens`, or `circle`).
//! Parsing is fail-fast and all-or-nothing; errors name the offending
//! field so hand-authored files can be fixed quickly.

use glam::Vec2;
use serde_json::{json, Map, Value};

use crate::error::ParseError;
use crate::molecule::{
    Atom, Bond, Brackets, Element, ElementColor, ElementTable, Item, Label, Lattice, LineStyle,
    Molecule, Ring,
};

/// Parse a molecule definition from JSON text.
///
/// Bare element symbols are resolved through `table`; inline element
/// objects define their element on the spot.
pub fn parse_molecule(input: &str, table: &ElementTable) -> Result<Molecule, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    parse_molecule_value(&value, table)
}

/// Parse a molecule definition from an already-decoded JSON value.
pub fn parse_molecule_value(value: &Value, table: &ElementTable) -> Result<Molecule, ParseError> {
    let obj = value.as_object().ok_or(ParseError::NotAnObject("molecule"))?;
    let contents = obj.get("contents").ok_or(ParseError::MissingField {
        kind: "molecule",
        field: "contents",
    })?;
    let entries = contents.as_array().ok_or(ParseError::InvalidField {
        kind: "molecule",
        field: "contents",
    })?;
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        let obj = entry.as_object().ok_or(ParseError::NotAnObject("contents"))?;
        let tag = require_str(obj, "contents", "type")?;
        let item = match tag {
            "atom" => Item::Atom(parse_atom(obj, table)?),
            "bond" => Item::Bond(parse_bond(obj)?),
            "parens" => Item::Brackets(parse_parens(obj)?),
            "circle" => Item::Ring(parse_circle(obj)?),
            other => return Err(ParseError::UnknownContentType(other.to_string())),
        };
        items.push(item);
    }
    Ok(Molecule::from_items(items))
}

/// Serialize a molecule back to the definition format.
///
/// Labels whose element matches a `table` entry collapse to the compact
/// symbol (or `[symbol, count]`) form; everything else serializes as an
/// inline element object. Positions always serialize as Cartesian `x`/`y`.
pub fn serialize_molecule(molecule: &Molecule, table: &ElementTable) -> Value {
    let contents: Vec<Value> = molecule
        .contents()
        .iter()
        .map(|item| match item {
            Item::Atom(a) => serialize_atom(a, table),
            Item::Bond(b) => serialize_bond(b),
            Item::Brackets(p) => serialize_parens(p),
            Item::Ring(r) => json!({
                "type": "circle",
                "atoms": r.atoms,
                "radius": r.radius,
            }),
        })
        .collect();
    json!({ "contents": contents })
}

fn parse_atom(obj: &Map<String, Value>, table: &ElementTable) -> Result<Atom, ParseError> {
    let index = require_index(obj, "atom", "index")?;
    let element = obj.get("element").ok_or(ParseError::MissingField {
        kind: "atom",
        field: "element",
    })?;
    let label = parse_label(element, table, "element")?;
    let position = parse_position(obj)?;
    Ok(Atom {
        index,
        label,
        above: optional_label(obj, table, "above")?,
        right: optional_label(obj, table, "right")?,
        below: optional_label(obj, table, "below")?,
        left: optional_label(obj, table, "left")?,
        position,
    })
}

/// `u`/`v` pairs are lattice coordinates and go through the triangular
/// transform; `x`/`y` are already Cartesian. Exactly one pair is required.
fn parse_position(obj: &Map<String, Value>) -> Result<Vec2, ParseError> {
    if obj.contains_key("u") && obj.contains_key("v") {
        let u = require_f32(obj, "atom", "u")?;
        let v = require_f32(obj, "atom", "v")?;
        return Ok(Lattice::Triangular.to_cartesian(Vec2::new(u, v)));
    }
    if obj.contains_key("x") && obj.contains_key("y") {
        let x = require_f32(obj, "atom", "x")?;
        let y = require_f32(obj, "atom", "y")?;
        return Ok(Vec2::new(x, y));
    }
    Err(ParseError::MissingCoordinates)
}

/// A label is a bare symbol string, a `[symbol, count]` pair, or an inline
/// element object `{symbol, invisible?, color?, count?}`.
fn parse_label(
    value: &Value,
    table: &ElementTable,
    field: &'static str,
) -> Result<Label, ParseError> {
    match value {
        Value::String(symbol) => Ok(table.resolve(symbol).count(1)),
        Value::Array(pair) => {
            let [Value::String(symbol), count] = pair.as_slice() else {
                return Err(ParseError::InvalidField {
                    kind: "atom",
                    field,
                });
            };
            let count = count.as_u64().ok_or(ParseError::InvalidField {
                kind: "atom",
                field,
            })?;
            Ok(table.resolve(symbol).count(count as u32))
        }
        Value::Object(obj) => {
            let symbol = require_str(obj, "element", "symbol")?;
            let invisible = match obj.get("invisible") {
                None => false,
                Some(v) => v.as_bool().ok_or(ParseError::InvalidField {
                    kind: "element",
                    field: "invisible",
                })?,
            };
            let color = match obj.get("color") {
                None => ElementColor::None,
                Some(v) => parse_color(v)?,
            };
            let count = match obj.get("count") {
                None => 1,
                Some(v) => v.as_u64().ok_or(ParseError::InvalidField {
                    kind: "element",
                    field: "count",
                })? as u32,
            };
            Ok(Element {
                symbol: symbol.to_string(),
                invisible,
                color,
            }
            .count(count))
        }
        _ => Err(ParseError::InvalidField {
            kind: "atom",
            field,
        }),
    }
}

fn optional_label(
    obj: &Map<String, Value>,
    table: &ElementTable,
    field: &'static str,
) -> Result<Option<Label>, ParseError> {
    obj.get(field)
        .map(|v| parse_label(v, table, field))
        .transpose()
}

/// Colors are `#rrggbb` strings or raw ARGB integers (unconditional), or
/// `{"optional": <color>}` for atom-coloring-gated colors.
fn parse_color(value: &Value) -> Result<ElementColor, ParseError> {
    match value {
        Value::Object(obj) => {
            let inner = obj.get("optional").ok_or(ParseError::InvalidField {
                kind: "element",
                field: "color",
            })?;
            Ok(ElementColor::Optional(parse_argb(inner)?))
        }
        _ => Ok(ElementColor::Always(parse_argb(value)?)),
    }
}

fn parse_argb(value: &Value) -> Result<u32, ParseError> {
    let invalid = ParseError::InvalidField {
        kind: "element",
        field: "color",
    };
    match value {
        Value::String(s) => {
            let hex = s.strip_prefix('#').ok_or(invalid)?;
            if hex.len() != 6 {
                return Err(ParseError::InvalidField {
                    kind: "element",
                    field: "color",
                });
            }
            let rgb = u32::from_str_radix(hex, 16).map_err(|_| ParseError::InvalidField {
                kind: "element",
                field: "color",
            })?;
            Ok(0xff00_0000 | rgb)
        }
        // Integer colors may be negative: ARGB values with the alpha byte
        // set serialize as negative decimals in files written by hosts
        // with signed 32-bit color types.
        Value::Number(_) => value.as_i64().map(|n| n as u32).ok_or(invalid),
        _ => Err(invalid),
    }
}

fn parse_bond(obj: &Map<String, Value>) -> Result<Bond, ParseError> {
    let a = require_index(obj, "bond", "a")?;
    let b = require_index(obj, "bond", "b")?;
    if let Some(lines) = obj.get("lines") {
        let entries = lines.as_array().ok_or(ParseError::InvalidField {
            kind: "bond",
            field: "lines",
        })?;
        if entries.is_empty() {
            return Err(ParseError::EmptyLineList);
        }
        let lines = entries
            .iter()
            .map(|entry| {
                let token = entry.as_str().ok_or(ParseError::InvalidField {
                    kind: "bond",
                    field: "lines",
                })?;
                LineStyle::from_name(token)
                    .ok_or_else(|| ParseError::UnknownLineStyle(token.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let centered = match obj.get("centered") {
            None => false,
            Some(v) => v.as_bool().ok_or(ParseError::InvalidField {
                kind: "bond",
                field: "centered",
            })?,
        };
        return Ok(Bond::with_lines(a, b, centered, lines));
    }
    if let Some(token) = obj.get("bond_type") {
        let token = token.as_str().ok_or(ParseError::InvalidField {
            kind: "bond",
            field: "bond_type",
        })?;
        let (centered, lines) = Bond::legacy_lines(token)
            .ok_or_else(|| ParseError::UnknownBondType(token.to_string()))?;
        return Ok(Bond::with_lines(a, b, centered, lines));
    }
    Ok(Bond::single(a, b))
}

fn parse_parens(obj: &Map<String, Value>) -> Result<Brackets, ParseError> {
    let sub = optional_str(obj, "parens", "sub")?;
    let sup = optional_str(obj, "parens", "sup")?;
    let atoms = require_indices(obj, "parens")?;
    Ok(Brackets { sub, sup, atoms })
}

fn parse_circle(obj: &Map<String, Value>) -> Result<Ring, ParseError> {
    let atoms = require_indices(obj, "circle")?;
    let radius = require_f32(obj, "circle", "radius")?;
    Ok(Ring { atoms, radius })
}

fn serialize_atom(atom: &Atom, table: &ElementTable) -> Value {
    let mut obj = Map::new();
    let _ = obj.insert("type".to_string(), json!("atom"));
    let _ = obj.insert("index".to_string(), json!(atom.index));
    let _ = obj.insert("element".to_string(), serialize_label(&atom.label, table));
    for (field, label) in [
        ("above", &atom.above),
        ("right", &atom.right),
        ("below", &atom.below),
        ("left", &atom.left),
    ] {
        if let Some(label) = label {
            let _ = obj.insert(field.to_string(), serialize_label(label, table));
        }
    }
    let _ = obj.insert("x".to_string(), json!(atom.position.x));
    let _ = obj.insert("y".to_string(), json!(atom.position.y));
    Value::Object(obj)
}

fn serialize_label(label: &Label, table: &ElementTable) -> Value {
    if table.get(&label.element.symbol) == Some(&label.element) {
        if label.count == 1 {
            return json!(label.element.symbol);
        }
        return json!([label.element.symbol, label.count]);
    }
    let mut obj = Map::new();
    let _ = obj.insert("symbol".to_string(), json!(label.element.symbol));
    if label.element.invisible {
        let _ = obj.insert("invisible".to_string(), json!(true));
    }
    match label.element.color {
        ElementColor::None => {}
        ElementColor::Always(c) => {
            let _ = obj.insert("color".to_string(), json!(c));
        }
        ElementColor::Optional(c) => {
            let _ = obj.insert("color".to_string(), json!({ "optional": c }));
        }
    }
    if label.count != 1 {
        let _ = obj.insert("count".to_string(), json!(label.count));
    }
    Value::Object(obj)
}

fn serialize_bond(bond: &Bond) -> Value {
    let lines: Vec<&str> = bond.lines.iter().map(|l| l.name()).collect();
    if bond.centered {
        json!({ "type": "bond", "a": bond.a, "b": bond.b, "centered": true, "lines": lines })
    } else {
        json!({ "type": "bond", "a": bond.a, "b": bond.b, "lines": lines })
    }
}

fn serialize_parens(parens: &Brackets) -> Value {
    let mut obj = Map::new();
    let _ = obj.insert("type".to_string(), json!("parens"));
    if !parens.sub.is_empty() {
        let _ = obj.insert("sub".to_string(), json!(parens.sub));
    }
    if !parens.sup.is_empty() {
        let _ = obj.insert("sup".to_string(), json!(parens.sup));
    }
    let _ = obj.insert("atoms".to_string(), json!(parens.atoms));
    Value::Object(obj)
}

fn require_str<'a>(
    obj: &'a Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<&'a str, ParseError> {
    obj.get(field)
        .ok_or(ParseError::MissingField { kind, field })?
        .as_str()
        .ok_or(ParseError::InvalidField { kind, field })
}

fn optional_str(
    obj: &Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<String, ParseError> {
    match obj.get(field) {
        None => Ok(String::new()),
        Some(v) => Ok(v
            .as_str()
            .ok_or(ParseError::InvalidField { kind, field })?
            .to_string()),
    }
}

fn require_index(
    obj: &Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<usize, ParseError> {
    let value = obj
        .get(field)
        .ok_or(ParseError::MissingField { kind, field })?;
    value
        .as_u64()
        .map(|n| n as usize)
        .ok_or(ParseError::InvalidField { kind, field })
}

fn require_indices(obj: &Map<String, Value>, kind: &'static str) -> Result<Vec<usize>, ParseError> {
    let value = obj.get("atoms").ok_or(ParseError::MissingField {
        kind,
        field: "atoms",
    })?;
    let entries = value.as_array().ok_or(ParseError::InvalidField {
        kind,
        field: "atoms",
    })?;
    entries
        .iter()
        .map(|entry| {
            entry.as_u64().map(|n| n as usize).ok_or(ParseError::InvalidField {
                kind,
                field: "atoms",
            })
        })
        .collect()
}

fn require_f32(
    obj: &Map<String, Value>,
    kind: &'static str,
    field: &'static str,
) -> Result<f32, ParseError> {
    let value = obj
        .get(field)
        .ok_or(ParseError::MissingField { kind, field })?;
    value
        .as_f64()
        .map(|n| n as f32)
        .ok_or(ParseError::InvalidField { kind, field })
}
