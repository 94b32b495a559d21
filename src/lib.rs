// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Function signature hygiene
#![deny(clippy::fn_params_excessive_bools)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cast hygiene: pixel math converts between float and integer space
// constantly, so the precision-loss lints stay off.
#![warn(trivial_casts)]
#![warn(unused_qualifications)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::float_cmp)]
#![allow(clippy::module_name_repetitions)]

//! 2D skeletal molecular diagram layout and rasterization.
//!
//! Bondline turns a declarative graph of atoms, bonds, and annotations
//! into pixel operations on a caller-supplied surface: lattice-derived
//! label placement, footprint-aware bounds, and collision-clipped bond
//! lines.
//!
//! # Key entry points
//!
//! - [`molecule::MoleculeBuilder`] - build a graph in code
//! - [`molecule::json`] - the JSON definition format
//! - [`render::render`] - rasterize a graph onto a [`render::RenderTarget`]
//! - [`options::Options`] - runtime configuration (scale, colors, debug)

pub mod error;
pub mod font;
pub mod molecule;
pub mod options;
pub mod raster;
pub mod render;

pub use error::{Error, ParseError};
pub use molecule::{Molecule, MoleculeBuilder};
pub use options::Options;
