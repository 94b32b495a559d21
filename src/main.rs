//! Command-line diagram rasterizer: molecule JSON in, PPM image out.

use std::io::Write;
use std::path::{Path, PathBuf};

use bondline::font::BitmapFont;
use bondline::molecule::{json, ElementTable};
use bondline::render::{render, FontMetrics, Layout, RenderTarget};
use bondline::{Error, Options};

/// Fixed-size ARGB framebuffer over a black background.
struct Canvas {
    width: i32,
    height: i32,
    pixels: Vec<u32>,
    font: BitmapFont,
}

impl Canvas {
    fn new(width: i32, height: i32) -> Self {
        Self {
            width,
            height,
            pixels: vec![0xff00_0000; (width.max(0) * height.max(0)) as usize],
            font: BitmapFont,
        }
    }

    fn write_ppm(&self, path: &Path) -> std::io::Result<()> {
        let mut out = Vec::with_capacity(self.pixels.len() * 3 + 32);
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        for argb in &self.pixels {
            out.push((argb >> 16) as u8);
            out.push((argb >> 8) as u8);
            out.push(*argb as u8);
        }
        std::fs::write(path, out)
    }
}

impl FontMetrics for Canvas {
    fn line_height(&self) -> i32 {
        self.font.line_height()
    }

    fn text_width(&self, text: &str) -> i32 {
        self.font.text_width(text)
    }
}

impl RenderTarget for Canvas {
    fn pixel(&mut self, x: i32, y: i32, argb: u32) {
        if (0..self.width).contains(&x) && (0..self.height).contains(&y) {
            self.pixels[(y * self.width + x) as usize] = argb;
        }
    }

    fn text(&mut self, text: &str, x: i32, y: i32, argb: u32) {
        let (width, height, pixels) = (self.width, self.height, &mut self.pixels);
        BitmapFont::draw_text(text, x, y, argb, &mut |px, py, c| {
            if (0..width).contains(&px) && (0..height).contains(&py) {
                pixels[(py * width + px) as usize] = c;
            }
        });
    }
}

fn run(molecule_path: &Path, output_path: &Path, options_path: Option<&Path>) -> Result<(), Error> {
    let options = match options_path {
        Some(path) => Options::load(path).map_err(Error::OptionsParse)?,
        None => Options::default(),
    };
    let text = std::fs::read_to_string(molecule_path)?;
    let table = ElementTable::standard();
    let molecule = json::parse_molecule(&text, &table)?;
    let layout = Layout::new(&molecule, options.layout.scale, BitmapFont.line_height());
    let mut canvas = Canvas::new(layout.width(), layout.height());
    render(&molecule, &options, &mut canvas);
    canvas.write_ppm(output_path)?;
    log::info!(
        "wrote {}x{} diagram to {}",
        canvas.width,
        canvas.height,
        output_path.display()
    );
    Ok(())
}

fn main() {
    env_logger::init();

    let molecule_path = match std::env::args().nth(1) {
        Some(arg) => PathBuf::from(arg),
        None => {
            log::error!("Usage: bondline <molecule.json> [output.ppm] [options.toml]");
            std::process::exit(1);
        }
    };
    let output_path = std::env::args()
        .nth(2)
        .map_or_else(|| molecule_path.with_extension("ppm"), PathBuf::from);
    let options_path = std::env::args().nth(3).map(PathBuf::from);

    if let Err(e) = run(&molecule_path, &output_path, options_path.as_deref()) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
