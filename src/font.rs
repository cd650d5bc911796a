//! The bitmap font used for building labels and the glyph backdrop.
//!
//! The font is an external resource: a small text file of 5x7 (or any fixed
//! size) bitmaps, loaded once before the first layout pass. Text is turned
//! into geometry by emitting one cuboid (or flat quad) per lit pixel.

use std::collections::HashMap;

use anyhow::{Context, bail};

use crate::{
    data_structures::mesh::{Mesh, Topology},
    resources,
};

/// How text is turned into geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    /// Edge length of one font pixel in world units.
    pub pixel: f32,
    /// Extrusion along +z. Zero yields flat quads in the z = 0 plane.
    pub depth: f32,
    /// Blank font pixels between two characters.
    pub spacing: u32,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            pixel: 1.0,
            depth: 0.5,
            spacing: 1,
        }
    }
}

/// Anything that can lay out text as a triangle mesh.
///
/// The mesh lies in the local xy plane with its baseline-left corner at the
/// origin, x growing with the text and y up.
pub trait Font {
    fn text_mesh(&self, text: &str, style: &TextStyle) -> Mesh;
}

#[derive(Clone, Debug, PartialEq)]
pub struct PixelFont {
    width: u32,
    height: u32,
    /// Row-major, top row first.
    glyphs: HashMap<char, Vec<bool>>,
}

impl PixelFont {
    pub async fn load(file_name: &str) -> anyhow::Result<Self> {
        let source = resources::load_string(file_name).await?;
        Self::parse(&source).with_context(|| format!("malformed font file {}", file_name))
    }

    /// Parses the `size <w> <h>` / `[c]` / bitmap-rows format.
    pub fn parse(source: &str) -> anyhow::Result<Self> {
        let mut lines = source
            .lines()
            .enumerate()
            .map(|(n, line)| (n + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with("//"));

        let (n, header) = lines.next().context("empty font file")?;
        let mut fields = header.split_whitespace();
        let (width, height) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
            (Some("size"), Some(w), Some(h), None) => (
                w.parse::<u32>().with_context(|| format!("line {}: bad width", n))?,
                h.parse::<u32>().with_context(|| format!("line {}: bad height", n))?,
            ),
            _ => bail!("line {}: expected `size <width> <height>`", n),
        };
        if width == 0 || height == 0 {
            bail!("line {}: glyph size must be positive", n);
        }

        let mut glyphs = HashMap::new();
        while let Some((n, line)) = lines.next() {
            let ch = match line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                Some(inner) => {
                    let mut chars = inner.chars();
                    match (chars.next(), chars.next()) {
                        (Some(ch), None) => ch,
                        _ => bail!("line {}: glyph header must name one character", n),
                    }
                }
                None => bail!("line {}: expected a `[c]` glyph header", n),
            };
            let mut bits = Vec::with_capacity((width * height) as usize);
            for _ in 0..height {
                let (n, row) = lines
                    .next()
                    .with_context(|| format!("glyph {:?} is missing rows", ch))?;
                if row.chars().count() != width as usize {
                    bail!("line {}: row of glyph {:?} is not {} cells wide", n, ch, width);
                }
                for cell in row.chars() {
                    match cell {
                        '#' => bits.push(true),
                        '.' => bits.push(false),
                        other => bail!("line {}: unexpected cell {:?}", n, other),
                    }
                }
            }
            if glyphs.insert(ch, bits).is_some() {
                log::warn!("glyph {:?} defined twice, keeping the last one", ch);
            }
        }

        Ok(Self {
            width,
            height,
            glyphs,
        })
    }

    pub fn glyph_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    fn glyph(&self, ch: char) -> Option<&[bool]> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.glyphs.get(&ch.to_ascii_uppercase()))
            .map(Vec::as_slice)
    }

    pub fn has_glyph(&self, ch: char) -> bool {
        self.glyph(ch).is_some()
    }
}

impl Font for PixelFont {
    fn text_mesh(&self, text: &str, style: &TextStyle) -> Mesh {
        let mut mesh = Mesh::empty(Topology::Triangles);
        let advance = (self.width + style.spacing) as f32 * style.pixel;
        for (k, ch) in text.chars().enumerate() {
            // Unknown characters still take up room.
            let Some(bits) = self.glyph(ch) else {
                continue;
            };
            let pen = k as f32 * advance;
            for (index, _) in bits.iter().enumerate().filter(|(_, lit)| **lit) {
                let column = index as u32 % self.width;
                let row = index as u32 / self.width;
                let x = pen + column as f32 * style.pixel;
                let y = (self.height - 1 - row) as f32 * style.pixel;
                let pixel = if style.depth > 0.0 {
                    Mesh::cuboid(
                        [x, y, 0.0],
                        [x + style.pixel, y + style.pixel, style.depth],
                    )
                } else {
                    Mesh::quad([x, y], [x + style.pixel, y + style.pixel], 0.0)
                };
                mesh.append(&pixel);
            }
        }
        mesh
    }
}
