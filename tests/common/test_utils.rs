#![allow(dead_code)]

use std::cell::RefCell;

use after_dark::{
    config::CityConfig,
    data_structures::mesh::{Mesh, Topology},
    font::{Font, PixelFont, TextStyle},
    layout::Viewport,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

pub const SEED: u64 = 0x5eed;

pub const DESKTOP: Viewport = Viewport {
    width: 1200.0,
    height: 800.0,
};

/// Small enough to keep mesh construction fast in tests.
pub const THUMBNAIL: Viewport = Viewport {
    width: 400.0,
    height: 120.0,
};

pub fn rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(SEED)
}

pub fn config() -> CityConfig {
    CityConfig {
        seed: Some(SEED),
        ..CityConfig::default()
    }
}

pub fn real_font() -> PixelFont {
    PixelFont::parse(include_str!("../../assets/font/pixel5x7.txt"))
        .expect("bundled font parses")
}

/// Draws one unit cube per character and remembers every request.
#[derive(Default)]
pub struct RecordingFont {
    requests: RefCell<Vec<String>>,
}

impl RecordingFont {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Font for RecordingFont {
    fn text_mesh(&self, text: &str, style: &TextStyle) -> Mesh {
        self.requests.borrow_mut().push(text.to_string());
        let mut mesh = Mesh::empty(Topology::Triangles);
        for (k, _) in text.chars().enumerate() {
            let x = k as f32 * style.pixel * 2.0;
            mesh.append(&Mesh::cuboid(
                [x, 0.0, 0.0],
                [x + style.pixel, style.pixel, style.pixel],
            ));
        }
        mesh
    }
}
