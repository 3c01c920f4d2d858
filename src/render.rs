use std::fmt;

use crate::error::Result;
use crate::field::Field;
use crate::lattice::LatticeState;

/// colour of obstacle cells
pub const OBSTACLE_COLOR: [u8; 4] = [0x80, 0x80, 0x80, 0xFF];
/// colour of the outermost ring of fluid cells, where the curl is undefined
pub const BORDER_COLOR: [u8; 4] = [0x00, 0x00, 0x00, 0xFF];

/// extra gain applied to the curl on top of the user contrast
const CURL_GAIN: f64 = 10.0;

/// RGBA pixel buffer with one pixel per lattice cell, in raster order.
///
/// frames are moved between the worker and the host; whoever holds one owns it
#[derive(Clone, PartialEq, Eq)]
pub struct Frame {
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl Frame {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height * 4],
        }
    }

    /// wrap an existing allocation, resizing it when it does not fit
    pub fn from_pixels(width: usize, height: usize, mut pixels: Vec<u8>) -> Self {
        pixels.resize(width * height * 4, 0);
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let p = (y * self.width + x) * 4;
        [
            self.pixels[p],
            self.pixels[p + 1],
            self.pixels[p + 2],
            self.pixels[p + 3],
        ]
    }

    /// reshape the buffer for a lattice of a different size, reusing the allocation
    pub fn fit(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.pixels.resize(width * height * 4, 0);
    }

    fn put(&mut self, i: usize, color: [u8; 4]) {
        self.pixels[i * 4..i * 4 + 4].copy_from_slice(&color);
    }
}

impl fmt::Debug for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

/// diverging colour map: positive curl toward red, negative curl toward blue,
/// with a dim green floor around zero
pub fn curl_color(curl: f64) -> [u8; 4] {
    if curl > 0.0 {
        let r = (curl * 255.0).min(255.0);
        let g = (50.0 - curl * 50.0).max(0.0);
        [r as u8, g as u8, 0, 0xFF]
    } else {
        let b = (-curl * 255.0).min(255.0);
        let g = (50.0 + curl * 50.0).max(0.0);
        [0, g as u8, b as u8, 0xFF]
    }
}

/// render the vorticity of the current generation into `frame`, overwriting
/// every pixel.
///
/// fails with [`crate::LatticeError::Diverged`] instead of drawing a state that
/// has blown up; the frame content is unspecified in that case
pub fn render_vorticity(lattice: &LatticeState, contrast: f64, frame: &mut Frame) -> Result<()> {
    let field = Field::from_lattice(lattice);
    field.check_finite(lattice)?;

    let (width, height) = (lattice.width(), lattice.height());
    frame.fit(width, height);

    for y in 0..height {
        for x in 0..width {
            let i = lattice.index(x, y);
            let color = if lattice.mask().is_obstacle(i) {
                OBSTACLE_COLOR
            } else if x == 0 || y == 0 || x + 1 == width || y + 1 == height {
                BORDER_COLOR
            } else {
                curl_color(field.vorticity(x, y) * contrast * CURL_GAIN)
            };
            frame.put(i, color);
        }
    }

    Ok(())
}
