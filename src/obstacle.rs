use serde::Deserialize;

/// Figures which can be used to represent an obstacle within the
/// Lattice Boltzmann Method simulation
pub trait Boundary {
    /// determine whether a point in within the boundary of the figure
    fn contains(&self, x: usize, y: usize) -> bool;
}

/// filled disc, inclusive of its rim
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl Boundary for Circle {
    fn contains(&self, x: usize, y: usize) -> bool {
        let dx = x as f64 - self.cx;
        let dy = y as f64 - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// axis-aligned square described by its centre and half side length
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Square {
    pub cx: f64,
    pub cy: f64,
    pub half: f64,
}

impl Boundary for Square {
    fn contains(&self, x: usize, y: usize) -> bool {
        let dx = x as f64 - self.cx;
        let dy = y as f64 - self.cy;
        dx.abs() < self.half && dy.abs() < self.half
    }
}

/// one cell wide vertical wall
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub x: usize,
    pub cy: f64,
    pub half: f64,
}

impl Boundary for Line {
    fn contains(&self, x: usize, y: usize) -> bool {
        x == self.x && (y as f64 - self.cy).abs() < self.half
    }
}

/// Canonical obstacle layouts, centred left of the middle of the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    #[default]
    Circle,
    Square,
    Line,
    Empty,
}

/// longest half-length of the line preset
const LINE_HALF_MAX: f64 = 40.0;

impl Preset {
    /// the shape this preset places on a `width × height` lattice
    pub fn shape(self, width: usize, height: usize) -> Option<Box<dyn Boundary>> {
        let cx = width / 3;
        let cy = (height / 2) as f64;
        let size = width.min(height) as f64 / 10.0;

        match self {
            Preset::Circle => Some(Box::new(Circle {
                cx: cx as f64,
                cy,
                radius: size,
            })),
            Preset::Square => Some(Box::new(Square {
                cx: cx as f64,
                cy,
                half: size,
            })),
            Preset::Line => Some(Box::new(Line {
                x: cx,
                cy,
                half: LINE_HALF_MAX.min(height as f64 / 3.0),
            })),
            Preset::Empty => None,
        }
    }
}

/// Static solid cells of the lattice, one flag per cell in raster order.
#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleMask {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl ObstacleMask {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    #[inline]
    pub fn is_obstacle(&self, i: usize) -> bool {
        self.cells[i]
    }

    #[inline]
    pub fn contains(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    pub fn set(&mut self, x: usize, y: usize, solid: bool) {
        self.cells[y * self.width + x] = solid;
    }

    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    pub fn count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// mark every cell covered by the figure, keeping existing obstacles
    pub fn fill(&mut self, figure: &dyn Boundary) {
        for y in 0..self.height {
            for x in 0..self.width {
                if figure.contains(x, y) {
                    self.set(x, y, true);
                }
            }
        }
    }

    /// replace the mask with one of the canonical layouts
    pub fn set_preset(&mut self, preset: Preset) {
        self.clear();
        if let Some(figure) = preset.shape(self.width, self.height) {
            self.fill(figure.as_ref());
        }
    }

    /// additive interactive edit: mark all cells within `radius` of `(cx, cy)`.
    ///
    /// parts of the disc falling outside of the lattice are clipped
    pub fn paint_disc(&mut self, cx: f64, cy: f64, radius: f64) {
        if !(cx.is_finite() && cy.is_finite() && radius.is_finite()) || radius < 0.0 {
            return;
        }
        let disc = Circle { cx, cy, radius };

        // only visit the clipped bounding box of the disc
        let x0 = (cx - radius).floor().max(0.0) as usize;
        let y0 = (cy - radius).floor().max(0.0) as usize;
        let x1 = (cx + radius).ceil().min(self.width as f64 - 1.0);
        let y1 = (cy + radius).ceil().min(self.height as f64 - 1.0);
        if x1 < 0.0 || y1 < 0.0 {
            return;
        }

        for y in y0..=y1 as usize {
            for x in x0..=x1 as usize {
                if disc.contains(x, y) {
                    self.set(x, y, true);
                }
            }
        }
    }
}
