// Controller VRAM - Paged monochrome frame produced by the display controller
//
// The SSD1306 stores its 128×64 pixels as 8 pages of 128 column bytes.
// Bit b (LSB first) of the byte at [page][col] is the pixel at row page*8+b.

/// OLED width in pixels
pub const OLED_WIDTH: usize = 128;

/// OLED height in pixels
pub const OLED_HEIGHT: usize = 64;

/// Number of 8-row pages in controller memory
pub const PAGE_COUNT: usize = OLED_HEIGHT / 8;

/// Total number of logical pixels
pub const OLED_PIXELS: usize = OLED_WIDTH * OLED_HEIGHT;

/// Paged controller memory (8 pages × 128 columns)
#[derive(Clone, PartialEq, Eq)]
pub struct Vram {
    pages: [[u8; OLED_WIDTH]; PAGE_COUNT],
}

impl Vram {
    /// Create a blank frame (all pixels off)
    pub fn new() -> Self {
        Self {
            pages: [[0; OLED_WIDTH]; PAGE_COUNT],
        }
    }

    /// Build a frame from raw controller bytes, page-major
    ///
    /// Returns `None` unless `bytes` holds exactly 1024 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        if bytes.len() != PAGE_COUNT * OLED_WIDTH {
            return None;
        }

        let mut vram = Self::new();
        for (page, chunk) in vram.pages.iter_mut().zip(bytes.chunks_exact(OLED_WIDTH)) {
            page.copy_from_slice(chunk);
        }
        Some(vram)
    }

    /// Column byte at the given page
    #[inline]
    pub fn column(&self, page: usize, col: usize) -> u8 {
        self.pages[page][col]
    }

    /// Overwrite a column byte
    #[inline]
    pub fn set_column(&mut self, page: usize, col: usize, value: u8) {
        self.pages[page][col] = value;
    }

    /// All pages, in controller order
    pub fn pages(&self) -> &[[u8; OLED_WIDTH]; PAGE_COUNT] {
        &self.pages
    }

    /// Read a single logical pixel
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> bool {
        assert!(x < OLED_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < OLED_HEIGHT, "Y coordinate {} out of bounds", y);

        self.pages[y / 8][x] & (1 << (y % 8)) != 0
    }

    /// Set or clear a single logical pixel
    ///
    /// # Panics
    /// Panics if coordinates are out of bounds
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, on: bool) {
        assert!(x < OLED_WIDTH, "X coordinate {} out of bounds", x);
        assert!(y < OLED_HEIGHT, "Y coordinate {} out of bounds", y);

        let mask = 1 << (y % 8);
        if on {
            self.pages[y / 8][x] |= mask;
        } else {
            self.pages[y / 8][x] &= !mask;
        }
    }

    /// Fill every column byte with the same value
    pub fn fill(&mut self, value: u8) {
        for page in self.pages.iter_mut() {
            page.fill(value);
        }
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.pages
            .iter()
            .flatten()
            .map(|byte| byte.count_ones())
            .sum()
    }
}

impl Default for Vram {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Vram {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vram")
            .field("lit_pixels", &self.lit_count())
            .finish()
    }
}
