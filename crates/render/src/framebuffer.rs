use molview_settings::ValidatedConfig;

/// CPU-side off-screen target: a square color buffer plus depth.
///
/// Depth is cleared to 1.0 (the far plane in normalized depth) and a write
/// only lands when it is closer than what is already stored.
#[derive(Debug, Clone)]
pub struct Framebuffer {
    side: u32,
    clear_color: [f32; 4],
    color: Vec<[f32; 4]>,
    depth: Vec<f32>,
}

impl Framebuffer {
    /// Allocate targets of exactly `framebuffer_side` pixels per side.
    pub fn allocate(config: &ValidatedConfig) -> Self {
        let side = config.framebuffer_side();
        let texels = side as usize * side as usize;
        tracing::debug!(side, texels, "allocating framebuffer");
        Self {
            side,
            clear_color: config.background_color(),
            color: vec![config.background_color(); texels],
            depth: vec![1.0; texels],
        }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    pub fn texel_count(&self) -> usize {
        self.color.len()
    }

    pub fn clear(&mut self) {
        self.color.fill(self.clear_color);
        self.depth.fill(1.0);
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.side && y < self.side).then(|| y as usize * self.side as usize + x as usize)
    }

    pub fn color_at(&self, x: u32, y: u32) -> Option<[f32; 4]> {
        self.index(x, y).map(|i| self.color[i])
    }

    pub fn depth_at(&self, x: u32, y: u32) -> Option<f32> {
        self.index(x, y).map(|i| self.depth[i])
    }

    /// Write `color` if `depth` is closer than the stored value. Returns
    /// whether the texel was written.
    pub fn write(&mut self, x: u32, y: u32, depth: f32, color: [f32; 4]) -> bool {
        let Some(i) = self.index(x, y) else {
            return false;
        };
        if depth < self.depth[i] {
            self.depth[i] = depth;
            self.color[i] = color;
            true
        } else {
            false
        }
    }
}
