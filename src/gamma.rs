// Gamma-correct blending for the translucent region highlight.
// Tables replace powf so a full-page highlight pass stays cheap.

use std::sync::OnceLock;

pub struct GammaLut {
    // sRGB(0..255) -> linear (0..1) as f32
    srgb_to_linear: [f32; 256],
    // linear(0..1) -> sRGB(0..255) via 4096-step quantization
    // (index = (linear * 4095).round())
    linear_to_srgb: [u8; 4096],
}

impl GammaLut {
    /// Build both tables.
    pub fn new() -> Self {
        // sRGB -> linear
        let mut s2l = [0.0f32; 256];
        for (v, slot) in s2l.iter_mut().enumerate() {
            let c = v as f32 / 255.0;
            *slot = if c <= 0.04045 { c / 12.92 } else { ((c + 0.055) / 1.055).powf(2.4) };
        }

        // linear -> sRGB (quantized to 4096 steps)
        let mut l2s = [0u8; 4096];
        for (i, slot) in l2s.iter_mut().enumerate() {
            let l = (i as f32) / 4095.0;
            let s = if l <= 0.003_130_8 { 12.92 * l } else { 1.055 * l.powf(1.0 / 2.4) - 0.055 };
            *slot = (s * 255.0).round().clamp(0.0, 255.0) as u8;
        }

        Self { srgb_to_linear: s2l, linear_to_srgb: l2s }
    }

    /// Tables shared by every surface in the process, built on first use.
    pub fn shared() -> &'static GammaLut {
        static LUT: OnceLock<GammaLut> = OnceLock::new();
        LUT.get_or_init(GammaLut::new)
    }

    #[inline]
    pub fn srgb_u8_to_linear(&self, v: u8) -> f32 {
        self.srgb_to_linear[v as usize]
    }

    #[inline]
    pub fn linear_to_srgb_u8(&self, l: f32) -> u8 {
        let idx = (l.clamp(0.0, 1.0) * 4095.0).round() as usize;
        self.linear_to_srgb[idx]
    }

    /// Mix `src` over `dst` (both 0x00RRGGBB) with coverage `alpha`, in linear light.
    pub fn blend(&self, dst: u32, src: u32, alpha: f32) -> u32 {
        let a = alpha.clamp(0.0, 1.0);
        let mut out = 0u32;
        for shift in [16u32, 8, 0] {
            let d = self.srgb_u8_to_linear(((dst >> shift) & 0xFF) as u8);
            let s = self.srgb_u8_to_linear(((src >> shift) & 0xFF) as u8);
            let c = self.linear_to_srgb_u8(s * a + d * (1.0 - a)) as u32;
            out |= c << shift;
        }
        out
    }
}

impl Default for GammaLut {
    fn default() -> Self {
        Self::new()
    }
}
