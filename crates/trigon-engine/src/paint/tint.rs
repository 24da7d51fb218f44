/// Packs a `0xRRGGBB` color and a float alpha into a vertex tint.
///
/// Layout of the returned value: `0xAABBGGRR`.
/// - red in bits 0..8, green in 8..16, blue in 16..24, alpha in 24..32
/// - in little-endian memory the bytes read `R, G, B, A`, so the vertex
///   stage can fetch it directly as `Unorm8x4`
///
/// `alpha` is clamped to `[0, 1]`, scaled by 255 and truncated. NaN packs as
/// 0. Bits of `rgb` above 24 are ignored. The color is stored straight;
/// premultiplication happens in the fragment stage.
#[inline]
pub fn pack_tint(rgb: u32, alpha: f32) -> u32 {
    let ua = ((alpha.clamp(0.0, 1.0) * 255.0) as u32) & 0xff;

    (ua << 24) | ((rgb & 0xff) << 16) | (rgb & 0xff00) | ((rgb >> 16) & 0xff)
}

/// Inverse of [`pack_tint`]: returns `(0xRRGGBB, alpha_byte)`.
#[inline]
pub fn unpack_tint(tint: u32) -> (u32, u8) {
    let r = tint & 0xff;
    let g = (tint >> 8) & 0xff;
    let b = (tint >> 16) & 0xff;
    ((r << 16) | (g << 8) | b, (tint >> 24) as u8)
}

/// Packed tint for the four corners of a primitive.
///
/// Triangles use `top_left`, `top_right`, `bottom_left` for their three
/// vertices; quads use all four. Shapes always fill every corner with the
/// same value (flat fill).
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Tint {
    pub top_left: u32,
    pub top_right: u32,
    pub bottom_left: u32,
    pub bottom_right: u32,
}

impl Tint {
    #[inline]
    pub const fn uniform(packed: u32) -> Self {
        Self {
            top_left: packed,
            top_right: packed,
            bottom_left: packed,
            bottom_right: packed,
        }
    }

    /// Packs `rgb`/`alpha` and assigns the result to all four corners.
    #[inline]
    pub fn solid(rgb: u32, alpha: f32) -> Self {
        Self::uniform(pack_tint(rgb, alpha))
    }

    #[inline]
    pub fn is_uniform(&self) -> bool {
        self.top_left == self.top_right
            && self.top_left == self.bottom_left
            && self.top_left == self.bottom_right
    }
}
