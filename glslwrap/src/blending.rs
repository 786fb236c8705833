//! Blending-related types.
//!
//! Given two pixels *src* and *dst* – source and destination, we associate each pixel a blending
//! factor – respectively, *srcK* and *dstK*. *src* is the pixel being computed, and *dst* is the
//! pixel that is already stored in the framebuffer. Blended pixels are computed additively:
//!
//! > `blended = src * srcK + dst * dstK`

/// Blending factors.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub enum Factor {
  /// `1 * color = factor`
  One,
  /// `0 * color = 0`
  Zero,
  /// `src * color`
  SrcColor,
  /// `(1 - src) * color`
  SrcColorComplement,
  /// `dst * color`
  DestColor,
  /// `(1 - dst) * color`
  DestColorComplement,
  /// `srcA * color`
  SrcAlpha,
  /// `(1 - srcA) * color`
  SrcAlphaComplement,
  /// `dstA * color`
  DstAlpha,
  /// `(1 - dstA) * color`
  DstAlphaComplement,
}

/// Source and destination factors.
#[derive(Copy, Clone, Debug, Eq, Hash, PartialEq)]
pub struct Blending {
  pub src: Factor,
  pub dst: Factor,
}

impl Blending {
  pub fn new(src: Factor, dst: Factor) -> Self {
    Blending { src, dst }
  }

  /// Regular alpha blending, `src * srcA + dst * (1 - srcA)`.
  pub fn alpha() -> Self {
    Blending::new(Factor::SrcAlpha, Factor::SrcAlphaComplement)
  }
}
