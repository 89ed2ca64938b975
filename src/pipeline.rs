//! Frame production shared by the live display loop and the exporter.

use crate::{
    card::render_card,
    core::{Canvas, FrameVariant, OverlayState},
    error::{UeitError, UeitResult},
    overlay,
};

/// The 8 prerendered card backgrounds at one fixed size.
///
/// Regenerated in full whenever the target dimensions change; never
/// partially refreshed.
#[derive(Debug)]
struct VariantSet {
    width: u32,
    height: u32,
    canvases: Vec<Canvas>,
}

impl VariantSet {
    fn render(width: u32, height: u32) -> UeitResult<Self> {
        let mut canvases = Vec::with_capacity(FrameVariant::COUNT);
        for variant in FrameVariant::ALL {
            canvases.push(render_card(width, height, variant)?);
        }
        Ok(Self {
            width,
            height,
            canvases,
        })
    }

    fn get(&self, variant: FrameVariant) -> &Canvas {
        &self.canvases[variant.index()]
    }
}

/// Owns the prerendered variants and the composed output canvas.
///
/// This is the single writer of all pixel data: both the display driver
/// and the exporter go through [`FramePipeline::frame`], so a frame index
/// renders identically on either path.
#[derive(Debug, Default)]
pub struct FramePipeline {
    variants: Option<VariantSet>,
    composed: Option<Canvas>,
}

impl FramePipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Composites the frame for `state` at the requested size. Changing the
    /// size discards and fully re-renders the variant set.
    pub fn frame(&mut self, width: u32, height: u32, state: &OverlayState) -> UeitResult<&Canvas> {
        let stale = !matches!(
            &self.variants,
            Some(v) if v.width == width && v.height == height
        );
        if stale {
            tracing::debug!(width, height, "regenerating prerendered variant set");
            self.variants = Some(VariantSet::render(width, height)?);
            self.composed = Some(Canvas::new(width, height)?);
        }

        let variants = self
            .variants
            .as_ref()
            .ok_or_else(|| UeitError::render("variant set missing after regeneration"))?;
        let composed = self
            .composed
            .as_mut()
            .ok_or_else(|| UeitError::render("composed canvas missing after regeneration"))?;

        overlay::compose(variants.get(state.variant()), composed, &state.info_line())?;
        Ok(composed)
    }
}
