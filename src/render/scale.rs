//! Fit-to-width scaling for the on-screen preview.

/// Nominal page width in CSS pixels (210 mm at 96 dpi).
pub const PAGE_WIDTH_PX: f64 = 794.0;

/// Nominal page height in CSS pixels (297 mm at 96 dpi).
pub const PAGE_HEIGHT_PX: f64 = 1123.0;

/// Scale factor and resulting box for a preview container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewScale {
    pub factor: f64,
    /// Unscaled content width the page is laid out at
    pub content_width: f64,
    /// Height the container needs after scaling
    pub height: f64,
}

impl PreviewScale {
    /// Scale a page to a container `container_width` pixels wide.
    ///
    /// Non-positive or non-finite widths collapse to a zero scale.
    pub fn fit(container_width: f64) -> Self {
        let factor = if container_width.is_finite() && container_width > 0.0 {
            container_width / PAGE_WIDTH_PX
        } else {
            0.0
        };
        Self {
            factor,
            content_width: PAGE_WIDTH_PX,
            height: PAGE_HEIGHT_PX * factor,
        }
    }

    /// CSS transform value.
    pub fn transform(&self) -> String {
        format!("scale({})", self.factor)
    }
}

impl Default for PreviewScale {
    fn default() -> Self {
        Self::fit(PAGE_WIDTH_PX)
    }
}
