//! Scroll offset -> displayed month page.

use serde::{Deserialize, Serialize};

/// Paging axis of the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Scroll position and page size reported by the rendering surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollReport {
    pub offset_x: f64,
    pub offset_y: f64,
    pub page_width: f64,
    pub page_height: f64,
}

impl ScrollReport {
    pub fn horizontal(offset: f64, page_width: f64) -> Self {
        Self {
            offset_x: offset,
            page_width,
            ..Self::default()
        }
    }

    pub fn vertical(offset: f64, page_height: f64) -> Self {
        Self {
            offset_y: offset,
            page_height,
            ..Self::default()
        }
    }

    /// `(offset, page_size)` along the paging axis.
    pub fn along(&self, orientation: Orientation) -> (f64, f64) {
        match orientation {
            Orientation::Horizontal => (self.offset_x, self.page_width),
            Orientation::Vertical => (self.offset_y, self.page_height),
        }
    }
}

/// `floor(offset / page_size)` along `orientation`, clamped to `>= 0`.
///
/// A non-positive or non-finite page size resolves to page 0.
pub fn resolve_page(report: &ScrollReport, orientation: Orientation) -> usize {
    let (offset, page_size) = report.along(orientation);
    if !(page_size.is_finite() && page_size > 0.0) || !offset.is_finite() {
        return 0;
    }
    let page = (offset / page_size).floor();
    if page <= 0.0 {
        0
    } else {
        // Saturates for offsets past usize::MAX pages.
        page as usize
    }
}

/// Scroll offset at which `page` begins.
pub fn page_offset(page: usize, page_size: f64) -> f64 {
    page as f64 * page_size
}
