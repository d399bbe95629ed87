use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// A4 width in millimeters.
pub const A4_WIDTH_MM: f64 = 210.0;
/// A4 height in millimeters.
pub const A4_HEIGHT_MM: f64 = 297.0;

/// Upper bound on pages produced for one surface.
pub const MAX_PAGES: usize = 10_000;

/// Pixel size of the full rendered document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    pub width_px: u32,
    pub height_px: u32,
}

/// Page size in physical units (millimeters for A4).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
}

impl PageGeometry {
    pub fn a4() -> Self {
        PageGeometry {
            width: A4_WIDTH_MM,
            height: A4_HEIGHT_MM,
        }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// What to do with the blank page emitted when the scaled image height is
/// an exact multiple of the page height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrailingPage {
    /// Keep it.
    #[default]
    Preserve,
    /// Drop a final page with no visible content.
    Trim,
}

impl FromStr for TrailingPage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "preserve" => Ok(TrailingPage::Preserve),
            "trim" => Ok(TrailingPage::Trim),
            _ => Err(Error::InvalidFieldValue {
                field: "trailing_page".to_string(),
                value: s.to_string(),
            }),
        }
    }
}

/// One fixed-size window onto the scaled surface.
///
/// The whole image is drawn on every page, shifted up by
/// `-vertical_offset` so a different band is visible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Page {
    /// Zero-based position in reading order.
    pub index: usize,
    pub width: f64,
    pub height: f64,
    /// Offset of the image top relative to the page top (zero or negative).
    pub vertical_offset: f64,
    /// Height of image content visible on this page. Zero for the
    /// trailing blank page.
    pub content_height: f64,
}

impl Page {
    pub fn is_blank(&self) -> bool {
        self.content_height <= 0.0
    }
}

/// Ordered pages covering a surface, top to bottom.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub surface: Surface,
    pub geometry: PageGeometry,
    /// Surface height after scaling its width to the page width.
    pub image_height: f64,
    pub pages: Vec<Page>,
}

impl Pagination {
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Page> {
        self.pages.iter()
    }
}

/// Split a surface into pages, keeping the trailing blank page.
pub fn paginate(surface: Surface, geometry: PageGeometry) -> Result<Pagination> {
    paginate_with(surface, geometry, TrailingPage::Preserve)
}

/// Split a surface into pages.
///
/// The surface is scaled to the page width. Page `k` sits at offset
/// `-k * page_height` for every `k` up to `floor(image_height /
/// page_height)`. When the scaled height is an exact multiple of the page
/// height this ends with one blank page, which `trailing` either keeps or
/// drops.
pub fn paginate_with(
    surface: Surface,
    geometry: PageGeometry,
    trailing: TrailingPage,
) -> Result<Pagination> {
    check_geometry(surface, geometry)?;

    let image_height = surface.height_px as f64 * geometry.width / surface.width_px as f64;
    if !image_height.is_finite() {
        return Err(invalid_geometry(surface, geometry));
    }
    let page_h = geometry.height;

    let required = (image_height / page_h).floor() + 1.0;
    if required > MAX_PAGES as f64 {
        return Err(Error::PageLimit {
            required,
            max: MAX_PAGES,
        });
    }
    let page_count = required as usize;

    let mut pages: Vec<Page> = (0..page_count)
        .map(|index| make_page(index, -(index as f64 * page_h), image_height, geometry))
        .collect();

    if pages.last().is_some_and(Page::is_blank) {
        if trailing == TrailingPage::Trim && pages.len() > 1 {
            warn!(index = pages.len() - 1, "dropping trailing blank page");
            pages.pop();
        } else {
            warn!(index = pages.len() - 1, "keeping trailing blank page");
        }
    }

    debug!(
        width_px = surface.width_px,
        height_px = surface.height_px,
        image_height,
        page_count = pages.len(),
        "paginated surface"
    );

    Ok(Pagination {
        surface,
        geometry,
        image_height,
        pages,
    })
}

fn make_page(index: usize, offset: f64, image_height: f64, geometry: PageGeometry) -> Page {
    let top = -offset;
    Page {
        index,
        width: geometry.width,
        height: geometry.height,
        vertical_offset: offset,
        content_height: (image_height - top).min(geometry.height).max(0.0),
    }
}

fn check_geometry(surface: Surface, geometry: PageGeometry) -> Result<()> {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if surface.width_px == 0
        || surface.height_px == 0
        || !positive(geometry.width)
        || !positive(geometry.height)
    {
        return Err(invalid_geometry(surface, geometry));
    }
    Ok(())
}

fn invalid_geometry(surface: Surface, geometry: PageGeometry) -> Error {
    Error::InvalidGeometry {
        width_px: surface.width_px,
        height_px: surface.height_px,
        page_width: geometry.width,
        page_height: geometry.height,
    }
}
