use thiserror::Error;

/// Errors produced by invoice editing, pagination and export.
///
/// Out-of-range amounts flow through the calculators; they only fail when a
/// result leaves the `Decimal` range. Other errors come from geometry
/// guards, field edits, image decoding and the output writer.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "invalid page geometry: surface {width_px}x{height_px}px \
         onto page {page_width}x{page_height}"
    )]
    InvalidGeometry {
        width_px: u32,
        height_px: u32,
        page_width: f64,
        page_height: f64,
    },

    #[error("{required} pages needed, at most {max} allowed")]
    PageLimit { required: f64, max: usize },

    #[error("amount overflow computing {0}")]
    AmountOverflow(&'static str),

    #[error("invalid bitmap: {0}")]
    InvalidBitmap(String),

    #[error("image decode error: {0}")]
    Image(String),

    #[error("line item {index}: {reason}")]
    InvalidLineItem { index: usize, reason: String },

    #[error("unknown field: {0}")]
    UnknownField(String),

    #[error("invalid value {value:?} for field {field}")]
    InvalidFieldValue { field: String, value: String },

    #[error("item index {index} out of range for {len} items")]
    ItemIndexOutOfRange { index: usize, len: usize },

    #[error("render error: {0}")]
    Render(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
