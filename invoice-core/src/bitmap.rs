use crate::error::{Error, Result};
use crate::paginate::Surface;

/// PDF color space for bitmap samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorSpace {
    DeviceRGB,
    DeviceGray,
}

impl ColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            ColorSpace::DeviceRGB => "DeviceRGB",
            ColorSpace::DeviceGray => "DeviceGray",
        }
    }

    /// Bytes per pixel at 8 bits per component.
    pub fn components(&self) -> usize {
        match self {
            ColorSpace::DeviceRGB => 3,
            ColorSpace::DeviceGray => 1,
        }
    }
}

/// A rasterized document or signature: 8-bit samples, rows top to bottom.
///
/// Alpha, when present, is kept as a separate grayscale plane so it can be
/// written as a soft mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    color_space: ColorSpace,
    data: Vec<u8>,
    alpha: Option<Vec<u8>>,
}

impl Bitmap {
    /// Wrap raw samples. `data` must hold exactly
    /// `width * height * components` bytes.
    pub fn new(width: u32, height: u32, color_space: ColorSpace, data: Vec<u8>) -> Result<Self> {
        let expected = pixel_count(width, height) * color_space.components();
        if data.len() != expected {
            return Err(Error::InvalidBitmap(format!(
                "{}x{} {} needs {} bytes, got {}",
                width,
                height,
                color_space.pdf_name(),
                expected,
                data.len()
            )));
        }
        Ok(Bitmap {
            width,
            height,
            color_space,
            data,
            alpha: None,
        })
    }

    /// A bitmap filled with one RGB color.
    pub fn filled(width: u32, height: u32, rgb: [u8; 3]) -> Self {
        let data = rgb.repeat(pixel_count(width, height));
        Bitmap {
            width,
            height,
            color_space: ColorSpace::DeviceRGB,
            data,
            alpha: None,
        }
    }

    /// Attach an alpha plane (one byte per pixel).
    pub fn with_alpha(mut self, alpha: Vec<u8>) -> Result<Self> {
        let expected = pixel_count(self.width, self.height);
        if alpha.len() != expected {
            return Err(Error::InvalidBitmap(format!(
                "alpha plane needs {} bytes, got {}",
                expected,
                alpha.len()
            )));
        }
        self.alpha = Some(alpha);
        Ok(self)
    }

    /// Decode PNG bytes. Palette and 16-bit images are normalized to
    /// 8-bit gray or RGB; an alpha channel is split into its own plane.
    pub fn from_png(bytes: &[u8]) -> Result<Self> {
        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder
            .read_info()
            .map_err(|e| Error::Image(format!("PNG decode error: {}", e)))?;

        let mut buf = vec![0u8; reader.output_buffer_size()];
        let info = reader
            .next_frame(&mut buf)
            .map_err(|e| Error::Image(format!("PNG frame error: {}", e)))?;
        buf.truncate(info.buffer_size());

        let (width, height) = (info.width, info.height);
        match info.color_type {
            png::ColorType::Rgb => Bitmap::new(width, height, ColorSpace::DeviceRGB, buf),
            png::ColorType::Grayscale => Bitmap::new(width, height, ColorSpace::DeviceGray, buf),
            png::ColorType::Rgba => {
                let (rgb, alpha) = split_alpha(&buf, 4);
                Bitmap::new(width, height, ColorSpace::DeviceRGB, rgb)?.with_alpha(alpha)
            }
            png::ColorType::GrayscaleAlpha => {
                let (gray, alpha) = split_alpha(&buf, 2);
                Bitmap::new(width, height, ColorSpace::DeviceGray, gray)?.with_alpha(alpha)
            }
            other => Err(Error::Image(format!("Unsupported PNG color type: {:?}", other))),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn alpha(&self) -> Option<&[u8]> {
        self.alpha.as_deref()
    }

    /// Pixel dimensions for pagination.
    pub fn surface(&self) -> Surface {
        Surface {
            width_px: self.width,
            height_px: self.height,
        }
    }
}

fn pixel_count(width: u32, height: u32) -> usize {
    width as usize * height as usize
}

/// Split interleaved samples whose last channel is alpha.
fn split_alpha(buf: &[u8], stride: usize) -> (Vec<u8>, Vec<u8>) {
    let pixels = buf.len() / stride;
    let mut color = Vec::with_capacity(pixels * (stride - 1));
    let mut alpha = Vec::with_capacity(pixels);
    for chunk in buf.chunks_exact(stride) {
        color.extend_from_slice(&chunk[..stride - 1]);
        alpha.push(chunk[stride - 1]);
    }
    (color, alpha)
}
