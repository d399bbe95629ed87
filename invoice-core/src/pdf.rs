use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use flate2::write::ZlibEncoder;
use flate2::Compression;
use tracing::{debug, info};

use crate::bitmap::{Bitmap, ColorSpace};
use crate::config::ExportConfig;
use crate::error::Result;
use crate::export::DocumentSink;
use crate::paginate::{Page, Pagination};

/// Points per millimeter.
pub const PT_PER_MM: f64 = 72.0 / 25.4;

const CATALOG_OBJ: ObjId = ObjId(1, 0);
const PAGES_OBJ: ObjId = ObjId(2, 0);
const IMAGE_OBJ: ObjId = ObjId(3, 0);
const SMASK_OBJ: ObjId = ObjId(4, 0);
const FIRST_PAGE_OBJ_NUM: u32 = 5;

/// Resource name of the document image on every page.
const IMAGE_NAME: &str = "Im1";

/// Object identifier: (object_number, generation_number).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjId(pub u32, pub u16);

/// The subset of PDF objects an image-only document needs.
#[derive(Debug, Clone)]
pub enum PdfObject {
    Integer(i64),
    Real(f64),
    /// Stored without the leading `/`.
    Name(String),
    /// Stored without the enclosing parens.
    LiteralString(String),
    Array(Vec<PdfObject>),
    /// Vec keeps key order deterministic.
    Dictionary(Vec<(String, PdfObject)>),
    Stream {
        dict: Vec<(String, PdfObject)>,
        data: Vec<u8>,
    },
    Reference(ObjId),
}

impl PdfObject {
    pub fn name(s: &str) -> Self {
        PdfObject::Name(s.to_string())
    }

    pub fn dict(entries: Vec<(&str, PdfObject)>) -> Self {
        PdfObject::Dictionary(owned_entries(entries))
    }

    pub fn stream(entries: Vec<(&str, PdfObject)>, data: Vec<u8>) -> Self {
        PdfObject::Stream {
            dict: owned_entries(entries),
            data,
        }
    }

    /// Append the serialized form to `out`.
    pub fn encode(&self, out: &mut Vec<u8>) {
        match self {
            PdfObject::Integer(n) => out.extend_from_slice(n.to_string().as_bytes()),
            PdfObject::Real(f) => out.extend_from_slice(format_real(*f).as_bytes()),
            PdfObject::Name(name) => {
                out.push(b'/');
                out.extend_from_slice(name.as_bytes());
            }
            PdfObject::LiteralString(s) => {
                out.push(b'(');
                out.extend_from_slice(escape_pdf_string(s).as_bytes());
                out.push(b')');
            }
            PdfObject::Array(items) => {
                out.push(b'[');
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        out.push(b' ');
                    }
                    item.encode(out);
                }
                out.push(b']');
            }
            PdfObject::Dictionary(entries) => {
                encode_entries(entries, out);
                out.extend_from_slice(b" >>");
            }
            PdfObject::Stream { dict, data } => {
                encode_entries(dict, out);
                out.extend_from_slice(format!(" /Length {} >>\nstream\n", data.len()).as_bytes());
                out.extend_from_slice(data);
                out.extend_from_slice(b"\nendstream");
            }
            PdfObject::Reference(id) => {
                out.extend_from_slice(format!("{} {} R", id.0, id.1).as_bytes());
            }
        }
    }
}

fn owned_entries(entries: Vec<(&str, PdfObject)>) -> Vec<(String, PdfObject)> {
    entries
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

/// Writes `<< /Key value ...` without the closing `>>`.
fn encode_entries(entries: &[(String, PdfObject)], out: &mut Vec<u8>) {
    out.extend_from_slice(b"<<");
    for (key, val) in entries {
        out.extend_from_slice(b" /");
        out.extend_from_slice(key.as_bytes());
        out.push(b' ');
        val.encode(out);
    }
}

/// Serializes indirect objects to a `Write` target and records byte
/// offsets for the xref table.
pub struct PdfWriter<W: Write> {
    writer: W,
    offset: usize,
    xref_entries: Vec<(u32, usize)>,
}

impl<W: Write> PdfWriter<W> {
    pub fn new(writer: W) -> Self {
        PdfWriter {
            writer,
            offset: 0,
            xref_entries: Vec::new(),
        }
    }

    fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.writer.write_all(data)?;
        self.offset += data.len();
        Ok(())
    }

    /// PDF 1.7 header plus a binary-marker comment.
    pub fn write_header(&mut self) -> io::Result<()> {
        self.write_bytes(b"%PDF-1.7\n%\xe2\xe3\xcf\xd3\n")
    }

    pub fn write_object(&mut self, id: ObjId, obj: &PdfObject) -> io::Result<()> {
        self.xref_entries.push((id.0, self.offset));
        let mut buf = format!("{} {} obj\n", id.0, id.1).into_bytes();
        obj.encode(&mut buf);
        buf.extend_from_slice(b"\nendobj\n");
        self.write_bytes(&buf)
    }

    pub fn current_offset(&self) -> usize {
        self.offset
    }

    /// Write xref table, trailer, startxref and `%%EOF`. Object numbers
    /// with no recorded offset become free entries.
    pub fn write_xref_and_trailer(
        &mut self,
        root_id: ObjId,
        info_id: Option<ObjId>,
    ) -> io::Result<()> {
        let xref_offset = self.offset;
        self.xref_entries.sort_by_key(|&(num, _)| num);
        let size = self.xref_entries.last().map(|&(num, _)| num).unwrap_or(0) + 1;

        let mut out = format!("xref\n0 {}\n", size).into_bytes();
        // Each entry is exactly 20 bytes.
        out.extend_from_slice(b"0000000000 65535 f\r\n");
        let mut entries = self.xref_entries.iter().peekable();
        for obj_num in 1..size {
            match entries.next_if(|&&(num, _)| num == obj_num) {
                Some(&(_, off)) => {
                    out.extend_from_slice(format!("{:010} 00000 n\r\n", off).as_bytes())
                }
                None => out.extend_from_slice(b"0000000000 00000 f\r\n"),
            }
        }

        out.extend_from_slice(
            format!("trailer\n<< /Size {} /Root {} {} R", size, root_id.0, root_id.1).as_bytes(),
        );
        if let Some(info) = info_id {
            out.extend_from_slice(format!(" /Info {} {} R", info.0, info.1).as_bytes());
        }
        out.extend_from_slice(format!(" >>\nstartxref\n{}\n%%EOF\n", xref_offset).as_bytes());
        self.write_bytes(&out)
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

/// Escape special characters in a PDF literal string.
pub fn escape_pdf_string(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => result.push_str("\\\\"),
            '(' => result.push_str("\\("),
            ')' => result.push_str("\\)"),
            _ => result.push(c),
        }
    }
    result
}

/// Float for object values: no trailing zeros, no exponent.
fn format_real(f: f64) -> String {
    if f == f.floor() && f.abs() < 1e15 {
        format!("{:.1}", f)
    } else {
        trim_decimals(format!("{:.6}", f))
    }
}

/// Float for content-stream operands.
fn format_coord(v: f64) -> String {
    if v == v.floor() && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        trim_decimals(format!("{:.4}", v))
    }
}

fn trim_decimals(s: String) -> String {
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}

/// Image placement operators for one page, in points.
///
/// The image spans the full page width and its scaled height; its top edge
/// sits `vertical_offset` below the page top (above it when negative).
pub fn page_content(page: &Page, image_height: f64) -> Vec<u8> {
    let width = page.width * PT_PER_MM;
    let height = image_height * PT_PER_MM;
    let y = (page.height - (page.vertical_offset + image_height)) * PT_PER_MM;
    format!(
        "q\n{} 0 0 {} 0 {} cm\n/{} Do\nQ\n",
        format_coord(width),
        format_coord(height),
        format_coord(y),
        IMAGE_NAME,
    )
    .into_bytes()
}

/// Image-based PDF writer: the bitmap is embedded once and drawn on every
/// page, shifted so each page shows its own band.
///
/// Pages are written as they are produced, so only one page's content is
/// held in memory.
pub struct PdfSink<W: Write> {
    writer: W,
    compress: bool,
    info: Vec<(String, String)>,
}

impl PdfSink<BufWriter<File>> {
    /// Sink that writes to a new file at `path`.
    pub fn create<P: AsRef<Path>>(path: P, config: &ExportConfig) -> Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), config))
    }
}

impl<W: Write> PdfSink<W> {
    pub fn new(writer: W, config: &ExportConfig) -> Self {
        let mut info = vec![("Creator".to_string(), config.creator.clone())];
        if let Some(title) = &config.title {
            info.push(("Title".to_string(), title.clone()));
        }
        PdfSink {
            writer,
            compress: config.compress,
            info,
        }
    }
}

impl<W: Write> DocumentSink for PdfSink<W> {
    type Output = W;

    fn write_paginated_document(self, bitmap: &Bitmap, pagination: &Pagination) -> Result<W> {
        let PdfSink {
            writer,
            compress,
            info,
        } = self;
        let mut pdf = PdfWriter::new(writer);
        pdf.write_header()?;

        // Image and its soft mask are shared by every page.
        let smask_id = match bitmap.alpha() {
            Some(alpha) => {
                let smask = image_stream(bitmap, alpha, ColorSpace::DeviceGray, None, compress)?;
                pdf.write_object(SMASK_OBJ, &smask)?;
                Some(SMASK_OBJ)
            }
            None => None,
        };
        let image = image_stream(bitmap, bitmap.data(), bitmap.color_space(), smask_id, compress)?;
        pdf.write_object(IMAGE_OBJ, &image)?;

        let mut next_obj_num = FIRST_PAGE_OBJ_NUM;
        let mut page_ids = Vec::with_capacity(pagination.len());
        for page in pagination.iter() {
            let content_id = ObjId(next_obj_num, 0);
            let page_id = ObjId(next_obj_num + 1, 0);
            next_obj_num += 2;

            let content = PdfObject::stream(vec![], page_content(page, pagination.image_height));
            pdf.write_object(content_id, &content)?;

            let page_dict = PdfObject::dict(vec![
                ("Type", PdfObject::name("Page")),
                ("Parent", PdfObject::Reference(PAGES_OBJ)),
                (
                    "MediaBox",
                    PdfObject::Array(vec![
                        PdfObject::Integer(0),
                        PdfObject::Integer(0),
                        PdfObject::Real(page.width * PT_PER_MM),
                        PdfObject::Real(page.height * PT_PER_MM),
                    ]),
                ),
                ("Contents", PdfObject::Reference(content_id)),
                (
                    "Resources",
                    PdfObject::dict(vec![(
                        "XObject",
                        PdfObject::dict(vec![(IMAGE_NAME, PdfObject::Reference(IMAGE_OBJ))]),
                    )]),
                ),
            ]);
            pdf.write_object(page_id, &page_dict)?;
            debug!(
                index = page.index,
                vertical_offset = page.vertical_offset,
                blank = page.is_blank(),
                "wrote page"
            );
            page_ids.push(page_id);
        }

        let info_id = if info.is_empty() {
            None
        } else {
            let id = ObjId(next_obj_num, 0);
            let entries = info
                .iter()
                .map(|(k, v)| (k.clone(), PdfObject::LiteralString(v.clone())))
                .collect();
            pdf.write_object(id, &PdfObject::Dictionary(entries))?;
            Some(id)
        };

        let pages = PdfObject::dict(vec![
            ("Type", PdfObject::name("Pages")),
            (
                "Kids",
                PdfObject::Array(page_ids.iter().map(|id| PdfObject::Reference(*id)).collect()),
            ),
            ("Count", PdfObject::Integer(page_ids.len() as i64)),
        ]);
        pdf.write_object(PAGES_OBJ, &pages)?;

        let catalog = PdfObject::dict(vec![
            ("Type", PdfObject::name("Catalog")),
            ("Pages", PdfObject::Reference(PAGES_OBJ)),
        ]);
        pdf.write_object(CATALOG_OBJ, &catalog)?;
        pdf.write_xref_and_trailer(CATALOG_OBJ, info_id)?;

        let bytes = pdf.current_offset();
        let mut writer = pdf.into_inner();
        writer.flush()?;
        info!(pages = page_ids.len(), bytes, "wrote paginated document");
        Ok(writer)
    }
}

fn image_stream(
    bitmap: &Bitmap,
    samples: &[u8],
    color_space: ColorSpace,
    smask: Option<ObjId>,
    compress: bool,
) -> Result<PdfObject> {
    let mut entries = vec![
        ("Type", PdfObject::name("XObject")),
        ("Subtype", PdfObject::name("Image")),
        ("Width", PdfObject::Integer(bitmap.width() as i64)),
        ("Height", PdfObject::Integer(bitmap.height() as i64)),
        ("ColorSpace", PdfObject::name(color_space.pdf_name())),
        ("BitsPerComponent", PdfObject::Integer(8)),
    ];
    if let Some(id) = smask {
        entries.push(("SMask", PdfObject::Reference(id)));
    }
    let data = if compress {
        entries.push(("Filter", PdfObject::name("FlateDecode")));
        deflate(samples)?
    } else {
        samples.to_vec()
    };
    Ok(PdfObject::stream(entries, data))
}

fn deflate(data: &[u8]) -> io::Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}
