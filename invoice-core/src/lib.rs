pub mod bitmap;
pub mod config;
pub mod error;
pub mod export;
pub mod format;
pub mod invoice;
pub mod line_item;
pub mod paginate;
pub mod pdf;
pub mod totals;
pub mod words;

pub use bitmap::{Bitmap, ColorSpace};
pub use config::ExportConfig;
pub use error::{Error, Result};
pub use export::{
    attach_signature, export_file_name, export_invoice, DocumentSink, Exported, Rasterizer,
    SignatureSource,
};
pub use invoice::{
    apply_field_edit, update_item, FieldPath, Invoice, InvoiceDetails, ItemField, OrderDetails,
    PartyDetails, PartyField, SellerDetails, SellerField,
};
pub use line_item::{
    compute_items, net_amount, tax_amount, tax_type, validate_items, ComputedLineItem, LineItem,
    TaxSplit, TaxType,
};
pub use paginate::{
    paginate, paginate_with, Page, PageGeometry, Pagination, Surface, TrailingPage, A4_HEIGHT_MM,
    A4_WIDTH_MM, MAX_PAGES,
};
pub use pdf::PdfSink;
pub use totals::InvoiceTotals;
pub use words::{spell, to_words, AmountInWords, OVERFLOW_MARKER};
