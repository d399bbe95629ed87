use tracing::info;

use crate::bitmap::Bitmap;
use crate::config::ExportConfig;
use crate::error::Result;
use crate::invoice::Invoice;
use crate::paginate::{paginate_with, Pagination};

/// Turns an invoice view into one tall bitmap.
pub trait Rasterizer {
    fn render_to_bitmap(&self, invoice: &Invoice) -> Result<Bitmap>;
}

/// Composes the paginated bitmap into an output document.
///
/// Called once per export with every page, in reading order.
pub trait DocumentSink {
    type Output;

    fn write_paginated_document(
        self,
        bitmap: &Bitmap,
        pagination: &Pagination,
    ) -> Result<Self::Output>;
}

/// A signature pad or similar capture surface. `None` means nothing was
/// drawn.
pub trait SignatureSource {
    fn capture_signature(&self) -> Option<Bitmap>;
}

/// Outcome of one export.
#[derive(Debug)]
pub struct Exported<O> {
    pub output: O,
    pub pagination: Pagination,
}

/// Render, paginate and write an invoice.
pub fn export_invoice<R, S>(
    invoice: &Invoice,
    rasterizer: &R,
    sink: S,
    config: &ExportConfig,
) -> Result<Exported<S::Output>>
where
    R: Rasterizer + ?Sized,
    S: DocumentSink,
{
    info!(
        invoice_no = %invoice.invoice.invoice_no,
        items = invoice.items.len(),
        "exporting invoice"
    );
    let bitmap = rasterizer.render_to_bitmap(invoice)?;
    let pagination = paginate_with(bitmap.surface(), config.page, config.trailing_page)?;
    let output = sink.write_paginated_document(&bitmap, &pagination)?;
    info!(pages = pagination.len(), "invoice exported");
    Ok(Exported { output, pagination })
}

/// Copy of `invoice` carrying whatever `source` captured.
pub fn attach_signature<S: SignatureSource + ?Sized>(invoice: &Invoice, source: &S) -> Invoice {
    invoice.with_signature(source.capture_signature())
}

/// `invoice_<invoice number>.pdf`.
pub fn export_file_name(invoice: &Invoice) -> String {
    format!("invoice_{}.pdf", invoice.invoice.invoice_no)
}
