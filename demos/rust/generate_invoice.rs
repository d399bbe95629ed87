/// Invoice export example: the sample tax invoice, totals, amount in words,
/// and an image-based A4 PDF.
///
/// Run with:
///   cargo run --example generate_invoice -p invoice-demos [-- rendered.png]
///
/// Without an argument a placeholder rendering is drawn. Pass a PNG of the
/// rendered invoice to paginate that instead.
///
/// Writes to: demos/output/invoice_INV456.pdf
use std::path::PathBuf;

use invoice_core::format::{amount_in_words_legend, money};
use invoice_core::{
    compute_items, export_file_name, export_invoice, Bitmap, ExportConfig, Invoice, InvoiceDetails,
    InvoiceTotals, LineItem, OrderDetails, PartyDetails, PdfSink, Rasterizer, SellerDetails,
    TaxSplit,
};
use rust_decimal_macros::dec;
use tracing::info;
use tracing_subscriber::EnvFilter;

const RENDER_WIDTH_PX: u32 = 1240;
const HEADER_PX: u32 = 900;
const ROW_PX: u32 = 120;
const FOOTER_PX: u32 = 1100;

// ── rasterizers ───────────────────────────────────────────────────────

/// Stand-in for a real view renderer: paints a header block, one stripe per
/// line item and a footer block so page cuts are visible in the output.
struct PlaceholderRasterizer;

impl Rasterizer for PlaceholderRasterizer {
    fn render_to_bitmap(&self, invoice: &Invoice) -> invoice_core::Result<Bitmap> {
        let rows = invoice.items.len() as u32;
        let height = HEADER_PX + rows * ROW_PX + FOOTER_PX;
        let mut data = Vec::with_capacity((RENDER_WIDTH_PX * height * 3) as usize);
        for y in 0..height {
            let shade: [u8; 3] = if y < HEADER_PX {
                [30, 58, 95]
            } else if y < HEADER_PX + rows * ROW_PX {
                if ((y - HEADER_PX) / ROW_PX) % 2 == 0 {
                    [242, 247, 255]
                } else {
                    [255, 255, 255]
                }
            } else {
                [0, 180, 216]
            };
            for _ in 0..RENDER_WIDTH_PX {
                data.extend_from_slice(&shade);
            }
        }
        Bitmap::new(RENDER_WIDTH_PX, height, invoice_core::ColorSpace::DeviceRGB, data)
    }
}

/// Uses an already-rendered PNG of the invoice view.
struct PngRasterizer {
    path: PathBuf,
}

impl Rasterizer for PngRasterizer {
    fn render_to_bitmap(&self, _invoice: &Invoice) -> invoice_core::Result<Bitmap> {
        let bytes = std::fs::read(&self.path)?;
        Bitmap::from_png(&bytes)
    }
}

// ── invoice data ──────────────────────────────────────────────────────

fn sample_invoice() -> Invoice {
    Invoice {
        seller: SellerDetails {
            name: "ABC Traders".into(),
            address: "123 Main St".into(),
            city: "City".into(),
            state: "State".into(),
            pincode: "123456".into(),
            pan_no: "ABCDE1234F".into(),
            gst_no: "GSTIN12345678".into(),
        },
        place_of_supply: "State A".into(),
        billing: PartyDetails {
            name: "John Doe".into(),
            address: "456 Elm St".into(),
            city: "Another City".into(),
            state: "Another State".into(),
            pincode: "654321".into(),
            state_code: "XX".into(),
        },
        shipping: PartyDetails {
            name: "Jane Doe".into(),
            address: "789 Oak St".into(),
            city: "Yet Another City".into(),
            state: "Yet Another State".into(),
            pincode: "987654".into(),
            state_code: "YY".into(),
        },
        place_of_delivery: "State B".into(),
        order: OrderDetails {
            order_no: "ORD123".into(),
            order_date: "2024-06-30".into(),
        },
        invoice: InvoiceDetails {
            invoice_no: "INV456".into(),
            invoice_date: "2024-07-01".into(),
        },
        reverse_charge: false,
        items: vec![
            LineItem::new("Item 1", dec!(100), 2, dec!(10), dec!(18)),
            LineItem::new("Item 2", dec!(75), 1, dec!(5), dec!(18)),
        ],
        signature: None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let invoice = sample_invoice();
    invoice.validate()?;

    let totals = InvoiceTotals::for_invoice(&invoice)?;
    for (i, line) in compute_items(&invoice.items, totals.tax_type)?.iter().enumerate() {
        let tax = match line.split() {
            TaxSplit::CentralState { central, state } => {
                format!("CGST {} + SGST {}", money(central), money(state))
            }
            TaxSplit::Integrated(igst) => format!("IGST {}", money(igst)),
        };
        info!(
            "{}. {:<10} net {:>10}  {}",
            i + 1,
            line.item.description,
            money(line.net_amount),
            tax
        );
    }
    info!("Total net amount: {}", money(totals.total_net_amount));
    info!("Total tax ({}): {}", totals.tax_type, money(totals.total_tax_amount));
    info!("Grand total: {}", money(totals.grand_total));
    match amount_in_words_legend(&totals.grand_total_in_words) {
        Some(legend) => info!("Amount in words: {}", legend),
        None => info!("Amount in words: {}", totals.grand_total_in_words),
    }

    let config = ExportConfig {
        title: Some(format!("Tax Invoice {}", invoice.invoice.invoice_no)),
        ..ExportConfig::from_env()
    };
    std::fs::create_dir_all("demos/output")?;
    let path = PathBuf::from("demos/output").join(export_file_name(&invoice));
    let sink = PdfSink::create(&path, &config)?;

    let exported = match std::env::args().nth(1) {
        Some(png) => export_invoice(&invoice, &PngRasterizer { path: png.into() }, sink, &config)?,
        None => export_invoice(&invoice, &PlaceholderRasterizer, sink, &config)?,
    };
    info!(
        "Wrote {} ({} pages)",
        path.display(),
        exported.pagination.len()
    );
    Ok(())
}
