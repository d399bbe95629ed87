use invoice_core::{
    apply_field_edit, update_item, Bitmap, Error, FieldPath, Invoice, InvoiceTotals, ItemField,
    LineItem, PartyField, SellerField, TaxType,
};
use rust_decimal_macros::dec;

fn sample_invoice() -> Invoice {
    let mut invoice = Invoice {
        place_of_supply: "State A".to_string(),
        place_of_delivery: "State B".to_string(),
        items: vec![
            LineItem::new("Item 1", dec!(100), 2, dec!(10), dec!(18)),
            LineItem::new("Item 2", dec!(75), 1, dec!(5), dec!(18)),
        ],
        ..Invoice::default()
    };
    invoice.seller.name = "ABC Traders".to_string();
    invoice.invoice.invoice_no = "INV456".to_string();
    invoice
}

#[test]
fn field_edit_returns_new_invoice() {
    let original = sample_invoice();
    let edited = apply_field_edit(
        &original,
        FieldPath::Seller(SellerField::GstNo),
        "GSTIN12345678",
    )
    .unwrap();
    assert_eq!(edited.seller.gst_no, "GSTIN12345678");
    assert_eq!(original.seller.gst_no, "");
    assert_eq!(edited.seller.name, original.seller.name);
}

#[test]
fn dotted_paths_parse() {
    assert_eq!(
        "billing.state_code".parse::<FieldPath>().unwrap(),
        FieldPath::Billing(PartyField::StateCode)
    );
    assert_eq!(
        "shipping.pincode".parse::<FieldPath>().unwrap(),
        FieldPath::Shipping(PartyField::Pincode)
    );
    assert_eq!(
        "seller.pan_no".parse::<FieldPath>().unwrap(),
        FieldPath::Seller(SellerField::PanNo)
    );
    assert_eq!("order.order_date".parse::<FieldPath>().unwrap(), FieldPath::OrderDate);
    assert_eq!("invoice.invoice_no".parse::<FieldPath>().unwrap(), FieldPath::InvoiceNo);
    assert_eq!("reverse_charge".parse::<FieldPath>().unwrap(), FieldPath::ReverseCharge);
}

#[test]
fn unknown_paths_are_rejected() {
    for path in ["billing.gst_no", "seller.state_code", "order.invoice_no", "signature", "x.y.z"] {
        assert!(
            matches!(path.parse::<FieldPath>(), Err(Error::UnknownField(_))),
            "{}",
            path
        );
    }
}

#[test]
fn with_field_edits_text_verbatim() {
    let edited = sample_invoice()
        .with_field("shipping.address", "  789 Oak St ")
        .unwrap();
    assert_eq!(edited.shipping.address, "  789 Oak St ");
}

#[test]
fn reverse_charge_parses_booleans() {
    let invoice = sample_invoice();
    assert!(invoice.with_field("reverse_charge", "true").unwrap().reverse_charge);
    assert!(!invoice.with_field("reverse_charge", "false").unwrap().reverse_charge);
    assert!(matches!(
        invoice.with_field("reverse_charge", "yes"),
        Err(Error::InvalidFieldValue { .. })
    ));
}

#[test]
fn editing_place_of_delivery_changes_tax_type() {
    let invoice = sample_invoice();
    assert_eq!(invoice.tax_type(), TaxType::Igst);
    let same_state = invoice.with_field("place_of_delivery", "State A").unwrap();
    assert_eq!(same_state.tax_type(), TaxType::CgstSgst);
    let totals = InvoiceTotals::for_invoice(&same_state).unwrap();
    assert_eq!(totals.tax_type, TaxType::CgstSgst);
    assert_eq!(invoice.tax_type(), TaxType::Igst);
}

#[test]
fn item_edit_is_persistent() {
    let items = sample_invoice().items;
    let updated = update_item(&items, 1, ItemField::Quantity, "4").unwrap();
    assert_eq!(updated[1].quantity, 4);
    assert_eq!(items[1].quantity, 1);
    assert_eq!(updated[0], items[0]);
}

#[test]
fn item_numeric_fields_parse_decimals() {
    let invoice = sample_invoice();
    let edited = invoice
        .with_item_edit(0, ItemField::UnitPrice, "99.50")
        .and_then(|inv| inv.with_item_edit(0, ItemField::Discount, " 0.5 "))
        .and_then(|inv| inv.with_item_edit(0, ItemField::TaxRate, "12"))
        .and_then(|inv| inv.with_item_edit(0, ItemField::Description, "Widget"))
        .unwrap();
    let item = &edited.items[0];
    assert_eq!(item.unit_price, dec!(99.5));
    assert_eq!(item.discount, dec!(0.5));
    assert_eq!(item.tax_rate, dec!(12));
    assert_eq!(item.description, "Widget");
    assert_eq!(
        InvoiceTotals::for_invoice(&edited).unwrap().total_net_amount,
        dec!(198.5) + dec!(70)
    );
}

#[test]
fn unparsable_item_value_is_rejected() {
    let items = sample_invoice().items;
    for (field, value) in [
        (ItemField::Quantity, "two"),
        (ItemField::Quantity, "-1"),
        (ItemField::UnitPrice, ""),
        (ItemField::TaxRate, "18%"),
    ] {
        match update_item(&items, 0, field, value) {
            Err(Error::InvalidFieldValue { field: name, .. }) => {
                assert!(name.starts_with("items[0]."), "{}", name)
            }
            other => panic!("expected InvalidFieldValue, got {:?}", other),
        }
    }
}

#[test]
fn item_index_out_of_range() {
    let invoice = sample_invoice();
    assert!(matches!(
        invoice.with_item_edit(2, ItemField::Quantity, "1"),
        Err(Error::ItemIndexOutOfRange { index: 2, len: 2 })
    ));
    assert!(matches!(
        invoice.with_item_removed(5),
        Err(Error::ItemIndexOutOfRange { index: 5, len: 2 })
    ));
}

#[test]
fn items_can_be_added_and_removed() {
    let invoice = sample_invoice();
    let added = invoice.with_item_added(LineItem::new("Item 3", dec!(1), 1, dec!(0), dec!(5)));
    assert_eq!(added.items.len(), 3);
    assert_eq!(invoice.items.len(), 2);

    let removed = added.with_item_removed(0).unwrap();
    assert_eq!(removed.items.len(), 2);
    assert_eq!(removed.items[0].description, "Item 2");
    assert_eq!(removed.items[1].description, "Item 3");
}

#[test]
fn signature_is_stored_and_cleared() {
    let signed = sample_invoice().with_signature(Some(Bitmap::filled(5, 2, [0, 0, 0])));
    assert_eq!(signed.signature.as_ref().map(Bitmap::width), Some(5));
    assert!(signed.with_signature(None).signature.is_none());
}

#[test]
fn validate_is_opt_in() {
    let invoice = sample_invoice()
        .with_item_edit(0, ItemField::Discount, "-3")
        .unwrap();
    assert!(matches!(invoice.validate(), Err(Error::InvalidLineItem { index: 0, .. })));
    // The calculators still run on the same data.
    let totals = InvoiceTotals::for_invoice(&invoice).unwrap();
    assert_eq!(totals.total_net_amount, dec!(273));
}

#[test]
fn json_round_trip_skips_signature() {
    let invoice = sample_invoice().with_signature(Some(Bitmap::filled(1, 1, [0, 0, 0])));
    let json = serde_json::to_string(&invoice).unwrap();
    let back: Invoice = serde_json::from_str(&json).unwrap();
    assert_eq!(back.items, invoice.items);
    assert_eq!(back.seller, invoice.seller);
    assert!(back.signature.is_none());
}

#[test]
fn partial_json_fills_defaults() {
    let invoice: Invoice =
        serde_json::from_str(r#"{"place_of_supply": "Goa", "billing": {"name": "John Doe"}}"#)
            .unwrap();
    assert_eq!(invoice.place_of_supply, "Goa");
    assert_eq!(invoice.billing.name, "John Doe");
    assert_eq!(invoice.billing.state_code, "");
    assert!(invoice.items.is_empty());
    assert!(!invoice.reverse_charge);
}
