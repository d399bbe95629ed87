use invoice_core::{AmountInWords, Error, Invoice, InvoiceTotals, LineItem, TaxType};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample_items() -> Vec<LineItem> {
    vec![
        LineItem::new("Item 1", dec!(100), 2, dec!(10), dec!(18)),
        LineItem::new("Item 2", dec!(75), 1, dec!(5), dec!(18)),
    ]
}

#[test]
fn two_item_scenario() {
    let invoice = Invoice {
        place_of_supply: "State A".to_string(),
        place_of_delivery: "State B".to_string(),
        items: sample_items(),
        ..Invoice::default()
    };
    let totals = InvoiceTotals::for_invoice(&invoice).unwrap();
    assert_eq!(totals.tax_type, TaxType::Igst);
    assert_eq!(totals.total_net_amount, dec!(260));
    assert_eq!(totals.total_tax_amount, dec!(46.8));
    assert_eq!(totals.grand_total, dec!(306.8));
    assert_eq!(
        totals.grand_total_in_words,
        AmountInWords::Spelled("three hundred and six".to_string())
    );
}

#[test]
fn empty_items_give_zero_totals() {
    let totals = InvoiceTotals::compute(&[], TaxType::CgstSgst).unwrap();
    assert_eq!(totals.total_net_amount, dec!(0));
    assert_eq!(totals.total_tax_amount, dec!(0));
    assert_eq!(totals.grand_total, dec!(0));
    assert_eq!(totals.grand_total_in_words.as_str(), "");
}

#[test]
fn tax_is_summed_per_line_rate() {
    let items = vec![
        LineItem::new("a", dec!(100), 1, dec!(0), dec!(5)),
        LineItem::new("b", dec!(100), 1, dec!(0), dec!(28)),
    ];
    let totals = InvoiceTotals::compute(&items, TaxType::Igst).unwrap();
    // 5 + 28, not 200 at a single rate.
    assert_eq!(totals.total_tax_amount, dec!(33));
    assert_eq!(totals.grand_total, dec!(233));
}

#[test]
fn grand_total_is_net_plus_tax() {
    let items = vec![
        LineItem::new("a", dec!(0.1), 3, dec!(0.05), dec!(18)),
        LineItem::new("b", dec!(1999.99), 13, dec!(249.5), dec!(12)),
        LineItem::new("c", dec!(7.77), 9, dec!(100), dec!(28)),
    ];
    let totals = InvoiceTotals::compute(&items, TaxType::CgstSgst).unwrap();
    assert_eq!(
        totals.total_net_amount + totals.total_tax_amount,
        totals.grand_total
    );
}

#[test]
fn large_totals_overflow_words() {
    let items = vec![LineItem::new("plant", dec!(500000000), 3, dec!(0), dec!(0))];
    let totals = InvoiceTotals::compute(&items, TaxType::Igst).unwrap();
    assert_eq!(totals.grand_total, dec!(1500000000));
    assert!(totals.grand_total_in_words.is_overflow());
}

#[test]
fn negative_grand_total_has_no_words() {
    let items = vec![LineItem::new("refund", dec!(10), 1, dec!(50), dec!(18))];
    let totals = InvoiceTotals::compute(&items, TaxType::Igst).unwrap();
    assert_eq!(totals.grand_total, dec!(-47.2));
    assert_eq!(totals.grand_total_in_words, AmountInWords::Negative);
}

#[test]
fn same_state_invoice_uses_split_tax() {
    let invoice = Invoice {
        place_of_supply: "Karnataka".to_string(),
        place_of_delivery: "Karnataka".to_string(),
        items: sample_items(),
        ..Invoice::default()
    };
    let totals = InvoiceTotals::for_invoice(&invoice).unwrap();
    assert_eq!(totals.tax_type, TaxType::CgstSgst);
    assert_eq!(totals.grand_total, dec!(306.8));
}

#[test]
fn summing_past_decimal_range_is_an_error() {
    let items = vec![
        LineItem::new("a", Decimal::MAX, 1, dec!(0), dec!(0)),
        LineItem::new("b", Decimal::MAX, 1, dec!(0), dec!(0)),
    ];
    assert!(matches!(
        InvoiceTotals::compute(&items, TaxType::Igst),
        Err(Error::AmountOverflow("total net amount"))
    ));
}

#[test]
fn grand_total_overflow_is_an_error() {
    // Net fits, net plus its tax does not.
    let items = vec![LineItem::new("a", Decimal::MAX, 1, dec!(0), dec!(50))];
    assert!(matches!(
        InvoiceTotals::compute(&items, TaxType::Igst),
        Err(Error::AmountOverflow("grand total"))
    ));
}
