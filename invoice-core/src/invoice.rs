use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::bitmap::Bitmap;
use crate::error::{Error, Result};
use crate::line_item::{self, LineItem, TaxType};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SellerDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub pan_no: String,
    pub gst_no: String,
}

/// Billing or shipping party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartyDetails {
    pub name: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub state_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderDetails {
    pub order_no: String,
    pub order_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceDetails {
    pub invoice_no: String,
    pub invoice_date: String,
}

/// An invoice as edited by the user.
///
/// Text fields are opaque and only displayed; the two place fields also
/// decide the tax type. Edits go through the `with_*` methods and
/// [`apply_field_edit`], which return a new value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Invoice {
    pub seller: SellerDetails,
    pub place_of_supply: String,
    pub billing: PartyDetails,
    pub shipping: PartyDetails,
    pub place_of_delivery: String,
    pub order: OrderDetails,
    pub invoice: InvoiceDetails,
    pub reverse_charge: bool,
    pub items: Vec<LineItem>,
    #[serde(skip)]
    pub signature: Option<Bitmap>,
}

impl Invoice {
    pub fn tax_type(&self) -> TaxType {
        line_item::tax_type(&self.place_of_supply, &self.place_of_delivery)
    }

    /// Boundary check for item amounts. The calculators never call this.
    pub fn validate(&self) -> Result<()> {
        line_item::validate_items(&self.items)
    }

    /// Apply a dotted field path such as `"billing.state_code"`.
    pub fn with_field(&self, path: &str, value: &str) -> Result<Invoice> {
        apply_field_edit(self, path.parse()?, value)
    }

    pub fn with_item_edit(&self, index: usize, field: ItemField, value: &str) -> Result<Invoice> {
        Ok(Invoice {
            items: update_item(&self.items, index, field, value)?,
            ..self.clone()
        })
    }

    pub fn with_item_added(&self, item: LineItem) -> Invoice {
        let mut items = self.items.clone();
        items.push(item);
        Invoice {
            items,
            ..self.clone()
        }
    }

    pub fn with_item_removed(&self, index: usize) -> Result<Invoice> {
        check_index(&self.items, index)?;
        let items = self
            .items
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, item)| item.clone())
            .collect();
        Ok(Invoice {
            items,
            ..self.clone()
        })
    }

    /// Store a captured signature. `None` clears it.
    pub fn with_signature(&self, signature: Option<Bitmap>) -> Invoice {
        Invoice {
            signature,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SellerField {
    Name,
    Address,
    City,
    State,
    Pincode,
    PanNo,
    GstNo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartyField {
    Name,
    Address,
    City,
    State,
    Pincode,
    StateCode,
}

/// Address of one editable invoice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPath {
    Seller(SellerField),
    Billing(PartyField),
    Shipping(PartyField),
    PlaceOfSupply,
    PlaceOfDelivery,
    OrderNo,
    OrderDate,
    InvoiceNo,
    InvoiceDate,
    ReverseCharge,
}

impl FromStr for FieldPath {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let path = match s.split_once('.') {
            None => match s {
                "place_of_supply" => FieldPath::PlaceOfSupply,
                "place_of_delivery" => FieldPath::PlaceOfDelivery,
                "reverse_charge" => FieldPath::ReverseCharge,
                _ => return Err(Error::UnknownField(s.to_string())),
            },
            Some(("seller", field)) => FieldPath::Seller(match field {
                "name" => SellerField::Name,
                "address" => SellerField::Address,
                "city" => SellerField::City,
                "state" => SellerField::State,
                "pincode" => SellerField::Pincode,
                "pan_no" => SellerField::PanNo,
                "gst_no" => SellerField::GstNo,
                _ => return Err(Error::UnknownField(s.to_string())),
            }),
            Some((section @ ("billing" | "shipping"), field)) => {
                let field = party_field(field).ok_or_else(|| Error::UnknownField(s.to_string()))?;
                if section == "billing" {
                    FieldPath::Billing(field)
                } else {
                    FieldPath::Shipping(field)
                }
            }
            Some(("order", "order_no")) => FieldPath::OrderNo,
            Some(("order", "order_date")) => FieldPath::OrderDate,
            Some(("invoice", "invoice_no")) => FieldPath::InvoiceNo,
            Some(("invoice", "invoice_date")) => FieldPath::InvoiceDate,
            Some(_) => return Err(Error::UnknownField(s.to_string())),
        };
        Ok(path)
    }
}

fn party_field(field: &str) -> Option<PartyField> {
    Some(match field {
        "name" => PartyField::Name,
        "address" => PartyField::Address,
        "city" => PartyField::City,
        "state" => PartyField::State,
        "pincode" => PartyField::Pincode,
        "state_code" => PartyField::StateCode,
        _ => return None,
    })
}

/// Return a copy of `invoice` with one field replaced.
///
/// Text fields take `value` verbatim. `reverse_charge` accepts `"true"` or
/// `"false"`.
pub fn apply_field_edit(invoice: &Invoice, path: FieldPath, value: &str) -> Result<Invoice> {
    let mut next = invoice.clone();
    let text = value.to_string();
    match path {
        FieldPath::Seller(field) => {
            let seller = &mut next.seller;
            let slot = match field {
                SellerField::Name => &mut seller.name,
                SellerField::Address => &mut seller.address,
                SellerField::City => &mut seller.city,
                SellerField::State => &mut seller.state,
                SellerField::Pincode => &mut seller.pincode,
                SellerField::PanNo => &mut seller.pan_no,
                SellerField::GstNo => &mut seller.gst_no,
            };
            *slot = text;
        }
        FieldPath::Billing(field) => *party_slot(&mut next.billing, field) = text,
        FieldPath::Shipping(field) => *party_slot(&mut next.shipping, field) = text,
        FieldPath::PlaceOfSupply => next.place_of_supply = text,
        FieldPath::PlaceOfDelivery => next.place_of_delivery = text,
        FieldPath::OrderNo => next.order.order_no = text,
        FieldPath::OrderDate => next.order.order_date = text,
        FieldPath::InvoiceNo => next.invoice.invoice_no = text,
        FieldPath::InvoiceDate => next.invoice.invoice_date = text,
        FieldPath::ReverseCharge => {
            next.reverse_charge = value.trim().parse().map_err(|_| Error::InvalidFieldValue {
                field: "reverse_charge".to_string(),
                value: text,
            })?;
        }
    }
    Ok(next)
}

fn party_slot(party: &mut PartyDetails, field: PartyField) -> &mut String {
    match field {
        PartyField::Name => &mut party.name,
        PartyField::Address => &mut party.address,
        PartyField::City => &mut party.city,
        PartyField::State => &mut party.state,
        PartyField::Pincode => &mut party.pincode,
        PartyField::StateCode => &mut party.state_code,
    }
}

/// Editable column of a line item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemField {
    Description,
    UnitPrice,
    Quantity,
    Discount,
    TaxRate,
}

impl ItemField {
    pub fn name(&self) -> &'static str {
        match self {
            ItemField::Description => "description",
            ItemField::UnitPrice => "unit_price",
            ItemField::Quantity => "quantity",
            ItemField::Discount => "discount",
            ItemField::TaxRate => "tax_rate",
        }
    }
}

impl FromStr for ItemField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "description" => Ok(ItemField::Description),
            "unit_price" => Ok(ItemField::UnitPrice),
            "quantity" => Ok(ItemField::Quantity),
            "discount" => Ok(ItemField::Discount),
            "tax_rate" => Ok(ItemField::TaxRate),
            _ => Err(Error::UnknownField(s.to_string())),
        }
    }
}

/// Return a new item list with one field of `items[index]` replaced.
///
/// Numeric fields are parsed from `value`; the input slice is left as is.
pub fn update_item(
    items: &[LineItem],
    index: usize,
    field: ItemField,
    value: &str,
) -> Result<Vec<LineItem>> {
    check_index(items, index)?;
    let invalid = || Error::InvalidFieldValue {
        field: format!("items[{}].{}", index, field.name()),
        value: value.to_string(),
    };

    let mut edited = items[index].clone();
    match field {
        ItemField::Description => edited.description = value.to_string(),
        ItemField::UnitPrice => edited.unit_price = parse_decimal(value).ok_or_else(invalid)?,
        ItemField::Quantity => edited.quantity = value.trim().parse().map_err(|_| invalid())?,
        ItemField::Discount => edited.discount = parse_decimal(value).ok_or_else(invalid)?,
        ItemField::TaxRate => edited.tax_rate = parse_decimal(value).ok_or_else(invalid)?,
    }

    Ok(items
        .iter()
        .enumerate()
        .map(|(i, item)| if i == index { edited.clone() } else { item.clone() })
        .collect())
}

fn parse_decimal(value: &str) -> Option<Decimal> {
    Decimal::from_str(value.trim()).ok()
}

fn check_index(items: &[LineItem], index: usize) -> Result<()> {
    if index >= items.len() {
        return Err(Error::ItemIndexOutOfRange {
            index,
            len: items.len(),
        });
    }
    Ok(())
}
