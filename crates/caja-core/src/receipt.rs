//! # Receipt Data Contract
//!
//! Everything a receipt view needs to render, assembled from a committed
//! [`Sale`] and the [`CompanyProfile`] — with no dependency on any
//! rendering technology. The view layer (print, image, thermal printer)
//! just lays these fields out.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CompanyProfile, Sale};

// =============================================================================
// Receipt
// =============================================================================

/// One itemized receipt line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    pub name: String,
    pub qty: i64,
    /// Unit price at sale time.
    pub unit_price: f64,
    /// Rounded line subtotal in whole pesos.
    pub subtotal: i64,
}

/// A fully resolved receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    /// Business identity header.
    pub company_name: String,
    pub nit: String,
    pub address: String,
    pub phone: String,

    /// Last 6 digits of the sale id.
    pub folio: String,

    /// Sale completion time, `dd/mm/YYYY HH:MM:SS`.
    pub date: String,

    pub lines: Vec<ReceiptLine>,

    /// Grand total in whole pesos (the sale's committed total).
    pub total: i64,

    /// Grand total pre-formatted in the es-CO style, e.g. `$ 3.750`.
    pub total_display: String,

    pub thank_you_message: String,
}

impl Receipt {
    /// Assembles the receipt for a committed sale.
    pub fn build(sale: &Sale, profile: &CompanyProfile) -> Receipt {
        Receipt {
            company_name: profile.name.clone(),
            nit: profile.nit.clone(),
            address: profile.address.clone(),
            phone: profile.phone.clone(),
            folio: sale.folio(),
            date: sale.date.format("%d/%m/%Y %H:%M:%S").to_string(),
            lines: sale
                .items
                .iter()
                .map(|item| ReceiptLine {
                    name: item.name.clone(),
                    qty: item.qty,
                    unit_price: item.price,
                    subtotal: item.subtotal().pesos(),
                })
                .collect(),
            total: sale.total,
            total_display: Money::from_pesos(sale.total).to_string(),
            thank_you_message: profile.thank_you_message.clone(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
