//! services/api/src/web/protocol.rs
//!
//! Defines the JSON wire format between clients and the API server, and the
//! conversion from that format into the core domain types.

use receipt_processor_core::domain::{Item, Receipt};
use receipt_processor_core::validation::Violation;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

//=========================================================================================
// Payloads Sent FROM the Client TO the Server
//=========================================================================================
// NOTE: Absent or null fields decode as empty so that the validator, not the
// decoder, reports them as missing.
//=========================================================================================

/// A receipt submitted for processing.
#[derive(Deserialize, Serialize, ToSchema, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ReceiptPayload {
    /// The name of the retailer or store the receipt is from.
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "M&M Corner Market", pattern = r"^[\w\s\-&]+$")]
    pub retailer: String,

    /// The date of the purchase printed on the receipt.
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "2022-01-01")]
    pub purchase_date: String,

    /// The time of the purchase printed on the receipt. 24-hour time expected.
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "13:01")]
    pub purchase_time: String,

    #[serde(deserialize_with = "null_as_default")]
    pub items: Vec<ItemPayload>,

    /// The total amount paid on the receipt.
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "6.49", pattern = r"^\d+\.\d{2}$")]
    pub total: String,
}

/// One line item on a submitted receipt.
#[derive(Deserialize, Serialize, ToSchema, Debug, Default, Clone)]
#[serde(rename_all = "camelCase", default)]
pub struct ItemPayload {
    /// The Short Product Description for the item.
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "Mountain Dew 12PK", pattern = r"^[\w\s\-]+$")]
    pub short_description: String,

    /// The total price paid for this item.
    #[serde(deserialize_with = "null_as_default")]
    #[schema(example = "6.49", pattern = r"^\d+\.\d{2}$")]
    pub price: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl From<ItemPayload> for Item {
    fn from(payload: ItemPayload) -> Self {
        Item {
            short_description: payload.short_description,
            price: payload.price,
        }
    }
}

impl From<ReceiptPayload> for Receipt {
    fn from(payload: ReceiptPayload) -> Self {
        Receipt {
            retailer: payload.retailer,
            purchase_date: payload.purchase_date,
            purchase_time: payload.purchase_time,
            items: payload.items.into_iter().map(Item::from).collect(),
            total: payload.total,
        }
    }
}

/// Decodes a request body into a receipt.
///
/// Anything that is not a JSON object of the receipt shape is reported as
/// [`Violation::MalformedInput`].
pub fn decode_receipt(body: &[u8]) -> Result<Receipt, Violation> {
    serde_json::from_slice::<ReceiptPayload>(body)
        .map(Receipt::from)
        .map_err(|e| Violation::MalformedInput(e.to_string()))
}

//=========================================================================================
// Payloads Sent FROM the Server TO the Client
//=========================================================================================

/// The response sent after a receipt was accepted.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct ProcessReceiptResponse {
    #[schema(example = "0")]
    pub id: String,
}

/// The points awarded to a stored receipt.
#[derive(Serialize, Deserialize, ToSchema, Debug)]
pub struct PointsResponse {
    #[schema(example = 109)]
    pub points: u64,
}
