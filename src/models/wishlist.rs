use std::fmt;

use serde::{Deserialize, Serialize};

use crate::collection::Record;
use crate::schema::{FieldSpec, Schema};

// ---------------------------------------------------------------------------
// WishlistStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistStatus {
    #[default]
    Watching,
    Bought,
    Removed,
}

impl WishlistStatus {
    pub const ALL: &'static [&'static str] = &["watching", "bought", "removed"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Watching => "watching",
            Self::Bought => "bought",
            Self::Removed => "removed",
        }
    }
}

impl fmt::Display for WishlistStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// WishlistItem
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub card_id: String,
    pub name: String,
    pub set_name: Option<String>,
    pub set_id: Option<String>,
    pub number: Option<String>,
    pub image_url: Option<String>,
    pub desired_price: Option<f64>,
    pub notes: Option<String>,
    #[serde(default)]
    pub status: WishlistStatus,
}

impl WishlistItem {
    /// A `watching` item with only the required fields set.
    pub fn new(card_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            card_id: card_id.into(),
            name: name.into(),
            set_name: None,
            set_id: None,
            number: None,
            image_url: None,
            desired_price: None,
            notes: None,
            status: WishlistStatus::Watching,
        }
    }
}

static WISHLIST_FIELDS: [FieldSpec; 9] = [
    FieldSpec::string("card_id")
        .required()
        .describe("Pokemon TCG card ID (e.g., sv3-1)"),
    FieldSpec::string("name").required().describe("Card name"),
    FieldSpec::string("set_name").describe("Set name"),
    FieldSpec::string("set_id").describe("Set ID"),
    FieldSpec::string("number").describe("Card number within the set"),
    FieldSpec::string("image_url").describe("Primary image URL for the card"),
    FieldSpec::number("desired_price")
        .minimum(0.0)
        .describe("Target price to buy"),
    FieldSpec::string("notes").describe("User notes"),
    FieldSpec::string("status")
        .default_value("watching")
        .one_of(WishlistStatus::ALL)
        .describe("watching | bought | removed"),
];

static WISHLIST_SCHEMA: Schema = Schema {
    name: "WishlistItem",
    collection: "wishlistitem",
    description: "Wishlist items for Pokemon TCG cards",
    fields: &WISHLIST_FIELDS,
};

impl Record for WishlistItem {
    fn schema() -> &'static Schema {
        &WISHLIST_SCHEMA
    }
}
