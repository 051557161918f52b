pub mod wishlist;

pub use wishlist::*;

use crate::collection::Record;
use crate::schema::Schema;

/// Schemas of every persisted record type.
pub fn schemas() -> Vec<&'static Schema> {
    vec![WishlistItem::schema()]
}
