pub mod cards;
pub mod meta;
pub mod prices;
pub mod sets;
pub mod wishlist;
