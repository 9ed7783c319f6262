//! Domain models shared between repositories and route handlers.
//!
//! All wire-facing structs serialize as camelCase to match the public
//! JSON contract.

pub mod address;
pub mod cart;
pub mod order;
pub mod player;
pub mod product;
pub mod user;

pub use address::{Address, AddressFields};
pub use cart::{CartItem, cart_total};
pub use order::{Order, OrderDetail, OrderItem, order_total};
pub use player::{Player, PlayerReview, PlayerSummary};
pub use product::Product;
pub use user::User;
