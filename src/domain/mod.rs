//! Domain types of the register: money, products, the cart and the wire
//! record posted at checkout, plus the ports to the external services.

pub mod cart;
pub mod money;
pub mod ports;
pub mod product;
pub mod transaction;
