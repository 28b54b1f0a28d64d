// Serial module - Serial port ownership
pub mod link;

pub use link::{list_ports, SerialLink};
