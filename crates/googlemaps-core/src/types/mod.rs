//! Domain types shared by the client and the API modules.

mod geolocation;
mod imagery;
mod location;
mod payload;
mod travel;
pub mod xml;

pub use geolocation::*;
pub use imagery::*;
pub use location::*;
pub use payload::*;
pub use travel::*;
pub use xml::{XmlDocument, XmlElement};
