#![doc = "Fixed-width primitive vocabulary for the HXApi controller interface."]

pub mod comm;
pub mod config;
pub mod error;
pub mod text;
pub mod typedef;

pub use comm::*;
pub use config::*;
pub use error::*;
pub use text::*;
pub use typedef::*;
