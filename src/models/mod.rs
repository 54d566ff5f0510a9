pub mod price;
pub mod response;

pub use price::*;
pub use response::*;
