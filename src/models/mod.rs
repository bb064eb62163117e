pub mod catalog;
pub mod request;
pub mod response;

pub use catalog::*;
pub use request::*;
pub use response::*;
