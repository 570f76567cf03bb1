pub mod forward;
pub mod user;

pub use forward::*;
pub use user::*;
