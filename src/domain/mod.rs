pub mod models;
pub mod services;
pub mod errors;
pub mod session;
pub mod address;
pub mod navigation;
pub mod location;

pub use models::*;
pub use services::*;
pub use errors::*;
pub use session::*;
pub use address::*;
pub use navigation::*;
pub use location::*;
