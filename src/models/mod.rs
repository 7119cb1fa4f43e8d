pub mod health;
pub mod diagnostics;
pub mod usage;
pub mod error;
pub mod messages;

pub use health::*;
pub use diagnostics::*;
pub use usage::*;
pub use error::*;
pub use messages::*;
