pub mod health;
pub mod pages;
pub mod diagnostics;

pub use health::*;
pub use pages::*;
pub use diagnostics::*;
