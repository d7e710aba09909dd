pub mod accounts;
pub mod fees;
pub mod relay;
pub mod tokens;

pub use accounts::*;
pub use fees::*;
pub use relay::*;
pub use tokens::*;
