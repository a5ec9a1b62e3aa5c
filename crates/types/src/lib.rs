pub mod address;
pub mod currency;
pub mod decimal;
pub mod denom;
pub mod errors;
pub mod metadata;
pub mod supply;

pub use address::*;
pub use currency::*;
pub use decimal::*;
pub use denom::*;
pub use errors::*;
pub use metadata::*;
pub use supply::*;
