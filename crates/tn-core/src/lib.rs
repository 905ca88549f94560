//! Types shared by every transitnet crate: station ids, distance values and
//! their validation, the common value error, and opt-in query timing.

pub mod error;
pub mod ids;
pub mod numeric;
pub mod timing;

pub use error::{TnError, TnResult};
pub use ids::*;
pub use numeric::*;
