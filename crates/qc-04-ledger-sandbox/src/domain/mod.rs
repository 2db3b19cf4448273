pub mod committee;
pub mod entities;
pub mod errors;
pub mod params;
pub mod snapshot;

pub use committee::*;
pub use entities::*;
pub use errors::*;
pub use params::*;
pub use snapshot::*;
