pub mod coordinates;
pub mod core;
mod geo_object;
mod geometry;
pub mod serialization;

pub use self::coordinates::*;
pub use self::geo_object::*;
pub use self::geometry::*;
pub use self::core::*;
