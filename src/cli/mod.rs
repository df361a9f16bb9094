pub mod hide;
pub mod info;
pub mod reveal;

pub use hide::*;
pub use info::*;
pub use reveal::*;
