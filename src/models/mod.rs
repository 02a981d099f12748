pub mod catalog;
pub mod levels;
pub mod nutrients;
pub mod outcome;

pub use catalog::*;
pub use levels::*;
pub use nutrients::*;
pub use outcome::*;
