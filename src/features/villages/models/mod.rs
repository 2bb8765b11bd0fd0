pub mod sections;
pub mod village;

pub use sections::*;
pub use village::Village;
