pub mod search_handler;
pub mod village_handler;

pub use search_handler::*;
pub use village_handler::*;
