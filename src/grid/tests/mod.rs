mod expand;
pub mod utils;
