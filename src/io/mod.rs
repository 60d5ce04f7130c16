pub mod store_io;

pub use store_io::*;
