pub mod list;
pub mod node;

pub use list::*;
pub use node::*;
