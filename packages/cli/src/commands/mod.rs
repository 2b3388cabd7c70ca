pub mod generate;
pub mod list;

pub use generate::{generate, GenerateArgs};
pub use list::list;
