mod config;
mod data;
mod node;
mod search;
mod tree;

#[cfg(test)]
mod tests;

pub use config::*;
pub use data::*;
pub use node::*;
pub use search::*;
pub use tree::*;
