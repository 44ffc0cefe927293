pub mod model;

pub use model::{Post, PostComment};
