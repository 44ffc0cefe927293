pub mod model;

pub use model::ChatMessage;
