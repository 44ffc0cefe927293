pub mod model;

pub use model::UserSession;
