pub mod config;
pub mod entity;
pub mod explore;
pub mod normalize;
pub mod search;

pub use entity::run_entity;
pub use explore::run_explore;
pub use normalize::run_normalize;
pub use search::run_search;
