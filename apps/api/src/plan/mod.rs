pub mod handlers;
pub mod learning_time;
pub mod reporter;
pub mod resources;
pub mod scheduler;
