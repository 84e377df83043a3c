pub mod due;
pub mod list;
pub mod task;
