pub mod config_io;
pub mod editor;
pub mod env;
pub mod todo_io;
