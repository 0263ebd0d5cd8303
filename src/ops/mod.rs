pub mod commands;
pub mod cursor_map;
pub mod task_ops;
