pub mod tag_parser;
pub mod task_parser;
pub mod task_serializer;

pub use tag_parser::{find_tags, parse_all};
pub use task_parser::parse_task;
pub use task_serializer::{serialize_task, serialize_tasks};
