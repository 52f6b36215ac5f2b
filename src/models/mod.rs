pub mod task;
pub mod user;

pub use task::{parse_task_id, task_id_from_path, NewTask, Task, TaskId, TaskInput, DEFAULT_TAG};
pub use user::{User, UserId};
