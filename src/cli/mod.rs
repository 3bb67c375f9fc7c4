mod commands;
mod handlers;

pub use commands::{Cli, Commands};
pub use handlers::{
    handle_add, handle_delete, handle_get, handle_init, handle_list, handle_quota, handle_remind,
    handle_reminders, handle_snapshot, handle_update,
};
