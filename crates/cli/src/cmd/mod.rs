mod ensure;
mod list;

pub use ensure::cmd_ensure;
pub use list::cmd_list;
