mod save;
mod send;

pub use save::save_dialog;
pub use send::send_dialog;
