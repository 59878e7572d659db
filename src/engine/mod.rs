mod movement;
mod output;
mod render;
mod vocabulary;

pub use movement::{Move, format_exits, try_handle_movement};
pub use output::{Output, OutputBlock};
pub use render::{prompt_for, render_exit_tables, render_location};
pub use vocabulary::{Resolution, resolve_direction};
