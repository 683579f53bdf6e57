mod terminal_image_picker;
mod terminal_input;

pub use terminal_image_picker::{FixedPathImagePicker, TerminalImagePicker};
pub use terminal_input::{print_prompt, TerminalInput};
