pub mod settings;
pub mod text_input;
