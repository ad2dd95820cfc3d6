pub mod components;
pub mod shell;
