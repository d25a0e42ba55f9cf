pub mod email;
pub mod generation;
pub mod template;
