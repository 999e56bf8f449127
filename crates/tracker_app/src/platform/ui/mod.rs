pub mod constants;
pub mod html;
pub mod render;
