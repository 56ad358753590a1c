pub mod colormap;
pub mod render;
pub mod types;
