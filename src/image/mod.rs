mod bracket;
mod utils;

pub use crate::image::bracket::{render, ColorScheme};
pub use crate::image::utils::ExtraImageUtils;
