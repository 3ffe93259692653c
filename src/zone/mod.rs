pub mod locator;

pub use locator::{locate, locate_forward, locate_reverse, Located};
