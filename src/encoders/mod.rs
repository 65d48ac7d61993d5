pub mod codec;
pub mod locator;
pub mod shape;
