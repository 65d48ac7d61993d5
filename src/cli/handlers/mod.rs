pub mod decode;
pub mod encode;
pub mod locator;
pub mod mapping;
