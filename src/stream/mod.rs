pub mod cursor;
pub mod encoding;
