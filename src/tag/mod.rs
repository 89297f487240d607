mod key;
pub(crate) mod map;
mod table;

pub use self::key::{TagKey, TagScheme};
pub use self::map::TagMap;
