//! The release and track aggregate that decoded tags are merged onto.

mod actor;
mod media;
mod release;
mod track;

pub use self::actor::{Actor, ActorRoles};
pub use self::media::Media;
pub use self::release::{Disc, IdType, Publishing, Release};
pub use self::track::{
    disc_number_by_track_pos, AudioInfo, Composition, FileInfo, Lyrics, Record, Track,
};
