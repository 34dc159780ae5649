// Hit object data model: objects, kinds, sorted timeline, timing parameters

mod error;
mod hit_object;
mod params;
mod timeline;

pub use error::AutoFailError;
pub use hit_object::{HitKind, HitObject, Position};
pub use params::TimingParams;
pub use timeline::Timeline;
