// Auto-fail repair: padding search, fix guides, filler placement and the
// accept/reject dialogue around them

pub mod dialogue;
pub mod guide;
pub mod placement;
pub mod session;
pub mod solver;

pub use dialogue::{Decision, FixDecider, FixOutcome, FixProposal};
pub use guide::{FixGuide, GuideEntry};
pub use placement::{plan_fillers, safe_placement_time};
pub use session::AutoFailSession;
pub use solver::{PaddingSolution, PaddingSolutions, PaddingSolver};
