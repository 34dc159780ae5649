// Auto-fail detection: the engine's object-loading window and the problem area scan

pub mod detector;
pub mod oracle;
pub mod problem_area;

pub use detector::{Detection, ProblemAreaDetector, detect};
pub use oracle::{LoadedWindow, WindowOracle, adjusted_end_time};
pub use problem_area::ProblemArea;
