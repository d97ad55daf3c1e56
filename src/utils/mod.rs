pub mod constants;
pub mod coordinates;
pub mod filename;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use coordinates::normalize_coordinate;
pub use filename::generate_default_output_filename;
pub use logging::init_logging;
pub use progress::ProgressReporter;
