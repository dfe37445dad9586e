pub mod band_state;
pub mod controls;
pub mod crossover;
pub mod engine;
pub mod saturation;
pub mod utils;

pub use band_state::resolve_band_states;
pub use controls::{ControlId, CookedGains, ExciterControls};
pub use crossover::{BandSplitter, FilterKind, LinkwitzRiley2, NUM_BANDS};
pub use engine::MultibandExciter;
pub use saturation::excite;
