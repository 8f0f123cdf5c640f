pub mod actions;
pub mod config;
pub mod preferences;
pub mod reducer;
pub mod state;
pub mod tabs;
pub mod toolbar;

pub use actions::*;
pub use reducer::*;
pub use state::*;
pub use tabs::*;
pub use toolbar::*;
