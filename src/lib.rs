pub mod analysis;
pub mod auto_close;
pub mod launch;

pub use analysis::{analyze, AnalysisSummary};
pub use auto_close::AutoClosePlugin;
pub use launch::{
    load_config, open_replay, ConfigReport, ReplayOptions, VolleyBlockPlugin, CONFIG_LAYERS,
    DEFAULT_SEED,
};
