pub mod discovery;
pub mod error;
pub mod extract;
pub mod logging;
pub mod parser;
pub mod record;
pub mod settings;
pub mod tabulate;

pub use error::{Error, Result};
pub use logging::init_tracing;
pub use record::{LegendaryFlag, MonsterRecord};
pub use settings::Settings;
