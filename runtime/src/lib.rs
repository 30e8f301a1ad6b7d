pub mod link;
pub mod serial;
pub mod session;
pub mod signals;

pub use link::Link;
pub use serial::SerialConfig;
pub use session::{
    Report,
    Session,
    SessionConfig,
    State,
};
pub use signals::Cancel;
