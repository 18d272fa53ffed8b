pub use crate::app::App;
pub use caredesk_types::error::{ClResult, Error};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
