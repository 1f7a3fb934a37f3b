mod reminders;
mod status;

pub mod dtos {
    pub use crate::reminders::dtos::*;
}

pub use crate::reminders::api::*;
pub use crate::status::api::*;
