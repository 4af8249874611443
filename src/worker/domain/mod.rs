//! Domain model for phase workers.

mod ids;
mod item;
mod normalize;
mod source;
mod terminal;

pub use ids::InvocationId;
pub use item::{
    ExternalSyncUnit, METADATA_ITEM_TYPE, NormalizedItem, TASKS_ITEM_TYPE, USERS_ITEM_TYPE,
};
pub use normalize::{normalize_contact, normalize_project, normalize_task, parse_timestamp};
pub use source::{SourceContact, SourceProject, SourceTask, SpaceMember};
pub use terminal::{TerminalEvent, TerminalEventType};
