//! Data models for tool inputs and OpenAlex work payloads.

mod enums;
mod inputs;
mod work;

pub use enums::{SearchField, SortDirection};
pub use inputs::*;
pub use work::{
    OPENALEX_URL_PREFIX, PageMeta, WorkRecord, WorksPage, reconstruct_abstract,
    short_openalex_id, work_short_id,
};
