mod builder;
mod project;

pub use builder::{build_record, lottery_id_of};
pub use project::ProjectRecord;
