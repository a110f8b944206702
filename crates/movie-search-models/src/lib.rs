pub mod movie;
pub mod search_record;
pub mod stats;
pub mod banner;

pub use movie::{is_blank, MovieRecord};
pub use search_record::SearchRecord;
pub use stats::StatsRecord;
pub use banner::BannerPayload;
