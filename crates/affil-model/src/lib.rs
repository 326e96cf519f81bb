pub mod error;
pub mod ids;
pub mod institution;
pub mod record;

pub use error::ModelError;
pub use ids::{ROR_PREFIX, RorId};
pub use institution::{Institution, LOCATION_DELIMITER, Location};
pub use record::OutputRecord;
