//! Custom extractors that reject with `AppError` bodies.

mod id_param;
mod query;
mod validated_json;

pub use id_param::ValidatedId;
pub use query::QueryParams;
pub use validated_json::{validation_fields, ValidatedJson};
