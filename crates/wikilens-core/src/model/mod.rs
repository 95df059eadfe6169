pub mod entity;
pub mod ids;
pub mod value;

pub use entity::{CategorizedProperties, NormalizedEntity, ProcessedClaim, Sitelink};
pub use ids::EntityId;
pub use value::{
    EntityRef, ExtractedValue, GlobeCoordinate, MonolingualText, QuantityValue, ReferenceKind,
    Scalar, TimeValue,
};
