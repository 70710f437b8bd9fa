//! Data model for the Fusion property-definition browser.
//!
//! Every record here is owned by the Fusion Data backend; the types only
//! describe the shapes that cross the REST surface. Field names follow the
//! upstream GraphQL schema (camelCase on the wire) so UI code sees the same
//! structures the backend returns.
#![allow(missing_docs)]

pub mod behavior;
pub mod collection;
pub mod definition;
pub mod ids;
pub mod occurrence;
pub mod property;
pub mod thumbnail;
pub mod version;

pub use behavior::{PropertyBehavior, PropertySpecification};
pub use collection::PropertyDefinitionCollection;
pub use definition::{
    DefinitionList, NewPropertyDefinition, PropertyDefinition, Units,
};
pub use ids::{ItemKind, ItemRef, VersionIds};
pub use occurrence::{ComponentRef, ComponentVersionSummary, IdRef, Occurrence};
pub use property::{
    CustomProperty, CustomPropertyDefinition, PropertyInput,
    SetPropertiesResult,
};
pub use thumbnail::{Thumbnail, ThumbnailStatus};
pub use version::{
    BoundingBox, ComponentVersionProperties, DrawingVersionProperties,
    ManageInfo, Measure, MeasureDefinition, PhysicalProperties,
};
