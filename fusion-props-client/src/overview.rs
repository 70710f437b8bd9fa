//! Everything the properties view shows for one version, fetched at once.

use fusion_props_model::{
    ComponentVersionProperties, CustomProperty, DrawingVersionProperties,
    ItemKind, Occurrence, PropertyDefinitionCollection,
};
use log::debug;
use tokio_util::sync::CancellationToken;

use crate::{
    api_client::ApiClient,
    assembly::{AssemblyRow, flatten_assembly},
    error::{ClientError, Result},
};

/// Outcome of one fetch in a fan-out; siblings are unaffected by a rejection.
#[derive(Debug)]
pub enum Settled<T> {
    Fulfilled(T),
    Rejected(ClientError),
}

impl<T> Settled<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Settled::Fulfilled(value) => Some(value),
            Settled::Rejected(_) => None,
        }
    }

    pub fn error(&self) -> Option<&ClientError> {
        match self {
            Settled::Fulfilled(_) => None,
            Settled::Rejected(err) => Some(err),
        }
    }

    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Settled::Fulfilled(_))
    }

    pub fn into_result(self) -> Result<T> {
        match self {
            Settled::Fulfilled(value) => Ok(value),
            Settled::Rejected(err) => Err(err),
        }
    }
}

impl<T> From<Result<T>> for Settled<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Settled::Fulfilled(value),
            Err(err) => Settled::Rejected(err),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GeneralProperties {
    Component(ComponentVersionProperties),
    Drawing(DrawingVersionProperties),
}

/// A hub collection as shown in the properties tab.
#[derive(Debug, Clone, Copy)]
pub struct CollectionView<'a> {
    pub collection: &'a PropertyDefinitionCollection,
    /// Values are only editable in collections the application owns.
    pub editable: bool,
}

#[derive(Debug)]
pub struct VersionOverview {
    pub kind: ItemKind,
    pub version_id: String,
    pub general: Settled<GeneralProperties>,
    pub properties: Settled<Vec<CustomProperty>>,
    pub hub_collections: Settled<Vec<PropertyDefinitionCollection>>,
    pub my_collections: Settled<Vec<PropertyDefinitionCollection>>,
    pub occurrences: Settled<Vec<Occurrence>>,
}

impl VersionOverview {
    /// Current value of a definition on this version, if any.
    pub fn value_of(&self, definition_id: &str) -> Option<&serde_json::Value> {
        self.properties
            .value()?
            .iter()
            .find(|property| property.definition.id == definition_id)
            .map(|property| &property.value)
    }

    pub fn collection_views(&self) -> Vec<CollectionView<'_>> {
        let Some(hub) = self.hub_collections.value() else {
            return Vec::new();
        };
        let mine = self.my_collections.value();

        hub.iter()
            .map(|collection| CollectionView {
                collection,
                editable: mine.is_some_and(|mine| {
                    mine.iter().any(|owned| owned.id == collection.id)
                }),
            })
            .collect()
    }

    /// Assembly rows below this version; empty when occurrences failed.
    pub fn assembly(&self) -> Vec<AssemblyRow> {
        self.occurrences
            .value()
            .map(|occurrences| flatten_assembly(occurrences, &self.version_id))
            .unwrap_or_default()
    }
}

impl ApiClient {
    /// Fetch the five parts of the properties view concurrently.
    ///
    /// Each part settles on its own, so a hub the user cannot administer
    /// still yields general properties and the assembly.
    pub async fn load_version_overview(
        &self,
        hub_id: &str,
        kind: ItemKind,
        version_id: &str,
        cancel: &CancellationToken,
    ) -> VersionOverview {
        debug!("[Overview] loading {kind} version {version_id}");

        let general = async {
            match kind {
                ItemKind::Component => self
                    .get_component_general_properties(version_id, cancel)
                    .await
                    .map(GeneralProperties::Component),
                ItemKind::Drawing => self
                    .get_drawing_general_properties(version_id, cancel)
                    .await
                    .map(GeneralProperties::Drawing),
            }
        };

        let (general, properties, hub_collections, my_collections, occurrences) = tokio::join!(
            general,
            self.get_custom_properties(kind, version_id, cancel),
            self.get_hub_collections(hub_id, false, cancel),
            self.get_collections(cancel),
            self.get_all_occurrences(version_id, cancel),
        );

        VersionOverview {
            kind,
            version_id: version_id.to_string(),
            general: general.into(),
            properties: properties.into(),
            hub_collections: hub_collections.into(),
            my_collections: my_collections.into(),
            occurrences: occurrences.into(),
        }
    }
}
