use fusion_props_model::PropertyDefinitionCollection;
use serde_json::Value;

use super::{FusionData, vars};
use crate::error::Result;
use crate::graphql::{PagedDocument, PaginationMode, QueryDocument, QueryExecutor};

macro_rules! collection_page {
    () => {
        "pagination { cursor pageSize }
            results { id name description }"
    };
}

macro_rules! hub_collection_page {
    () => {
        "pagination { cursor pageSize }
            results {
              id
              name
              definitions {
                results {
                  id
                  name
                  propertyBehavior
                  isArchived
                  isReadOnly
                  specification
                  units { name }
                }
              }
            }"
    };
}

pub const GET_COLLECTIONS: PagedDocument = PagedDocument {
    first: QueryDocument::new(
        "GetPropertyDefinitionCollections",
        concat!(
            "query GetPropertyDefinitionCollections {
  application {
    propertyDefinitionCollections {
      ",
            collection_page!(),
            "
    }
  }
}"
        ),
    ),
    after: QueryDocument::new(
        "GetPropertyDefinitionCollections",
        concat!(
            "query GetPropertyDefinitionCollections($cursor: String!) {
  application {
    propertyDefinitionCollections(pagination: { cursor: $cursor }) {
      ",
            collection_page!(),
            "
    }
  }
}"
        ),
    ),
    minimal: None,
};

pub const GET_COLLECTIONS_BY_HUB: PagedDocument = PagedDocument {
    first: QueryDocument::new(
        "GetPropertyDefinitionCollectionsByHub",
        concat!(
            "query GetPropertyDefinitionCollectionsByHub($hubId: ID!) {
  nav {
    hub(hubId: $hubId) {
      propertyDefinitionCollections {
        ",
            hub_collection_page!(),
            "
      }
    }
  }
}"
        ),
    ),
    after: QueryDocument::new(
        "GetPropertyDefinitionCollectionsByHub",
        concat!(
            "query GetPropertyDefinitionCollectionsByHub($hubId: ID!, $cursor: String!) {
  nav {
    hub(hubId: $hubId) {
      propertyDefinitionCollections(pagination: { cursor: $cursor }) {
        ",
            hub_collection_page!(),
            "
      }
    }
  }
}"
        ),
    ),
    minimal: Some(QueryDocument::new(
        "GetPropertyDefinitionCollectionsByHub",
        concat!(
            "query GetPropertyDefinitionCollectionsByHub($hubId: ID!, $limit: Int!) {
  nav {
    hub(hubId: $hubId) {
      propertyDefinitionCollections(pagination: { limit: $limit }) {
        ",
            hub_collection_page!(),
            "
      }
    }
  }
}"
        ),
    )),
};

pub const CREATE_COLLECTION: QueryDocument = QueryDocument::new(
    "CreatePropertyDefinitionCollection",
    "mutation CreatePropertyDefinitionCollection($name: String!, $description: String!) {
  createPropertyDefinitionCollection(input: { name: $name, description: $description }) {
    propertyDefinitionCollection { id name description }
  }
}",
);

pub const UPDATE_COLLECTION: QueryDocument = QueryDocument::new(
    "UpdatePropertyDefinitionCollection",
    "mutation UpdatePropertyDefinitionCollection($propertyDefinitionCollectionId: ID!, $description: String!) {
  updatePropertyDefinitionCollection(
    input: { propertyDefinitionCollectionId: $propertyDefinitionCollectionId, description: $description }
  ) {
    propertyDefinitionCollection { id name description }
  }
}",
);

pub const LINK_COLLECTION: QueryDocument = QueryDocument::new(
    "LinkPropertyDefinitionCollection",
    "mutation LinkPropertyDefinitionCollection($propertyDefinitionCollectionId: ID!, $hubId: ID!) {
  linkPropertyDefinitionCollection(
    input: { propertyDefinitionCollectionId: $propertyDefinitionCollectionId, hubId: $hubId }
  ) {
    hub { id name }
  }
}",
);

pub const UNLINK_COLLECTION: QueryDocument = QueryDocument::new(
    "UnlinkPropertyDefinitionCollection",
    "mutation UnlinkPropertyDefinitionCollection($propertyDefinitionCollectionId: ID!, $hubId: ID!) {
  unlinkPropertyDefinitionCollection(
    input: { propertyDefinitionCollectionId: $propertyDefinitionCollectionId, hubId: $hubId }
  ) {
    propertyDefinitionCollectionId
    hub { id name }
  }
}",
);

impl<E: QueryExecutor> FusionData<E> {
    /// Every collection owned by the application.
    pub async fn get_collections(&self) -> Result<Vec<PropertyDefinitionCollection>> {
        self.fetch_all(
            &GET_COLLECTIONS,
            vars([]),
            "/application/propertyDefinitionCollections",
            PaginationMode::Full,
        )
        .await
    }

    /// Collections linked to a hub, with their definitions.
    ///
    /// [`PaginationMode::Minimal`] requests a single one-item page, which is
    /// enough to tell whether the hub has any collection at all.
    pub async fn get_collections_by_hub(
        &self,
        hub_id: &str,
        mode: PaginationMode,
    ) -> Result<Vec<PropertyDefinitionCollection>> {
        self.fetch_all(
            &GET_COLLECTIONS_BY_HUB,
            vars([("hubId", Value::from(hub_id))]),
            "/nav/hub/propertyDefinitionCollections",
            mode,
        )
        .await
    }

    pub async fn create_collection(
        &self,
        name: &str,
        description: &str,
    ) -> Result<PropertyDefinitionCollection> {
        self.query(
            CREATE_COLLECTION,
            Value::Object(vars([
                ("name", Value::from(name)),
                ("description", Value::from(description)),
            ])),
            "/createPropertyDefinitionCollection/propertyDefinitionCollection",
        )
        .await
    }

    pub async fn update_collection(
        &self,
        collection_id: &str,
        description: &str,
    ) -> Result<PropertyDefinitionCollection> {
        self.query(
            UPDATE_COLLECTION,
            Value::Object(vars([
                ("propertyDefinitionCollectionId", Value::from(collection_id)),
                ("description", Value::from(description)),
            ])),
            "/updatePropertyDefinitionCollection/propertyDefinitionCollection",
        )
        .await
    }

    /// Returns the id of the hub the collection was linked to.
    pub async fn link_collection_to_hub(
        &self,
        hub_id: &str,
        collection_id: &str,
    ) -> Result<String> {
        self.query(
            LINK_COLLECTION,
            Value::Object(vars([
                ("propertyDefinitionCollectionId", Value::from(collection_id)),
                ("hubId", Value::from(hub_id)),
            ])),
            "/linkPropertyDefinitionCollection/hub/id",
        )
        .await
    }

    /// Returns the id of the hub the collection was unlinked from.
    pub async fn unlink_collection_from_hub(
        &self,
        hub_id: &str,
        collection_id: &str,
    ) -> Result<String> {
        self.query(
            UNLINK_COLLECTION,
            Value::Object(vars([
                ("propertyDefinitionCollectionId", Value::from(collection_id)),
                ("hubId", Value::from(hub_id)),
            ])),
            "/unlinkPropertyDefinitionCollection/hub/id",
        )
        .await
    }
}
