use fusion_props_model::{NewPropertyDefinition, PropertyDefinition};
use serde_json::Value;

use super::{FusionData, vars};
use crate::error::Result;
use crate::graphql::{PagedDocument, PaginationMode, QueryDocument, QueryExecutor};

macro_rules! definition_fields {
    () => {
        "id
    name
    specification
    units { id name }
    isArchived
    isHidden
    shouldCopy
    isReadOnly
    description
    propertyBehavior"
    };
}

pub const GET_DEFINITIONS: PagedDocument = PagedDocument {
    first: QueryDocument::new(
        "GetPropertyDefinitions",
        concat!(
            "query GetPropertyDefinitions($propertyDefinitionCollectionId: ID!) {
  application {
    propertyDefinitionCollections(filter: { id: [$propertyDefinitionCollectionId] }) {
      results {
        definitions {
          pagination { cursor pageSize }
          results {
    ",
            definition_fields!(),
            "
          }
        }
      }
    }
  }
}"
        ),
    ),
    after: QueryDocument::new(
        "GetPropertyDefinitions",
        concat!(
            "query GetPropertyDefinitions($propertyDefinitionCollectionId: ID!, $cursor: String!) {
  application {
    propertyDefinitionCollections(filter: { id: [$propertyDefinitionCollectionId] }) {
      results {
        definitions(pagination: { cursor: $cursor }) {
          pagination { cursor pageSize }
          results {
    ",
            definition_fields!(),
            "
          }
        }
      }
    }
  }
}"
        ),
    ),
    minimal: None,
};

pub const CREATE_DEFINITION: QueryDocument = QueryDocument::new(
    "CreatePropertyDefinition",
    concat!(
        "mutation CreatePropertyDefinition(
  $propertyDefinitionCollectionId: ID!,
  $propertyDefinitionName: String!,
  $propertySpecification: String!,
  $description: String!,
  $isHidden: Boolean!,
  $shouldCopy: Boolean!,
  $isReadOnly: Boolean!,
  $propertyBehavior: PropertyBehaviorEnum!
) {
  createPropertyDefinition(
    input: {
      propertyDefinitionCollectionId: $propertyDefinitionCollectionId,
      name: $propertyDefinitionName,
      specification: $propertySpecification,
      description: $description,
      isHidden: $isHidden,
      shouldCopy: $shouldCopy,
      isReadOnly: $isReadOnly,
      propertyBehavior: $propertyBehavior
    }
  ) {
    propertyDefinition {
    ",
        definition_fields!(),
        "
    }
  }
}"
    ),
);

pub const GET_DEFINITION: QueryDocument = QueryDocument::new(
    "GetPropertyDefinition",
    concat!(
        "query GetPropertyDefinition($propertyDefinitionId: ID!) {
  mfg {
    propertyDefinition(propertyDefinitionId: $propertyDefinitionId) {
    ",
        definition_fields!(),
        "
    }
  }
}"
    ),
);

pub const UPDATE_DEFINITION: QueryDocument = QueryDocument::new(
    "UpdatePropertyDefinition",
    concat!(
        "mutation UpdatePropertyDefinition($propertyDefinitionId: ID!, $description: String!, $isHidden: Boolean!) {
  updatePropertyDefinition(
    input: { propertyDefinitionId: $propertyDefinitionId, description: $description, isHidden: $isHidden }
  ) {
    propertyDefinition {
    ",
        definition_fields!(),
        "
    }
  }
}"
    ),
);

pub const ARCHIVE_DEFINITION: QueryDocument = QueryDocument::new(
    "ArchivePropertyDefinition",
    concat!(
        "mutation ArchivePropertyDefinition($propertyDefinitionId: ID!) {
  archivePropertyDefinition(input: { propertyDefinitionId: $propertyDefinitionId }) {
    propertyDefinition {
    ",
        definition_fields!(),
        "
    }
  }
}"
    ),
);

impl<E: QueryExecutor> FusionData<E> {
    /// Definitions of one collection, archived ones included.
    pub async fn get_definitions(
        &self,
        collection_id: &str,
    ) -> Result<Vec<PropertyDefinition>> {
        self.fetch_all(
            &GET_DEFINITIONS,
            vars([("propertyDefinitionCollectionId", Value::from(collection_id))]),
            "/application/propertyDefinitionCollections/results/0/definitions",
            PaginationMode::Full,
        )
        .await
    }

    pub async fn create_definition(
        &self,
        collection_id: &str,
        definition: &NewPropertyDefinition,
    ) -> Result<PropertyDefinition> {
        let variables = vars([
            ("propertyDefinitionCollectionId", Value::from(collection_id)),
            ("propertyDefinitionName", Value::from(definition.name.as_str())),
            (
                "propertySpecification",
                Value::from(definition.specification.as_str()),
            ),
            ("description", Value::from(definition.description.as_str())),
            ("isHidden", Value::from(definition.is_hidden)),
            ("shouldCopy", Value::from(definition.should_copy)),
            ("isReadOnly", Value::from(definition.is_read_only)),
            (
                "propertyBehavior",
                Value::from(definition.property_behavior.as_str()),
            ),
        ]);

        self.query(
            CREATE_DEFINITION,
            Value::Object(variables),
            "/createPropertyDefinition/propertyDefinition",
        )
        .await
    }

    pub async fn get_definition(&self, definition_id: &str) -> Result<PropertyDefinition> {
        self.query(
            GET_DEFINITION,
            Value::Object(vars([("propertyDefinitionId", Value::from(definition_id))])),
            "/mfg/propertyDefinition",
        )
        .await
    }

    /// Only the description and the hidden flag are mutable.
    pub async fn update_definition(
        &self,
        definition_id: &str,
        description: &str,
        is_hidden: bool,
    ) -> Result<PropertyDefinition> {
        self.query(
            UPDATE_DEFINITION,
            Value::Object(vars([
                ("propertyDefinitionId", Value::from(definition_id)),
                ("description", Value::from(description)),
                ("isHidden", Value::from(is_hidden)),
            ])),
            "/updatePropertyDefinition/propertyDefinition",
        )
        .await
    }

    /// Definitions are never deleted; archiving hides them from new writes.
    pub async fn archive_definition(&self, definition_id: &str) -> Result<PropertyDefinition> {
        self.query(
            ARCHIVE_DEFINITION,
            Value::Object(vars([("propertyDefinitionId", Value::from(definition_id))])),
            "/archivePropertyDefinition/propertyDefinition",
        )
        .await
    }
}
