use fusion_props_model::Occurrence;
use serde_json::Value;

use super::{FusionData, vars};
use crate::error::Result;
use crate::graphql::{PagedDocument, PaginationMode, QueryDocument, QueryExecutor};

macro_rules! occurrence_page {
    () => {
        "results {
        componentVersion {
          id
          name
          lastModifiedOn
          component {
            id
            tipVersion { id }
          }
        }
      }
      pagination { cursor }"
    };
}

macro_rules! all_occurrence_page {
    () => {
        "results {
        parentComponentVersion { id }
        componentVersion {
          id
          name
          partNumber
          materialName
          component { id }
        }
      }
      pagination { cursor }"
    };
}

pub const GET_MODEL_OCCURRENCES: PagedDocument = PagedDocument {
    first: QueryDocument::new(
        "GetModelOccurrences",
        concat!(
            "query GetModelOccurrences($componentVersionId: ID!) {
  componentVersion(componentVersionId: $componentVersionId) {
    occurrences {
      ",
            occurrence_page!(),
            "
    }
  }
}"
        ),
    ),
    after: QueryDocument::new(
        "GetModelOccurrences",
        concat!(
            "query GetModelOccurrences($componentVersionId: ID!, $cursor: String!) {
  componentVersion(componentVersionId: $componentVersionId) {
    occurrences(pagination: { cursor: $cursor }) {
      ",
            occurrence_page!(),
            "
    }
  }
}"
        ),
    ),
    minimal: None,
};

pub const GET_ALL_MODEL_OCCURRENCES: PagedDocument = PagedDocument {
    first: QueryDocument::new(
        "GetAllModelOccurrences",
        concat!(
            "query GetAllModelOccurrences($componentVersionId: ID!) {
  componentVersion(componentVersionId: $componentVersionId) {
    allOccurrences {
      ",
            all_occurrence_page!(),
            "
    }
  }
}"
        ),
    ),
    after: QueryDocument::new(
        "GetAllModelOccurrences",
        concat!(
            "query GetAllModelOccurrences($componentVersionId: ID!, $cursor: String!) {
  componentVersion(componentVersionId: $componentVersionId) {
    allOccurrences(pagination: { cursor: $cursor }) {
      ",
            all_occurrence_page!(),
            "
    }
  }
}"
        ),
    ),
    minimal: None,
};

impl<E: QueryExecutor> FusionData<E> {
    /// Direct children of a component version.
    pub async fn get_model_occurrences(&self, version_id: &str) -> Result<Vec<Occurrence>> {
        self.fetch_all(
            &GET_MODEL_OCCURRENCES,
            vars([("componentVersionId", Value::from(version_id))]),
            "/componentVersion/occurrences",
            PaginationMode::Full,
        )
        .await
    }

    /// Every edge of the assembly below a component version, each with its
    /// parent.
    pub async fn get_all_model_occurrences(
        &self,
        version_id: &str,
    ) -> Result<Vec<Occurrence>> {
        self.fetch_all(
            &GET_ALL_MODEL_OCCURRENCES,
            vars([("componentVersionId", Value::from(version_id))]),
            "/componentVersion/allOccurrences",
            PaginationMode::Full,
        )
        .await
    }
}
