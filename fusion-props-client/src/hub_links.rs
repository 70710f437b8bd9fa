use fusion_props_model::PropertyDefinitionCollection;
use log::{debug, info};
use tokio_util::sync::CancellationToken;

use crate::{api_client::ApiClient, error::Result};

#[derive(Debug, Clone, PartialEq)]
pub struct CollectionLink {
    pub collection: PropertyDefinitionCollection,
    pub linked: bool,
}

/// What the hub collections dialog can show.
#[derive(Debug, Clone, PartialEq)]
pub enum HubLinkState {
    /// The hub listing was rejected: the user does not administer the hub.
    NoAdminAccess,
    /// The application has no collections to offer.
    NoCollections,
    Collections(Vec<CollectionLink>),
}

impl HubLinkState {
    /// Marks a link as established.
    pub fn mark_linked(&mut self, collection_id: &str) {
        if let HubLinkState::Collections(links) = self {
            for link in links.iter_mut().filter(|l| l.collection.id == collection_id) {
                link.linked = true;
            }
        }
    }
}

/// Pairs the application's collections with the hub's linked set.
pub fn link_state(
    mine: Option<Vec<PropertyDefinitionCollection>>,
    linked: Option<Vec<PropertyDefinitionCollection>>,
) -> HubLinkState {
    let Some(linked) = linked else {
        return HubLinkState::NoAdminAccess;
    };
    let mine = match mine {
        Some(mine) if !mine.is_empty() => mine,
        _ => return HubLinkState::NoCollections,
    };

    HubLinkState::Collections(
        mine.into_iter()
            .map(|collection| CollectionLink {
                linked: linked.iter().any(|l| l.id == collection.id),
                collection,
            })
            .collect(),
    )
}

impl ApiClient {
    pub async fn load_hub_link_state(
        &self,
        hub_id: &str,
        cancel: &CancellationToken,
    ) -> HubLinkState {
        let (mine, linked) = tokio::join!(
            self.get_collections(cancel),
            self.get_hub_collections(hub_id, false, cancel),
        );

        if let Err(err) = &linked {
            debug!("[HubLinks] hub {hub_id} listing rejected: {err}");
        }
        link_state(mine.ok(), linked.ok())
    }

    /// Links an unlinked collection; linking is one-way from the dialog.
    pub async fn link_if_unlinked(
        &self,
        hub_id: &str,
        link: &mut CollectionLink,
        cancel: &CancellationToken,
    ) -> Result<()> {
        if link.linked {
            return Ok(());
        }

        self.link_collection(hub_id, &link.collection.id, cancel).await?;
        link.linked = true;
        info!("[HubLinks] linked {} to hub {hub_id}", link.collection.id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collection(id: &str) -> PropertyDefinitionCollection {
        PropertyDefinitionCollection {
            id: id.to_string(),
            name: format!("collection {id}"),
            description: None,
            definitions: None,
        }
    }

    #[test]
    fn rejected_hub_listing_means_no_admin_access() {
        assert_eq!(
            link_state(Some(vec![collection("c1")]), None),
            HubLinkState::NoAdminAccess
        );
    }

    #[test]
    fn no_own_collections() {
        assert_eq!(link_state(Some(vec![]), Some(vec![])), HubLinkState::NoCollections);
        assert_eq!(link_state(None, Some(vec![])), HubLinkState::NoCollections);
    }

    #[test]
    fn marks_linked_collections() {
        let mut state = link_state(
            Some(vec![collection("c1"), collection("c2")]),
            Some(vec![collection("c2")]),
        );

        let HubLinkState::Collections(links) = &state else {
            panic!("expected collections");
        };
        assert!(!links[0].linked);
        assert!(links[1].linked);

        state.mark_linked("c1");
        let HubLinkState::Collections(links) = &state else {
            panic!("expected collections");
        };
        assert!(links.iter().all(|l| l.linked));
    }
}
