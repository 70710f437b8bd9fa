//! Routing of edited property values to the entity they are written on.

use fusion_props_model::{PropertyBehavior, PropertyInput, SetPropertiesResult};
use log::{info, warn};
use serde_json::Value;
use tokio_util::sync::CancellationToken;

use crate::{
    api_client::ApiClient,
    error::{ClientError, Result},
};

/// One edited input of a property table.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyEdit {
    pub definition_id: String,
    pub behavior: PropertyBehavior,
    pub original: Value,
    pub value: Value,
}

impl PropertyEdit {
    pub fn is_changed(&self) -> bool {
        self.value != self.original
    }
}

/// The ids a value can be written against.
#[derive(Debug, Clone, Copy)]
pub struct WriteTargets<'a> {
    pub item_id: &'a str,
    pub version_id: &'a str,
}

impl<'a> WriteTargets<'a> {
    /// TIMELESS values live on the item, everything else on the version.
    pub fn for_behavior(&self, behavior: PropertyBehavior) -> &'a str {
        if behavior.is_component_level() {
            self.item_id
        } else {
            self.version_id
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TargetedWrite {
    pub target_id: String,
    pub inputs: Vec<PropertyInput>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct WritePlan {
    pub version_writes: Option<TargetedWrite>,
    pub item_writes: Option<TargetedWrite>,
    /// A changed STANDARD value makes the backend create a new version.
    pub creates_new_version: bool,
}

impl WritePlan {
    pub fn is_empty(&self) -> bool {
        self.version_writes.is_none() && self.item_writes.is_none()
    }

    /// Writes in the order they must be sent: version values first, so a
    /// version-scoped value propagates into a version created by a
    /// STANDARD change.
    pub fn writes(&self) -> impl Iterator<Item = &TargetedWrite> {
        self.version_writes.iter().chain(self.item_writes.iter())
    }
}

/// Groups the changed edits by write target. Unchanged edits are dropped.
pub fn plan_writes(targets: WriteTargets<'_>, edits: &[PropertyEdit]) -> WritePlan {
    let mut version_inputs = Vec::new();
    let mut item_inputs = Vec::new();
    let mut creates_new_version = false;

    for edit in edits.iter().filter(|edit| edit.is_changed()) {
        let input = PropertyInput::new(edit.definition_id.clone(), edit.value.clone());
        if edit.behavior.is_component_level() {
            item_inputs.push(input);
        } else {
            creates_new_version |= edit.behavior.is_standard();
            version_inputs.push(input);
        }
    }

    let targeted = |target: &str, inputs: Vec<PropertyInput>| {
        (!inputs.is_empty()).then(|| TargetedWrite {
            target_id: target.to_string(),
            inputs,
        })
    };

    WritePlan {
        version_writes: targeted(targets.version_id, version_inputs),
        item_writes: targeted(targets.item_id, item_inputs),
        creates_new_version,
    }
}

#[derive(Debug, Default)]
pub struct WriteOutcome {
    pub version_result: Option<SetPropertiesResult>,
    pub item_result: Option<SetPropertiesResult>,
    /// The view should move to the new tip version.
    pub refresh_to_tip: bool,
}

#[derive(Debug)]
pub struct WriteFailure {
    pub error: ClientError,
    /// Version writes went through and created a new version even though a
    /// later write failed.
    pub refresh_to_tip: bool,
}

impl ApiClient {
    /// Sends the plan in order, stopping at the first failure.
    pub async fn apply_write_plan(
        &self,
        plan: &WritePlan,
        cancel: &CancellationToken,
    ) -> std::result::Result<WriteOutcome, WriteFailure> {
        let mut outcome = WriteOutcome::default();

        if let Some(write) = &plan.version_writes {
            let result = self
                .set_properties(&write.target_id, &write.inputs, cancel)
                .await
                .map_err(|error| WriteFailure {
                    error,
                    refresh_to_tip: false,
                })?;
            outcome.version_result = Some(result);
        }

        if let Some(write) = &plan.item_writes {
            match self.set_properties(&write.target_id, &write.inputs, cancel).await {
                Ok(result) => outcome.item_result = Some(result),
                Err(error) => {
                    warn!("[Writes] item values for {} failed: {error}", write.target_id);
                    return Err(WriteFailure {
                        error,
                        refresh_to_tip: plan.creates_new_version
                            && outcome.version_result.is_some(),
                    });
                }
            }
        }

        outcome.refresh_to_tip = plan.creates_new_version;
        info!(
            "[Writes] saved {} value(s), new version: {}",
            plan.writes().map(|w| w.inputs.len()).sum::<usize>(),
            plan.creates_new_version
        );
        Ok(outcome)
    }

    /// Clears one value on the entity its behavior is scoped to.
    pub async fn clear_property(
        &self,
        targets: WriteTargets<'_>,
        definition_id: &str,
        behavior: PropertyBehavior,
        cancel: &CancellationToken,
    ) -> Result<SetPropertiesResult> {
        self.delete_property(targets.for_behavior(behavior), definition_id, cancel)
            .await
    }
}
