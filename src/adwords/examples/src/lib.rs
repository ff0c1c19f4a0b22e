// Copyright 2025 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     https://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Workflows behind the AdWords sample binaries.
//!
//! Each workflow is a plain async function over service clients, returning
//! the lines it would report. The binaries print the lines; the tests assert
//! them against mocked services.

use google_ads_adwords::Result;
use google_ads_adwords::client::{CampaignSharedSetService, SharedCriterionService};
use google_ads_adwords::model::{Criterion, SharedCriterion};
use google_ads_gax::batcher::OperationBatcher;
use google_ads_gax::operation::{OperandResult, Operation};
use google_ads_gax::paginator::PageCursor;
use google_ads_gax::selector::SelectorBuilder;

/// The page size all sample queries use.
pub const PAGE_SIZE: u32 = 100;

/// Finds the negative shared sets of a campaign and removes their criteria.
///
/// Three phases: discover the campaign's negative-keyword and
/// negative-placement shared sets, list the criteria those sets contain, then
/// remove every criterion in one bulk call. Returns the report lines in
/// emission order.
pub async fn find_and_remove_criteria_from_shared_set(
    campaign_shared_sets: &CampaignSharedSetService,
    shared_criteria: &SharedCriterionService,
    campaign_id: i64,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();

    // Phase 1: which shared sets are attached to the campaign?
    let selector = SelectorBuilder::new()
        .fields(["SharedSetId", "CampaignId", "SharedSetName", "SharedSetType"])
        .equals("CampaignId", campaign_id)
        .is_in(
            "SharedSetType",
            ["NEGATIVE_KEYWORDS", "NEGATIVE_PLACEMENTS"],
        )
        .limit(PAGE_SIZE)
        .build()?;
    let client = campaign_shared_sets.clone();
    let mut cursor = PageCursor::new(selector, move |s| {
        let client = client.clone();
        async move { client.get(s).await }
    });
    let mut shared_set_ids: Vec<i64> = Vec::new();
    while let Some(page) = cursor.next().await {
        for set in page?.into_entries() {
            // The same set can appear on several pages under concurrent
            // mutation; report it once.
            if shared_set_ids.contains(&set.shared_set_id) {
                continue;
            }
            shared_set_ids.push(set.shared_set_id);
            lines.push(format!(
                "Campaign shared set ID {} and name '{}' found for campaign ID {}.",
                set.shared_set_id, set.shared_set_name, set.campaign_id
            ));
        }
    }
    if shared_set_ids.is_empty() {
        lines.push(format!("No shared sets found for campaign ID {campaign_id}."));
        return Ok(lines);
    }

    // Phase 2: which criteria do those sets contain?
    let selector = SelectorBuilder::new()
        .fields(["SharedSetId", "Id", "KeywordText", "KeywordMatchType", "PlacementUrl"])
        .is_in("SharedSetId", &shared_set_ids)
        .limit(PAGE_SIZE)
        .build()?;
    let client = shared_criteria.clone();
    let mut cursor = PageCursor::new(selector, move |s| {
        let client = client.clone();
        async move { client.get(s).await }
    });
    let client = shared_criteria.clone();
    let mut batcher = OperationBatcher::new(move |ops| {
        let client = client.clone();
        async move { client.mutate(ops).await }
    });
    let mut submitted: Vec<(i64, i64)> = Vec::new();
    while let Some(page) = cursor.next().await {
        for criterion in page?.into_entries() {
            lines.push(match &criterion.criterion {
                Criterion::Keyword { id, text, .. } => format!(
                    "Shared negative keyword with ID {id} and text '{text}' was found."
                ),
                Criterion::Placement { id, url } => format!(
                    "Shared negative placement with ID {id} and URL '{url}' was found."
                ),
                Criterion::Other { id, .. } => {
                    format!("Shared criterion with ID {id} was found.")
                }
            });
            submitted.push((criterion.criterion.id(), criterion.shared_set_id));
            batcher.add(Operation::remove(SharedCriterion::new(
                criterion.shared_set_id,
                Criterion::by_id(criterion.criterion.id()),
            )))?;
        }
    }

    // Phase 3: remove them.
    if batcher.is_empty() {
        lines.push("No shared criteria to remove.".to_string());
        return Ok(lines);
    }
    let ret = batcher.flush().await?;
    for (result, (id, shared_set_id)) in ret.results().iter().zip(submitted) {
        lines.push(match result {
            OperandResult::Applied(removed) => format!(
                "Shared criterion ID {} was successfully removed from shared set ID {}.",
                removed.criterion.id(),
                removed.shared_set_id
            ),
            OperandResult::Rejected(error) => format!(
                "Failed to remove shared criterion ID {} from shared set ID {}: {}.",
                id,
                shared_set_id,
                error.error_string()
            ),
        });
    }
    Ok(lines)
}
