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

//! Workflows behind the Ad Manager sample binaries.

use google_ads_admanager::Result;
use google_ads_admanager::client::PlacementService;
use google_ads_gax::paginator::PageCursor;
use google_ads_gax::selector::SortOrder;
use google_ads_gax::statement::StatementBuilder;

/// The page size all sample queries use.
pub const PAGE_SIZE: u32 = 100;

/// Updates the description of one placement.
///
/// Looks the placement up by id, rewrites its description, and writes the
/// whole object back. Returns the report lines in emission order.
pub async fn update_placements(
    service: &PlacementService,
    placement_id: i64,
) -> Result<Vec<String>> {
    let statement = StatementBuilder::new()
        .where_clause("id = :id")
        .order_by("id", SortOrder::Ascending)
        .limit(1)
        .with_bind_variable("id", placement_id)
        .build()?;
    let page = service.get_placements_by_statement(statement).await?;
    let Some(placement) = page.into_entries().into_iter().next() else {
        return Ok(vec![format!("No placement found with ID {placement_id}.")]);
    };

    let placement = placement.set_description("This placement contains all leaderboards.");
    let updated = service.update_placements(vec![placement]).await?;
    Ok(updated
        .into_iter()
        .map(|p| format!("Placement with ID {} and name '{}' was updated.", p.id, p.name))
        .collect())
}

/// Lists every placement of the network, one line per placement.
pub async fn get_all_placements(service: &PlacementService) -> Result<Vec<String>> {
    let statement = StatementBuilder::new()
        .order_by("id", SortOrder::Ascending)
        .limit(PAGE_SIZE)
        .build()?;
    let client = service.clone();
    let mut cursor = PageCursor::new(statement, move |s| {
        let client = client.clone();
        async move { client.get_placements_by_statement(s).await }
    });

    let mut lines = Vec::new();
    let mut index = 0;
    let mut total = 0;
    while let Some(page) = cursor.next().await {
        let page = page?;
        total = page.total_num_entries();
        for placement in page.into_entries() {
            lines.push(format!(
                "{index}) Placement with ID {} and name '{}' was found.",
                placement.id, placement.name
            ));
            index += 1;
        }
    }
    lines.push(format!("Number of results found: {total}."));
    Ok(lines)
}
