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

//! Removes every criterion from the negative shared sets of a campaign.

use clap::Parser;
use google_ads_adwords::client::{CampaignSharedSetService, SharedCriterionService};
use google_ads_adwords::service::AdWordsServices;
use google_ads_auth::credentials::offline::Api;
use google_ads_gax::session::Session;

#[derive(Debug, Parser)]
struct Args {
    /// The campaign whose shared criteria to remove.
    #[arg(long)]
    campaign_id: i64,

    /// The properties file holding the API credentials.
    #[arg(long, default_value = "ads.properties")]
    properties: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let session = Session::from_file(&args.properties, Api::AdWords)?;
    let services = AdWordsServices::new();
    let campaign_shared_sets = services.get::<CampaignSharedSetService>(&session).await?;
    let shared_criteria = services.get::<SharedCriterionService>(&session).await?;

    let lines = adwords_samples::find_and_remove_criteria_from_shared_set(
        &campaign_shared_sets,
        &shared_criteria,
        args.campaign_id,
    )
    .await?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
