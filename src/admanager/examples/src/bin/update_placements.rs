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

//! Updates the description of a placement.

use clap::Parser;
use google_ads_admanager::client::PlacementService;
use google_ads_admanager::service::AdManagerServices;
use google_ads_auth::credentials::offline::Api;
use google_ads_gax::session::Session;

#[derive(Debug, Parser)]
struct Args {
    /// The placement to update.
    #[arg(long)]
    placement_id: i64,

    /// The properties file holding the API credentials.
    #[arg(long, default_value = "ads.properties")]
    properties: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let session = Session::from_file(&args.properties, Api::AdManager)?;
    let services = AdManagerServices::new();
    let service = services.get::<PlacementService>(&session).await?;

    let lines = admanager_samples::update_placements(&service, args.placement_id).await?;
    for line in lines {
        println!("{line}");
    }
    Ok(())
}
