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

//! SOAP implementations of the Ad Manager service stubs.

use crate::model::{Placement, PlacementStatus};
use crate::stub;
use google_ads_gax::error::Error;
use google_ads_gax::page::Page;
use google_ads_gax::statement::{Statement, Value};
use google_ads_soap::client::{SoapBody, SoapClient};
use google_ads_soap::xml::Element;

pub(crate) const PUBLISHER_NAMESPACE: &str = "https://www.google.com/apis/ads/publisher/v201705";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

fn service_path(tag: &str) -> String {
    format!("/apis/ads/publisher/v201705/{tag}")
}

/// Implements [stub::PlacementService] over SOAP.
#[derive(Debug)]
pub struct PlacementService {
    client: SoapClient,
}

impl PlacementService {
    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl stub::PlacementService for PlacementService {
    async fn get_placements_by_statement(
        &self,
        statement: Statement,
    ) -> Result<Page<Placement>, Error> {
        self.client
            .invoke(
                &service_path("PlacementService"),
                PUBLISHER_NAMESPACE,
                &GetPlacementsByStatement { statement },
            )
            .await
    }

    async fn update_placements(
        &self,
        placements: Vec<Placement>,
    ) -> Result<Vec<Placement>, Error> {
        self.client
            .invoke(
                &service_path("PlacementService"),
                PUBLISHER_NAMESPACE,
                &UpdatePlacements { placements },
            )
            .await
    }
}

struct GetPlacementsByStatement {
    statement: Statement,
}

impl SoapBody for GetPlacementsByStatement {
    type Output = Page<Placement>;

    fn action(&self) -> &'static str {
        "getPlacementsByStatement"
    }

    fn to_body(&self, namespace: &str) -> Element {
        Element::new("getPlacementsByStatement")
            .attr("xmlns", namespace)
            .child(statement_element("filterStatement", &self.statement))
    }

    fn from_response(&self, response: &Element) -> Result<Page<Placement>, Error> {
        let rval = response.require_child("rval")?;
        let total = rval
            .require_text("totalResultSetSize")?
            .parse::<u32>()
            .map_err(Error::deser)?;
        let results = rval
            .get_children("results")
            .map(placement_from)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Page::new(results, total))
    }
}

struct UpdatePlacements {
    placements: Vec<Placement>,
}

impl SoapBody for UpdatePlacements {
    type Output = Vec<Placement>;

    fn action(&self) -> &'static str {
        "updatePlacements"
    }

    fn to_body(&self, namespace: &str) -> Element {
        Element::new("updatePlacements")
            .attr("xmlns", namespace)
            .children(
                self.placements
                    .iter()
                    .map(|p| placement_element("placements", p)),
            )
    }

    // Array returns repeat the `rval` element once per entry.
    fn from_response(&self, response: &Element) -> Result<Vec<Placement>, Error> {
        response
            .get_children("rval")
            .map(placement_from)
            .collect()
    }
}

/// Renders a statement with its bind-variable map.
pub(crate) fn statement_element(name: &str, statement: &Statement) -> Element {
    let mut element = Element::new(name).leaf("query", statement.to_pql());
    for (key, value) in statement.values() {
        let (type_tag, rendered) = match value {
            Value::Number(v) => ("NumberValue", v.to_string()),
            Value::Text(v) => ("TextValue", v.clone()),
            Value::Boolean(v) => ("BooleanValue", v.to_string()),
        };
        element = element.child(
            Element::new("values").leaf("key", key).child(
                Element::new("value")
                    .attr("xmlns:xsi", XSI_NAMESPACE)
                    .attr("xsi:type", type_tag)
                    .leaf("value", rendered),
            ),
        );
    }
    element
}

fn placement_element(name: &str, placement: &Placement) -> Element {
    let mut element = Element::new(name);
    if placement.id != 0 {
        element = element.leaf("id", placement.id.to_string());
    }
    element = element
        .leaf("name", &placement.name)
        .leaf("description", &placement.description)
        .leaf("status", placement.status.as_str());
    for id in &placement.targeted_ad_unit_ids {
        element = element.leaf("targetedAdUnitIds", id);
    }
    element
}

fn placement_from(element: &Element) -> Result<Placement, Error> {
    Ok(Placement {
        id: element.require_text("id")?.parse().map_err(Error::deser)?,
        name: element.child_text("name").to_string(),
        description: element.child_text("description").to_string(),
        status: PlacementStatus::from(element.child_text("status")),
        targeted_ad_unit_ids: element
            .get_children("targetedAdUnitIds")
            .map(|e| e.get_text().to_string())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_ads_gax::selector::SortOrder;
    use google_ads_gax::statement::StatementBuilder;

    type Result = anyhow::Result<()>;

    #[test]
    fn statement_rendering() -> Result {
        let statement = StatementBuilder::new()
            .where_clause("id = :id AND name = :name")
            .order_by("id", SortOrder::Ascending)
            .limit(1)
            .with_bind_variable("id", 424242_i64)
            .with_bind_variable("name", "Leaderboards")
            .build()?;
        let element = statement_element("filterStatement", &statement);
        assert_eq!(
            element.child_text("query"),
            "WHERE id = :id AND name = :name ORDER BY id ASC LIMIT 1 OFFSET 0"
        );

        let values: Vec<&Element> = element.get_children("values").collect();
        assert_eq!(values.len(), 2);
        // BTreeMap iteration puts `id` before `name`.
        assert_eq!(values[0].child_text("key"), "id");
        let bound = values[0].require_child("value")?;
        assert_eq!(bound.get_attr("type"), Some("NumberValue"));
        assert_eq!(bound.child_text("value"), "424242");
        let bound = values[1].require_child("value")?;
        assert_eq!(bound.get_attr("type"), Some("TextValue"));
        assert_eq!(bound.child_text("value"), "Leaderboards");
        Ok(())
    }

    #[test]
    fn page_parsing() -> Result {
        let request = GetPlacementsByStatement {
            statement: StatementBuilder::new().build()?,
        };
        let response = Element::parse(
            r#"<getPlacementsByStatementResponse xmlns="https://www.google.com/apis/ads/publisher/v201705">
              <rval>
                <totalResultSetSize>120</totalResultSetSize>
                <startIndex>0</startIndex>
                <results>
                  <id>424242</id>
                  <name>Leaderboards</name>
                  <description></description>
                  <status>ACTIVE</status>
                  <targetedAdUnitIds>111</targetedAdUnitIds>
                  <targetedAdUnitIds>222</targetedAdUnitIds>
                </results>
              </rval>
            </getPlacementsByStatementResponse>"#,
        )?;
        let page = request.from_response(&response)?;
        assert_eq!(page.total_num_entries(), 120);
        assert_eq!(page.entries().len(), 1);
        let placement = &page.entries()[0];
        assert_eq!(placement.id, 424242);
        assert_eq!(placement.name, "Leaderboards");
        assert_eq!(placement.status, PlacementStatus::Active);
        assert_eq!(placement.targeted_ad_unit_ids, ["111", "222"]);
        Ok(())
    }

    #[test]
    fn update_rendering_and_response() -> Result {
        let placement = Placement::new()
            .set_id(424242)
            .set_name("Leaderboards")
            .set_description("This placement contains all leaderboards.");
        let request = UpdatePlacements {
            placements: vec![placement],
        };
        let body = request.to_body(PUBLISHER_NAMESPACE);
        let rendered = body.get_child("placements").unwrap();
        assert_eq!(rendered.child_text("id"), "424242");
        assert_eq!(
            rendered.child_text("description"),
            "This placement contains all leaderboards."
        );

        let response = Element::parse(
            r#"<updatePlacementsResponse>
              <rval>
                <id>424242</id>
                <name>Leaderboards</name>
                <description>This placement contains all leaderboards.</description>
                <status>ACTIVE</status>
              </rval>
            </updatePlacementsResponse>"#,
        )?;
        let updated = request.from_response(&response)?;
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].id, 424242);
        Ok(())
    }

    #[tokio::test]
    async fn statement_round_trip_over_http() -> Result {
        use crate::stub::PlacementService as _;
        use google_ads_auth::credentials::anonymous;
        use google_ads_auth::credentials::offline::Api;
        use google_ads_gax::session::Session;
        use httptest::{Expectation, Server, matchers::*, responders::*};

        let server = Server::run();
        server.expect(
            Expectation::matching(all_of![
                request::method_path("POST", "/apis/ads/publisher/v201705/PlacementService"),
                request::body(matches("<networkCode>12345678</networkCode>")),
                request::body(matches("WHERE id = :id")),
            ])
            .respond_with(status_code(200).body(
                r#"<?xml version="1.0" encoding="UTF-8"?>
                <soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/">
                  <soap:Body>
                    <getPlacementsByStatementResponse xmlns="https://www.google.com/apis/ads/publisher/v201705">
                      <rval>
                        <totalResultSetSize>1</totalResultSetSize>
                        <results><id>424242</id><name>Leaderboards</name><status>ACTIVE</status></results>
                      </rval>
                    </getPlacementsByStatementResponse>
                  </soap:Body>
                </soap:Envelope>"#,
            )),
        );

        let session = Session::builder(Api::AdManager)
            .with_credentials(anonymous::Builder::new().build())
            .with_endpoint(server.url_str(""))
            .with_network_code("12345678")
            .build()?;
        let transport = PlacementService::new(SoapClient::new(session));
        let statement = StatementBuilder::new()
            .where_clause("id = :id")
            .with_bind_variable("id", 424242_i64)
            .limit(1)
            .build()?;
        let page = transport.get_placements_by_statement(statement).await?;
        assert_eq!(page.total_num_entries(), 1);
        assert_eq!(page.entries()[0].name, "Leaderboards");
        Ok(())
    }
}
