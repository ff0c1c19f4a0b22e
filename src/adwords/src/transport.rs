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

//! SOAP implementations of the AdWords service stubs.

use crate::model::{CampaignSharedSet, Criterion, SharedCriterion, SharedSetType};
use crate::stub;
use google_ads_gax::error::Error;
use google_ads_gax::operation::{BulkReturn, Operation};
use google_ads_gax::page::Page;
use google_ads_gax::selector::Selector;
use google_ads_soap::client::{SoapBody, SoapClient, api_error_from};
use google_ads_soap::xml::Element;

pub(crate) const CM_NAMESPACE: &str = "https://adwords.google.com/api/adwords/cm/v201710";
const XSI_NAMESPACE: &str = "http://www.w3.org/2001/XMLSchema-instance";

fn service_path(tag: &str) -> String {
    format!("/api/adwords/cm/v201710/{tag}")
}

/// Implements [stub::CampaignSharedSetService] over SOAP.
#[derive(Debug)]
pub struct CampaignSharedSetService {
    client: SoapClient,
}

impl CampaignSharedSetService {
    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl stub::CampaignSharedSetService for CampaignSharedSetService {
    async fn get(&self, selector: Selector) -> Result<Page<CampaignSharedSet>, Error> {
        self.client
            .invoke(
                &service_path("CampaignSharedSetService"),
                CM_NAMESPACE,
                &Get {
                    selector,
                    parse: campaign_shared_set_from,
                },
            )
            .await
    }

    async fn mutate(
        &self,
        operations: Vec<Operation<CampaignSharedSet>>,
    ) -> Result<BulkReturn<CampaignSharedSet>, Error> {
        self.client
            .invoke(
                &service_path("CampaignSharedSetService"),
                CM_NAMESPACE,
                &Mutate {
                    operations,
                    render: campaign_shared_set_element,
                    parse: campaign_shared_set_from,
                },
            )
            .await
    }
}

/// Implements [stub::SharedCriterionService] over SOAP.
#[derive(Debug)]
pub struct SharedCriterionService {
    client: SoapClient,
}

impl SharedCriterionService {
    pub fn new(client: SoapClient) -> Self {
        Self { client }
    }
}

#[async_trait::async_trait]
impl stub::SharedCriterionService for SharedCriterionService {
    async fn get(&self, selector: Selector) -> Result<Page<SharedCriterion>, Error> {
        self.client
            .invoke(
                &service_path("SharedCriterionService"),
                CM_NAMESPACE,
                &Get {
                    selector,
                    parse: shared_criterion_from,
                },
            )
            .await
    }

    async fn mutate(
        &self,
        operations: Vec<Operation<SharedCriterion>>,
    ) -> Result<BulkReturn<SharedCriterion>, Error> {
        self.client
            .invoke(
                &service_path("SharedCriterionService"),
                CM_NAMESPACE,
                &Mutate {
                    operations,
                    render: shared_criterion_element,
                    parse: shared_criterion_from,
                },
            )
            .await
    }
}

/// The selector-based `get` operation, shared by both services.
struct Get<T> {
    selector: Selector,
    parse: fn(&Element) -> Result<T, Error>,
}

impl<T> SoapBody for Get<T> {
    type Output = Page<T>;

    fn action(&self) -> &'static str {
        "get"
    }

    fn to_body(&self, namespace: &str) -> Element {
        Element::new("get")
            .attr("xmlns", namespace)
            .child(selector_element("selector", &self.selector))
    }

    fn from_response(&self, response: &Element) -> Result<Page<T>, Error> {
        page_from(response.require_child("rval")?, self.parse)
    }
}

/// The bulk `mutate` operation, shared by both services.
struct Mutate<T> {
    operations: Vec<Operation<T>>,
    render: fn(&str, &T) -> Element,
    parse: fn(&Element) -> Result<T, Error>,
}

impl<T> SoapBody for Mutate<T> {
    type Output = BulkReturn<T>;

    fn action(&self) -> &'static str {
        "mutate"
    }

    fn to_body(&self, namespace: &str) -> Element {
        Element::new("mutate")
            .attr("xmlns", namespace)
            .children(self.operations.iter().map(|op| {
                Element::new("operations")
                    .leaf("operator", op.operator().as_str())
                    .child((self.render)("operand", op.operand()))
            }))
    }

    fn from_response(&self, response: &Element) -> Result<BulkReturn<T>, Error> {
        let rval = response.require_child("rval")?;
        let values = rval
            .get_children("value")
            .map(self.parse)
            .collect::<Result<Vec<_>, _>>()?;
        let errors = rval
            .get_children("partialFailureErrors")
            .map(api_error_from)
            .collect();
        BulkReturn::from_wire(values, errors, self.operations.len())
    }
}

/// Renders a selector under the given element name.
pub(crate) fn selector_element(name: &str, selector: &Selector) -> Element {
    use google_ads_gax::query::Pageable;

    let mut element = Element::new(name);
    for field in selector.fields() {
        element = element.leaf("fields", field);
    }
    for predicate in selector.predicates() {
        let mut rendered = Element::new("predicates")
            .leaf("field", predicate.field())
            .leaf("operator", predicate.operator().as_str());
        for value in predicate.values() {
            rendered = rendered.leaf("values", value);
        }
        element = element.child(rendered);
    }
    if let Some(ordering) = selector.ordering() {
        element = element.child(
            Element::new("ordering")
                .leaf("field", ordering.field())
                .leaf("sortOrder", ordering.sort_order().as_str()),
        );
    }
    element.child(
        Element::new("paging")
            .leaf("startIndex", selector.offset().to_string())
            .leaf("numberResults", selector.limit().to_string()),
    )
}

/// Parses a service page, applying `parse` to each `entries` element.
fn page_from<T>(rval: &Element, parse: fn(&Element) -> Result<T, Error>) -> Result<Page<T>, Error> {
    let total = rval
        .require_text("totalNumEntries")?
        .parse::<u32>()
        .map_err(Error::deser)?;
    let entries = rval
        .get_children("entries")
        .map(parse)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Page::new(entries, total))
}

fn i64_field(element: &Element, name: &str) -> Result<i64, Error> {
    element.require_text(name)?.parse().map_err(Error::deser)
}

fn campaign_shared_set_element(name: &str, value: &CampaignSharedSet) -> Element {
    // Zero-valued ids are omitted so REMOVE operands stay minimal.
    let mut element = Element::new(name);
    if value.shared_set_id != 0 {
        element = element.leaf("sharedSetId", value.shared_set_id.to_string());
    }
    if value.campaign_id != 0 {
        element = element.leaf("campaignId", value.campaign_id.to_string());
    }
    element
}

fn campaign_shared_set_from(element: &Element) -> Result<CampaignSharedSet, Error> {
    Ok(CampaignSharedSet {
        shared_set_id: i64_field(element, "sharedSetId")?,
        campaign_id: i64_field(element, "campaignId")?,
        shared_set_name: element.child_text("sharedSetName").to_string(),
        shared_set_type: SharedSetType::from(element.child_text("sharedSetType")),
    })
}

fn shared_criterion_element(name: &str, value: &SharedCriterion) -> Element {
    let mut criterion = Element::new("criterion");
    match &value.criterion {
        Criterion::Keyword {
            id,
            text,
            match_type,
        } => {
            criterion = criterion
                .attr("xmlns:xsi", XSI_NAMESPACE)
                .attr("xsi:type", "Keyword")
                .leaf("id", id.to_string())
                .leaf("text", text)
                .leaf("matchType", match_type);
        }
        Criterion::Placement { id, url } => {
            criterion = criterion
                .attr("xmlns:xsi", XSI_NAMESPACE)
                .attr("xsi:type", "Placement")
                .leaf("id", id.to_string())
                .leaf("url", url);
        }
        Criterion::Other { id, .. } => {
            criterion = criterion.leaf("id", id.to_string());
        }
    }
    Element::new(name)
        .leaf("sharedSetId", value.shared_set_id.to_string())
        .child(criterion)
}

fn shared_criterion_from(element: &Element) -> Result<SharedCriterion, Error> {
    let criterion = element.require_child("criterion")?;
    let id = i64_field(criterion, "id")?;
    // Newer versions report the concrete type in `Criterion.Type`; the
    // `xsi:type` attribute is the fallback.
    let tag = match criterion.child_text("Criterion.Type") {
        "" => criterion.get_attr("type").unwrap_or_default(),
        tag => tag,
    };
    let parsed = match tag {
        "Keyword" => Criterion::Keyword {
            id,
            text: criterion.child_text("text").to_string(),
            match_type: criterion.child_text("matchType").to_string(),
        },
        "Placement" => Criterion::Placement {
            id,
            url: criterion.child_text("url").to_string(),
        },
        other => Criterion::Other {
            id,
            criterion_type: other.to_string(),
        },
    };
    Ok(SharedCriterion {
        shared_set_id: i64_field(element, "sharedSetId")?,
        criterion: parsed,
    })
}
