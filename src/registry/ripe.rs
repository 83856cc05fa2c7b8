//! RIPE database REST transport.
//!
//! Queries the RIPE search endpoint and returns the raw attribute objects
//! from its response.

use super::{Attribute, QueryScope, RawObject, Registry};
use crate::error::FeedError;
use crate::models::Prefix;
use reqwest::blocking::Client;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::StatusCode;
use serde::Deserialize;

/// RIPE database REST search endpoint.
const RIPE_SEARCH_URL: &str = "https://rest.db.ripe.net/search";

/// Response from the RIPE search API (JSON representation).
#[derive(Deserialize, Debug, Default)]
struct SearchResponse {
    #[serde(default)]
    objects: ObjectList,
}

#[derive(Deserialize, Debug, Default)]
struct ObjectList {
    #[serde(default)]
    object: Vec<SearchObject>,
}

#[derive(Deserialize, Debug, Default)]
struct SearchObject {
    #[serde(default)]
    attributes: AttributeList,
}

#[derive(Deserialize, Debug, Default)]
struct AttributeList {
    #[serde(default)]
    attribute: Vec<SearchAttribute>,
}

#[derive(Deserialize, Debug)]
struct SearchAttribute {
    name: String,
    value: String,
}

/// Registry transport talking to the RIPE database REST API.
pub struct RipeClient {
    http: Client,
    base_url: String,
    user_agent: String,
}

impl RipeClient {
    /// Create a client identifying itself with the operator's contact
    /// e-mail, in case the database operator needs to reach out.
    pub fn new(contact_email: &str) -> RipeClient {
        RipeClient {
            http: Client::new(),
            base_url: RIPE_SEARCH_URL.to_string(),
            user_agent: format!("ripe-geofeed/contact {contact_email}"),
        }
    }

    fn query_url(&self, supernet: Prefix, scope: QueryScope) -> String {
        let type_filter = if supernet.is_ipv4() {
            "inetnum"
        } else {
            "inet6num"
        };
        let mut url = format!(
            "{base}?source=ripe&query-string={supernet}&flags=no-referenced&type-filter={type_filter}",
            base = self.base_url,
        );
        if scope == QueryScope::MoreSpecific {
            url.push_str("&flags=M");
        }
        url
    }
}

impl Registry for RipeClient {
    fn lookup(&self, supernet: Prefix, scope: QueryScope) -> Result<Vec<RawObject>, FeedError> {
        let url = self.query_url(supernet, scope);
        log::debug!("lookup {supernet} scope={scope:?}");

        let response = self
            .http
            .get(&url)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, &self.user_agent)
            .send()?;

        // The search endpoint answers 404 when nothing matches the query
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !response.status().is_success() {
            return Err(FeedError::Transport(format!(
                "registry returned {status} for {supernet}",
                status = response.status(),
            )));
        }

        let body = response.text()?;
        let mut deserializer = serde_json::Deserializer::from_str(&body);
        let parsed: SearchResponse = serde_path_to_error::deserialize(&mut deserializer)
            .map_err(|e| {
                FeedError::MalformedRecord(format!(
                    "error parsing registry response for {supernet}: path={path} error={e}",
                    path = e.path(),
                ))
            })?;

        let objects: Vec<RawObject> = parsed
            .objects
            .object
            .into_iter()
            .map(|object| RawObject {
                attributes: object
                    .attributes
                    .attribute
                    .into_iter()
                    .map(|a| Attribute {
                        name: a.name,
                        value: a.value,
                    })
                    .collect(),
            })
            .collect();

        log::debug!(
            "lookup {supernet} scope={scope:?} returned {count} objects",
            count = objects.len(),
        );

        Ok(objects)
    }
}
