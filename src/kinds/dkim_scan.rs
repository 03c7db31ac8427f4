use async_graphql::{ComplexObject, InputObject, SimpleObject, ID};
use chrono::Utc;
use serde::Deserialize;

use crate::entity::Entity;
use crate::predicate::{Comparator, Predicate};
use crate::sort::{OrderBy, OrderDirection, OrderField};
use crate::types::DateTime;
use crate::value::Value;

/// One DKIM selector result from a scan of a domain.
#[derive(SimpleObject, Debug, Clone, PartialEq)]
#[graphql(complex)]
pub struct DkimScan {
    #[graphql(skip)]
    pub key: u64,
    #[graphql(skip)]
    pub domain_key: u64,
    pub timestamp: DateTime,
    pub selector: String,
    pub record: String,
    /// Public key size in bits.
    pub key_length: u32,
}

#[ComplexObject]
impl DkimScan {
    async fn id(&self) -> ID {
        ID(self.cursor())
    }
}

impl DkimScan {
    pub fn new(
        key: u64,
        domain_key: u64,
        timestamp: chrono::DateTime<Utc>,
        selector: &str,
        record: &str,
        key_length: u32,
    ) -> Self {
        Self {
            key,
            domain_key,
            timestamp: DateTime(timestamp),
            selector: selector.to_string(),
            record: record.to_string(),
            key_length,
        }
    }

    /// Scans of one domain
    pub fn of_domain(domain_key: u64) -> Predicate {
        Predicate::eq("domainKey", Value::from(domain_key))
    }

    /// Scans taken in `[start, end]`
    pub fn between(start: chrono::DateTime<Utc>, end: chrono::DateTime<Utc>) -> Predicate {
        Predicate::attribute("timestamp", Comparator::Ge, start)
            .and(Predicate::attribute("timestamp", Comparator::Le, end))
    }
}

#[derive(async_graphql::Enum, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DkimScanOrderField {
    Timestamp,
    Selector,
    Record,
    KeyLength,
}

impl OrderField for DkimScanOrderField {
    fn attribute(self) -> &'static str {
        match self {
            DkimScanOrderField::Timestamp => "timestamp",
            DkimScanOrderField::Selector => "selector",
            DkimScanOrderField::Record => "record",
            DkimScanOrderField::KeyLength => "keyLength",
        }
    }
}

#[derive(InputObject, Debug, Clone, Copy)]
pub struct DkimScanOrder {
    pub field: DkimScanOrderField,
    #[graphql(default)]
    pub direction: OrderDirection,
}

impl From<DkimScanOrder> for OrderBy<DkimScanOrderField> {
    fn from(order: DkimScanOrder) -> Self {
        OrderBy::new(order.field, order.direction)
    }
}

impl Entity for DkimScan {
    const KIND: &'static str = "dkimScan";
    const NAME: &'static str = "DkimScan";
    const SEARCH_ATTRIBUTES: &'static [&'static str] = &["selector", "record"];

    type Order = DkimScanOrderField;

    fn key(&self) -> u64 {
        self.key
    }

    fn attribute(&self, name: &str) -> Value {
        match name {
            "domainKey" => Value::from(self.domain_key),
            "timestamp" => Value::from(self.timestamp),
            "selector" => Value::from(self.selector.as_str()),
            "record" => Value::from(self.record.as_str()),
            "keyLength" => Value::from(self.key_length),
            _ => Value::Null,
        }
    }
}
