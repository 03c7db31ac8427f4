use async_graphql::{ComplexObject, InputObject, SimpleObject, ID};
use serde::Deserialize;

use crate::entity::Entity;
use crate::predicate::Predicate;
use crate::sort::{OrderBy, OrderDirection, OrderField};
use crate::value::Value;

/// An organization owning domains.
#[derive(SimpleObject, Debug, Clone, PartialEq)]
#[graphql(complex)]
pub struct Organization {
    #[graphql(skip)]
    pub key: u64,
    pub name: String,
    pub acronym: String,
    pub domain_count: u32,
    pub verified: bool,
}

#[ComplexObject]
impl Organization {
    async fn id(&self) -> ID {
        ID(self.cursor())
    }
}

impl Organization {
    pub fn new(key: u64, name: &str, acronym: &str, domain_count: u32) -> Self {
        Self {
            key,
            name: name.to_string(),
            acronym: acronym.to_string(),
            domain_count,
            verified: false,
        }
    }

    pub fn with_verified(mut self) -> Self {
        self.verified = true;
        self
    }

    /// Verified organizations only
    pub fn verified_only() -> Predicate {
        Predicate::eq("verified", true)
    }
}

#[derive(async_graphql::Enum, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OrganizationOrderField {
    Name,
    Acronym,
    DomainCount,
    Verified,
}

impl OrderField for OrganizationOrderField {
    fn attribute(self) -> &'static str {
        match self {
            OrganizationOrderField::Name => "name",
            OrganizationOrderField::Acronym => "acronym",
            OrganizationOrderField::DomainCount => "domainCount",
            OrganizationOrderField::Verified => "verified",
        }
    }
}

#[derive(InputObject, Debug, Clone, Copy)]
pub struct OrganizationOrder {
    pub field: OrganizationOrderField,
    #[graphql(default)]
    pub direction: OrderDirection,
}

impl From<OrganizationOrder> for OrderBy<OrganizationOrderField> {
    fn from(order: OrganizationOrder) -> Self {
        OrderBy::new(order.field, order.direction)
    }
}

impl Entity for Organization {
    const KIND: &'static str = "organization";
    const NAME: &'static str = "Organization";
    const SEARCH_ATTRIBUTES: &'static [&'static str] = &["name", "acronym"];

    type Order = OrganizationOrderField;

    fn key(&self) -> u64 {
        self.key
    }

    fn attribute(&self, name: &str) -> Value {
        match name {
            "name" => Value::from(self.name.as_str()),
            "acronym" => Value::from(self.acronym.as_str()),
            "domainCount" => Value::from(self.domain_count),
            "verified" => Value::from(self.verified),
            _ => Value::Null,
        }
    }
}
