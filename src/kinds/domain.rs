use async_graphql::{ComplexObject, InputObject, SimpleObject, ID};
use serde::Deserialize;

use crate::entity::Entity;
use crate::predicate::Predicate;
use crate::sort::{OrderBy, OrderDirection, OrderField};
use crate::types::DateTime;
use crate::value::Value;

/// Summary outcome of one compliance check.
#[derive(async_graphql::Enum, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplianceStatus {
    Pass,
    Info,
    Fail,
}

impl ComplianceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ComplianceStatus::Pass => "pass",
            ComplianceStatus::Info => "info",
            ComplianceStatus::Fail => "fail",
        }
    }
}

/// A monitored domain and the latest status of each check.
#[derive(SimpleObject, Debug, Clone, PartialEq)]
#[graphql(complex)]
pub struct Domain {
    #[graphql(skip)]
    pub key: u64,
    #[graphql(skip)]
    pub organization_key: u64,
    pub domain: String,
    pub last_ran: Option<DateTime>,
    pub dkim_status: ComplianceStatus,
    pub dmarc_status: ComplianceStatus,
    pub https_status: ComplianceStatus,
    pub spf_status: ComplianceStatus,
    pub ssl_status: ComplianceStatus,
}

#[ComplexObject]
impl Domain {
    async fn id(&self) -> ID {
        ID(self.cursor())
    }
}

impl Domain {
    /// A domain with every check passing and no scan yet.
    pub fn new(key: u64, organization_key: u64, domain: &str) -> Self {
        Self {
            key,
            organization_key,
            domain: domain.to_string(),
            last_ran: None,
            dkim_status: ComplianceStatus::Pass,
            dmarc_status: ComplianceStatus::Pass,
            https_status: ComplianceStatus::Pass,
            spf_status: ComplianceStatus::Pass,
            ssl_status: ComplianceStatus::Pass,
        }
    }

    /// Domains claimed by one organization
    pub fn owned_by(organization_key: u64) -> Predicate {
        Predicate::eq("organizationKey", Value::from(organization_key))
    }
}

#[derive(async_graphql::Enum, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DomainOrderField {
    Domain,
    LastRan,
    DkimStatus,
    DmarcStatus,
    HttpsStatus,
    SpfStatus,
    SslStatus,
}

impl OrderField for DomainOrderField {
    fn attribute(self) -> &'static str {
        match self {
            DomainOrderField::Domain => "domain",
            DomainOrderField::LastRan => "lastRan",
            DomainOrderField::DkimStatus => "dkimStatus",
            DomainOrderField::DmarcStatus => "dmarcStatus",
            DomainOrderField::HttpsStatus => "httpsStatus",
            DomainOrderField::SpfStatus => "spfStatus",
            DomainOrderField::SslStatus => "sslStatus",
        }
    }
}

#[derive(InputObject, Debug, Clone, Copy)]
pub struct DomainOrder {
    pub field: DomainOrderField,
    #[graphql(default)]
    pub direction: OrderDirection,
}

impl From<DomainOrder> for OrderBy<DomainOrderField> {
    fn from(order: DomainOrder) -> Self {
        OrderBy::new(order.field, order.direction)
    }
}

impl Entity for Domain {
    const KIND: &'static str = "domain";
    const NAME: &'static str = "Domain";
    const SEARCH_ATTRIBUTES: &'static [&'static str] = &["domain"];

    type Order = DomainOrderField;

    fn key(&self) -> u64 {
        self.key
    }

    fn attribute(&self, name: &str) -> Value {
        match name {
            "organizationKey" => Value::from(self.organization_key),
            "domain" => Value::from(self.domain.as_str()),
            "lastRan" => Value::from(self.last_ran),
            "dkimStatus" => Value::from(self.dkim_status.as_str()),
            "dmarcStatus" => Value::from(self.dmarc_status.as_str()),
            "httpsStatus" => Value::from(self.https_status.as_str()),
            "spfStatus" => Value::from(self.spf_status.as_str()),
            "sslStatus" => Value::from(self.ssl_status.as_str()),
            _ => Value::Null,
        }
    }
}
