use async_graphql::{ComplexObject, InputObject, SimpleObject, ID};
use serde::Deserialize;

use crate::entity::Entity;
use crate::sort::{OrderBy, OrderDirection, OrderField};
use crate::value::Value;

/// A user account.
#[derive(SimpleObject, Debug, Clone, PartialEq)]
#[graphql(complex)]
pub struct User {
    #[graphql(skip)]
    pub key: u64,
    pub user_name: String,
    pub display_name: String,
    pub email_validated: bool,
    /// Number of organizations the user is affiliated with.
    pub affiliation_count: u32,
}

#[ComplexObject]
impl User {
    async fn id(&self) -> ID {
        ID(self.cursor())
    }
}

impl User {
    pub fn new(
        key: u64,
        user_name: &str,
        display_name: &str,
        email_validated: bool,
        affiliation_count: u32,
    ) -> Self {
        Self {
            key,
            user_name: user_name.to_string(),
            display_name: display_name.to_string(),
            email_validated,
            affiliation_count,
        }
    }
}

#[derive(async_graphql::Enum, Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserOrderField {
    UserName,
    DisplayName,
    EmailValidated,
    AffiliationCount,
}

impl OrderField for UserOrderField {
    fn attribute(self) -> &'static str {
        match self {
            UserOrderField::UserName => "userName",
            UserOrderField::DisplayName => "displayName",
            UserOrderField::EmailValidated => "emailValidated",
            UserOrderField::AffiliationCount => "affiliationCount",
        }
    }
}

#[derive(InputObject, Debug, Clone, Copy)]
pub struct UserOrder {
    pub field: UserOrderField,
    #[graphql(default)]
    pub direction: OrderDirection,
}

impl From<UserOrder> for OrderBy<UserOrderField> {
    fn from(order: UserOrder) -> Self {
        OrderBy::new(order.field, order.direction)
    }
}

impl Entity for User {
    const KIND: &'static str = "user";
    const NAME: &'static str = "User";
    const SEARCH_ATTRIBUTES: &'static [&'static str] = &["userName", "displayName"];

    type Order = UserOrderField;

    fn key(&self) -> u64 {
        self.key
    }

    fn attribute(&self, name: &str) -> Value {
        match name {
            "userName" => Value::from(self.user_name.as_str()),
            "displayName" => Value::from(self.display_name.as_str()),
            "emailValidated" => Value::from(self.email_validated),
            "affiliationCount" => Value::from(self.affiliation_count),
            _ => Value::Null,
        }
    }
}
