/// Request payloads exchanged between the client and the API
///
/// Every field is optional on the wire so that a missing value reaches
/// [`validate`](RegisterUser::validate) and produces the same
/// `"<field> is not a string"` message on both sides, instead of a generic
/// deserialization failure.
///
/// # Example
///
/// ```
/// use pintxopote_shared::requests::Credentials;
///
/// let credentials = Credentials {
///     email: Some("jd@mail.com".to_string()),
///     password: Some("   ".to_string()),
/// };
///
/// let err = credentials.validate().unwrap_err();
/// assert_eq!(err.to_string(), "user password is empty or blank");
/// ```

use serde::{Deserialize, Serialize};

use crate::models::address::UserAddress;
use crate::validation::{optional_str, require_positive, require_str, FieldError};

/// Address fields as submitted by a user
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl AddressInput {
    /// Requires every address field
    pub fn validate(&self) -> Result<UserAddress, FieldError> {
        Ok(UserAddress {
            street: require_str("user address street", self.street.as_deref())?.to_string(),
            city: require_str("user address city", self.city.as_deref())?.to_string(),
            postal_code: require_str("user address postal code", self.postal_code.as_deref())?
                .to_string(),
            country: require_str("user address country", self.country.as_deref())?.to_string(),
        })
    }
}

impl From<UserAddress> for AddressInput {
    fn from(address: UserAddress) -> Self {
        Self {
            street: Some(address.street),
            city: Some(address.city),
            postal_code: Some(address.postal_code),
            country: Some(address.country),
        }
    }
}

/// Body of `POST /users`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Requested role, `user` when absent; checked by the server
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressInput>,
}

/// A registration whose required fields are all present
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub role: Option<&'a str>,
    pub address: Option<UserAddress>,
}

impl RegisterUser {
    /// Checks name, surname, email, password and address, in that order
    pub fn validate(&self) -> Result<Registration<'_>, FieldError> {
        Ok(Registration {
            name: require_str("user name", self.name.as_deref())?,
            surname: require_str("user surname", self.surname.as_deref())?,
            email: require_str("user email", self.email.as_deref())?,
            password: require_str("user password", self.password.as_deref())?,
            role: self.role.as_deref(),
            address: self.address.as_ref().map(AddressInput::validate).transpose()?,
        })
    }
}

/// Body of `POST /auth`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl Credentials {
    /// Returns `(email, password)`
    pub fn validate(&self) -> Result<(&str, &str), FieldError> {
        Ok((
            require_str("user email", self.email.as_deref())?,
            require_str("user password", self.password.as_deref())?,
        ))
    }
}

/// Body of `PUT /users/:id`
///
/// `id` travels in the path, never in the body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    #[serde(skip)]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub surname: Option<String>,

    /// Current email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Replacement email address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_email: Option<String>,

    /// Replacement password
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// Replacement address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<AddressInput>,
}

/// A profile update whose fields passed validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChanges<'a> {
    pub name: &'a str,
    pub surname: &'a str,
    pub email: &'a str,
    pub new_email: Option<&'a str>,
    pub password: Option<&'a str>,
    pub address: Option<UserAddress>,
}

impl ProfileUpdate {
    /// Requires `id`, then checks the changes
    pub fn validate(&self) -> Result<(&str, ProfileChanges<'_>), FieldError> {
        let id = require_str("user id", self.id.as_deref())?;
        Ok((id, self.validate_changes()?))
    }

    /// Checks everything but `id`
    pub fn validate_changes(&self) -> Result<ProfileChanges<'_>, FieldError> {
        Ok(ProfileChanges {
            name: require_str("user name", self.name.as_deref())?,
            surname: require_str("user surname", self.surname.as_deref())?,
            email: require_str("user email", self.email.as_deref())?,
            new_email: optional_str("user new email", self.new_email.as_deref())?,
            password: optional_str("user password", self.password.as_deref())?,
            address: self.address.as_ref().map(AddressInput::validate).transpose()?,
        })
    }
}

/// Identifier of a single record, as passed to the `GET /<resource>/:id` calls
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl IdQuery {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: Some(id.into()) }
    }

    /// Checks the id, reporting failures as `"<resource> id ..."`
    pub fn validate(&self, resource: &str) -> Result<&str, FieldError> {
        require_str(&format!("{resource} id"), self.id.as_deref())
    }
}

/// Query of `GET /pintxopotes`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl CityQuery {
    pub fn validate(&self) -> Result<&str, FieldError> {
        require_str("pintxopote city", self.city.as_deref())
    }
}

/// Body of `POST /orders`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    /// Customer ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Pintxopote ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pintxopote: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

/// An order whose fields passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderLine<'a> {
    pub user: &'a str,
    pub pintxopote: &'a str,
    pub quantity: i32,
}

impl NewOrder {
    pub fn validate(&self) -> Result<OrderLine<'_>, FieldError> {
        Ok(OrderLine {
            user: require_str("order user", self.user.as_deref())?,
            pintxopote: require_str("order pintxopote", self.pintxopote.as_deref())?,
            quantity: require_positive("order quantity", self.quantity)?,
        })
    }
}

/// Query of `GET /orders`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrdersQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl OrdersQuery {
    pub fn validate(&self) -> Result<&str, FieldError> {
        require_str("user id", self.user_id.as_deref())
    }
}
