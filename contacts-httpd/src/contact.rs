//! Contact records.
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::store;

/// Contacts present when the service starts.
pub const SEED: [(u64, &str, &str); 3] = [
    (1, "John Doe", "john@example.com"),
    (2, "Jane Smith", "jane@example.com"),
    (3, "Alice Johnson", "alice@example.com"),
];

/// Contact identifier, assigned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(u64);

impl ContactId {
    /// The identifier given to the first contact of an empty store.
    pub const FIRST: ContactId = ContactId(1);

    /// The identifier following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl From<u64> for ContactId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ContactId> for u64 {
    fn from(id: ContactId) -> Self {
        id.0
    }
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ContactId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// The fields of a contact that clients may set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Details {
    /// Display name.
    pub full: String,
    /// Address. Only checked for presence.
    pub email: String,
}

impl Details {
    pub fn new(full: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            full: full.into(),
            email: email.into(),
        }
    }

    /// Check that both fields are present.
    pub fn validate(&self) -> Result<(), store::Error> {
        if self.full.is_empty() || self.email.is_empty() {
            return Err(store::Error::Validation);
        }
        Ok(())
    }
}

/// A contact held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub full: String,
    pub email: String,
}

impl Contact {
    pub fn new(id: ContactId, details: Details) -> Self {
        let Details { full, email } = details;

        Self { id, full, email }
    }

    /// Replace the mutable fields, keeping the identifier.
    pub fn set(&mut self, details: Details) {
        self.full = details.full;
        self.email = details.email;
    }

    /// The seed contacts, in order.
    pub fn seed() -> Vec<Contact> {
        SEED.iter()
            .map(|(id, full, email)| Contact::new(ContactId(*id), Details::new(*full, *email)))
            .collect()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} <{}>", self.id, self.full, self.email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_contact_id_parse() {
        assert_eq!("2".parse::<ContactId>().unwrap(), ContactId(2));
        assert_eq!(" 7 ".parse::<ContactId>().unwrap(), ContactId(7));
        assert!("abc".parse::<ContactId>().is_err());
        assert!("-1".parse::<ContactId>().is_err());
        assert!("".parse::<ContactId>().is_err());
    }

    #[test]
    fn test_contact_json() {
        let contact = Contact::new(ContactId(4), Details::new("Bob", "bob@x.com"));

        assert_eq!(
            serde_json::to_value(&contact).unwrap(),
            json!({ "id": 4, "full": "Bob", "email": "bob@x.com" })
        );
    }

    #[test]
    fn test_details_validate() {
        assert_eq!(Details::new("Bob", "bob@x.com").validate(), Ok(()));
        assert_eq!(
            Details::new("", "bob@x.com").validate(),
            Err(store::Error::Validation)
        );
        assert_eq!(Details::new("Bob", "").validate(), Err(store::Error::Validation));
        assert_eq!(Details::default().validate(), Err(store::Error::Validation));
    }

    #[test]
    fn test_set_keeps_id() {
        let mut contact = Contact::seed().remove(1);
        contact.set(Details::new("Jane X", "janex@example.com"));

        assert_eq!(contact.id, ContactId(2));
        assert_eq!(contact.full, "Jane X");
        assert_eq!(contact.email, "janex@example.com");
    }
}
