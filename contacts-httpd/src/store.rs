//! In-memory contact store.
//!
//! The store owns the only collection of contacts in the process. Operations either
//! succeed fully or leave the collection untouched.
use thiserror::Error;

use crate::contact::{Contact, ContactId, Details};

/// Errors returned by store operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// No contact has the given id.
    #[error("contact {0} not found")]
    NotFound(ContactId),
    /// A required field is missing or empty.
    #[error("full name and email are required")]
    Validation,
}

/// An ordered collection of contacts with unique ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactStore {
    contacts: Vec<Contact>,
}

impl Default for ContactStore {
    fn default() -> Self {
        Self::seeded()
    }
}

impl ContactStore {
    /// Create a store over the given contacts.
    ///
    /// Contacts whose id is already present are dropped, keeping the first.
    pub fn new(contacts: impl IntoIterator<Item = Contact>) -> Self {
        let mut store = Self {
            contacts: Vec::new(),
        };
        for contact in contacts {
            if store.get(contact.id).is_none() {
                store.contacts.push(contact);
            }
        }
        store
    }

    /// Create a store holding the seed contacts.
    pub fn seeded() -> Self {
        Self::new(Contact::seed())
    }

    /// All contacts, in store order.
    pub fn list(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// The id the next created contact receives: one past the highest id held,
    /// or [`ContactId::FIRST`] when the store is empty.
    ///
    /// Ids are computed from current contents, so deleting the highest contact
    /// frees its id for reuse.
    pub fn next_id(&self) -> ContactId {
        self.contacts
            .iter()
            .map(|c| c.id)
            .max()
            .map_or(ContactId::FIRST, ContactId::next)
    }

    /// Add a contact at the end of the store.
    pub fn create(&mut self, details: Details) -> Result<&Contact, Error> {
        details.validate()?;
        let contact = Contact::new(self.next_id(), details);
        self.contacts.push(contact);

        Ok(&self.contacts[self.contacts.len() - 1])
    }

    /// Replace the name and email of an existing contact.
    ///
    /// Existence is checked before the details are validated.
    pub fn update(&mut self, id: ContactId, details: Details) -> Result<&Contact, Error> {
        let contact = self
            .contacts
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::NotFound(id))?;

        details.validate()?;
        contact.set(details);

        Ok(contact)
    }

    /// Remove a contact, returning it.
    pub fn delete(&mut self, id: ContactId) -> Result<Contact, Error> {
        let ix = self
            .contacts
            .iter()
            .position(|c| c.id == id)
            .ok_or(Error::NotFound(id))?;

        Ok(self.contacts.remove(ix))
    }
}
