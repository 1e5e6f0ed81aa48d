//! Contact - The single record type of the phone directory
//!
//! Contact is an Entity: its `ContactId` is assigned once by the
//! repository and never changes afterwards. Name, phone and address
//! are replaced as a whole on update.

/// Unique identifier for a Contact
///
/// Zero means "not assigned yet"; stored contacts always carry a
/// strictly positive id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ContactId(i64);

impl ContactId {
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    pub const fn get(self) -> i64 {
        self.0
    }

    /// Zero is the "allocate one for me" marker on create.
    pub const fn is_unassigned(self) -> bool {
        self.0 == 0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }
}

impl From<i64> for ContactId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl core::fmt::Display for ContactId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A stored contact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: ContactId,
    name: String,
    phone: String,
    address: String,
}

impl Contact {
    pub fn new(
        id: ContactId,
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Build the record a draft describes, under the id the store settled on.
    pub fn from_draft(id: ContactId, draft: &ContactDraft) -> Self {
        Self::new(id, &draft.name, &draft.phone, &draft.address)
    }

    // ========== Getters ==========

    pub fn id(&self) -> ContactId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    // ========== Mutation ==========

    /// Replace every writable field with the one from `other`.
    ///
    /// The id of `other` is ignored: identity never changes in place.
    pub fn replace_details(&mut self, other: &Contact) {
        self.name.clone_from(&other.name);
        self.phone.clone_from(&other.phone);
        self.address.clone_from(&other.address);
    }
}

/// Input for create and update requests
///
/// `id` is optional on create (`None` or zero asks the repository to
/// allocate one) and mandatory on update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub id: Option<ContactId>,
    pub name: String,
    pub phone: String,
    pub address: String,
}

impl ContactDraft {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            phone: phone.into(),
            address: address.into(),
        }
    }

    /// Builder: set an explicit id
    pub fn with_id(mut self, id: impl Into<ContactId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// The caller-supplied id, if it is a real one (not absent, not zero).
    pub fn explicit_id(&self) -> Option<ContactId> {
        self.id.filter(|id| !id.is_unassigned())
    }
}
