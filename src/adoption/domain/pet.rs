//! Pet listing record and the listing-status values cascaded onto it.

use super::PetId;
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Listing status cascaded onto a pet by the application lifecycle.
///
/// The pet document stores this as a plain string
/// (`"Available"`/`"Pending"`/`"Adopted"` by convention); the enum keeps
/// the values typed at the port seam. Nothing outside the adoption
/// lifecycle writes the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ListingStatus {
    /// The pet is open for applications.
    Available,
    /// At least one application has been submitted.
    Pending,
    /// An application was approved; the listing is closed.
    Adopted,
}

impl ListingStatus {
    /// Returns the conventional document-field representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "Available",
            Self::Pending => "Pending",
            Self::Adopted => "Adopted",
        }
    }

    /// Returns whether this status closes the listing.
    #[must_use]
    pub const fn is_adopted(self) -> bool {
        matches!(self, Self::Adopted)
    }
}

impl fmt::Display for ListingStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// A pet listing.
///
/// Descriptive attributes belong to the listing surface and are carried
/// opaquely here; the adoption lifecycle only ever touches the
/// `application_status`/`is_adopted` pair, and only through
/// [`Pet::apply_listing_status`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    id: PetId,
    name: String,
    species: String,
    breed: Option<String>,
    age_years: Option<u8>,
    description: Option<String>,
    owner_id: Option<UserId>,
    image_urls: Vec<String>,
    adoption_fee_cents: Option<u64>,
    application_status: String,
    is_adopted: bool,
    created_at: DateTime<Utc>,
}

impl Pet {
    /// Creates a new available listing.
    #[must_use]
    pub fn new(
        id: PetId,
        name: impl Into<String>,
        species: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            species: species.into(),
            breed: None,
            age_years: None,
            description: None,
            owner_id: None,
            image_urls: Vec::new(),
            adoption_fee_cents: None,
            application_status: ListingStatus::Available.as_str().to_owned(),
            is_adopted: false,
            created_at: clock.utc(),
        }
    }

    /// Sets the breed.
    #[must_use]
    pub fn with_breed(mut self, breed: impl Into<String>) -> Self {
        self.breed = Some(breed.into());
        self
    }

    /// Sets the age in whole years.
    #[must_use]
    pub const fn with_age_years(mut self, age_years: u8) -> Self {
        self.age_years = Some(age_years);
        self
    }

    /// Sets the listing description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the owning user.
    #[must_use]
    pub fn with_owner(mut self, owner_id: UserId) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    /// Sets the listing images.
    #[must_use]
    pub fn with_image_urls(mut self, image_urls: impl IntoIterator<Item = String>) -> Self {
        self.image_urls = image_urls.into_iter().collect();
        self
    }

    /// Sets the adoption fee in integer cents.
    #[must_use]
    pub const fn with_adoption_fee_cents(mut self, fee_cents: u64) -> Self {
        self.adoption_fee_cents = Some(fee_cents);
        self
    }

    /// Returns the listing identifier.
    #[must_use]
    pub const fn id(&self) -> &PetId {
        &self.id
    }

    /// Returns the pet's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the species.
    #[must_use]
    pub fn species(&self) -> &str {
        &self.species
    }

    /// Returns the breed, if recorded.
    #[must_use]
    pub fn breed(&self) -> Option<&str> {
        self.breed.as_deref()
    }

    /// Returns the age in whole years, if recorded.
    #[must_use]
    pub const fn age_years(&self) -> Option<u8> {
        self.age_years
    }

    /// Returns the listing description, if recorded.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the owning user, if recorded.
    #[must_use]
    pub const fn owner_id(&self) -> Option<&UserId> {
        self.owner_id.as_ref()
    }

    /// Returns the listing images.
    #[must_use]
    pub fn image_urls(&self) -> &[String] {
        &self.image_urls
    }

    /// Returns the adoption fee in integer cents, if set.
    #[must_use]
    pub const fn adoption_fee_cents(&self) -> Option<u64> {
        self.adoption_fee_cents
    }

    /// Returns the stored listing-status string.
    #[must_use]
    pub fn application_status(&self) -> &str {
        &self.application_status
    }

    /// Returns whether the listing is closed by an adoption.
    #[must_use]
    pub const fn is_adopted(&self) -> bool {
        self.is_adopted
    }

    /// Returns the listing creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Applies a listing-status cascade to the document pair of fields.
    pub fn apply_listing_status(&mut self, status: ListingStatus) {
        self.application_status = status.as_str().to_owned();
        self.is_adopted = status.is_adopted();
    }
}
