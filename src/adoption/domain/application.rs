//! Adoption application aggregate root and its review lifecycle.

use super::{AdoptionDomainError, ApplicationId, ParseApplicationStatusError, PetId};
use crate::identity::domain::{UserId, UserIdentity};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Review status of an adoption application.
///
/// `Approved` and `Rejected` are terminal; the review stage is optional,
/// so an application may go straight from `Pending` to either outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// Submitted, not yet picked up by a reviewer.
    Pending,
    /// A reviewer is working through the application.
    UnderReview,
    /// The application was accepted; the pet is adopted.
    Approved,
    /// The application was declined.
    Rejected,
}

impl ApplicationStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::UnderReview => "under_review",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Returns whether transition to `target` is allowed.
    #[must_use]
    pub const fn can_transition_to(self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::Pending,
                Self::UnderReview | Self::Approved | Self::Rejected
            ) | (Self::UnderReview, Self::Approved | Self::Rejected)
        )
    }

    /// Returns whether no further transition is permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ApplicationStatus {
    type Error = ParseApplicationStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pending" => Ok(Self::Pending),
            "under_review" | "under review" => Ok(Self::UnderReview),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseApplicationStatusError(value.to_owned())),
        }
    }
}

/// Applicant contact details stamped from the signed-in identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantDetails {
    id: UserId,
    name: String,
    email: String,
    phone: String,
}

impl ApplicantDetails {
    /// Builds applicant details from a signed-in identity.
    ///
    /// Missing contact fields become empty strings, matching what the
    /// identity provider reports for accounts without them.
    #[must_use]
    pub fn from_identity(identity: &UserIdentity) -> Self {
        Self {
            id: identity.id().clone(),
            name: identity.display_name().unwrap_or_default().to_owned(),
            email: identity.email().unwrap_or_default().to_owned(),
            phone: identity.phone().unwrap_or_default().to_owned(),
        }
    }

    /// Returns the applicant's user identifier.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    /// Returns the applicant's display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the applicant's email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the applicant's phone number.
    #[must_use]
    pub fn phone(&self) -> &str {
        &self.phone
    }
}

/// The fixed questionnaire an applicant fills in.
///
/// All answers are free text or simple flags; nothing here is validated
/// beyond its type, reviewers judge the content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Questionnaire {
    /// Kind of home (apartment, house, and so on).
    pub home_type: String,
    /// Whether the home has a yard.
    pub has_yard: bool,
    /// Whether the yard is fenced.
    pub yard_fenced: bool,
    /// Whether children live in the home.
    pub has_children: bool,
    /// Ages of children living in the home.
    pub children_ages: String,
    /// Whether other pets live in the home.
    pub has_other_pets: bool,
    /// Description of the other pets.
    pub other_pets_description: String,
    /// Prior experience with pets.
    pub pet_experience: String,
    /// Hours the pet would spend alone on a typical day.
    pub hours_alone: u8,
    /// Planned exercise routine.
    pub exercise_plan: String,
    /// Planned training approach.
    pub training_plan: String,
    /// Why the applicant wants to adopt.
    pub reason_for_adoption: String,
    /// Veterinarian reference contact.
    pub veterinarian_reference: String,
    /// Personal reference contact.
    pub personal_reference: String,
}

impl Questionnaire {
    /// Creates an empty questionnaire.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Adoption application aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdoptionApplication {
    id: ApplicationId,
    pet_id: PetId,
    pet_name: String,
    applicant: ApplicantDetails,
    questionnaire: Questionnaire,
    status: ApplicationStatus,
    submitted_at: DateTime<Utc>,
    last_updated: DateTime<Utc>,
    admin_notes: Option<String>,
    rejection_reason: Option<String>,
}

/// Parameter object for reconstructing a persisted application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedApplicationData {
    /// Persisted application identifier.
    pub id: ApplicationId,
    /// Persisted pet listing reference.
    pub pet_id: PetId,
    /// Persisted pet name snapshot.
    pub pet_name: String,
    /// Persisted applicant details.
    pub applicant: ApplicantDetails,
    /// Persisted questionnaire answers.
    pub questionnaire: Questionnaire,
    /// Persisted review status.
    pub status: ApplicationStatus,
    /// Persisted submission timestamp.
    pub submitted_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub last_updated: DateTime<Utc>,
    /// Persisted reviewer notes, if any.
    pub admin_notes: Option<String>,
    /// Persisted rejection reason, if any.
    pub rejection_reason: Option<String>,
}

impl AdoptionApplication {
    /// Creates a new pending application.
    #[must_use]
    pub fn new(
        pet_id: PetId,
        pet_name: impl Into<String>,
        applicant: ApplicantDetails,
        questionnaire: Questionnaire,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: ApplicationId::new(),
            pet_id,
            pet_name: pet_name.into(),
            applicant,
            questionnaire,
            status: ApplicationStatus::Pending,
            submitted_at: timestamp,
            last_updated: timestamp,
            admin_notes: None,
            rejection_reason: None,
        }
    }

    /// Reconstructs an application from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedApplicationData) -> Self {
        Self {
            id: data.id,
            pet_id: data.pet_id,
            pet_name: data.pet_name,
            applicant: data.applicant,
            questionnaire: data.questionnaire,
            status: data.status,
            submitted_at: data.submitted_at,
            last_updated: data.last_updated,
            admin_notes: data.admin_notes,
            rejection_reason: data.rejection_reason,
        }
    }

    /// Returns the application identifier.
    #[must_use]
    pub const fn id(&self) -> ApplicationId {
        self.id
    }

    /// Returns the pet listing the application refers to.
    #[must_use]
    pub const fn pet_id(&self) -> &PetId {
        &self.pet_id
    }

    /// Returns the pet name snapshot taken at submission.
    #[must_use]
    pub fn pet_name(&self) -> &str {
        &self.pet_name
    }

    /// Returns the applicant details.
    #[must_use]
    pub const fn applicant(&self) -> &ApplicantDetails {
        &self.applicant
    }

    /// Returns the questionnaire answers.
    #[must_use]
    pub const fn questionnaire(&self) -> &Questionnaire {
        &self.questionnaire
    }

    /// Returns the review status.
    #[must_use]
    pub const fn status(&self) -> ApplicationStatus {
        self.status
    }

    /// Returns the submission timestamp.
    #[must_use]
    pub const fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    /// Returns the reviewer notes, if any.
    #[must_use]
    pub fn admin_notes(&self) -> Option<&str> {
        self.admin_notes.as_deref()
    }

    /// Returns the rejection reason, if any.
    #[must_use]
    pub fn rejection_reason(&self) -> Option<&str> {
        self.rejection_reason.as_deref()
    }

    /// Moves the application to `target`, recording reviewer notes.
    ///
    /// Rejection requires a non-empty reason; whitespace-only notes
    /// count as missing. Notes are stored for any target when present.
    ///
    /// # Errors
    ///
    /// Returns [`AdoptionDomainError::InvalidTransition`] when the
    /// lifecycle does not allow the move, or
    /// [`AdoptionDomainError::MissingRejectionReason`] when rejecting
    /// without a reason. The application is unchanged on error.
    pub fn transition_to(
        &mut self,
        target: ApplicationStatus,
        notes: Option<&str>,
        clock: &impl Clock,
    ) -> Result<(), AdoptionDomainError> {
        if !self.status.can_transition_to(target) {
            return Err(AdoptionDomainError::InvalidTransition {
                application_id: self.id,
                from: self.status,
                to: target,
            });
        }

        let trimmed = notes.map(str::trim).filter(|value| !value.is_empty());
        if target == ApplicationStatus::Rejected {
            let reason = trimmed.ok_or(AdoptionDomainError::MissingRejectionReason)?;
            self.rejection_reason = Some(reason.to_owned());
        }
        if let Some(value) = trimmed {
            self.admin_notes = Some(value.to_owned());
        }

        self.status = target;
        self.touch(clock);
        Ok(())
    }

    /// Updates the `last_updated` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.last_updated = clock.utc();
    }
}
