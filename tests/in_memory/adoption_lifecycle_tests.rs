//! End-to-end adoption lifecycle over the in-memory repositories.

use homeward::adoption::adapters::memory::{
    InMemoryApplicationRepository, InMemoryPetRepository,
};
use homeward::adoption::domain::{
    AdoptionDomainError, ApplicationStatus, Pet, PetId, Questionnaire,
};
use homeward::adoption::ports::PetRepository;
use homeward::adoption::services::{
    AdoptionError, AdoptionLifecycleService, SubmitApplicationRequest, UpdateStatusRequest,
};
use homeward::identity::adapters::FixedIdentityProvider;
use homeward::identity::domain::{UserId, UserIdentity};
use mockable::DefaultClock;
use rstest::{fixture, rstest};
use std::sync::Arc;

type TestService = AdoptionLifecycleService<
    InMemoryApplicationRepository,
    InMemoryPetRepository,
    FixedIdentityProvider,
    DefaultClock,
>;

struct AdoptionHarness {
    service: TestService,
    pets: Arc<InMemoryPetRepository>,
}

#[fixture]
fn harness() -> AdoptionHarness {
    let identity = UserIdentity::new(UserId::new("applicant-1").expect("valid user id"))
        .with_display_name("Alex")
        .with_email("alex@example.com");
    let pets = Arc::new(InMemoryPetRepository::new());
    let service = AdoptionLifecycleService::new(
        Arc::new(InMemoryApplicationRepository::new()),
        Arc::clone(&pets),
        Arc::new(FixedIdentityProvider::signed_in(identity)),
        Arc::new(DefaultClock),
    );
    AdoptionHarness { service, pets }
}

async fn seed_pet(pets: &InMemoryPetRepository, id: &str) -> PetId {
    let pet_id = PetId::new(id).expect("valid pet id");
    pets.put(&Pet::new(pet_id.clone(), "Biscuit", "dog", &DefaultClock))
        .await
        .expect("seed should succeed");
    pet_id
}

fn filled_questionnaire() -> Questionnaire {
    Questionnaire {
        home_type: "House".to_owned(),
        has_yard: true,
        yard_fenced: true,
        pet_experience: "Grew up with dogs".to_owned(),
        hours_alone: 4,
        exercise_plan: "Two walks a day".to_owned(),
        reason_for_adoption: "Company for the family".to_owned(),
        ..Questionnaire::default()
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejection_flow_needs_a_reason_and_leaves_the_pet_alone(harness: AdoptionHarness) {
    let pet_id = seed_pet(&harness.pets, "p1").await;

    let application = harness
        .service
        .submit(
            SubmitApplicationRequest::new(pet_id.clone(), "Biscuit")
                .with_questionnaire(filled_questionnaire()),
        )
        .await
        .expect("submission should succeed");
    assert_eq!(application.status(), ApplicationStatus::Pending);

    let refused = harness
        .service
        .update_status(
            UpdateStatusRequest::new(application.id(), ApplicationStatus::Rejected).with_notes(""),
        )
        .await;
    assert!(matches!(
        refused,
        Err(AdoptionError::Domain(
            AdoptionDomainError::MissingRejectionReason
        ))
    ));

    let rejected = harness
        .service
        .update_status(
            UpdateStatusRequest::new(application.id(), ApplicationStatus::Rejected)
                .with_notes("Not enough yard space"),
        )
        .await
        .expect("rejection with a reason should succeed");
    assert_eq!(rejected.status(), ApplicationStatus::Rejected);
    assert_eq!(rejected.rejection_reason(), Some("Not enough yard space"));

    // Only approvals cascade; the listing keeps its submission state.
    let pet = harness
        .pets
        .find_by_id(&pet_id)
        .await
        .expect("lookup should succeed")
        .expect("pet should exist");
    assert_eq!(pet.application_status(), "Pending");
    assert!(!pet.is_adopted());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn review_then_approval_adopts_the_pet(harness: AdoptionHarness) {
    let pet_id = seed_pet(&harness.pets, "p2").await;

    let application = harness
        .service
        .submit(SubmitApplicationRequest::new(pet_id.clone(), "Biscuit"))
        .await
        .expect("submission should succeed");

    let reviewing = harness
        .service
        .update_status(
            UpdateStatusRequest::new(application.id(), ApplicationStatus::UnderReview)
                .with_notes("Checking references"),
        )
        .await
        .expect("review transition should succeed");
    assert_eq!(reviewing.status(), ApplicationStatus::UnderReview);

    let approved = harness
        .service
        .update_status(UpdateStatusRequest::new(
            application.id(),
            ApplicationStatus::Approved,
        ))
        .await
        .expect("approval should succeed");
    assert_eq!(approved.status(), ApplicationStatus::Approved);
    assert!(approved.last_updated() >= application.last_updated());

    let pet = harness
        .pets
        .find_by_id(&pet_id)
        .await
        .expect("lookup should succeed")
        .expect("pet should exist");
    assert_eq!(pet.application_status(), "Adopted");
    assert!(pet.is_adopted());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn repeat_applications_for_a_pet_are_accepted(harness: AdoptionHarness) {
    let pet_id = seed_pet(&harness.pets, "p3").await;

    harness
        .service
        .submit(SubmitApplicationRequest::new(pet_id.clone(), "Biscuit"))
        .await
        .expect("first submission should succeed");
    harness
        .service
        .submit(SubmitApplicationRequest::new(pet_id.clone(), "Biscuit"))
        .await
        .expect("second submission should succeed");

    let applications = harness
        .service
        .applications_for_pet(&pet_id)
        .await
        .expect("query should succeed");
    assert_eq!(applications.len(), 2);

    let queue = harness
        .service
        .all_applications()
        .await
        .expect("query should succeed");
    assert_eq!(queue.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn questionnaire_round_trips_through_the_store(harness: AdoptionHarness) {
    let pet_id = seed_pet(&harness.pets, "p4").await;

    harness
        .service
        .submit(
            SubmitApplicationRequest::new(pet_id, "Biscuit")
                .with_questionnaire(filled_questionnaire()),
        )
        .await
        .expect("submission should succeed");

    let mine = harness
        .service
        .applications_for_applicant()
        .await
        .expect("query should succeed");
    let stored = mine.first().expect("one application expected");
    assert_eq!(stored.questionnaire(), &filled_questionnaire());
    assert_eq!(stored.applicant().name(), "Alex");
    assert_eq!(stored.applicant().email(), "alex@example.com");
}
