//! Service orchestration tests for medical record CRUD.

use std::sync::Arc;

use crate::error::ErrorKind;
use crate::profile::{
    adapters::memory::InMemoryProfileRepository,
    domain::{Profile, ProfileId, ProfileName, Relationship},
    ports::ProfileRepository,
};
use crate::record::{
    adapters::memory::InMemoryMedicalRecordRepository,
    domain::{MedicalRecordId, RecordAnalysis},
    services::{
        CreateRecordRequest, MedicalRecordService, RecordServiceError, UpdateRecordRequest,
    },
};
use chrono::NaiveDate;
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    MedicalRecordService<InMemoryProfileRepository, InMemoryMedicalRecordRepository, DefaultClock>;

#[fixture]
async fn seeded() -> (TestService, ProfileId) {
    let profiles = Arc::new(InMemoryProfileRepository::new());
    let profile = Profile::new(
        ProfileName::new("Ada").expect("valid name"),
        Relationship::default(),
        &DefaultClock,
    );
    profiles.store(&profile).await.expect("profile stored");
    let service = MedicalRecordService::new(
        profiles,
        Arc::new(InMemoryMedicalRecordRepository::new()),
        Arc::new(DefaultClock),
    );
    (service, profile.id())
}

fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, month, day).expect("valid date")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn create_requires_existing_profile(#[future] seeded: (TestService, ProfileId)) {
    let (service, _) = seeded.await;
    let missing = ProfileId::new();

    let result = service
        .create_record(CreateRecordRequest::new(missing, "X-ray", date(1, 5)))
        .await;

    assert!(matches!(result, Err(RecordServiceError::ProfileNotFound(id)) if id == missing));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn list_orders_by_document_date_descending(#[future] seeded: (TestService, ProfileId)) {
    let (service, profile_id) = seeded.await;
    for (title, month) in [("January", 1), ("March", 3), ("February", 2)] {
        service
            .create_record(CreateRecordRequest::new(profile_id, title, date(month, 1)))
            .await
            .expect("record creation should succeed");
    }

    let titles: Vec<String> = service
        .list_records(profile_id)
        .await
        .expect("listing should succeed")
        .iter()
        .map(|record| record.title().as_str().to_owned())
        .collect();

    assert_eq!(titles, vec!["March", "February", "January"]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn update_replaces_and_clears_optional_fields(#[future] seeded: (TestService, ProfileId)) {
    let (service, profile_id) = seeded.await;
    let created = service
        .create_record(
            CreateRecordRequest::new(profile_id, "MRI", date(4, 2))
                .with_image("scans/mri.png")
                .with_analysis(RecordAnalysis {
                    summary: Some("No findings".to_owned()),
                    ..RecordAnalysis::default()
                }),
        )
        .await
        .expect("record creation should succeed");

    let updated = service
        .update_record(
            UpdateRecordRequest::new(profile_id, created.id())
                .with_title("MRI (knee)")
                .with_image(None)
                .with_analysis_actions(Some("Physiotherapy".to_owned())),
        )
        .await
        .expect("update should succeed");

    assert_eq!(updated.title().as_str(), "MRI (knee)");
    assert_eq!(updated.image(), None);
    assert_eq!(updated.analysis().summary.as_deref(), Some("No findings"));
    assert_eq!(updated.analysis().actions.as_deref(), Some("Physiotherapy"));
    assert!(updated.updated_at() >= created.updated_at());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn records_are_scoped_to_their_profile(#[future] seeded: (TestService, ProfileId)) {
    let (service, profile_id) = seeded.await;
    let created = service
        .create_record(CreateRecordRequest::new(profile_id, "MRI", date(4, 2)))
        .await
        .expect("record creation should succeed");

    let foreign = service.get_record(ProfileId::new(), created.id()).await;
    assert_eq!(foreign.expect_err("foreign").kind(), ErrorKind::NotFound);

    service
        .delete_record(profile_id, created.id())
        .await
        .expect("delete should succeed");
    let again = service.delete_record(profile_id, created.id()).await;
    assert_eq!(again.expect_err("already gone").kind(), ErrorKind::NotFound);

    let unknown = service.get_record(profile_id, MedicalRecordId::new()).await;
    assert!(matches!(unknown, Err(RecordServiceError::NotFound(_))));
}
