use chrono::{TimeDelta, Utc};
use uuid::Uuid;

use jaothui_domain::activity::{ActivityKind, ActivityStatus};
use jaothui_domain::pagination::PageRequest;
use jaothui_farms::domain::types::{ActivityFilter, ActivityPatch};
use jaothui_farms::error::FarmsServiceError;
use jaothui_farms::usecase::activity::{
    CreateActivityInput, CreateActivityUseCase, DeleteActivityUseCase, GetActivityUseCase,
    ListActivitiesUseCase, UpdateActivityUseCase,
};

use crate::helpers::{
    ThreeUserFixture, member_context, owner_context, test_activity, test_animal,
    three_user_fixture,
};

fn with_animal() -> (ThreeUserFixture, Uuid) {
    let fixture = three_user_fixture();
    let animal = test_animal(fixture.f1.id, "JT-001", "ทองคำ");
    let id = animal.id;
    fixture.repo.store.lock().unwrap().animals.push(animal);
    (fixture, id)
}

fn input(animal_id: Uuid, title: &str) -> CreateActivityInput {
    CreateActivityInput {
        animal_id,
        title: title.into(),
        description: None,
        kind: ActivityKind::Vaccination,
        activity_date: Utc::now(),
        due_date: Some(Utc::now() + TimeDelta::days(3)),
    }
}

// ── CreateActivityUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_pending_activity_attributed_to_caller() {
    let (fixture, animal_id) = with_animal();
    let usecase = CreateActivityUseCase {
        animals: fixture.repo.clone(),
        repo: fixture.repo.clone(),
    };
    let activity = usecase
        .execute(
            &member_context(&fixture.f1),
            "u2",
            input(animal_id, " ถ่ายพยาธิ "),
        )
        .await
        .unwrap();
    assert_eq!(activity.status, ActivityStatus::Pending);
    assert_eq!(activity.created_by, "u2");
    assert_eq!(activity.title, "ถ่ายพยาธิ");
    assert!(activity.completed_at.is_none());
    assert_eq!(fixture.repo.store.lock().unwrap().activities.len(), 1);
}

#[tokio::test]
async fn should_require_animal_in_callers_farm() {
    let (fixture, _) = with_animal();
    let foreign = test_animal(Uuid::now_v7(), "JT-999", "ต่างฟาร์ม");
    let foreign_id = foreign.id;
    fixture.repo.store.lock().unwrap().animals.push(foreign);

    let usecase = CreateActivityUseCase {
        animals: fixture.repo.clone(),
        repo: fixture.repo.clone(),
    };
    let result = usecase
        .execute(&owner_context(&fixture.f1), "u1", input(foreign_id, "ฉีดวัคซีน"))
        .await;
    assert!(matches!(result, Err(FarmsServiceError::AnimalNotFound)));
    assert!(fixture.repo.store.lock().unwrap().activities.is_empty());
}

#[tokio::test]
async fn should_reject_blank_activity_title() {
    let (fixture, animal_id) = with_animal();
    let usecase = CreateActivityUseCase {
        animals: fixture.repo.clone(),
        repo: fixture.repo.clone(),
    };
    let result = usecase
        .execute(&owner_context(&fixture.f1), "u1", input(animal_id, "   "))
        .await;
    assert!(matches!(result, Err(FarmsServiceError::InvalidInput(_))));
}

// ── ListActivitiesUseCase / GetActivityUseCase ───────────────────────────────

#[tokio::test]
async fn should_list_activities_filtered_by_status_and_animal() {
    let (fixture, animal_id) = with_animal();
    let other_animal = test_animal(fixture.f1.id, "JT-002", "เงินยวง");
    let other_id = other_animal.id;
    {
        let mut store = fixture.repo.store.lock().unwrap();
        store.animals.push(other_animal);
        store.activities.extend([
            test_activity(fixture.f1.id, animal_id, ActivityStatus::Pending, None),
            test_activity(fixture.f1.id, animal_id, ActivityStatus::Completed, None),
            test_activity(fixture.f1.id, other_id, ActivityStatus::Pending, None),
            test_activity(Uuid::now_v7(), Uuid::now_v7(), ActivityStatus::Pending, None),
        ]);
    }
    let usecase = ListActivitiesUseCase {
        repo: fixture.repo.clone(),
    };
    let context = member_context(&fixture.f1);

    let all = usecase
        .execute(&context, ActivityFilter::default(), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 3);

    let pending = usecase
        .execute(
            &context,
            ActivityFilter {
                status: Some(ActivityStatus::Pending),
                animal_id: None,
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(pending.len(), 2);

    let for_animal = usecase
        .execute(
            &context,
            ActivityFilter {
                status: None,
                animal_id: Some(other_id),
            },
            PageRequest::default(),
        )
        .await
        .unwrap();
    assert_eq!(for_animal.len(), 1);
    assert_eq!(for_animal[0].animal_id, other_id);
}

#[tokio::test]
async fn should_not_find_activity_of_another_farm() {
    let (fixture, _) = with_animal();
    let foreign = test_activity(Uuid::now_v7(), Uuid::now_v7(), ActivityStatus::Pending, None);
    let foreign_id = foreign.id;
    fixture.repo.store.lock().unwrap().activities.push(foreign);

    let usecase = GetActivityUseCase {
        repo: fixture.repo.clone(),
    };
    let result = usecase.execute(&owner_context(&fixture.f1), foreign_id).await;
    assert!(matches!(result, Err(FarmsServiceError::ActivityNotFound)));
}

// ── UpdateActivityUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_stamp_and_clear_completion_through_status_changes() {
    let (fixture, animal_id) = with_animal();
    let activity = test_activity(fixture.f1.id, animal_id, ActivityStatus::Pending, None);
    let id = activity.id;
    fixture.repo.store.lock().unwrap().activities.push(activity);

    let usecase = UpdateActivityUseCase {
        repo: fixture.repo.clone(),
    };
    let context = member_context(&fixture.f1);

    let completed = usecase
        .execute(
            &context,
            id,
            ActivityPatch {
                status: Some(ActivityStatus::Completed),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(completed.status, ActivityStatus::Completed);
    assert!(completed.completed_at.is_some());

    let reopened = usecase
        .execute(
            &context,
            id,
            ActivityPatch {
                status: Some(ActivityStatus::Pending),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(reopened.completed_at.is_none());

    let store = fixture.repo.store.lock().unwrap();
    assert_eq!(store.activities[0].status, ActivityStatus::Pending);
}

#[tokio::test]
async fn should_clear_due_date_with_explicit_none() {
    let (fixture, animal_id) = with_animal();
    let activity = test_activity(
        fixture.f1.id,
        animal_id,
        ActivityStatus::Pending,
        Some(Utc::now() + TimeDelta::days(1)),
    );
    let id = activity.id;
    fixture.repo.store.lock().unwrap().activities.push(activity);

    let usecase = UpdateActivityUseCase {
        repo: fixture.repo.clone(),
    };
    let updated = usecase
        .execute(
            &member_context(&fixture.f1),
            id,
            ActivityPatch {
                due_date: Some(None),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert!(updated.due_date.is_none());
    assert_eq!(updated.status, ActivityStatus::Pending);
}

#[tokio::test]
async fn should_reject_empty_or_unknown_activity_update() {
    let (fixture, animal_id) = with_animal();
    let activity = test_activity(fixture.f1.id, animal_id, ActivityStatus::Pending, None);
    let id = activity.id;
    fixture.repo.store.lock().unwrap().activities.push(activity);

    let usecase = UpdateActivityUseCase {
        repo: fixture.repo.clone(),
    };
    let context = owner_context(&fixture.f1);

    assert!(matches!(
        usecase.execute(&context, id, ActivityPatch::default()).await,
        Err(FarmsServiceError::MissingData)
    ));
    assert!(matches!(
        usecase
            .execute(
                &context,
                Uuid::now_v7(),
                ActivityPatch {
                    title: Some("ตัดเล็บ".into()),
                    ..Default::default()
                },
            )
            .await,
        Err(FarmsServiceError::ActivityNotFound)
    ));
    assert!(matches!(
        usecase
            .execute(
                &context,
                id,
                ActivityPatch {
                    title: Some(" ".into()),
                    ..Default::default()
                },
            )
            .await,
        Err(FarmsServiceError::InvalidInput(_))
    ));
}

// ── DeleteActivityUseCase ────────────────────────────────────────────────────

#[tokio::test]
async fn should_delete_activity_only_with_full_access() {
    let (fixture, animal_id) = with_animal();
    let activity = test_activity(fixture.f1.id, animal_id, ActivityStatus::Pending, None);
    let id = activity.id;
    fixture.repo.store.lock().unwrap().activities.push(activity);

    let usecase = DeleteActivityUseCase {
        repo: fixture.repo.clone(),
    };
    assert!(matches!(
        usecase.execute(&member_context(&fixture.f1), id).await,
        Err(FarmsServiceError::InsufficientAccess)
    ));
    usecase
        .execute(&owner_context(&fixture.f1), id)
        .await
        .unwrap();
    assert!(matches!(
        usecase.execute(&owner_context(&fixture.f1), id).await,
        Err(FarmsServiceError::ActivityNotFound)
    ));
}
