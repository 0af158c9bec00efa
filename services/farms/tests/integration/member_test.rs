use jaothui_domain::farm::FarmRole;
use jaothui_farms::error::FarmsServiceError;
use jaothui_farms::usecase::member::{AddMemberUseCase, ListMembersUseCase, RemoveMemberUseCase};

use crate::helpers::{member_context, owner_context, three_user_fixture};

#[tokio::test]
async fn should_list_members_with_limited_access() {
    let fixture = three_user_fixture();
    let usecase = ListMembersUseCase {
        members: fixture.repo.clone(),
    };
    let members = usecase.execute(&member_context(&fixture.f1)).await.unwrap();
    let user_ids: Vec<_> = members.iter().map(|m| m.user_id.as_str()).collect();
    assert_eq!(user_ids, vec!["u1", "u2"]);
}

#[tokio::test]
async fn should_add_member_as_owner() {
    let fixture = three_user_fixture();
    let usecase = AddMemberUseCase {
        users: fixture.repo.clone(),
        members: fixture.repo.clone(),
    };
    let member = usecase
        .execute(&owner_context(&fixture.f1), "u3")
        .await
        .unwrap();
    assert_eq!(member.role, FarmRole::Member);
    assert_eq!(member.farm_id, fixture.f1.id);
    assert_eq!(fixture.repo.store.lock().unwrap().members.len(), 3);
}

#[tokio::test]
async fn should_reject_adding_member_with_limited_access() {
    let fixture = three_user_fixture();
    let usecase = AddMemberUseCase {
        users: fixture.repo.clone(),
        members: fixture.repo.clone(),
    };
    let result = usecase.execute(&member_context(&fixture.f1), "u3").await;
    assert!(matches!(result, Err(FarmsServiceError::InsufficientAccess)));
}

#[tokio::test]
async fn should_reject_duplicate_unknown_and_owner_members() {
    let fixture = three_user_fixture();
    let usecase = AddMemberUseCase {
        users: fixture.repo.clone(),
        members: fixture.repo.clone(),
    };
    let context = owner_context(&fixture.f1);

    assert!(matches!(
        usecase.execute(&context, "u2").await,
        Err(FarmsServiceError::MemberAlreadyExists)
    ));
    assert!(matches!(
        usecase.execute(&context, "nobody").await,
        Err(FarmsServiceError::UserNotFound)
    ));
    assert!(matches!(
        usecase.execute(&context, "u1").await,
        Err(FarmsServiceError::InvalidInput(_))
    ));
}

#[tokio::test]
async fn should_remove_member_as_owner() {
    let fixture = three_user_fixture();
    let usecase = RemoveMemberUseCase {
        members: fixture.repo.clone(),
    };
    let context = owner_context(&fixture.f1);

    usecase.execute(&context, "u2").await.unwrap();
    assert!(matches!(
        usecase.execute(&context, "u2").await,
        Err(FarmsServiceError::MemberNotFound)
    ));
}

#[tokio::test]
async fn should_refuse_to_remove_owner_row() {
    let fixture = three_user_fixture();
    let usecase = RemoveMemberUseCase {
        members: fixture.repo.clone(),
    };
    let result = usecase.execute(&owner_context(&fixture.f1), "u1").await;
    assert!(matches!(result, Err(FarmsServiceError::InvalidInput(_))));

    let result = usecase.execute(&member_context(&fixture.f1), "u2").await;
    assert!(matches!(result, Err(FarmsServiceError::InsufficientAccess)));
}
