use jaothui_domain::farm::{AccessLevel, FarmRole};
use jaothui_farms::domain::types::{FarmContextParams, LookupStrategy};
use jaothui_farms::error::FarmContextError;

use crate::helpers::{MemoryRepo, Store, test_farm, test_member, three_user_fixture};

const STRATEGIES: [LookupStrategy; 2] = [LookupStrategy::Sequential, LookupStrategy::Union];

// ── resolve ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_resolve_owner_member_and_stranger() {
    for strategy in STRATEGIES {
        let fixture = three_user_fixture();
        let resolver = fixture.repo.resolver(strategy);

        let owner = resolver
            .resolve("u1", FarmContextParams::default())
            .await
            .unwrap();
        assert_eq!(owner.farm.id, fixture.f1.id);
        assert_eq!(owner.role, FarmRole::Owner);
        assert_eq!(owner.access_level, AccessLevel::Full);

        let staff = resolver
            .resolve("u2", FarmContextParams::default())
            .await
            .unwrap();
        assert_eq!(staff.farm.id, fixture.f1.id);
        assert_eq!(staff.role, FarmRole::Member);
        assert_eq!(staff.access_level, AccessLevel::Limited);

        let stranger = resolver.resolve("u3", FarmContextParams::default()).await;
        assert!(
            matches!(stranger, Err(FarmContextError::NoAccess { farm_id: None })),
            "expected NoAccess with {strategy:?}, got {stranger:?}"
        );
    }
}

#[tokio::test]
async fn should_let_ownership_win_over_membership_elsewhere() {
    let own = test_farm("u1", "ฟาร์มบ้านนา", 1);
    let older = test_farm("u9", "ฟาร์มเก่า", 100);
    let repo = MemoryRepo::new(Store {
        members: vec![test_member(older.id, "u1", FarmRole::Member)],
        farms: vec![own.clone(), older],
        ..Store::default()
    });
    for strategy in STRATEGIES {
        let context = repo
            .resolver(strategy)
            .resolve("u1", FarmContextParams::default())
            .await
            .unwrap();
        assert_eq!(context.farm.id, own.id, "{strategy:?}");
        assert_eq!(context.access_level, AccessLevel::Full);
    }
}

#[tokio::test]
async fn should_grant_full_access_for_stored_owner_role() {
    let farm = test_farm("u1", "ฟาร์มร่วม", 5);
    let repo = MemoryRepo::new(Store {
        members: vec![test_member(farm.id, "u7", FarmRole::Owner)],
        farms: vec![farm.clone()],
        ..Store::default()
    });
    for strategy in STRATEGIES {
        let context = repo
            .resolver(strategy)
            .resolve("u7", FarmContextParams::default())
            .await
            .unwrap();
        assert_eq!(context.role, FarmRole::Owner);
        assert_eq!(context.access_level, AccessLevel::Full);
    }
}

#[tokio::test]
async fn should_reject_empty_and_null_user_ids() {
    let fixture = three_user_fixture();
    let resolver = fixture.repo.resolver(LookupStrategy::Sequential);
    for user_id in [Some(""), Some("  "), None] {
        let result = resolver.resolve(user_id, FarmContextParams::default()).await;
        assert!(
            matches!(result, Err(FarmContextError::InvalidUser)),
            "expected InvalidUser for {user_id:?}, got {result:?}"
        );
    }
}

#[tokio::test]
async fn should_reraise_lookup_failures_as_database_error() {
    for strategy in STRATEGIES {
        let resolver = MemoryRepo::failing().resolver(strategy);
        let err = resolver
            .resolve("u1", FarmContextParams::default())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "DATABASE_ERROR");
        assert!(matches!(err, FarmContextError::Database(_)));
    }
}

#[tokio::test]
async fn should_check_only_the_requested_farm() {
    let fixture = three_user_fixture();
    let other = test_farm("u9", "ฟาร์มอื่น", 3);
    fixture.repo.store.lock().unwrap().farms.push(other.clone());

    let resolver = fixture.repo.resolver(LookupStrategy::Sequential);

    let err = resolver
        .resolve("u1", FarmContextParams::for_farm(other.id))
        .await
        .unwrap_err();
    assert!(matches!(err, FarmContextError::NoAccess { farm_id: Some(id) } if id == other.id));
    assert!(err.to_string().contains(&other.id.to_string()));

    let staff = resolver
        .resolve("u2", FarmContextParams::for_farm(fixture.f1.id))
        .await
        .unwrap();
    assert_eq!(staff.role, FarmRole::Member);
}

#[tokio::test]
async fn should_treat_membership_of_missing_farm_as_no_access() {
    let ghost = test_farm("u9", "ฟาร์มที่ถูกลบ", 3);
    let repo = MemoryRepo::new(Store {
        members: vec![test_member(ghost.id, "u2", FarmRole::Member)],
        ..Store::default()
    });
    let resolver = repo.resolver(LookupStrategy::Sequential);

    let by_id = resolver
        .resolve("u2", FarmContextParams::for_farm(ghost.id))
        .await;
    assert!(matches!(by_id, Err(FarmContextError::NoAccess { .. })));

    let default = resolver.resolve("u2", FarmContextParams::default()).await;
    assert!(matches!(default, Err(FarmContextError::NoAccess { .. })));
}

// ── resolve_all ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_enumerate_owned_farms_before_memberships() {
    let own = test_farm("u1", "ฟาร์มของฉัน", 1);
    let staffed = test_farm("u9", "ฟาร์มที่ช่วยงาน", 50);
    let ghost = test_farm("u8", "ฟาร์มที่ถูกลบ", 20);
    let repo = MemoryRepo::new(Store {
        members: vec![
            test_member(own.id, "u1", FarmRole::Owner),
            test_member(staffed.id, "u1", FarmRole::Member),
            test_member(ghost.id, "u1", FarmRole::Member),
        ],
        farms: vec![own.clone(), staffed.clone()],
        ..Store::default()
    });

    let contexts = repo
        .resolver(LookupStrategy::Union)
        .resolve_all("u1")
        .await
        .unwrap();
    let ids: Vec<_> = contexts.iter().map(|c| c.farm.id).collect();
    assert_eq!(ids, vec![own.id, staffed.id]);
    assert_eq!(contexts[0].access_level, AccessLevel::Full);
    assert_eq!(contexts[1].access_level, AccessLevel::Limited);
}

#[tokio::test]
async fn should_fail_enumeration_without_any_farm() {
    let fixture = three_user_fixture();
    let resolver = fixture.repo.resolver(LookupStrategy::Union);
    assert!(matches!(
        resolver.resolve_all("u3").await,
        Err(FarmContextError::NoAccess { .. })
    ));
    assert!(matches!(
        resolver.resolve_all("").await,
        Err(FarmContextError::InvalidUser)
    ));
    assert!(matches!(
        MemoryRepo::failing()
            .resolver(LookupStrategy::Union)
            .resolve_all("u1")
            .await,
        Err(FarmContextError::Database(_))
    ));
}

// ── check_access ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_answer_check_access_per_resolution_outcome() {
    let fixture = three_user_fixture();
    let resolver = fixture.repo.resolver(LookupStrategy::Union);

    assert!(
        resolver
            .check_access("u1", FarmContextParams::default())
            .await
            .unwrap()
    );
    assert!(
        resolver
            .check_access("u2", FarmContextParams::for_farm(fixture.f1.id))
            .await
            .unwrap()
    );
    assert!(
        !resolver
            .check_access("u3", FarmContextParams::default())
            .await
            .unwrap()
    );
    assert!(matches!(
        resolver
            .check_access(None::<&str>, FarmContextParams::default())
            .await,
        Err(FarmContextError::InvalidUser)
    ));
}
