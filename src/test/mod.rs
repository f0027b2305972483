use std::sync::Arc;

use uuid::Uuid;

use crate::api::error::{DomainError, SystemError};
use crate::configs::DocStore;
use crate::modules::friend::model::SendRequestOutcome;
use crate::modules::friend::repository_mem::FriendRepositoryMem;
use crate::modules::friend::service::FriendService;
use crate::modules::profile::repository::ProfileRepository;
use crate::modules::profile::repository_mem::ProfileRepositoryMem;
use crate::modules::profile::schema::insert_member;
use crate::modules::profile::service::ProfileService;
use crate::modules::user::model::RegisterModel;
use crate::modules::user::repository_mem::UserRepositoryMem;
use crate::modules::user::service::UserService;

struct Fixture {
    users: UserService,
    friends: FriendService<FriendRepositoryMem, UserRepositoryMem>,
    profiles: ProfileService<ProfileRepositoryMem>,
    profile_repo: ProfileRepositoryMem,
}

fn fixture() -> Fixture {
    let store = DocStore::new();
    let user_repo = UserRepositoryMem::new(store.clone());
    let profile_repo = ProfileRepositoryMem::new(store.clone());
    let friend_repo = FriendRepositoryMem::new(store.clone());

    Fixture {
        users: UserService::with_dependencies(
            Arc::new(user_repo.clone()),
            Arc::new(profile_repo.clone()),
        ),
        friends: FriendService::with_dependencies(Arc::new(friend_repo), Arc::new(user_repo)),
        profiles: ProfileService::with_dependencies(Arc::new(profile_repo.clone())),
        profile_repo,
    }
}

async fn register(fx: &Fixture, handle: &str) -> Uuid {
    fx.users
        .register(RegisterModel {
            handle: handle.to_string(),
            display_name: handle.to_string(),
        })
        .await
        .unwrap()
}

fn domain(err: SystemError) -> DomainError {
    err.domain().cloned().expect("expected a domain error")
}

async fn assert_mirror_invariant(fx: &Fixture, a: Uuid, b: Uuid) {
    let pa = fx.profiles.get_profile(a).await.unwrap();
    let pb = fx.profiles.get_profile(b).await.unwrap();
    assert_eq!(
        pa.following.contains(&b),
        pb.followers.contains(&a),
        "follow mirror out of sync between {a} and {b}"
    );
    assert_eq!(
        pb.following.contains(&a),
        pa.followers.contains(&b),
        "follow mirror out of sync between {b} and {a}"
    );
}

#[tokio::test]
async fn request_accept_lifecycle() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;

    let outcome = fx.friends.send_request(alice, bob).await.unwrap();
    assert!(matches!(outcome, SendRequestOutcome::Pending(_)));

    let inbox = fx.friends.get_requests(bob).await.unwrap();
    assert_eq!(inbox.len(), 1);
    assert_eq!(inbox[0].from.id, alice);

    let accepted = fx.friends.accept_request(bob, alice).await.unwrap();
    assert_eq!(accepted.id, alice);

    assert!(fx.friends.get_requests(bob).await.unwrap().is_empty());

    let alice_friends = fx.friends.get_friends(alice).await.unwrap();
    let bob_friends = fx.friends.get_friends(bob).await.unwrap();
    assert_eq!(alice_friends.len(), 1);
    assert_eq!(alice_friends[0].id, bob);
    assert_eq!(bob_friends.len(), 1);
    assert_eq!(bob_friends[0].id, alice);
}

#[tokio::test]
async fn duplicate_request_is_rejected() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;

    fx.friends.send_request(alice, bob).await.unwrap();
    let err = fx.friends.send_request(alice, bob).await.unwrap_err();
    assert_eq!(domain(err), DomainError::DuplicateRequest);

    // Still exactly one pending request.
    assert_eq!(fx.friends.get_requests(bob).await.unwrap().len(), 1);
}

#[tokio::test]
async fn reciprocal_request_resolves_as_acceptance() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;

    fx.friends.send_request(alice, bob).await.unwrap();

    let outcome = fx.friends.send_request(bob, alice).await.unwrap();
    match outcome {
        SendRequestOutcome::AutoAccepted(friend) => assert_eq!(friend.id, alice),
        other => panic!("expected auto-acceptance, got {other:?}"),
    }

    // Both pending queues are empty and the friendship exists both ways.
    assert!(fx.friends.get_requests(alice).await.unwrap().is_empty());
    assert!(fx.friends.get_requests(bob).await.unwrap().is_empty());
    assert_eq!(fx.friends.get_friends(alice).await.unwrap()[0].id, bob);
    assert_eq!(fx.friends.get_friends(bob).await.unwrap()[0].id, alice);
}

#[tokio::test]
async fn racing_reciprocal_sends_resolve_to_one_friendship() {
    for round in 0..1000 {
        let fx = fixture();
        let alice = register(&fx, "alice").await;
        let bob = register(&fx, "bob").await;

        let a_send = {
            let friends = fx.friends.clone();
            tokio::spawn(async move { friends.send_request(alice, bob).await })
        };
        let b_send = {
            let friends = fx.friends.clone();
            tokio::spawn(async move { friends.send_request(bob, alice).await })
        };
        let a_outcome = a_send.await.unwrap().unwrap();
        let b_outcome = b_send.await.unwrap().unwrap();

        // Exactly one side ends up pending-then-consumed, the other side's
        // send resolves it; never two stacked pending records.
        let outcomes = [a_outcome, b_outcome];
        let pending_outcomes = outcomes
            .iter()
            .filter(|o| matches!(o, SendRequestOutcome::Pending(_)))
            .count();
        assert_eq!(pending_outcomes, 1, "round {round}: outcomes {outcomes:?}");

        let pending = fx.friends.get_requests(alice).await.unwrap().len()
            + fx.friends.get_requests(bob).await.unwrap().len();
        assert_eq!(pending, 0, "round {round}: pair left {pending} pending requests");

        let alice_friends = fx.friends.get_friends(alice).await.unwrap();
        let bob_friends = fx.friends.get_friends(bob).await.unwrap();
        assert_eq!(alice_friends.len(), 1, "round {round}");
        assert_eq!(alice_friends[0].id, bob);
        assert_eq!(bob_friends.len(), 1, "round {round}");
        assert_eq!(bob_friends[0].id, alice);
    }
}

#[tokio::test]
async fn racing_identical_sends_create_one_request() {
    for round in 0..1000 {
        let fx = fixture();
        let alice = register(&fx, "alice").await;
        let bob = register(&fx, "bob").await;

        let first = {
            let friends = fx.friends.clone();
            tokio::spawn(async move { friends.send_request(alice, bob).await })
        };
        let second = {
            let friends = fx.friends.clone();
            tokio::spawn(async move { friends.send_request(alice, bob).await })
        };
        let results = [first.await.unwrap(), second.await.unwrap()];

        let sent = results.iter().filter(|r| r.is_ok()).count();
        assert_eq!(sent, 1, "round {round}: both identical sends succeeded");
        for result in results {
            if let Err(err) = result {
                assert_eq!(domain(err), DomainError::DuplicateRequest, "round {round}");
            }
        }

        assert_eq!(
            fx.friends.get_requests(bob).await.unwrap().len(),
            1,
            "round {round}: inbox should hold exactly one request"
        );
    }
}

#[tokio::test]
async fn request_to_existing_friend_is_rejected() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;

    fx.friends.send_request(alice, bob).await.unwrap();
    fx.friends.accept_request(bob, alice).await.unwrap();

    let err = fx.friends.send_request(alice, bob).await.unwrap_err();
    assert_eq!(domain(err), DomainError::AlreadyFriends);
}

#[tokio::test]
async fn self_request_and_self_follow_are_rejected() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;

    let err = fx.friends.send_request(alice, alice).await.unwrap_err();
    assert_eq!(domain(err), DomainError::SelfRequest);
    assert!(fx.friends.get_requests(alice).await.unwrap().is_empty());

    let err = fx.profiles.follow(alice, alice).await.unwrap_err();
    assert_eq!(domain(err), DomainError::SelfFollow);

    let profile = fx.profiles.get_profile(alice).await.unwrap();
    assert!(profile.followers.is_empty());
    assert!(profile.following.is_empty());
}

#[tokio::test]
async fn second_resolver_of_a_request_loses_cleanly() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;

    fx.friends.send_request(alice, bob).await.unwrap();
    fx.friends.accept_request(bob, alice).await.unwrap();

    // The request was consumed; every further resolution attempt observes a
    // typed not-found, never a silent double-effect.
    let err = fx.friends.accept_request(bob, alice).await.unwrap_err();
    assert_eq!(domain(err), DomainError::RequestNotFound);
    let err = fx.friends.reject_request(bob, alice).await.unwrap_err();
    assert_eq!(domain(err), DomainError::RequestNotFound);
    let err = fx.friends.remove_request(alice, bob).await.unwrap_err();
    assert_eq!(domain(err), DomainError::RequestNotFound);

    assert_eq!(fx.friends.get_friends(alice).await.unwrap().len(), 1);
}

#[tokio::test]
async fn rejected_request_leaves_no_trace() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;

    fx.friends.send_request(alice, bob).await.unwrap();
    fx.friends.reject_request(bob, alice).await.unwrap();

    assert!(fx.friends.get_requests(bob).await.unwrap().is_empty());
    assert!(fx.friends.get_friends(alice).await.unwrap().is_empty());

    // A fresh request may follow immediately.
    let outcome = fx.friends.send_request(alice, bob).await.unwrap();
    assert!(matches!(outcome, SendRequestOutcome::Pending(_)));
}

#[tokio::test]
async fn withdrawing_a_request_does_not_touch_friendships() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;
    let carol = register(&fx, "carol").await;

    fx.friends.send_request(alice, bob).await.unwrap();
    fx.friends.accept_request(bob, alice).await.unwrap();

    fx.friends.send_request(alice, carol).await.unwrap();
    fx.friends.remove_request(alice, carol).await.unwrap();

    assert!(fx.friends.get_requests(carol).await.unwrap().is_empty());
    assert_eq!(fx.friends.get_friends(alice).await.unwrap().len(), 1);

    let err = fx.friends.remove_request(alice, carol).await.unwrap_err();
    assert_eq!(domain(err), DomainError::RequestNotFound);
}

#[tokio::test]
async fn unfriending_removes_the_edge_for_both_sides() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;

    fx.friends.send_request(alice, bob).await.unwrap();
    fx.friends.accept_request(bob, alice).await.unwrap();

    // Either side may unfriend; here the recipient does.
    fx.friends.remove_friend(bob, alice).await.unwrap();

    assert!(fx.friends.get_friends(alice).await.unwrap().is_empty());
    assert!(fx.friends.get_friends(bob).await.unwrap().is_empty());

    let err = fx.friends.remove_friend(alice, bob).await.unwrap_err();
    assert_eq!(domain(err), DomainError::FriendshipNotFound);

    // Unfriending reopens the request path.
    let outcome = fx.friends.send_request(bob, alice).await.unwrap();
    assert!(matches!(outcome, SendRequestOutcome::Pending(_)));
}

#[tokio::test]
async fn follow_is_idempotent() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;

    fx.profiles.follow(alice, bob).await.unwrap();
    fx.profiles.follow(alice, bob).await.unwrap();

    let bob_profile = fx.profiles.get_profile(bob).await.unwrap();
    assert_eq!(bob_profile.followers, vec![alice]);

    let alice_profile = fx.profiles.get_profile(alice).await.unwrap();
    assert_eq!(alice_profile.following, vec![bob]);

    assert_mirror_invariant(&fx, alice, bob).await;
}

#[tokio::test]
async fn follow_requires_both_profiles() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let ghost = Uuid::now_v7();

    let err = fx.profiles.follow(alice, ghost).await.unwrap_err();
    assert_eq!(domain(err), DomainError::ProfileNotFound);

    let err = fx.profiles.follow(ghost, alice).await.unwrap_err();
    assert_eq!(domain(err), DomainError::ProfileNotFound);

    let profile = fx.profiles.get_profile(alice).await.unwrap();
    assert!(profile.following.is_empty());
    assert!(profile.followers.is_empty());
}

#[tokio::test]
async fn reconcile_repairs_a_one_sided_follow() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;

    // Simulate an interrupted dual write: only the followers side of bob's
    // document was written before the process died.
    let doc = fx.profile_repo.find_by_user(&bob).await.unwrap().unwrap();
    let mut data = doc.data.clone();
    assert!(insert_member(&mut data.followers, alice));
    fx.profile_repo.update(&doc.id, doc.version, data).await.unwrap();

    fx.profiles.reconcile_follow_pair(alice, bob).await.unwrap();

    let alice_profile = fx.profiles.get_profile(alice).await.unwrap();
    assert_eq!(alice_profile.following, vec![bob]);
    assert_mirror_invariant(&fx, alice, bob).await;

    // Running the repair again changes nothing.
    fx.profiles.reconcile_follow_pair(alice, bob).await.unwrap();
    assert_eq!(fx.profiles.get_profile(bob).await.unwrap().followers, vec![alice]);
}

#[tokio::test]
async fn mirror_invariant_holds_across_mixed_operations() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;
    let bob = register(&fx, "bob").await;
    let carol = register(&fx, "carol").await;

    fx.profiles.follow(alice, bob).await.unwrap();
    assert_mirror_invariant(&fx, alice, bob).await;

    fx.profiles.follow(bob, alice).await.unwrap();
    assert_mirror_invariant(&fx, alice, bob).await;

    fx.profiles.follow(carol, bob).await.unwrap();
    assert_mirror_invariant(&fx, carol, bob).await;
    assert_mirror_invariant(&fx, alice, carol).await;

    let bob_profile = fx.profiles.get_profile(bob).await.unwrap();
    assert_eq!(bob_profile.followers.len(), 2);
    assert_eq!(fx.profiles.get_followers(bob).await.unwrap().len(), 2);
    assert_eq!(fx.profiles.get_following(carol).await.unwrap(), vec![bob]);
}

#[tokio::test]
async fn handles_resolve_to_identities() {
    let fx = fixture();
    let alice = register(&fx, "alice").await;

    assert_eq!(fx.users.resolve("alice").await.unwrap(), alice);
    let err = fx.users.resolve("nobody").await.unwrap_err();
    assert_eq!(domain(err), DomainError::UserNotFound);

    let err = fx
        .users
        .register(RegisterModel {
            handle: "alice".to_string(),
            display_name: "Alice Again".to_string(),
        })
        .await
        .unwrap_err();
    assert_eq!(domain(err), DomainError::HandleTaken);
}
