use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::blobs::{BlobStoreTrait, Cid};
use crate::errors::{BlobStoreError, Error, Result};
use crate::goals::{Goal, GoalInput, GoalService, GoalServiceTrait};
use crate::users::{NewUser, User, UserRepositoryTrait};

// --- Mock UserRepository ---
#[derive(Default)]
struct MockUserRepository {
    users: Mutex<HashMap<String, User>>,
    saves: AtomicUsize,
}

impl MockUserRepository {
    fn with_user(username: &str) -> Arc<Self> {
        let repo = Self::default();
        repo.users
            .lock()
            .unwrap()
            .insert(username.to_string(), user(username));
        Arc::new(repo)
    }

    fn goals_log(&self, username: &str) -> Vec<Cid> {
        self.users.lock().unwrap()[username].goals_cid.clone()
    }
}

fn epoch() -> NaiveDateTime {
    chrono::DateTime::from_timestamp(0, 0).unwrap().naive_utc()
}

fn user(username: &str) -> User {
    User {
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "hash".to_string(),
        otp: String::new(),
        otp_expiry: epoch(),
        is_verified: true,
        banks_count: 0,
        banks: vec![],
        goals_cid: vec![],
        transactions_cid: vec![],
        created_at: epoch(),
        updated_at: epoch(),
    }
}

#[async_trait]
impl UserRepositoryTrait for MockUserRepository {
    fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(username).cloned())
    }

    async fn insert(&self, _new_user: NewUser) -> Result<User> {
        unimplemented!()
    }

    async fn save(&self, user: User) -> Result<User> {
        self.saves.fetch_add(1, Ordering::SeqCst);
        self.users
            .lock()
            .unwrap()
            .insert(user.username.clone(), user.clone());
        Ok(user)
    }
}

// --- Mock BlobStore ---
#[derive(Default)]
struct MockBlobStore {
    blobs: Mutex<HashMap<Cid, Vec<u8>>>,
    uploads: AtomicUsize,
    fail_uploads: AtomicBool,
}

#[async_trait]
impl BlobStoreTrait for MockBlobStore {
    async fn upload(&self, _name: &str, bytes: Vec<u8>) -> Result<Cid> {
        tokio::task::yield_now().await;
        if self.fail_uploads.load(Ordering::SeqCst) {
            return Err(BlobStoreError::Status {
                status: 503,
                message: "gateway unavailable".to_string(),
            }
            .into());
        }
        let n = self.uploads.fetch_add(1, Ordering::SeqCst);
        let cid = Cid::parse(format!("bafymock{n}")).unwrap();
        self.blobs.lock().unwrap().insert(cid.clone(), bytes);
        Ok(cid)
    }

    async fn fetch(&self, cid: &Cid) -> Result<Vec<u8>> {
        tokio::task::yield_now().await;
        self.blobs
            .lock()
            .unwrap()
            .get(cid)
            .cloned()
            .ok_or_else(|| BlobStoreError::NotFound(cid.to_string()).into())
    }
}

fn setup(username: &str) -> (Arc<MockUserRepository>, Arc<MockBlobStore>, GoalService) {
    let repo = MockUserRepository::with_user(username);
    let blobs = Arc::new(MockBlobStore::default());
    let service = GoalService::new(repo.clone(), blobs.clone());
    (repo, blobs, service)
}

fn goal(title: &str, amount: f64, remaining: f64) -> Goal {
    Goal {
        goal_title: title.to_string(),
        amount,
        remaining,
    }
}

#[tokio::test]
async fn alice_creates_then_updates_car_goal() {
    let (repo, _blobs, service) = setup("alice");
    assert!(service.get_goals("alice").await.unwrap().is_empty());

    let created = service
        .create_goal("alice", GoalInput::new("Car", 10000.0, 10000.0))
        .await
        .unwrap();
    assert_eq!(created, goal("Car", 10000.0, 10000.0));
    assert_eq!(repo.goals_log("alice").len(), 1);
    assert_eq!(
        service.get_goals("alice").await.unwrap(),
        vec![goal("Car", 10000.0, 10000.0)]
    );

    service
        .update_goal("alice", GoalInput::new("Car", 10000.0, 8000.0))
        .await
        .unwrap();
    assert_eq!(repo.goals_log("alice").len(), 2);
    assert_eq!(
        service.get_goals("alice").await.unwrap(),
        vec![goal("Car", 10000.0, 8000.0)]
    );

    let err = service
        .create_goal("alice", GoalInput::new("Car", -5.0, 0.0))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert_eq!(repo.goals_log("alice").len(), 2);
}

#[tokio::test]
async fn duplicate_title_is_rejected_without_append() {
    let (repo, blobs, service) = setup("bob");
    service
        .create_goal("bob", GoalInput::new("House", 500.0, 500.0))
        .await
        .unwrap();

    let err = service
        .create_goal("bob", GoalInput::new("House", 10.0, 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Duplicate(_)));
    assert_eq!(repo.goals_log("bob").len(), 1);
    assert_eq!(blobs.uploads.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn deleting_unknown_title_appends_nothing() {
    let (repo, blobs, service) = setup("carol");
    service
        .create_goal("carol", GoalInput::new("Trip", 300.0, 300.0))
        .await
        .unwrap();

    let err = service.delete_goal("carol", "Boat").await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(repo.goals_log("carol").len(), 1);
    assert_eq!(blobs.uploads.load(Ordering::SeqCst), 1);

    let err = service
        .update_goal("carol", GoalInput::new("Boat", 1.0, 1.0))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    assert_eq!(repo.goals_log("carol").len(), 1);
}

#[tokio::test]
async fn sequential_writes_grow_log_and_keep_history() {
    let (repo, _blobs, service) = setup("dave");
    service
        .create_goal("dave", GoalInput::new("A", 10.0, 10.0))
        .await
        .unwrap();
    service
        .create_goal("dave", GoalInput::new("B", 20.0, 20.0))
        .await
        .unwrap();
    service
        .update_goal("dave", GoalInput::new("A", 10.0, 2.0))
        .await
        .unwrap();
    let removed = service.delete_goal("dave", "B").await.unwrap();
    assert_eq!(removed, goal("B", 20.0, 20.0));

    let log = repo.goals_log("dave");
    assert_eq!(log.len(), 4);
    assert_eq!(
        service.get_goals("dave").await.unwrap(),
        vec![goal("A", 10.0, 2.0)]
    );

    let history = service.get_goal_history("dave").unwrap();
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].version, 1);
    assert_eq!(history[3].cid, log[3]);

    // Earlier snapshots stay readable and unchanged.
    assert_eq!(
        service.get_goals_at_version("dave", 1).await.unwrap(),
        vec![goal("A", 10.0, 10.0)]
    );
    assert_eq!(
        service.get_goals_at_version("dave", 2).await.unwrap(),
        vec![goal("A", 10.0, 10.0), goal("B", 20.0, 20.0)]
    );
    assert!(matches!(
        service.get_goals_at_version("dave", 0).await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        service.get_goals_at_version("dave", 5).await,
        Err(Error::NotFound(_))
    ));
}

#[tokio::test]
async fn unknown_user_is_not_found() {
    let (_repo, blobs, service) = setup("erin");
    assert!(matches!(
        service.get_goals("mallory").await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        service
            .create_goal("mallory", GoalInput::new("Car", 1.0, 1.0))
            .await,
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        service.get_goals("").await,
        Err(Error::MissingParameter(_))
    ));
    assert_eq!(blobs.uploads.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn failed_upload_leaves_log_unchanged() {
    let (repo, blobs, service) = setup("frank");
    service
        .create_goal("frank", GoalInput::new("Car", 100.0, 100.0))
        .await
        .unwrap();

    blobs.fail_uploads.store(true, Ordering::SeqCst);
    let err = service
        .create_goal("frank", GoalInput::new("Bike", 50.0, 50.0))
        .await
        .unwrap_err();
    assert!(err.is_upstream());
    assert_eq!(repo.goals_log("frank").len(), 1);
    assert_eq!(repo.saves.load(Ordering::SeqCst), 1);

    blobs.fail_uploads.store(false, Ordering::SeqCst);
    assert_eq!(
        service.get_goals("frank").await.unwrap(),
        vec![goal("Car", 100.0, 100.0)]
    );
}

#[tokio::test]
async fn corrupt_snapshot_surfaces_as_upstream_failure() {
    let (repo, blobs, service) = setup("gina");
    let cid = Cid::parse("bafycorrupt").unwrap();
    blobs
        .blobs
        .lock()
        .unwrap()
        .insert(cid.clone(), b"{not json".to_vec());
    {
        let mut users = repo.users.lock().unwrap();
        users.get_mut("gina").unwrap().goals_cid.push(cid);
    }
    let err = service.get_goals("gina").await.unwrap_err();
    assert!(matches!(err, Error::CorruptSnapshot { .. }));
    assert!(err.is_upstream());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_writers_for_one_user_do_not_lose_updates() {
    let (repo, _blobs, service) = setup("hank");
    let service = Arc::new(service);

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let service = service.clone();
            tokio::spawn(async move {
                service
                    .create_goal("hank", GoalInput::new(&format!("Goal {i}"), 10.0, 5.0))
                    .await
            })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    assert_eq!(repo.goals_log("hank").len(), 8);
    let goals = service.get_goals("hank").await.unwrap();
    assert_eq!(goals.len(), 8);
    for i in 0..8 {
        assert!(goals.iter().any(|g| g.goal_title == format!("Goal {i}")));
    }
}
