//! End-to-end exercises of the use-case layer over in-memory repositories.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use uuid::Uuid;

use api::application::error::ServiceError;
use api::application::ports::collaborator_repository::{
    CollaboratorRepository, CollaboratorWithUser,
};
use api::application::ports::collection_repository::CollectionRepository;
use api::application::ports::revision_repository::RevisionRepository;
use api::application::ports::share_link_repository::ShareLinkRepository;
use api::application::ports::user_repository::{UserRepository, UserRow};
use api::application::ports::writing_repository::{SharedWriting, WritingRepository};
use api::application::use_cases::auth::login::{Login, LoginRequest};
use api::application::use_cases::auth::register::{Register, RegisterRequest};
use api::application::use_cases::collaboration::add_collaborator::AddCollaborator;
use api::application::use_cases::collaboration::create_link::CreateLink;
use api::application::use_cases::collaboration::deactivate_link::DeactivateLink;
use api::application::use_cases::collaboration::inspect_link::InspectLink;
use api::application::use_cases::collaboration::redeem_link::RedeemLink;
use api::application::use_cases::collaboration::remove_collaborator::RemoveCollaborator;
use api::application::use_cases::collections::create_collection::CreateCollection;
use api::application::use_cases::collections::get_dashboard::GetDashboard;
use api::application::use_cases::writings::create_writing::CreateWriting;
use api::application::use_cases::writings::get_writing::GetWriting;
use api::application::use_cases::writings::list_revisions::ListRevisions;
use api::application::use_cases::writings::list_shared::ListSharedWritings;
use api::application::use_cases::writings::list_writings::ListWritings;
use api::application::use_cases::writings::restore_revision::RestoreRevision;
use api::application::use_cases::writings::update_content::UpdateContent;
use api::domain::users::activity::ActivityState;
use api::domain::writings::collab::{Collaborator, Role, ShareLink};
use api::domain::writings::writing::{Collection, Revision, Writing, REVISION_RETENTION};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, UserRow>,
    activity: HashMap<Uuid, ActivityState>,
    writings: HashMap<Uuid, Writing>,
    revisions: Vec<Revision>,
    collaborators: Vec<Collaborator>,
    links: Vec<ShareLink>,
    collections: HashMap<Uuid, Collection>,
}

/// Single-mutex store implementing every port, so use cases run unchanged
/// against it. Holding the lock across a whole update gives the same
/// serialization the database transaction provides.
#[derive(Default)]
struct InMem {
    state: Mutex<State>,
}

impl InMem {
    fn add_user(&self, name: &str, email: &str) -> Uuid {
        let id = Uuid::new_v4();
        let mut st = self.state.lock().unwrap();
        st.users.insert(
            id,
            UserRow {
                id,
                email: email.to_string(),
                name: name.to_string(),
                password_hash: None,
            },
        );
        st.activity.insert(
            id,
            ActivityState {
                last_active: None,
                total_minutes: 0,
            },
        );
        id
    }
}

#[async_trait]
impl WritingRepository for InMem {
    async fn create_for_user(
        &self,
        owner_id: Uuid,
        title: &str,
        content: &str,
        collection_id: Option<Uuid>,
    ) -> anyhow::Result<Writing> {
        let now = Utc::now();
        let writing = Writing {
            id: Uuid::new_v4(),
            owner_id,
            collection_id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: now,
            updated_at: now,
        };
        self.state
            .lock()
            .unwrap()
            .writings
            .insert(writing.id, writing.clone());
        Ok(writing)
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Writing>> {
        Ok(self.state.lock().unwrap().writings.get(&id).cloned())
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        query: Option<String>,
        collection_id: Option<Uuid>,
    ) -> anyhow::Result<Vec<Writing>> {
        let st = self.state.lock().unwrap();
        let needle = query.map(|q| q.to_lowercase());
        let mut out: Vec<Writing> = st
            .writings
            .values()
            .filter(|w| w.owner_id == user_id)
            .filter(|w| collection_id.map(|c| w.collection_id == Some(c)).unwrap_or(true))
            .filter(|w| {
                needle
                    .as_deref()
                    .map(|n| {
                        let in_collection = w
                            .collection_id
                            .and_then(|cid| st.collections.get(&cid))
                            .map(|c| c.name.to_lowercase().contains(n))
                            .unwrap_or(false);
                        w.title.to_lowercase().contains(n)
                            || w.content.to_lowercase().contains(n)
                            || in_collection
                    })
                    .unwrap_or(true)
            })
            .cloned()
            .collect();
        out.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        Ok(out)
    }

    async fn list_shared_with_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SharedWriting>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<SharedWriting> = st
            .collaborators
            .iter()
            .filter(|c| c.user_id == user_id)
            .filter_map(|c| {
                let writing = st.writings.get(&c.writing_id)?.clone();
                let owner = st.users.get(&writing.owner_id);
                Some(SharedWriting {
                    writing,
                    role: c.role,
                    owner_name: owner.map(|u| u.name.clone()).unwrap_or_default(),
                    owner_email: owner.map(|u| u.email.clone()).unwrap_or_default(),
                })
            })
            .collect();
        out.sort_by(|a, b| b.writing.updated_at.cmp(&a.writing.updated_at));
        Ok(out)
    }

    async fn count_for_user(&self, owner_id: Uuid) -> anyhow::Result<i64> {
        let st = self.state.lock().unwrap();
        Ok(st.writings.values().filter(|w| w.owner_id == owner_id).count() as i64)
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        match st.writings.get(&id) {
            Some(w) if w.owner_id == owner_id => {
                st.writings.remove(&id);
                st.revisions.retain(|r| r.writing_id != id);
                st.collaborators.retain(|c| c.writing_id != id);
                st.links.retain(|l| l.writing_id != id);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn update_content_with_revision(
        &self,
        id: Uuid,
        title: &str,
        content: &str,
        collection_id: Option<Option<Uuid>>,
    ) -> anyhow::Result<(Writing, Revision)> {
        let mut st = self.state.lock().unwrap();
        let now = Utc::now();
        let writing = st
            .writings
            .get_mut(&id)
            .ok_or_else(|| anyhow::anyhow!("writing not found"))?;
        writing.title = title.to_string();
        writing.content = content.to_string();
        writing.updated_at = now;
        if let Some(target) = collection_id {
            writing.collection_id = target;
        }
        let writing = writing.clone();

        let next_seq = st
            .revisions
            .iter()
            .filter(|r| r.writing_id == id)
            .map(|r| r.sequence_number)
            .max()
            .unwrap_or(0)
            + 1;
        let revision = Revision {
            id: Uuid::new_v4(),
            writing_id: id,
            title: title.to_string(),
            content: content.to_string(),
            sequence_number: next_seq,
            created_at: now,
        };
        st.revisions.push(revision.clone());

        let cutoff = next_seq - REVISION_RETENTION;
        st.revisions
            .retain(|r| r.writing_id != id || r.sequence_number > cutoff);
        Ok((writing, revision))
    }
}

#[async_trait]
impl RevisionRepository for InMem {
    async fn list_for_writing(&self, writing_id: Uuid) -> anyhow::Result<Vec<Revision>> {
        let st = self.state.lock().unwrap();
        let mut out: Vec<Revision> = st
            .revisions
            .iter()
            .filter(|r| r.writing_id == writing_id)
            .cloned()
            .collect();
        out.sort_by(|a, b| b.sequence_number.cmp(&a.sequence_number));
        Ok(out)
    }

    async fn get(&self, writing_id: Uuid, revision_id: Uuid) -> anyhow::Result<Option<Revision>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .revisions
            .iter()
            .find(|r| r.writing_id == writing_id && r.id == revision_id)
            .cloned())
    }
}

#[async_trait]
impl CollaboratorRepository for InMem {
    async fn find(
        &self,
        writing_id: Uuid,
        user_id: Uuid,
    ) -> anyhow::Result<Option<Collaborator>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .collaborators
            .iter()
            .find(|c| c.writing_id == writing_id && c.user_id == user_id)
            .cloned())
    }

    async fn add(
        &self,
        writing_id: Uuid,
        user_id: Uuid,
        role: Role,
    ) -> anyhow::Result<Collaborator> {
        let mut st = self.state.lock().unwrap();
        if st
            .collaborators
            .iter()
            .any(|c| c.writing_id == writing_id && c.user_id == user_id)
        {
            anyhow::bail!("duplicate collaborator");
        }
        let c = Collaborator {
            id: Uuid::new_v4(),
            writing_id,
            user_id,
            role,
            joined_at: Utc::now(),
            last_active: None,
        };
        st.collaborators.push(c.clone());
        Ok(c)
    }

    async fn remove(&self, writing_id: Uuid, collaborator_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let before = st.collaborators.len();
        st.collaborators
            .retain(|c| !(c.writing_id == writing_id && c.id == collaborator_id));
        Ok(st.collaborators.len() < before)
    }

    async fn count_for_writing(&self, writing_id: Uuid) -> anyhow::Result<i64> {
        let st = self.state.lock().unwrap();
        Ok(st
            .collaborators
            .iter()
            .filter(|c| c.writing_id == writing_id)
            .count() as i64)
    }

    async fn list_with_users(
        &self,
        writing_id: Uuid,
    ) -> anyhow::Result<Vec<CollaboratorWithUser>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .collaborators
            .iter()
            .filter(|c| c.writing_id == writing_id)
            .map(|c| {
                let user = st.users.get(&c.user_id);
                CollaboratorWithUser {
                    collaborator: c.clone(),
                    user_name: user.map(|u| u.name.clone()).unwrap_or_default(),
                    user_email: user.map(|u| u.email.clone()).unwrap_or_default(),
                }
            })
            .collect())
    }

    async fn touch_last_active(
        &self,
        writing_id: Uuid,
        user_id: Uuid,
        now: chrono::DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let mut st = self.state.lock().unwrap();
        if let Some(c) = st
            .collaborators
            .iter_mut()
            .find(|c| c.writing_id == writing_id && c.user_id == user_id)
        {
            c.last_active = Some(now);
        }
        Ok(())
    }
}

#[async_trait]
impl ShareLinkRepository for InMem {
    async fn create(
        &self,
        writing_id: Uuid,
        created_by: Uuid,
        token: &str,
        expires_at: Option<chrono::DateTime<Utc>>,
        max_users: i32,
    ) -> anyhow::Result<ShareLink> {
        let link = ShareLink {
            id: Uuid::new_v4(),
            writing_id,
            token: token.to_string(),
            created_by,
            expires_at,
            max_users,
            is_active: true,
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().links.push(link.clone());
        Ok(link)
    }

    async fn find_by_token(&self, token: &str) -> anyhow::Result<Option<ShareLink>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .links
            .iter()
            .find(|l| l.token == token && l.is_active)
            .cloned())
    }

    async fn list_active_for_writing(&self, writing_id: Uuid) -> anyhow::Result<Vec<ShareLink>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .links
            .iter()
            .filter(|l| l.writing_id == writing_id && l.is_active)
            .cloned()
            .collect())
    }

    async fn deactivate(&self, writing_id: Uuid, link_id: Uuid) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        match st
            .links
            .iter_mut()
            .find(|l| l.writing_id == writing_id && l.id == link_id)
        {
            Some(l) => {
                l.is_active = false;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[async_trait]
impl UserRepository for InMem {
    async fn create_user(
        &self,
        email: &str,
        name: &str,
        password_hash: &str,
    ) -> anyhow::Result<UserRow> {
        let row = UserRow {
            id: Uuid::new_v4(),
            email: email.to_string(),
            name: name.to_string(),
            password_hash: Some(password_hash.to_string()),
        };
        self.state.lock().unwrap().users.insert(row.id, row.clone());
        Ok(row)
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        Ok(self.state.lock().unwrap().users.get(&id).cloned())
    }

    async fn get_activity(&self, id: Uuid) -> anyhow::Result<Option<ActivityState>> {
        Ok(self.state.lock().unwrap().activity.get(&id).copied())
    }

    async fn set_activity(&self, id: Uuid, state: ActivityState) -> anyhow::Result<()> {
        self.state.lock().unwrap().activity.insert(id, state);
        Ok(())
    }
}

#[async_trait]
impl CollectionRepository for InMem {
    async fn create_for_user(&self, owner_id: Uuid, name: &str) -> anyhow::Result<Collection> {
        let c = Collection {
            id: Uuid::new_v4(),
            owner_id,
            name: name.to_string(),
            created_at: Utc::now(),
        };
        self.state.lock().unwrap().collections.insert(c.id, c.clone());
        Ok(c)
    }

    async fn list_for_user(&self, owner_id: Uuid) -> anyhow::Result<Vec<Collection>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .collections
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect())
    }

    async fn list_with_counts(&self, owner_id: Uuid) -> anyhow::Result<Vec<(Collection, i64)>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .collections
            .values()
            .filter(|c| c.owner_id == owner_id)
            .map(|c| {
                let n = st
                    .writings
                    .values()
                    .filter(|w| w.collection_id == Some(c.id))
                    .count() as i64;
                (c.clone(), n)
            })
            .collect())
    }

    async fn get_owned(&self, id: Uuid, owner_id: Uuid) -> anyhow::Result<Option<Collection>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .collections
            .get(&id)
            .filter(|c| c.owner_id == owner_id)
            .cloned())
    }
}

async fn new_writing(store: &InMem, owner: Uuid, title: &str) -> Writing {
    let uc = CreateWriting {
        writings: store,
        collections: store,
    };
    uc.execute(owner, title, "first draft", None).await.unwrap()
}

async fn update(store: &InMem, id: Uuid, caller: Uuid, content: &str) -> (Writing, Revision) {
    let uc = UpdateContent {
        writings: store,
        collaborators: store,
        collections: store,
    };
    uc.execute(id, caller, "Chapter 1", content, None)
        .await
        .unwrap()
}

#[tokio::test]
async fn four_updates_keep_the_last_three_revisions() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;

    for content in ["c1", "c2", "c3", "c4"] {
        update(&store, writing.id, owner, content).await;
    }

    let uc = ListRevisions {
        writings: &store,
        collaborators: &store,
        revisions: &store,
    };
    let revisions = uc.execute(owner, writing.id).await.unwrap();
    let seqs: Vec<i64> = revisions.iter().map(|r| r.sequence_number).collect();
    assert_eq!(seqs, vec![4, 3, 2]);
    assert_eq!(revisions[0].content, "c4");
    assert_eq!(revisions[2].content, "c2");
}

#[tokio::test]
async fn concurrent_updates_get_distinct_sequence_numbers() {
    let store = Arc::new(InMem::default());
    let owner = store.add_user("Ada", "ada@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;

    let mut handles = Vec::new();
    for i in 0..8 {
        let store = store.clone();
        let id = writing.id;
        handles.push(tokio::spawn(async move {
            let (_, revision) = update(&store, id, owner, &format!("draft {i}")).await;
            revision.sequence_number
        }));
    }
    let mut seqs = Vec::new();
    for h in handles {
        seqs.push(h.await.unwrap());
    }
    seqs.sort_unstable();
    seqs.dedup();
    assert_eq!(seqs.len(), 8, "sequence numbers must never collide");
}

#[tokio::test]
async fn strangers_and_missing_writings_are_indistinguishable() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let stranger = store.add_user("Mallory", "mallory@example.com");
    let writing = new_writing(&store, owner, "Secret draft").await;

    let uc = GetWriting {
        writings: &store,
        collaborators: &store,
    };
    let for_stranger = uc.execute(stranger, writing.id).await.unwrap_err();
    let for_missing = uc.execute(owner, Uuid::new_v4()).await.unwrap_err();
    assert_eq!(for_stranger.kind(), for_missing.kind());
    assert!(matches!(for_stranger, ServiceError::NotFound));
}

#[tokio::test]
async fn stranger_update_is_not_found_but_viewer_update_is_forbidden() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let stranger = store.add_user("Mallory", "mallory@example.com");
    let viewer = store.add_user("Vic", "vic@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;
    store.add(writing.id, viewer, Role::Viewer).await.unwrap();

    let uc = UpdateContent {
        writings: &store,
        collaborators: &store,
        collections: &store,
    };
    let err = uc
        .execute(writing.id, stranger, "Chapter 1", "x", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));

    let err = uc
        .execute(writing.id, viewer, "Chapter 1", "x", None)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));
}

#[tokio::test]
async fn editor_can_update_and_restore() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let editor = store.add_user("Ed", "ed@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;
    store.add(writing.id, editor, Role::Editor).await.unwrap();

    let (_, first) = update(&store, writing.id, editor, "v1").await;
    update(&store, writing.id, editor, "v2").await;

    let uc = RestoreRevision {
        writings: &store,
        collaborators: &store,
        revisions: &store,
    };
    let restored = uc.execute(editor, writing.id, first.id).await.unwrap();
    assert_eq!(restored.content, "v1");
    // Restoring stages content; it must not touch the stored writing
    let current = store.get_by_id(writing.id).await.unwrap().unwrap();
    assert_eq!(current.content, "v2");
}

#[tokio::test]
async fn only_the_owner_manages_collaborators() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let editor = store.add_user("Ed", "ed@example.com");
    let invitee = store.add_user("Nia", "nia@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;
    store.add(writing.id, editor, Role::Editor).await.unwrap();

    let uc = AddCollaborator {
        writings: &store,
        collaborators: &store,
        users: &store,
    };
    let err = uc
        .execute(writing.id, editor, "nia@example.com", Role::Viewer)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));

    let added = uc
        .execute(writing.id, owner, "nia@example.com", Role::Viewer)
        .await
        .unwrap();
    assert_eq!(added.user_id, invitee);
    assert_eq!(added.role, Role::Viewer);

    let err = uc
        .execute(writing.id, owner, "nia@example.com", Role::Viewer)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::AlreadyCollaborator));

    let err = uc
        .execute(writing.id, owner, "nobody@example.com", Role::Viewer)
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::UserNotFound));
}

#[tokio::test]
async fn removal_requires_the_actual_owner() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let editor = store.add_user("Ed", "ed@example.com");
    let stranger = store.add_user("Mallory", "mallory@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;
    let row = store.add(writing.id, editor, Role::Editor).await.unwrap();

    let uc = RemoveCollaborator {
        writings: &store,
        collaborators: &store,
    };
    let err = uc.execute(writing.id, editor, row.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::Forbidden));
    let err = uc.execute(writing.id, stranger, row.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));

    uc.execute(writing.id, owner, row.id).await.unwrap();
    let err = uc.execute(writing.id, owner, row.id).await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
}

#[tokio::test]
async fn link_capacity_counts_the_owner() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let second = store.add_user("Bea", "bea@example.com");
    let third = store.add_user("Cal", "cal@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;

    let create = CreateLink {
        writings: &store,
        collaborators: &store,
        links: &store,
    };
    let link = create
        .execute(writing.id, owner, "tok-cap", None, Some(2))
        .await
        .unwrap();
    assert_eq!(link.max_users, 2);

    let redeem = RedeemLink {
        links: &store,
        writings: &store,
        collaborators: &store,
    };
    let joined = redeem.execute("tok-cap", second).await.unwrap();
    assert_eq!(joined.granted_role, Role::Editor);
    assert!(!joined.already_member);

    // Owner plus one collaborator fills a max_users=2 link
    let err = redeem.execute("tok-cap", third).await.unwrap_err();
    assert!(matches!(err, ServiceError::LinkFull));
}

#[tokio::test]
async fn redeeming_twice_changes_nothing() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let member = store.add_user("Bea", "bea@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;

    let create = CreateLink {
        writings: &store,
        collaborators: &store,
        links: &store,
    };
    create
        .execute(writing.id, owner, "tok-idem", None, Some(3))
        .await
        .unwrap();

    let redeem = RedeemLink {
        links: &store,
        writings: &store,
        collaborators: &store,
    };
    redeem.execute("tok-idem", member).await.unwrap();
    let again = redeem.execute("tok-idem", member).await.unwrap();
    assert!(again.already_member);
    assert_eq!(store.count_for_writing(writing.id).await.unwrap(), 1);

    // The owner presenting their own link never gains a collaborator row
    let own = redeem.execute("tok-idem", owner).await.unwrap();
    assert!(own.already_member);
    assert_eq!(own.granted_role, Role::Owner);
    assert_eq!(store.count_for_writing(writing.id).await.unwrap(), 1);
}

#[tokio::test]
async fn expired_links_answer_gone() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let joiner = store.add_user("Bea", "bea@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;

    let create = CreateLink {
        writings: &store,
        collaborators: &store,
        links: &store,
    };
    let past = Utc::now() - Duration::hours(1);
    create
        .execute(writing.id, owner, "tok-old", Some(past), None)
        .await
        .unwrap();

    let inspect = InspectLink {
        links: &store,
        writings: &store,
        collaborators: &store,
        users: &store,
    };
    let err = inspect.execute("tok-old").await.unwrap_err();
    assert!(matches!(err, ServiceError::LinkExpired));

    let redeem = RedeemLink {
        links: &store,
        writings: &store,
        collaborators: &store,
    };
    let err = redeem.execute("tok-old", joiner).await.unwrap_err();
    assert!(matches!(err, ServiceError::LinkExpired));
}

#[tokio::test]
async fn deactivated_links_vanish_and_deactivation_is_idempotent() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;

    let create = CreateLink {
        writings: &store,
        collaborators: &store,
        links: &store,
    };
    let link = create
        .execute(writing.id, owner, "tok-gone", None, None)
        .await
        .unwrap();

    let deactivate = DeactivateLink {
        writings: &store,
        collaborators: &store,
        links: &store,
    };
    deactivate.execute(writing.id, owner, link.id).await.unwrap();
    // Second deactivation still succeeds; the row is merely inactive
    deactivate.execute(writing.id, owner, link.id).await.unwrap();

    let inspect = InspectLink {
        links: &store,
        writings: &store,
        collaborators: &store,
        users: &store,
    };
    let err = inspect.execute("tok-gone").await.unwrap_err();
    assert!(matches!(err, ServiceError::NotFound));
}

#[tokio::test]
async fn empty_titles_are_rejected() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let uc = CreateWriting {
        writings: &store,
        collections: &store,
    };
    let err = uc.execute(owner, "   ", "body", None).await.unwrap_err();
    assert!(matches!(err, ServiceError::InvalidArgument(_)));
}

#[tokio::test]
async fn redeemed_editor_finds_the_writing_under_shared() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let joiner = store.add_user("Bea", "bea@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;

    let create = CreateLink {
        writings: &store,
        collaborators: &store,
        links: &store,
    };
    create
        .execute(writing.id, owner, "tok-shared", None, None)
        .await
        .unwrap();
    let redeem = RedeemLink {
        links: &store,
        writings: &store,
        collaborators: &store,
    };
    let joined = redeem.execute("tok-shared", joiner).await.unwrap();
    assert_eq!(joined.granted_role, Role::Editor);

    // The owned listing stays owner-only
    let owned = ListWritings { writings: &store };
    assert!(owned.execute(joiner, None, None).await.unwrap().is_empty());

    // The shared listing is where the redeemed writing shows up
    let shared = ListSharedWritings { writings: &store };
    let items = shared.execute(joiner).await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].writing.id, writing.id);
    assert_eq!(items[0].role, Role::Editor);
    assert_eq!(items[0].owner_name, "Ada");

    // The owner's own writings never appear in their shared listing
    assert!(shared.execute(owner).await.unwrap().is_empty());
}

#[tokio::test]
async fn register_validates_inputs_and_rejects_taken_emails() {
    let store = InMem::default();
    let uc = Register { repo: &store };

    let bad_email = RegisterRequest {
        email: "not-an-email".into(),
        name: "Ada".into(),
        password: "long enough".into(),
    };
    assert!(matches!(
        uc.execute(&bad_email).await.unwrap_err(),
        ServiceError::InvalidArgument(_)
    ));

    let short_password = RegisterRequest {
        email: "ada@example.com".into(),
        name: "Ada".into(),
        password: "short".into(),
    };
    assert!(matches!(
        uc.execute(&short_password).await.unwrap_err(),
        ServiceError::InvalidArgument(_)
    ));

    let ok = RegisterRequest {
        email: "Ada@Example.com".into(),
        name: "Ada".into(),
        password: "long enough".into(),
    };
    let user = uc.execute(&ok).await.unwrap();
    assert_eq!(user.email, "ada@example.com");

    // Same address, different casing
    let dup = RegisterRequest {
        email: "ADA@example.com".into(),
        name: "Ada again".into(),
        password: "long enough".into(),
    };
    assert!(matches!(
        uc.execute(&dup).await.unwrap_err(),
        ServiceError::EmailTaken
    ));
}

#[tokio::test]
async fn login_rejects_wrong_passwords_without_leaking_which_part_failed() {
    let store = InMem::default();
    let register = Register { repo: &store };
    register
        .execute(&RegisterRequest {
            email: "ada@example.com".into(),
            name: "Ada".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap();

    let login = Login { repo: &store };
    let wrong_password = login
        .execute(&LoginRequest {
            email: "ada@example.com".into(),
            password: "wrong".into(),
        })
        .await
        .unwrap();
    let unknown_email = login
        .execute(&LoginRequest {
            email: "nobody@example.com".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap();
    assert!(wrong_password.is_none());
    assert!(unknown_email.is_none());

    let row = login
        .execute(&LoginRequest {
            email: "ada@example.com".into(),
            password: "correct horse".into(),
        })
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.email, "ada@example.com");
    assert!(row.password_hash.is_none());
}

#[tokio::test]
async fn link_preview_reports_owner_inclusive_membership() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let joiner = store.add_user("Bea", "bea@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;

    let create = CreateLink {
        writings: &store,
        collaborators: &store,
        links: &store,
    };
    create
        .execute(writing.id, owner, "tok-preview", None, Some(3))
        .await
        .unwrap();
    let redeem = RedeemLink {
        links: &store,
        writings: &store,
        collaborators: &store,
    };
    redeem.execute("tok-preview", joiner).await.unwrap();

    let inspect = InspectLink {
        links: &store,
        writings: &store,
        collaborators: &store,
        users: &store,
    };
    let preview = inspect.execute("tok-preview").await.unwrap();
    // One collaborator plus the owner, against a cap of 3
    assert_eq!(preview.current_members, 2);
    assert_eq!(preview.max_users, 3);
    assert!(preview.can_join);
}

#[tokio::test]
async fn dashboard_counts_collections_and_writings() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let other = store.add_user("Bea", "bea@example.com");

    let collections = CreateCollection {
        collections: &store,
    };
    let poems = collections.execute(owner, "Poems").await.unwrap();
    let essays = collections.execute(owner, "Essays").await.unwrap();

    let create = CreateWriting {
        writings: &store,
        collections: &store,
    };
    create
        .execute(owner, "Ode", "text", Some(poems.id))
        .await
        .unwrap();
    create
        .execute(owner, "Sonnet", "text", Some(poems.id))
        .await
        .unwrap();
    create.execute(owner, "Loose note", "text", None).await.unwrap();
    create.execute(other, "Not mine", "text", None).await.unwrap();

    let uc = GetDashboard {
        writings: &store,
        collections: &store,
    };
    let data = uc.execute(owner).await.unwrap();
    assert_eq!(data.writings_total, 3);
    let counts: HashMap<Uuid, i64> = data
        .collections
        .iter()
        .map(|(c, n)| (c.id, *n))
        .collect();
    assert_eq!(counts[&poems.id], 2);
    assert_eq!(counts[&essays.id], 0);
}

#[tokio::test]
async fn search_matches_the_collection_name() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let collections = CreateCollection {
        collections: &store,
    };
    let poems = collections.execute(owner, "Poems").await.unwrap();

    let create = CreateWriting {
        writings: &store,
        collections: &store,
    };
    create
        .execute(owner, "Ode", "about autumn", Some(poems.id))
        .await
        .unwrap();
    create
        .execute(owner, "Grocery list", "eggs", None)
        .await
        .unwrap();

    let uc = ListWritings { writings: &store };
    let hits = uc
        .execute(owner, Some("poem".into()), None)
        .await
        .unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Ode");
}

/// Writing repository whose revision write always fails, for exercising the
/// save path's error contract.
struct RevisionWriteFails<'a>(&'a InMem);

#[async_trait]
impl WritingRepository for RevisionWriteFails<'_> {
    async fn create_for_user(
        &self,
        owner_id: Uuid,
        title: &str,
        content: &str,
        collection_id: Option<Uuid>,
    ) -> anyhow::Result<Writing> {
        WritingRepository::create_for_user(self.0, owner_id, title, content, collection_id).await
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Writing>> {
        self.0.get_by_id(id).await
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        query: Option<String>,
        collection_id: Option<Uuid>,
    ) -> anyhow::Result<Vec<Writing>> {
        WritingRepository::list_for_user(self.0, user_id, query, collection_id).await
    }

    async fn list_shared_with_user(&self, user_id: Uuid) -> anyhow::Result<Vec<SharedWriting>> {
        self.0.list_shared_with_user(user_id).await
    }

    async fn count_for_user(&self, owner_id: Uuid) -> anyhow::Result<i64> {
        self.0.count_for_user(owner_id).await
    }

    async fn delete_owned(&self, id: Uuid, owner_id: Uuid) -> anyhow::Result<bool> {
        self.0.delete_owned(id, owner_id).await
    }

    async fn update_content_with_revision(
        &self,
        _id: Uuid,
        _title: &str,
        _content: &str,
        _collection_id: Option<Option<Uuid>>,
    ) -> anyhow::Result<(Writing, Revision)> {
        anyhow::bail!("revision insert failed")
    }
}

#[tokio::test]
async fn failed_revision_write_surfaces_as_such_and_stages_nothing() {
    let store = InMem::default();
    let owner = store.add_user("Ada", "ada@example.com");
    let writing = new_writing(&store, owner, "Chapter 1").await;
    let flaky = RevisionWriteFails(&store);

    let uc = UpdateContent {
        writings: &flaky,
        collaborators: &store,
        collections: &store,
    };
    let err = uc
        .execute(writing.id, owner, "Chapter 1", "new text", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "revision_write_failed");

    // The visible writing is untouched when the revision cannot be recorded
    let current = store.get_by_id(writing.id).await.unwrap().unwrap();
    assert_eq!(current.content, "first draft");
}
