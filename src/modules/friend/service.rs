use std::sync::Arc;

use log::info;
use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{FriendRequestResponse, FriendResponse, UpdateFriendRequestModel},
            repository::FriendRequestRepository,
            schema::{FriendRequestEntity, FriendRequestStatus},
        },
        user::{model::UserResponse, repository::UserRepository},
    },
    utils::Pagination,
};

#[derive(Clone)]
pub struct FriendService {
    friend_repo: Arc<dyn FriendRequestRepository + Send + Sync>,
    user_repo: Arc<dyn UserRepository + Send + Sync>,
}

impl FriendService {
    pub fn with_dependencies(
        friend_repo: Arc<dyn FriendRequestRepository + Send + Sync>,
        user_repo: Arc<dyn UserRepository + Send + Sync>,
    ) -> Self {
        info!("FriendService initialized with dependencies");
        FriendService { friend_repo, user_repo }
    }

    pub async fn send_friend_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        if receiver_id == sender_id {
            return Err(error::SystemError::bad_request("Cannot send friend request to yourself"));
        }

        let (receiver, existing) = tokio::try_join!(
            self.user_repo.find_by_id(&receiver_id),
            self.friend_repo.find_active_between(&sender_id, &receiver_id),
        )?;

        if receiver.is_none() {
            return Err(error::SystemError::not_found("Receiver user not found"));
        }

        match existing.map(|request| request.status) {
            Some(FriendRequestStatus::Accepted) => {
                return Err(error::SystemError::conflict("Users are already friends"));
            }
            Some(_) => {
                return Err(error::SystemError::conflict("Friend request already exists"));
            }
            None => {}
        }

        let request = self.friend_repo.create(&sender_id, &receiver_id).await?;
        info!("Friend request {} sent from {} to {}", request.id, sender_id, receiver_id);
        Ok(request)
    }

    pub async fn get_friend_requests(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<FriendRequestResponse>, error::SystemError> {
        self.friend_repo.find_incoming(&user_id, &page).await
    }

    /// Settles a pending request addressed to `receiver_id`. Accepted and
    /// rejected are terminal, so a repeated call reports `false`.
    pub async fn update_friend_request(
        &self,
        receiver_id: Uuid,
        update: UpdateFriendRequestModel,
    ) -> Result<bool, error::SystemError> {
        if update.status == FriendRequestStatus::Pending {
            return Err(error::SystemError::bad_request("Status must be accepted or rejected"));
        }

        let updated = self
            .friend_repo
            .update_status(&receiver_id, &update.request_from, update.status)
            .await?;

        if updated {
            info!(
                "Friend request from {} to {} marked {:?}",
                update.request_from, receiver_id, update.status
            );
        }
        Ok(updated)
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<FriendResponse>, error::SystemError> {
        self.friend_repo.find_friends(&user_id, &page).await
    }

    pub async fn get_candidates(
        &self,
        user_id: Uuid,
        page: Pagination,
    ) -> Result<Vec<UserResponse>, error::SystemError> {
        self.friend_repo.find_candidates(&user_id, &page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::{user_entity, MockFriendRequestRepository, MockUserRepository};

    fn service(
        friends: Arc<MockFriendRequestRepository>,
        users: Arc<MockUserRepository>,
    ) -> FriendService {
        FriendService::with_dependencies(friends, users)
    }

    #[actix_web::test]
    async fn test_send_to_self_is_rejected() {
        let friends = Arc::new(MockFriendRequestRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let me = users.insert(user_entity("me@example.com", "uid-me"));

        let err = service(friends.clone(), users).send_friend_request(me, me).await.unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
        assert!(friends.requests.lock().unwrap().is_empty());
    }

    #[actix_web::test]
    async fn test_send_to_unknown_user_is_not_found() {
        let friends = Arc::new(MockFriendRequestRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let me = users.insert(user_entity("me@example.com", "uid-me"));

        let err = service(friends, users)
            .send_friend_request(me, Uuid::now_v7())
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::NotFound(_)));
    }

    #[actix_web::test]
    async fn test_duplicate_pending_request_conflicts_in_either_direction() {
        let friends = Arc::new(MockFriendRequestRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let alice = users.insert(user_entity("alice@example.com", "uid-alice"));
        let bob = users.insert(user_entity("bob@example.com", "uid-bob"));
        let service = service(friends.clone(), users);

        let request = service.send_friend_request(alice, bob).await.unwrap();
        assert_eq!(request.status, FriendRequestStatus::Pending);
        assert_eq!(request.request_to, bob);

        let again = service.send_friend_request(alice, bob).await.unwrap_err();
        assert!(matches!(again, error::SystemError::Conflict(_)));
        let reverse = service.send_friend_request(bob, alice).await.unwrap_err();
        assert!(matches!(reverse, error::SystemError::Conflict(_)));
        assert_eq!(friends.requests.lock().unwrap().len(), 1);
    }

    #[actix_web::test]
    async fn test_pending_is_not_a_valid_target_status() {
        let friends = Arc::new(MockFriendRequestRepository::default());
        let users = Arc::new(MockUserRepository::default());

        let err = service(friends, users)
            .update_friend_request(
                Uuid::now_v7(),
                UpdateFriendRequestModel {
                    request_from: Uuid::now_v7(),
                    status: FriendRequestStatus::Pending,
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, error::SystemError::BadRequest(_)));
    }

    #[actix_web::test]
    async fn test_accepting_twice_is_a_no_op() {
        let friends = Arc::new(MockFriendRequestRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let alice = users.insert(user_entity("alice@example.com", "uid-alice"));
        let bob = users.insert(user_entity("bob@example.com", "uid-bob"));
        let service = service(friends.clone(), users);
        service.send_friend_request(alice, bob).await.unwrap();

        let accept =
            || UpdateFriendRequestModel { request_from: alice, status: FriendRequestStatus::Accepted };
        assert!(service.update_friend_request(bob, accept()).await.unwrap());
        assert!(!service.update_friend_request(bob, accept()).await.unwrap());

        let rejected_later = service
            .update_friend_request(
                bob,
                UpdateFriendRequestModel {
                    request_from: alice,
                    status: FriendRequestStatus::Rejected,
                },
            )
            .await
            .unwrap();
        assert!(!rejected_later);
        assert_eq!(friends.requests.lock().unwrap()[0].status, FriendRequestStatus::Accepted);
    }

    #[actix_web::test]
    async fn test_only_the_receiver_can_settle_a_request() {
        let friends = Arc::new(MockFriendRequestRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let alice = users.insert(user_entity("alice@example.com", "uid-alice"));
        let bob = users.insert(user_entity("bob@example.com", "uid-bob"));
        let service = service(friends.clone(), users);
        service.send_friend_request(alice, bob).await.unwrap();

        let updated = service
            .update_friend_request(
                alice,
                UpdateFriendRequestModel { request_from: bob, status: FriendRequestStatus::Accepted },
            )
            .await
            .unwrap();
        assert!(!updated);
        assert_eq!(friends.requests.lock().unwrap()[0].status, FriendRequestStatus::Pending);
    }

    #[actix_web::test]
    async fn test_accepted_request_lists_sender_as_friend() {
        let friends = Arc::new(MockFriendRequestRepository::default());
        let users = Arc::new(MockUserRepository::default());
        let alice = users.insert(user_entity("alice@example.com", "uid-alice"));
        let bob = users.insert(user_entity("bob@example.com", "uid-bob"));
        let service = service(friends.clone(), users);
        service.send_friend_request(alice, bob).await.unwrap();

        let incoming = service.get_friend_requests(bob, Pagination::default()).await.unwrap();
        assert_eq!(incoming.len(), 1);
        assert_eq!(incoming[0].user_id, alice);
        assert_eq!(service.get_candidates(bob, Pagination::default()).await.unwrap().len(), 1);

        service
            .update_friend_request(
                bob,
                UpdateFriendRequestModel { request_from: alice, status: FriendRequestStatus::Accepted },
            )
            .await
            .unwrap();

        let listed = service.get_friends(bob, Pagination::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, alice);
        assert!(service.get_friend_requests(bob, Pagination::default()).await.unwrap().is_empty());

        let again = service.send_friend_request(bob, alice).await.unwrap_err();
        assert!(matches!(again, error::SystemError::Conflict(_)));
    }
}
