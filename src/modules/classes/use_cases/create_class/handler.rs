use std::sync::Arc;

use crate::modules::classes::core::class::Class;
use crate::modules::classes::core::ports::ClassRepository;
use crate::modules::classes::use_cases::create_class::command::CreateClass;
use crate::modules::classes::use_cases::create_class::decide::decide_create;
use crate::shared::application::errors::ApplicationError;
use crate::shared::infrastructure::store::StoreError;

pub struct CreateClassHandler {
    classes: Arc<dyn ClassRepository>,
}

impl CreateClassHandler {
    pub fn new(classes: Arc<dyn ClassRepository>) -> Self {
        Self { classes }
    }

    pub async fn handle(&self, command: CreateClass) -> Result<Class, ApplicationError> {
        let new_class =
            decide_create(command).map_err(|reason| ApplicationError::Validation(reason.to_string()))?;
        match self.classes.create_class(new_class).await {
            Ok(class) => {
                tracing::info!(class_id = class.id, user_id = class.user_id, "class created");
                Ok(class)
            }
            Err(StoreError::Orphan(_)) => Err(ApplicationError::NotFound("user not found".to_string())),
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod create_class_handler_tests {
    use super::*;
    use crate::modules::users::core::ports::UserRepository;
    use crate::shared::infrastructure::store::in_memory::InMemoryStore;
    use crate::tests::fixtures::{fixed_now, new_user};
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn it_should_create_a_class_for_an_existing_user() {
        let store = Arc::new(InMemoryStore::new());
        let owner = store.create_user(new_user("ada")).await.unwrap();
        let handler = CreateClassHandler::new(store.clone());
        let class = handler
            .handle(CreateClass {
                user_id: owner.id,
                name: " Physics ".into(),
                created_at: fixed_now(),
            })
            .await
            .expect("create failed");
        assert_eq!(class.name, "Physics");
        assert_eq!(store.list_classes(owner.id).await.unwrap(), vec![class]);
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_answer_not_found_for_an_unknown_owner() {
        let handler = CreateClassHandler::new(Arc::new(InMemoryStore::new()));
        let result = handler
            .handle(CreateClass {
                user_id: 42,
                name: "Physics".into(),
                created_at: fixed_now(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::NotFound(_))));
    }

    #[rstest]
    #[tokio::test]
    async fn it_should_fail_when_the_store_is_offline() {
        let mut store = InMemoryStore::new();
        store.toggle_offline();
        let handler = CreateClassHandler::new(Arc::new(store));
        let result = handler
            .handle(CreateClass {
                user_id: 1,
                name: "Physics".into(),
                created_at: fixed_now(),
            })
            .await;
        assert!(matches!(result, Err(ApplicationError::Store(StoreError::Offline))));
    }
}
