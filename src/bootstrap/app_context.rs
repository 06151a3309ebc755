use std::sync::Arc;

use crate::application::ports::collaborator_repository::CollaboratorRepository;
use crate::application::ports::collection_repository::CollectionRepository;
use crate::application::ports::revision_repository::RevisionRepository;
use crate::application::ports::share_link_repository::ShareLinkRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::application::ports::writing_repository::WritingRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    writing_repo: Arc<dyn WritingRepository>,
    revision_repo: Arc<dyn RevisionRepository>,
    collaborator_repo: Arc<dyn CollaboratorRepository>,
    share_link_repo: Arc<dyn ShareLinkRepository>,
    collection_repo: Arc<dyn CollectionRepository>,
    user_repo: Arc<dyn UserRepository>,
}

impl AppServices {
    pub fn new(
        writing_repo: Arc<dyn WritingRepository>,
        revision_repo: Arc<dyn RevisionRepository>,
        collaborator_repo: Arc<dyn CollaboratorRepository>,
        share_link_repo: Arc<dyn ShareLinkRepository>,
        collection_repo: Arc<dyn CollectionRepository>,
        user_repo: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            writing_repo,
            revision_repo,
            collaborator_repo,
            share_link_repo,
            collection_repo,
            user_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn writing_repo(&self) -> Arc<dyn WritingRepository> {
        self.services.writing_repo.clone()
    }

    pub fn revision_repo(&self) -> Arc<dyn RevisionRepository> {
        self.services.revision_repo.clone()
    }

    pub fn collaborator_repo(&self) -> Arc<dyn CollaboratorRepository> {
        self.services.collaborator_repo.clone()
    }

    pub fn share_link_repo(&self) -> Arc<dyn ShareLinkRepository> {
        self.services.share_link_repo.clone()
    }

    pub fn collection_repo(&self) -> Arc<dyn CollectionRepository> {
        self.services.collection_repo.clone()
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }
}
