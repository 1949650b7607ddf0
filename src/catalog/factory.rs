use std::sync::Arc;
use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::Configuration;
use crate::gateway::factory::create_publisher;

// Builds the process-wide catalog; every handler shares the returned handle.
pub fn create_catalog_service(config: &Configuration) -> Arc<dyn CatalogService> {
    let book_repo = factory::create_book_repository();
    let publisher = create_publisher();
    Arc::new(CatalogServiceImpl::new(config, book_repo, publisher))
}
