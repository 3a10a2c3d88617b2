use crate::books::factory::create_book_repository;
use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::library::domain::service::BookServiceImpl;
use crate::library::domain::BookService;

pub(crate) async fn create_book_service(config: &Configuration,
                                        store: RepositoryStore) -> Box<dyn BookService> {
    let book_repository = create_book_repository(store).await;
    Box::new(BookServiceImpl::new(config, book_repository))
}
