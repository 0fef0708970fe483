//! Request dispatch for catalog commands and queries
//!
//! Every handler is registered against a shared PostgreSQL repository.

use std::sync::Arc;

pub use mediator::DefaultAsyncMediator;
use sqlx::PgPool;

use crate::features::processors::{commands, queries};
use crate::repository::PgProcessorRepository;

pub mod middleware;

pub type AppMediator = DefaultAsyncMediator;

pub fn build_mediator(pool: PgPool) -> AppMediator {
    let repo = Arc::new(PgProcessorRepository::new(pool));

    DefaultAsyncMediator::builder()
        // Commands
        .add_handler({
            let repo = repo.clone();
            move |cmd| {
                let repo = repo.clone();
                async move { commands::create::handle(repo.as_ref(), cmd).await }
            }
        })
        .add_handler({
            let repo = repo.clone();
            move |cmd| {
                let repo = repo.clone();
                async move { commands::update_parameters::handle(repo.as_ref(), cmd).await }
            }
        })
        .add_handler({
            let repo = repo.clone();
            move |cmd| {
                let repo = repo.clone();
                async move { commands::delete::handle(repo.as_ref(), cmd).await }
            }
        })
        // Queries
        .add_handler({
            let repo = repo.clone();
            move |query| {
                let repo = repo.clone();
                async move { queries::get::handle(repo.as_ref(), query).await }
            }
        })
        .add_handler({
            let repo = repo.clone();
            move |query| {
                let repo = repo.clone();
                async move { queries::list::handle(repo.as_ref(), query).await }
            }
        })
        .build()
}
