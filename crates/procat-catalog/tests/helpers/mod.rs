//! Test helpers for catalog integration tests
//!
//! - Fixture builders for processors and their children
//! - Seeding of collaborator rows (subjects, code projects) in PostgreSQL

#![allow(dead_code)]

pub mod fixtures;

use procat_common::Subject;
use sqlx::PgPool;
use uuid::Uuid;

pub use fixtures::*;

/// Insert a subject row so processors can reference it as author
pub async fn seed_subject(pool: &PgPool, subject: &Subject) -> sqlx::Result<()> {
    sqlx::query("INSERT INTO subjects (id, slug, name, kind) VALUES ($1, $2, $3, $4)")
        .bind(subject.id)
        .bind(&subject.slug)
        .bind(&subject.name)
        .bind(subject.kind.as_str())
        .execute(pool)
        .await?;

    Ok(())
}

/// Insert a code project row and return its id
pub async fn seed_code_project(pool: &PgPool, slug: &str) -> sqlx::Result<Uuid> {
    let id = Uuid::new_v4();

    sqlx::query("INSERT INTO code_projects (id, slug, name) VALUES ($1, $2, $3)")
        .bind(id)
        .bind(slug)
        .bind(slug)
        .execute(pool)
        .await?;

    Ok(id)
}

pub async fn count_rows(pool: &PgPool, table: &str, processor_id: Uuid) -> sqlx::Result<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table} WHERE data_processor_id = $1");
    sqlx::query_scalar(&sql).bind(processor_id).fetch_one(pool).await
}
