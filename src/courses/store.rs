//! Course persistence.
//!
//! Every function is generic over SeaORM's [`ConnectionTrait`], so the same
//! code runs against the pooled connection held in `AppContext` or against an
//! open transaction in tests.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

use super::entity::{self, Column, Entity};
use crate::error::Result;

/// A stored course, serialized as `{"id": .., "name": ..}`
pub type Course = entity::Model;

/// Exact-match filters for listing courses; `None` fields are ignored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseFilter {
    /// Wider than the column type so any whole-number query value can be
    /// compared; values beyond `i32` just match nothing
    pub id: Option<i64>,
    pub name: Option<String>,
}

impl CourseFilter {
    pub fn by_id(id: impl Into<i64>) -> Self {
        Self {
            id: Some(id.into()),
            name: None,
        }
    }

    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: Some(name.into()),
        }
    }
}

/// Insert a course and return it with its assigned id
pub async fn create<C>(db: &C, name: impl Into<String>) -> Result<Course>
where
    C: ConnectionTrait,
{
    let course = entity::ActiveModel {
        name: Set(name.into()),
        ..Default::default()
    }
    .insert(db)
    .await?;

    tracing::debug!(course_id = course.id, name = %course.name, "Course created");
    Ok(course)
}

/// Insert several courses in one transaction, preserving the given order
pub async fn create_many<C>(db: &C, names: Vec<String>) -> Result<Vec<Course>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;
    let mut created = Vec::with_capacity(names.len());

    for name in names {
        let course = entity::ActiveModel {
            name: Set(name),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        created.push(course);
    }

    txn.commit().await?;
    tracing::debug!(count = created.len(), "Courses created");
    Ok(created)
}

pub async fn count<C>(db: &C) -> Result<u64>
where
    C: ConnectionTrait,
{
    Ok(Entity::find().count(db).await?)
}

pub async fn find<C>(db: &C, id: i32) -> Result<Option<Course>>
where
    C: ConnectionTrait,
{
    Ok(Entity::find_by_id(id).one(db).await?)
}

/// Courses matching `filter`, in creation order
pub async fn list<C>(db: &C, filter: &CourseFilter) -> Result<Vec<Course>>
where
    C: ConnectionTrait,
{
    let mut query = Entity::find();

    if let Some(id) = filter.id {
        query = query.filter(Column::Id.eq(id));
    }
    if let Some(name) = &filter.name {
        query = query.filter(Column::Name.eq(name.as_str()));
    }

    Ok(query.order_by_asc(Column::Id).all(db).await?)
}

/// Rename a course; `None` when no course has `id`
pub async fn update_name<C>(db: &C, id: i32, name: impl Into<String>) -> Result<Option<Course>>
where
    C: ConnectionTrait + TransactionTrait,
{
    let txn = db.begin().await?;

    let Some(existing) = Entity::find_by_id(id).one(&txn).await? else {
        txn.rollback().await?;
        return Ok(None);
    };

    let mut active: entity::ActiveModel = existing.into();
    active.name = Set(name.into());
    let course = active.update(&txn).await?;

    txn.commit().await?;
    tracing::debug!(course_id = course.id, name = %course.name, "Course renamed");
    Ok(Some(course))
}

/// Delete a course; `false` when no course has `id`
pub async fn delete<C>(db: &C, id: i32) -> Result<bool>
where
    C: ConnectionTrait,
{
    let result = Entity::delete_by_id(id).exec(db).await?;
    Ok(result.rows_affected > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;
    use crate::testing::TestDb;

    #[tokio::test]
    async fn test_create_assigns_increasing_ids() {
        let db = TestDb::new().await.unwrap();

        let first = create(&db.connection, "Rust").await.unwrap();
        let second = create(&db.connection, "Go").await.unwrap();

        assert!(second.id > first.id);
        assert_eq!(count(&db.connection).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let db = TestDb::new().await.unwrap();
        assert!(find(&db.connection, 42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_many_preserves_order() {
        let db = TestDb::new().await.unwrap();
        let names = vec!["a".to_string(), "b".to_string(), "c".to_string()];

        let created = create_many(&db.connection, names.clone()).await.unwrap();
        let listed = list(&db.connection, &CourseFilter::default()).await.unwrap();

        assert_eq!(created, listed);
        let listed_names: Vec<String> = listed.into_iter().map(|c| c.name).collect();
        assert_eq!(listed_names, names);
    }

    #[tokio::test]
    async fn test_list_filters_combine() {
        let db = TestDb::new().await.unwrap();
        let a = create(&db.connection, "Shared").await.unwrap();
        let b = create(&db.connection, "Shared").await.unwrap();
        create(&db.connection, "Other").await.unwrap();

        let by_name = list(&db.connection, &CourseFilter::by_name("Shared"))
            .await
            .unwrap();
        assert_eq!(by_name, vec![a.clone(), b.clone()]);

        let both = CourseFilter {
            id: Some(b.id.into()),
            name: Some("Shared".to_string()),
        };
        assert_eq!(list(&db.connection, &both).await.unwrap(), vec![b.clone()]);

        let mismatch = CourseFilter {
            id: Some(a.id.into()),
            name: Some("Other".to_string()),
        };
        assert!(list(&db.connection, &mismatch).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_id_filter_beyond_i32_is_empty() {
        let db = TestDb::new().await.unwrap();
        create(&db.connection, "Rust").await.unwrap();

        let found = list(&db.connection, &CourseFilter::by_id(99_999_999_999_i64))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_name_filter_is_case_sensitive() {
        let db = TestDb::new().await.unwrap();
        create(&db.connection, "Rust").await.unwrap();

        let found = list(&db.connection, &CourseFilter::by_name("rust"))
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_update_name_keeps_id() {
        let db = TestDb::new().await.unwrap();
        let course = create(&db.connection, "Pytest course").await.unwrap();

        let updated = update_name(&db.connection, course.id, "Java course")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, course.id);
        assert_eq!(updated.name, "Java course");
        assert_eq!(
            find(&db.connection, course.id).await.unwrap().unwrap().name,
            "Java course"
        );
    }

    #[tokio::test]
    async fn test_update_missing_returns_none() {
        let db = TestDb::new().await.unwrap();
        assert!(update_name(&db.connection, 7, "x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete() {
        let db = TestDb::new().await.unwrap();
        let course = create(&db.connection, "Doomed").await.unwrap();

        assert!(delete(&db.connection, course.id).await.unwrap());
        assert!(!delete(&db.connection, course.id).await.unwrap());
        assert_eq!(count(&db.connection).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let db = TestDb::new().await.unwrap();
        let first = create(&db.connection, "one").await.unwrap();
        delete(&db.connection, first.id).await.unwrap();

        let second = create(&db.connection, "two").await.unwrap();
        assert!(second.id > first.id);
    }

    #[tokio::test]
    async fn test_rolled_back_writes_are_discarded() {
        let db = TestDb::new().await.unwrap();

        db.with_transaction_rollback(|txn| {
            Box::pin(async move {
                create(txn, "Scratch").await?;
                assert_eq!(count(txn).await?, 1);
                Ok::<(), ApiError>(())
            })
        })
        .await
        .unwrap();

        assert_eq!(count(&db.connection).await.unwrap(), 0);
    }
}
