//! Test fixtures: random data helpers and the course factory.

use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::courses::{Course, store};
use crate::error::Result;

/// Name given to the single seeded course in most API tests
pub const SAMPLE_COURSE_NAME: &str = "Pytest course";

/// Helper functions for generating fake test data
pub mod fake {
    use super::*;

    /// Generate a random course name
    pub fn course_name() -> String {
        format!("Course {}", string(10))
    }

    /// Generate a fake UUID as a string
    pub fn uuid() -> String {
        Uuid::new_v4().to_string()
    }

    /// Generate a random integer between min and max (inclusive)
    pub fn int(min: i32, max: i32) -> i32 {
        fastrand::i32(min..=max)
    }

    /// Generate a random alphabetic string of the given length
    pub fn string(length: usize) -> String {
        (0..length).map(|_| fastrand::alphabetic()).collect()
    }
}

/// Persists courses with random or fixed names
///
/// # Example
///
/// ```rust,ignore
/// let courses = CourseFactory::new(&db.connection).create_many(3).await?;
/// let pinned = CourseFactory::new(&db.connection).with_name("Rust").create().await?;
/// ```
pub struct CourseFactory<'a> {
    db: &'a DatabaseConnection,
    name: Option<String>,
}

impl<'a> CourseFactory<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db, name: None }
    }

    /// Use a fixed name for every course this factory creates
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    fn next_name(&self) -> String {
        self.name.clone().unwrap_or_else(fake::course_name)
    }

    /// Create one course
    pub async fn create(&self) -> Result<Course> {
        store::create(self.db, self.next_name()).await
    }

    /// Create `quantity` courses in one transaction, in id order
    pub async fn create_many(&self, quantity: usize) -> Result<Vec<Course>> {
        let names = (0..quantity).map(|_| self.next_name()).collect();
        store::create_many(self.db, names).await
    }
}

/// Seed one course named [`SAMPLE_COURSE_NAME`]
pub async fn one_course(db: &DatabaseConnection) -> Result<Course> {
    CourseFactory::new(db).with_name(SAMPLE_COURSE_NAME).create().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestDb;

    #[test]
    fn test_fake_course_name() {
        let a = fake::course_name();
        let b = fake::course_name();
        assert!(a.starts_with("Course "));
        assert_ne!(a, b);
    }

    #[test]
    fn test_fake_int_in_range() {
        for _ in 0..100 {
            let n = fake::int(5, 20);
            assert!((5..=20).contains(&n));
        }
    }

    #[test]
    fn test_fake_uuid() {
        assert_eq!(fake::uuid().len(), 36);
    }

    #[tokio::test]
    async fn test_factory_create_many() {
        let db = TestDb::new().await.unwrap();

        let courses = CourseFactory::new(&db.connection).create_many(5).await.unwrap();

        assert_eq!(courses.len(), 5);
        assert!(courses.windows(2).all(|w| w[0].id < w[1].id));
        assert_eq!(store::count(&db.connection).await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_factory_fixed_name() {
        let db = TestDb::new().await.unwrap();

        let courses = CourseFactory::new(&db.connection)
            .with_name("Duplicate")
            .create_many(3)
            .await
            .unwrap();

        assert!(courses.iter().all(|c| c.name == "Duplicate"));
    }

    #[tokio::test]
    async fn test_one_course() {
        let db = TestDb::new().await.unwrap();
        let course = one_course(&db.connection).await.unwrap();
        assert_eq!(course.name, SAMPLE_COURSE_NAME);
    }
}
