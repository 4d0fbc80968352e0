use harbor_core::CoordinatorBuilder;
use tempfile::TempDir;

/// Helper function to create a test coordinator over a temp database
pub async fn create_test_coordinator() -> (TempDir, harbor_core::Coordinator) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let coordinator = CoordinatorBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create coordinator");
    (temp_dir, coordinator)
}
