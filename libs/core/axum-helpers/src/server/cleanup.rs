//! Ordered cleanup of store connections during shutdown.

use futures::future::BoxFuture;
use tracing::info;

/// Runs named cleanup tasks one after another, in insertion order.
///
/// Order matters: the relational pool is closed before the document client.
///
/// ```ignore
/// let mut cleanup = CleanupCoordinator::new();
/// cleanup.add_task("postgres", database::postgres::close(db));
/// cleanup.add_task("mongodb", database::mongodb::close(client));
/// cleanup.run().await;
/// ```
#[derive(Default)]
pub struct CleanupCoordinator {
    tasks: Vec<(&'static str, BoxFuture<'static, ()>)>,
}

impl CleanupCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_task<F>(&mut self, name: &'static str, task: F)
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        self.tasks.push((name, Box::pin(task)));
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Await every task sequentially.
    pub async fn run(self) {
        info!("Running {} cleanup tasks", self.tasks.len());

        for (name, task) in self.tasks {
            info!("Cleanup task '{}' started", name);
            task.await;
            info!("Cleanup task '{}' completed", name);
        }

        info!("All cleanup tasks completed");
    }
}
