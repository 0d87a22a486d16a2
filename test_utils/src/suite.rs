//! Running rspec suites against a headless app.
//!
//! rspec clones its environment into every example and needs it to be
//! `Clone + Send + Sync`. [`SharedApp`] satisfies that by keeping the `App`
//! behind a mutex, and [`run_serial`] keeps every example on one thread.

use std::fmt::Debug;
use std::sync::{Arc, Mutex, PoisonError};

use bevy::prelude::App;
use rspec::{block::Suite, ConfigurationBuilder, Logger, Runner};

#[derive(Debug)]
struct AppCell(App);

// SAFETY: `AppCell` is only reachable through the mutex in `SharedApp`, and
// suites run through `run_serial`, so the app never moves between threads
// while borrowed.
unsafe impl Send for AppCell {}
unsafe impl Sync for AppCell {}

/// A Bevy `App` shared by the examples of one rspec suite.
#[derive(Debug, Clone)]
pub struct SharedApp(Arc<Mutex<AppCell>>);

impl SharedApp {
    /// Takes ownership of `app`.
    #[must_use]
    pub fn new(app: App) -> Self {
        Self(Arc::new(Mutex::new(AppCell(app))))
    }

    /// Runs `f` with exclusive access to the app.
    ///
    /// A panic in an earlier example poisons the mutex; the app is still
    /// handed out so later examples report their own failures.
    pub fn with<R>(&self, f: impl FnOnce(&mut App) -> R) -> R {
        let mut cell = self.0.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cell.0)
    }

    /// Swaps in a freshly built app, dropping the old one.
    pub fn replace(&self, app: App) {
        self.with(|current| *current = app);
    }
}

/// Runs `suite` on the calling thread, in declaration order.
///
/// The process exits with a failure status when any example fails, so the
/// enclosing `#[test]` fails too.
///
/// # Panics
/// Panics if the rspec configuration cannot be built.
pub fn run_serial<T>(suite: &Suite<T>)
where
    T: Clone + Send + Sync + Debug,
{
    let logger = Arc::new(Logger::new(std::io::stdout()));
    let config = ConfigurationBuilder::default()
        .parallel(false)
        .exit_on_failure(true)
        .build()
        .unwrap_or_else(|e| panic!("rspec configuration failed: {e}"));
    Runner::new(config, vec![logger]).run(suite);
}
