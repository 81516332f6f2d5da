use std::sync::Mutex;

/// Entry points the application can send the user to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// Unauthenticated entry point
    Login,
    Dashboard,
}

impl std::fmt::Display for Destination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Destination::Login => write!(f, "login"),
            Destination::Dashboard => write!(f, "dashboard"),
        }
    }
}

/// Application-wide redirect side effect.
pub trait Navigator: Send + Sync {
    fn redirect(&self, destination: Destination);
}

/// Navigator that only remembers where it was sent.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visits: Mutex<Vec<Destination>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// All redirects so far, oldest first.
    pub fn visits(&self) -> Vec<Destination> {
        self.visits.lock().map(|v| v.clone()).unwrap_or_default()
    }

    pub fn count(&self, destination: Destination) -> usize {
        self.visits
            .lock()
            .map(|v| v.iter().filter(|d| **d == destination).count())
            .unwrap_or(0)
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, destination: Destination) {
        if let Ok(mut visits) = self.visits.lock() {
            visits.push(destination);
        }
    }
}
