use std::collections::HashMap;

use super::toast::Toast;

/// Where a navigation should land.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Replace the current page.
    Replace(String),
    /// Open in a new browsing context (tab or window).
    NewContext(String),
}

impl Navigation {
    pub fn target(&self) -> &str {
        match self {
            Navigation::Replace(t) | Navigation::NewContext(t) => t,
        }
    }
}

/// Clickable entries on the merchant home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    Donate,
    Events,
    Settings,
    Logout,
}

impl NavAction {
    pub const ALL: [NavAction; 4] = [
        NavAction::Donate,
        NavAction::Events,
        NavAction::Settings,
        NavAction::Logout,
    ];
}

/// Persistent key-value storage that survives page reloads.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// The page surface the controller drives.
pub trait PageHost {
    fn show_merchant_id(&mut self, merchant_id: &str);
    /// Wires click handlers for the given actions.
    fn bind_actions(&mut self, actions: &[NavAction]);
    fn navigate(&mut self, navigation: Navigation);
    /// Blocking yes/no prompt.
    fn confirm(&mut self, prompt: &str) -> bool;
    fn notify_error(&mut self, toast: Toast);
    /// Takes down a toast whose lifetime has run out.
    fn dismiss_error(&mut self, toast: &Toast);
}

/// In-memory storage, for hosts without a persistent backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}
