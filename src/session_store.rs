use std::cell::RefCell;
use std::collections::HashMap;

use log::warn;

use crate::error::SlotError;
use crate::model::User;


// Persistent string slot that survives restarts: `localStorage` in the browser, a file in the
// console client, a plain map in tests.
pub trait KeyValueSlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SlotError>;
    fn remove(&self, key: &str) -> Result<(), SlotError>;
}

#[derive(Default)]
pub struct MemorySlot {
    entries: RefCell<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self { Self::default() }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let slot = Self::new();
        slot.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        slot
    }
}

impl KeyValueSlot for MemorySlot {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> {
        Ok(self.entries.borrow().get(key).cloned())
    }
    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
    fn remove(&self, key: &str) -> Result<(), SlotError> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

impl<T: KeyValueSlot + ?Sized> KeyValueSlot for std::rc::Rc<T> {
    fn get(&self, key: &str) -> Result<Option<String>, SlotError> { (**self).get(key) }
    fn set(&self, key: &str, value: &str) -> Result<(), SlotError> { (**self).set(key, value) }
    fn remove(&self, key: &str) -> Result<(), SlotError> { (**self).remove(key) }
}

// Owns the session token and the current user profile.
//
// The token is mirrored into the persistent slot so that it survives a reload. The profile is
// never persisted: it is refetched on startup. No expiry check is done here; an expired token
// only shows up as a failed request.
//
// All methods take `&self`: the client is single-threaded and borrows never cross an `.await`.
pub struct SessionStore {
    slot: Box<dyn KeyValueSlot>,
    key: String,
    token: RefCell<Option<String>>,
    current_user: RefCell<Option<User>>,
}

impl SessionStore {
    // Picks up a token persisted by a previous run, if any.
    pub fn load(slot: Box<dyn KeyValueSlot>, key: &str) -> Self {
        let token = match slot.get(key) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(err) => {
                warn!("Cannot read persisted session token: {err}");
                None
            }
        };
        SessionStore {
            slot,
            key: key.to_owned(),
            token: RefCell::new(token),
            current_user: RefCell::new(None),
        }
    }

    pub fn get(&self) -> Option<String> { self.token.borrow().clone() }
    pub fn has_token(&self) -> bool { self.token.borrow().is_some() }

    // Replaces the token wholesale. The in-memory token is updated even if persisting fails:
    // the session then simply won't survive a reload.
    pub fn set(&self, token: &str) -> Result<(), SlotError> {
        *self.token.borrow_mut() = Some(token.to_owned());
        self.slot.set(&self.key, token)
    }

    // Drops both the token and the profile.
    pub fn clear(&self) -> Result<(), SlotError> {
        *self.token.borrow_mut() = None;
        *self.current_user.borrow_mut() = None;
        self.slot.remove(&self.key)
    }

    pub fn current_user(&self) -> Option<User> { self.current_user.borrow().clone() }
    pub fn set_current_user(&self, user: User) { *self.current_user.borrow_mut() = Some(user); }

    pub fn favourite_restaurant(&self) -> Option<String> {
        self.current_user.borrow().as_ref().and_then(|u| u.favourite_restaurant.clone())
    }

    pub fn is_authenticated(&self) -> bool { self.current_user.borrow().is_some() }
}
