//! Pooled allocation of per-request user objects
//!
//! Pooling is an optimization, not a correctness requirement; the
//! acquire/release contract is what the store relies on.

use parking_lot::Mutex;

use crate::user::SessionUser;

/// Allocator contract for per-request user objects
///
/// A record handed out by `acquire` is exclusively owned by one in-flight
/// request context until it is passed back through `release`.
pub trait UserFactory: Send + Sync + 'static {
    /// Obtain a pristine user object
    fn acquire(&self) -> SessionUser;

    /// Return a user object once its request is finished
    fn release(&self, user: SessionUser);
}

/// Bounded free-list of user objects
///
/// `acquire` pops from the free list or allocates; `release` resets the
/// record and keeps it while the list is under capacity.
pub struct PooledUserFactory {
    free: Mutex<Vec<SessionUser>>,
    capacity: usize,
}

impl PooledUserFactory {
    /// Create a pool retaining up to `capacity` released records
    pub fn new(capacity: usize) -> Self {
        Self {
            free: Mutex::new(Vec::new()),
            capacity,
        }
    }

    /// Number of records currently held in the free list
    pub fn idle(&self) -> usize {
        self.free.lock().len()
    }
}

impl Default for PooledUserFactory {
    fn default() -> Self {
        Self::new(64)
    }
}

impl UserFactory for PooledUserFactory {
    fn acquire(&self) -> SessionUser {
        self.free.lock().pop().unwrap_or_default()
    }

    fn release(&self, mut user: SessionUser) {
        let mut free = self.free.lock();
        if free.len() < self.capacity {
            user.reset();
            free.push(user);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn released_users_come_back_reset() {
        let pool = PooledUserFactory::new(4);

        let mut user = pool.acquire();
        user.set_session_id("sid");
        user.set_login(true);
        user.set("name", "alice");
        pool.release(user);

        assert_eq!(pool.idle(), 1);
        let reused = pool.acquire();
        assert_eq!(reused, SessionUser::new());
        assert_eq!(pool.idle(), 0);
    }

    #[test]
    fn capacity_bounds_the_free_list() {
        let pool = PooledUserFactory::new(1);
        pool.release(SessionUser::new());
        pool.release(SessionUser::new());
        assert_eq!(pool.idle(), 1);
    }
}
