//! Built-in demo records.
//!
//! Used when `roster-config.yaml` has no `seed.users` list, so a fresh
//! process has something to show in the browser client.

use roster_types::{User, UserId};

/// The demo records a registry starts with when no seed is configured.
pub fn demo_users() -> Vec<User> {
    [
        (1, "Ana García", "ana@example.com", 30),
        (2, "Bruno Díaz", "bruno@example.com", 25),
        (3, "Carla Méndez", "carla@example.com", 41),
        (4, "Diego Herrera", "diego@example.com", 35),
    ]
    .into_iter()
    .map(|(id, name, email, age)| User {
        id: UserId::new(id),
        name: name.to_owned(),
        email: email.to_owned(),
        age,
    })
    .collect()
}
