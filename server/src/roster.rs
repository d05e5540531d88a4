use std::collections::HashMap;

use balloon_shared::protocol::UserRecord;
use chrono::{DateTime, Duration, Utc};

/// The user list served to clients, in registration order.
#[derive(Debug, Default)]
pub struct Roster {
    users: Vec<UserRecord>,
    index_by_id: HashMap<String, usize>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = UserRecord>) -> Self {
        let mut roster = Self::new();
        for user in users {
            roster.upsert(user);
        }
        roster
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn snapshot(&self) -> Vec<UserRecord> {
        self.users.clone()
    }

    pub fn get(&self, id: &str) -> Option<&UserRecord> {
        self.index_by_id.get(id).map(|&i| &self.users[i])
    }

    /// Insert a new user or replace an existing one in place.
    /// Returns true when the user was not known before.
    pub fn upsert(&mut self, user: UserRecord) -> bool {
        if let Some(&i) = self.index_by_id.get(&user.id) {
            self.users[i] = user;
            return false;
        }
        self.index_by_id.insert(user.id.clone(), self.users.len());
        self.users.push(user);
        true
    }

    /// Record a login for `id` at `now`.
    pub fn record_login(&mut self, id: &str, now: DateTime<Utc>) -> Option<UserRecord> {
        let &i = self.index_by_id.get(id)?;
        self.users[i].last_login = now;
        Some(self.users[i].clone())
    }
}

/// Four presidents with staggered logins, so a fresh scene shows the whole
/// recency spread.
pub fn demo_roster(now: DateTime<Utc>) -> Vec<UserRecord> {
    let user = |id: &str, initials: &str, name: &str, team: u32, ago: Duration| UserRecord {
        id: id.to_string(),
        initials: initials.to_string(),
        name: Some(name.to_string()),
        team: Some(team),
        last_login: now - ago,
        rank: None,
    };

    let mut users = vec![
        user("honestabe", "AL", "Abe Lincoln", 16, Duration::hours(30)),
        user("georgewash", "GW", "George Washington", 1, Duration::hours(54)),
        user("fdr", "FDR", "Franklin D Roosevelt", 32, Duration::hours(2)),
        user("jfk", "JFK", "John F Kennedy", 35, Duration::minutes(1)),
    ];
    users[2].rank = Some(1);
    users
}
