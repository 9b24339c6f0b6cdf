use crate::error::RecordError;
use crate::reader::read_record;
use crate::types::{Record, Session, User};

/// Builds users and attaches each session to the most recently created user.
///
/// This is the only place users and sessions are mutated. Call
/// [`UserRegistry::finish`] to obtain the read-only [`Population`].
#[derive(Debug, Default)]
pub struct UserRegistry {
    users: Vec<User>,
}

impl UserRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse every line of `text` and register the resulting records.
    ///
    /// Blank lines at the end of the input are ignored. A blank line anywhere
    /// else is an unrecognized record.
    pub fn from_text(text: &str) -> Result<Population, RecordError> {
        let mut lines: Vec<&str> = text.lines().collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        Self::from_lines(lines)
    }

    /// Parse and register `lines` in order, numbering them from 1.
    pub fn from_lines<'a, I>(lines: I) -> Result<Population, RecordError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut registry = Self::new();
        for (idx, raw) in lines.into_iter().enumerate() {
            let line = idx + 1;
            let record = read_record(line, raw)?;
            registry.push(line, record)?;
        }
        Ok(registry.finish())
    }

    /// Register one record read from `line`.
    pub fn push(&mut self, line: usize, record: Record) -> Result<(), RecordError> {
        match record {
            Record::User(record) => {
                tracing::debug!(line, user_id = %record.id, "Registered user");
                self.users.push(User::new(record));
            }
            Record::Session(session) => {
                let active = self
                    .users
                    .last_mut()
                    .ok_or(RecordError::OrphanSessionRecord { line })?;
                active.attach(session);
            }
        }
        Ok(())
    }

    pub fn finish(self) -> Population {
        let population = Population { users: self.users };
        tracing::debug!(
            users = population.users.len(),
            sessions = population.session_count(),
            "Finished registering records"
        );
        population
    }
}

/// Users and their sessions after a completed registry pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Population {
    users: Vec<User>,
}

impl Population {
    /// Users in input order.
    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// Every session in input order.
    ///
    /// Sessions always belong to the latest user, so input order is each
    /// user's sessions concatenated in user order. The view borrows the
    /// sessions owned by the users.
    pub fn sessions(&self) -> impl Iterator<Item = &Session> + Clone {
        self.users.iter().flat_map(|u| u.sessions().iter())
    }

    /// The global session sequence as a borrowed slice-able view.
    pub fn global_sessions(&self) -> Vec<&Session> {
        self.sessions().collect()
    }

    pub fn session_count(&self) -> usize {
        self.users.iter().map(|u| u.sessions().len()).sum()
    }
}
