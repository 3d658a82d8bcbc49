//! In-memory marketplace store.
//!
//! One `RwLock` guards every table. Rows are keyed by auto-incrementing ids
//! starting at 1 and iterate in ascending id order. The store is constructed
//! once in `main` and shared through `AppState`.

mod applications;
#[cfg(test)]
pub(crate) mod fixtures;
mod jobs;
mod learning;
mod messages;
mod profiles;
mod users;

use std::collections::BTreeMap;

use tokio::sync::RwLock;
use tracing::info;

use crate::models::application::Application;
use crate::models::job::Job;
use crate::models::learning::{seed_resources, LearningResource, SkillGapAnalysis};
use crate::models::message::Message;
use crate::models::profile::{EmployerProfile, StudentProfile};
use crate::models::user::User;

/// Rows of one entity plus its id counter.
pub(crate) struct Table<T> {
    rows: BTreeMap<i32, T>,
    next_id: i32,
}

impl<T: Clone> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Allocates the next id, builds the row with it and stores it.
    fn insert_with(&mut self, build: impl FnOnce(i32) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn get(&self, id: i32) -> Option<&T> {
        self.rows.get(&id)
    }

    fn get_mut(&mut self, id: i32) -> Option<&mut T> {
        self.rows.get_mut(&id)
    }

    fn remove(&mut self, id: i32) -> Option<T> {
        self.rows.remove(&id)
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.rows.values()
    }
}

pub(crate) struct Tables {
    users: Table<User>,
    student_profiles: Table<StudentProfile>,
    employer_profiles: Table<EmployerProfile>,
    jobs: Table<Job>,
    applications: Table<Application>,
    messages: Table<Message>,
    skill_gap_analyses: Table<SkillGapAnalysis>,
    learning_resources: Table<LearningResource>,
}

pub struct MemStore {
    tables: RwLock<Tables>,
}

impl Default for MemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemStore {
    /// Creates an empty store with the learning-resource catalogue pre-seeded.
    pub fn new() -> Self {
        let mut learning_resources = Table::new();
        for resource in seed_resources() {
            learning_resources.insert_with(|id| resource.into_resource(id));
        }
        info!(
            "Seeded {} learning resources",
            learning_resources.rows.len()
        );

        Self {
            tables: RwLock::new(Tables {
                users: Table::new(),
                student_profiles: Table::new(),
                employer_profiles: Table::new(),
                jobs: Table::new(),
                applications: Table::new(),
                messages: Table::new(),
                skill_gap_analyses: Table::new(),
                learning_resources,
            }),
        }
    }
}
