use std::fmt;

use chrono::Utc;

use crate::error::StoreError;
use crate::model::{Task, TaskCollection, TaskId};
use crate::prompt::ConfirmRemoval;

/// Source of the millisecond timestamps task ids are derived from.
pub trait Clock: fmt::Debug {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Removal {
    Removed(Task),
    Declined,
}

impl Removal {
    pub fn is_removed(&self) -> bool {
        matches!(self, Removal::Removed(_))
    }
}

/// Sole owner of the task list and its only mutation surface.
#[derive(Debug)]
pub struct TaskStore {
    tasks: TaskCollection,
    revision: u64,
    last_id: Option<i64>,
    clock: Box<dyn Clock>,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }

    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            tasks: TaskCollection::default(),
            revision: 0,
            last_id: None,
            clock: Box::new(clock),
        }
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn snapshot(&self) -> TaskCollection {
        self.tasks.clone()
    }

    /// Number of successful mutations since the store was created.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.find(id)
    }

    /// Id of the task at a 1-based position.
    pub fn id_at(&self, position: usize) -> Option<TaskId> {
        position
            .checked_sub(1)
            .and_then(|index| self.tasks.get(index))
            .map(|task| task.id)
    }

    pub fn add(&mut self, title: impl Into<String>) -> Result<TaskId, StoreError> {
        let title = title.into();
        if self.tasks.contains_title(&title) {
            tracing::debug!(title = title.as_str(), "rejected duplicate task title");
            return Err(StoreError::DuplicateTitle(title));
        }

        let id = self.next_id();
        let mut tasks = self.tasks.to_vec();
        tasks.push(Task::new(id, title));
        self.replace(tasks);
        tracing::debug!(task_id = %id, count = self.len(), "task added");
        Ok(id)
    }

    /// Flip the completion flag, returning the new value.
    pub fn toggle(&mut self, id: TaskId) -> Result<bool, StoreError> {
        let done = self
            .get(id)
            .map(|task| !task.done)
            .ok_or(StoreError::NotFound(id))?;
        self.rebuild_with(id, |task| task.with_done(done));
        tracing::debug!(task_id = %id, done, "task toggled");
        Ok(done)
    }

    /// Rename a task. Unlike [`TaskStore::add`], titles are not checked for duplicates here.
    pub fn edit(&mut self, id: TaskId, new_title: &str) -> Result<(), StoreError> {
        if self.get(id).is_none() {
            return Err(StoreError::NotFound(id));
        }
        self.rebuild_with(id, |task| task.with_title(new_title));
        tracing::debug!(task_id = %id, "task renamed");
        Ok(())
    }

    /// Remove a task once `confirm` agrees. A declined prompt leaves the store untouched.
    pub fn remove<C>(&mut self, id: TaskId, confirm: &mut C) -> Result<Removal, StoreError>
    where
        C: ConfirmRemoval + ?Sized,
    {
        let task = self.get(id).cloned().ok_or(StoreError::NotFound(id))?;
        if !confirm.confirm_removal(&task) {
            tracing::debug!(task_id = %id, "task removal declined");
            return Ok(Removal::Declined);
        }

        let tasks = self
            .tasks
            .iter()
            .filter(|task| task.id != id)
            .cloned()
            .collect();
        self.replace(tasks);
        tracing::debug!(task_id = %id, count = self.len(), "task removed");
        Ok(Removal::Removed(task))
    }

    fn rebuild_with<F>(&mut self, id: TaskId, update: F)
    where
        F: Fn(&Task) -> Task,
    {
        let tasks = self
            .tasks
            .iter()
            .map(|task| {
                if task.id == id {
                    update(task)
                } else {
                    task.clone()
                }
            })
            .collect();
        self.replace(tasks);
    }

    fn replace(&mut self, tasks: Vec<Task>) {
        self.tasks = TaskCollection::from_vec(tasks);
        self.revision += 1;
    }

    fn next_id(&mut self) -> TaskId {
        let now = self.clock.now_millis();
        let millis = match self.last_id {
            Some(last) if now <= last => last + 1,
            _ => now,
        };
        self.last_id = Some(millis);
        TaskId::from_millis(millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prompt::Answer;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Debug, Clone)]
    struct FixedClock(Rc<Cell<i64>>);

    impl FixedClock {
        fn at(millis: i64) -> (Self, Rc<Cell<i64>>) {
            let cell = Rc::new(Cell::new(millis));
            (Self(cell.clone()), cell)
        }
    }

    impl Clock for FixedClock {
        fn now_millis(&self) -> i64 {
            self.0.get()
        }
    }

    fn store() -> TaskStore {
        let (clock, _) = FixedClock::at(1_000);
        TaskStore::with_clock(clock)
    }

    fn titles(store: &TaskStore) -> Vec<&str> {
        store.tasks().iter().map(|task| task.title.as_str()).collect()
    }

    #[test]
    fn adds_keep_insertion_order() {
        let mut store = store();
        for title in ["Buy milk", "Walk dog", "Call mom"] {
            store.add(title).unwrap();
        }

        assert_eq!(store.len(), 3);
        assert_eq!(titles(&store), vec!["Buy milk", "Walk dog", "Call mom"]);
        assert!(store.tasks().iter().all(|task| !task.done));
    }

    #[test]
    fn ids_stay_unique_within_one_millisecond() {
        let (clock, now) = FixedClock::at(5_000);
        let mut store = TaskStore::with_clock(clock);
        let first = store.add("A").unwrap();
        let second = store.add("B").unwrap();
        now.set(4_000);
        let third = store.add("C").unwrap();
        now.set(9_000);
        let fourth = store.add("D").unwrap();

        assert_eq!(first.as_millis(), 5_000);
        assert_eq!(second.as_millis(), 5_001);
        assert_eq!(third.as_millis(), 5_002);
        assert_eq!(fourth.as_millis(), 9_000);
    }

    #[test]
    fn duplicate_title_is_rejected_without_mutation() {
        let mut store = store();
        store.add("X").unwrap();
        let before = store.snapshot();

        let err = store.add("X").unwrap_err();

        assert_eq!(err, StoreError::DuplicateTitle("X".into()));
        assert_eq!(titles(&store), vec!["X"]);
        assert!(store.snapshot().same_as(&before));
        assert_eq!(store.revision(), 1);
    }

    #[rstest]
    #[case("x")]
    #[case("X ")]
    #[case(" X")]
    fn duplicate_check_is_exact(#[case] title: &str) {
        let mut store = store();
        store.add("X").unwrap();
        assert!(store.add(title).is_ok());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn empty_titles_are_accepted() {
        let mut store = store();
        assert!(store.add("").is_ok());
        assert_eq!(
            store.add("").unwrap_err(),
            StoreError::DuplicateTitle(String::new())
        );
    }

    #[test]
    fn toggle_is_an_involution() {
        let mut store = store();
        let a = store.add("A").unwrap();
        store.add("B").unwrap();
        let original = store.snapshot();

        assert_eq!(store.toggle(a), Ok(true));
        assert!(store.get(a).unwrap().done);
        assert_eq!(store.tasks()[1], original[1]);

        assert_eq!(store.toggle(a), Ok(false));
        assert_eq!(store.snapshot(), original);
        assert!(!store.snapshot().same_as(&original));
    }

    #[test]
    fn toggle_unknown_id_is_not_found() {
        let mut store = store();
        store.add("A").unwrap();
        let missing = TaskId::from_millis(42);

        assert_eq!(store.toggle(missing), Err(StoreError::NotFound(missing)));
        assert_eq!(store.revision(), 1);
    }

    #[test]
    fn edit_changes_only_the_title() {
        let mut store = store();
        let a = store.add("A").unwrap();
        let b = store.add("B").unwrap();
        store.toggle(a).unwrap();

        store.edit(a, "A2").unwrap();

        let edited = store.get(a).unwrap();
        assert_eq!(edited.id, a);
        assert!(edited.done);
        assert_eq!(edited.title, "A2");
        assert_eq!(store.get(b).unwrap(), &Task::new(b, "B"));
    }

    #[test]
    fn edit_unknown_id_is_not_found() {
        let mut store = store();
        let missing = TaskId::from_millis(42);
        assert_eq!(store.edit(missing, "New"), Err(StoreError::NotFound(missing)));
        assert_eq!(store.revision(), 0);
    }

    #[test]
    fn edit_allows_duplicate_titles() {
        // Renames skip the uniqueness rule that adds enforce.
        let mut store = store();
        store.add("A").unwrap();
        let b = store.add("B").unwrap();

        assert!(store.edit(b, "A").is_ok());
        assert_eq!(titles(&store), vec!["A", "A"]);
    }

    #[test]
    fn remove_requires_confirmation() {
        let mut store = store();
        let a = store.add("A").unwrap();
        let before = store.snapshot();

        assert_eq!(store.remove(a, &mut Answer::No), Ok(Removal::Declined));
        assert!(store.snapshot().same_as(&before));
        assert_eq!(store.revision(), 1);

        let removal = store.remove(a, &mut Answer::Yes).unwrap();
        assert_eq!(removal, Removal::Removed(Task::new(a, "A")));
        assert!(store.is_empty());
    }

    #[test]
    fn remove_asks_about_the_targeted_task() {
        let mut store = store();
        store.add("A").unwrap();
        let b = store.add("B").unwrap();
        let mut asked = Vec::new();

        let removal = store
            .remove(b, &mut |task: &Task| {
                asked.push(task.title.clone());
                true
            })
            .unwrap();

        assert!(removal.is_removed());
        assert_eq!(asked, vec!["B".to_string()]);
        assert_eq!(titles(&store), vec!["A"]);
    }

    #[test]
    fn remove_unknown_id_does_not_prompt() {
        let mut store = store();
        let missing = TaskId::from_millis(42);
        let mut prompted = false;

        let result = store.remove(missing, &mut |_: &Task| {
            prompted = true;
            true
        });

        assert_eq!(result, Err(StoreError::NotFound(missing)));
        assert!(!prompted);
    }

    #[test]
    fn id_at_uses_one_based_positions() {
        let mut store = store();
        let a = store.add("A").unwrap();
        let b = store.add("B").unwrap();

        assert_eq!(store.id_at(0), None);
        assert_eq!(store.id_at(1), Some(a));
        assert_eq!(store.id_at(2), Some(b));
        assert_eq!(store.id_at(3), None);
    }

    #[test]
    fn buy_milk_walkthrough() {
        let (clock, _) = FixedClock::at(1_700_000_000_000);
        let mut store = TaskStore::with_clock(clock);

        let t1 = store.add("Buy milk").unwrap();
        assert_eq!(store.tasks(), &[Task::new(t1, "Buy milk")]);

        store.toggle(t1).unwrap();
        assert_eq!(
            store.tasks(),
            &[Task {
                id: t1,
                title: "Buy milk".into(),
                done: true
            }]
        );

        store.edit(t1, "Buy oat milk").unwrap();
        assert_eq!(
            store.tasks(),
            &[Task {
                id: t1,
                title: "Buy oat milk".into(),
                done: true
            }]
        );

        store.remove(t1, &mut Answer::Yes).unwrap();
        assert!(store.tasks().is_empty());
        assert_eq!(store.revision(), 4);
    }
}
