//! Explicit scheduled-task queue replacing ad hoc delayed callbacks.
//!
//! A task is bound to an actor's local timeline; despawning the actor
//! cancels everything still pending for it.

use hearth_core::{EntityId, GameTime};

/// What to do when the deadline is reached.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TaskKind {
    /// The corpse releases its carried items and the owner returns to
    /// character creation.
    Decompose,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScheduledTask {
    pub at: GameTime,
    pub actor: EntityId,
    pub kind: TaskKind,
}

/// Pending tasks ordered by deadline on drain.
#[derive(Debug, Default)]
pub struct TaskQueue {
    tasks: Vec<ScheduledTask>,
}

impl TaskQueue {
    pub fn schedule(&mut self, at: GameTime, actor: EntityId, kind: TaskKind) {
        self.tasks.push(ScheduledTask { at, actor, kind });
    }

    /// Removes and returns every task due at `now`, earliest first.
    pub fn drain_due(&mut self, now: GameTime) -> Vec<ScheduledTask> {
        let mut due: Vec<ScheduledTask> = self
            .tasks
            .iter()
            .copied()
            .filter(|task| task.at <= now)
            .collect();
        self.tasks.retain(|task| task.at > now);
        due.sort_by(|a, b| a.at.seconds().total_cmp(&b.at.seconds()));
        due
    }

    /// Cancels every pending task for a despawned actor.
    pub fn cancel_for(&mut self, actor: EntityId) {
        self.tasks.retain(|task| task.actor != actor);
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_only_due_tasks_in_order() {
        let mut queue = TaskQueue::default();
        queue.schedule(GameTime::new(2.0), EntityId(1), TaskKind::Decompose);
        queue.schedule(GameTime::new(1.0), EntityId(2), TaskKind::Decompose);
        queue.schedule(GameTime::new(5.0), EntityId(3), TaskKind::Decompose);

        let due = queue.drain_due(GameTime::new(2.0));
        assert_eq!(due.len(), 2);
        assert_eq!(due[0].actor, EntityId(2));
        assert_eq!(due[1].actor, EntityId(1));
        assert!(!queue.is_empty());
    }

    #[test]
    fn cancel_removes_an_actors_pending_tasks() {
        let mut queue = TaskQueue::default();
        queue.schedule(GameTime::new(1.0), EntityId(1), TaskKind::Decompose);
        queue.schedule(GameTime::new(1.0), EntityId(2), TaskKind::Decompose);
        queue.cancel_for(EntityId(1));
        let due = queue.drain_due(GameTime::new(10.0));
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].actor, EntityId(2));
    }
}
