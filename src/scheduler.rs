use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(pub(crate) i64);

impl TimerId {
    pub fn get(self) -> i64 {
        self.0
    }
}

/// Which deferred effect on an element a task belongs to. One pending task
/// per (element, slot); scheduling again supersedes the earlier one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskSlot {
    PressFeedback,
    CartBounce,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TaskKey {
    pub node: NodeId,
    pub slot: TaskSlot,
}

impl TaskKey {
    pub fn new(node: NodeId, slot: TaskSlot) -> Self {
        Self { node, slot }
    }
}

/// An inline style assignment performed when a task comes due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleWrite {
    pub node: NodeId,
    pub property: String,
    pub value: String,
}

impl StyleWrite {
    pub fn new(node: NodeId, property: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            node,
            property: property.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTimer {
    pub id: TimerId,
    pub due_at: i64,
    pub order: i64,
    pub key: TaskKey,
}

#[derive(Debug, Clone)]
pub(crate) struct ScheduledTask {
    pub(crate) id: TimerId,
    pub(crate) due_at: i64,
    pub(crate) order: i64,
    pub(crate) key: TaskKey,
    pub(crate) write: StyleWrite,
}

#[derive(Debug)]
pub(crate) struct Scheduler {
    task_queue: Vec<ScheduledTask>,
    now_ms: i64,
    step_limit: usize,
    next_timer_id: i64,
    next_task_order: i64,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self {
            task_queue: Vec::new(),
            now_ms: 0,
            step_limit: 10_000,
            next_timer_id: 1,
            next_task_order: 0,
        }
    }
}

impl Scheduler {
    pub(crate) fn now_ms(&self) -> i64 {
        self.now_ms
    }

    pub(crate) fn step_limit(&self) -> usize {
        self.step_limit
    }

    pub(crate) fn set_step_limit(&mut self, max_steps: usize) -> Result<()> {
        if max_steps == 0 {
            return Err(Error::Timer(
                "timer step limit requires at least 1 step".into(),
            ));
        }
        self.step_limit = max_steps;
        Ok(())
    }

    /// Queues `write` to run `delay_ms` from now. Returns the new timer id and
    /// the id of the task it superseded, if any.
    pub(crate) fn schedule(
        &mut self,
        key: TaskKey,
        delay_ms: i64,
        write: StyleWrite,
    ) -> (TimerId, Option<TimerId>) {
        let superseded = self.cancel_key(key);
        let id = TimerId(self.next_timer_id);
        self.next_timer_id += 1;
        let order = self.next_task_order;
        self.next_task_order += 1;
        self.task_queue.push(ScheduledTask {
            id,
            due_at: self.now_ms.saturating_add(delay_ms.max(0)),
            order,
            key,
            write,
        });
        (id, superseded)
    }

    pub(crate) fn cancel_key(&mut self, key: TaskKey) -> Option<TimerId> {
        let pos = self.task_queue.iter().position(|task| task.key == key)?;
        Some(self.task_queue.remove(pos).id)
    }

    pub(crate) fn clear_all(&mut self) -> usize {
        let cleared = self.task_queue.len();
        self.task_queue.clear();
        cleared
    }

    pub(crate) fn pending(&self) -> Vec<PendingTimer> {
        let mut timers = self
            .task_queue
            .iter()
            .map(|task| PendingTimer {
                id: task.id,
                due_at: task.due_at,
                order: task.order,
                key: task.key,
            })
            .collect::<Vec<_>>();
        timers.sort_by_key(|timer| (timer.due_at, timer.order));
        timers
    }

    pub(crate) fn advance_clock_to(&mut self, target_ms: i64) -> Result<i64> {
        if target_ms < self.now_ms {
            return Err(Error::Timer(format!(
                "cannot move the clock backwards (target={target_ms}, now_ms={})",
                self.now_ms
            )));
        }
        let from = self.now_ms;
        self.now_ms = target_ms;
        Ok(from)
    }

    pub(crate) fn has_next(&self, due_limit: Option<i64>) -> bool {
        self.task_queue
            .iter()
            .any(|task| due_limit.is_none_or(|limit| task.due_at <= limit))
    }

    /// Removes the next task due at or before `due_limit` (any task when
    /// `None`). When `advance_clock` is set the clock jumps to the task's due
    /// time.
    pub(crate) fn pop_next(
        &mut self,
        due_limit: Option<i64>,
        advance_clock: bool,
    ) -> Option<ScheduledTask> {
        let idx = self
            .task_queue
            .iter()
            .enumerate()
            .filter(|(_, task)| due_limit.is_none_or(|limit| task.due_at <= limit))
            .min_by_key(|(_, task)| (task.due_at, task.order))
            .map(|(idx, _)| idx)?;
        let task = self.task_queue.remove(idx);
        if advance_clock && task.due_at > self.now_ms {
            self.now_ms = task.due_at;
        }
        Some(task)
    }

    pub(crate) fn step_limit_error(&self, steps: usize, due_limit: Option<i64>) -> Error {
        let due_limit_desc = due_limit
            .map(|value| value.to_string())
            .unwrap_or_else(|| "none".into());
        Error::Timer(format!(
            "timer queue exceeded max steps: limit={}, steps={steps}, now_ms={}, due_limit={due_limit_desc}, pending_tasks={}",
            self.step_limit,
            self.now_ms,
            self.task_queue.len(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(node: usize, value: &str) -> StyleWrite {
        StyleWrite::new(NodeId(node), "transform", value)
    }

    #[test]
    fn tasks_run_in_due_then_insertion_order() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(TaskKey::new(NodeId(1), TaskSlot::PressFeedback), 200, write(1, "a"));
        scheduler.schedule(TaskKey::new(NodeId(2), TaskSlot::CartBounce), 10, write(2, "b"));
        scheduler.schedule(TaskKey::new(NodeId(3), TaskSlot::CartBounce), 10, write(3, "c"));

        let order = std::iter::from_fn(|| scheduler.pop_next(None, true))
            .map(|task| task.write.value)
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["b", "c", "a"]);
        assert_eq!(scheduler.now_ms(), 200);
    }

    #[test]
    fn rescheduling_the_same_key_supersedes_the_pending_task() {
        let mut scheduler = Scheduler::default();
        let key = TaskKey::new(NodeId(4), TaskSlot::PressFeedback);
        let (first, superseded) = scheduler.schedule(key, 200, write(4, ""));
        assert_eq!(superseded, None);

        scheduler.advance_clock_to(150).unwrap();
        let (second, superseded) = scheduler.schedule(key, 200, write(4, ""));
        assert_eq!(superseded, Some(first));

        let pending = scheduler.pending();
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, second);
        assert_eq!(pending[0].due_at, 350);
    }

    #[test]
    fn different_slots_on_one_node_coexist() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(TaskKey::new(NodeId(5), TaskSlot::PressFeedback), 200, write(5, ""));
        scheduler.schedule(TaskKey::new(NodeId(5), TaskSlot::CartBounce), 10, write(5, "x"));
        assert_eq!(scheduler.pending().len(), 2);
    }

    #[test]
    fn pop_next_respects_due_limit() {
        let mut scheduler = Scheduler::default();
        scheduler.schedule(TaskKey::new(NodeId(6), TaskSlot::PressFeedback), 200, write(6, ""));
        assert!(scheduler.pop_next(Some(199), false).is_none());
        assert!(scheduler.pop_next(Some(200), false).is_some());
    }

    #[test]
    fn clock_cannot_move_backwards() {
        let mut scheduler = Scheduler::default();
        scheduler.advance_clock_to(50).unwrap();
        assert!(matches!(
            scheduler.advance_clock_to(10),
            Err(Error::Timer(_))
        ));
    }

    #[test]
    fn zero_step_limit_is_rejected() {
        let mut scheduler = Scheduler::default();
        assert!(scheduler.set_step_limit(0).is_err());
        assert!(scheduler.set_step_limit(3).is_ok());
        assert_eq!(scheduler.step_limit(), 3);
    }
}
