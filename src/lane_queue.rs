//! Priority-lane task queue: strict FIFO inside a lane, lanes drained by priority.

use std::collections::VecDeque;

use crate::types::{Task, TaskPriority, same_name};

const LANE_COUNT: usize = TaskPriority::ALL.len();

/// One FIFO per priority, indexed by [`TaskPriority::rank`].
pub struct LaneQueue {
    lanes: [VecDeque<Task>; LANE_COUNT],
}

impl LaneQueue {
    /// Create a queue with every lane empty.
    pub fn new() -> Self {
        Self {
            lanes: std::array::from_fn(|_| VecDeque::new()),
        }
    }

    /// Append to the tail of the task's lane.
    pub fn enqueue(&mut self, task: Task) {
        self.lane_mut(task.priority()).push_back(task);
    }

    /// The task `dequeue` would return next.
    pub fn peek(&self) -> Option<&Task> {
        self.lanes.iter().find_map(|lane| lane.front())
    }

    /// Remove the head of the highest-priority non-empty lane.
    pub fn dequeue(&mut self) -> Option<Task> {
        self.lanes.iter_mut().find_map(|lane| lane.pop_front())
    }

    /// Remove the first task with a matching id, wherever it sits in its lane.
    pub fn remove_by_id(&mut self, id: &str) -> Option<Task> {
        self.lanes.iter_mut().find_map(|lane| {
            let position = lane.iter().position(|task| same_name(task.id(), id))?;
            lane.remove(position)
        })
    }

    /// Put a task back at the head of its own lane, ahead of later arrivals.
    pub fn requeue_at_front(&mut self, task: Task) {
        self.lane_mut(task.priority()).push_front(task);
    }

    /// Owned copy in dequeue order.
    pub fn to_vec(&self) -> Vec<Task> {
        self.iter().cloned().collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> + '_ {
        self.lanes.iter().flat_map(|lane| lane.iter())
    }

    pub fn len(&self) -> usize {
        self.lanes.iter().map(VecDeque::len).sum()
    }

    pub fn lane_len(&self, priority: TaskPriority) -> usize {
        self.lanes[priority.rank()].len()
    }

    pub fn is_empty(&self) -> bool {
        self.lanes.iter().all(VecDeque::is_empty)
    }

    fn lane_mut(&mut self, priority: TaskPriority) -> &mut VecDeque<Task> {
        &mut self.lanes[priority.rank()]
    }
}

impl Default for LaneQueue {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn task(id: &str, priority: TaskPriority) -> Task {
        Task::new(id, "requestor", format!("work for {id}"), priority)
    }

    fn drain_ids(queue: &mut LaneQueue) -> Vec<String> {
        let mut ids = Vec::new();
        while let Some(task) = queue.dequeue() {
            ids.push(task.id().to_string());
        }
        ids
    }

    #[test]
    fn priority_major_arrival_minor() {
        let mut queue = LaneQueue::new();
        queue.enqueue(task("H1", TaskPriority::High));
        queue.enqueue(task("L1", TaskPriority::Low));
        queue.enqueue(task("H2", TaskPriority::High));
        assert_eq!(drain_ids(&mut queue), ["H1", "H2", "L1"]);
        assert!(queue.is_empty());
    }

    #[test]
    fn peek_matches_dequeue() {
        let mut queue = LaneQueue::new();
        assert!(queue.peek().is_none());
        assert!(queue.dequeue().is_none());
        queue.enqueue(task("M1", TaskPriority::Medium));
        queue.enqueue(task("L1", TaskPriority::Low));
        let peeked = queue.peek().map(|t| t.id().to_string());
        assert_eq!(peeked.as_deref(), Some("M1"));
        assert_eq!(queue.dequeue().map(|t| t.id().to_string()), peeked);
        assert_eq!(queue.len(), 1);
    }

    #[test]
    fn requeue_goes_to_head_of_own_lane_only() {
        let mut queue = LaneQueue::new();
        queue.enqueue(task("H1", TaskPriority::High));
        queue.enqueue(task("H2", TaskPriority::High));
        let served = queue.dequeue().expect("H1 queued");
        queue.requeue_at_front(served);
        queue.enqueue(task("H3", TaskPriority::High));
        assert_eq!(queue.dequeue().map(|t| t.id().to_string()).as_deref(), Some("H1"));

        // A low task requeued at its lane head still waits behind higher lanes.
        queue.enqueue(task("L1", TaskPriority::Low));
        queue.requeue_at_front(task("L0", TaskPriority::Low));
        assert_eq!(drain_ids(&mut queue), ["H2", "H3", "L0", "L1"]);
    }

    #[test]
    fn remove_by_id_finds_tasks_mid_lane() {
        let mut queue = LaneQueue::new();
        for (id, priority) in [
            ("H1", TaskPriority::High),
            ("M1", TaskPriority::Medium),
            ("M2", TaskPriority::Medium),
            ("M3", TaskPriority::Medium),
            ("L1", TaskPriority::Low),
        ] {
            queue.enqueue(task(id, priority));
        }
        let removed = queue.remove_by_id("m2").expect("M2 queued");
        assert_eq!(removed.id(), "M2");
        assert!(queue.remove_by_id("missing").is_none());
        assert_eq!(queue.lane_len(TaskPriority::Medium), 2);
        assert_eq!(queue.len(), 4);
        let order: Vec<_> = queue.to_vec().iter().map(|t| t.id().to_string()).collect();
        assert_eq!(order, ["H1", "M1", "M3", "L1"]);
    }

    #[test]
    fn len_is_sum_of_lanes() {
        let mut queue = LaneQueue::new();
        queue.enqueue(task("L1", TaskPriority::Low));
        queue.enqueue(task("H1", TaskPriority::High));
        queue.enqueue(task("L2", TaskPriority::Low));
        let lanes: usize = TaskPriority::ALL.iter().map(|p| queue.lane_len(*p)).sum();
        assert_eq!(queue.len(), lanes);
        queue.remove_by_id("L2");
        queue.dequeue();
        queue.dequeue();
        assert!(queue.is_empty());
        assert_eq!(queue.len(), 0);
        // Emptied lanes accept new work normally.
        queue.enqueue(task("L3", TaskPriority::Low));
        assert_eq!(queue.peek().map(|t| t.id()), Some("L3"));
    }
}
