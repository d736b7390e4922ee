use super::*;
use crate::scheduler::ScheduledTask;

impl Page {
    pub fn now_ms(&self) -> i64 {
        self.context.scheduler.now_ms()
    }

    pub fn advance_time(&mut self, delta_ms: i64) -> Result<()> {
        if delta_ms < 0 {
            return Err(Error::Timer(
                "advance_time requires non-negative milliseconds".into(),
            ));
        }
        let target = self.now_ms().saturating_add(delta_ms);
        let from = self.context.scheduler.advance_clock_to(target)?;
        let ran = self.run_timer_queue(Some(target), false)?;
        self.trace_timer_line(format!(
            "[timer] advance delta_ms={delta_ms} from={from} to={target} ran_due={ran}"
        ));
        Ok(())
    }

    pub fn advance_time_to(&mut self, target_ms: i64) -> Result<()> {
        let from = self.context.scheduler.advance_clock_to(target_ms)?;
        let ran = self.run_timer_queue(Some(target_ms), false)?;
        self.trace_timer_line(format!(
            "[timer] advance_to from={from} to={target_ms} ran_due={ran}"
        ));
        Ok(())
    }

    /// Runs every pending task, moving the clock to each task's due time.
    pub fn flush(&mut self) -> Result<()> {
        let from = self.now_ms();
        let ran = self.run_timer_queue(None, true)?;
        self.trace_timer_line(format!(
            "[timer] flush from={from} to={} ran={ran}",
            self.now_ms()
        ));
        Ok(())
    }

    pub fn run_due_timers(&mut self) -> Result<usize> {
        let now = self.now_ms();
        let ran = self.run_timer_queue(Some(now), false)?;
        self.trace_timer_line(format!("[timer] run_due now_ms={now} ran={ran}"));
        Ok(ran)
    }

    pub fn pending_timers(&self) -> Vec<PendingTimer> {
        self.context.scheduler.pending()
    }

    pub fn clear_all_timers(&mut self) -> usize {
        let cleared = self.context.scheduler.clear_all();
        self.trace_timer_line(format!("[timer] clear_all cleared={cleared}"));
        cleared
    }

    pub fn set_timer_step_limit(&mut self, max_steps: usize) -> Result<()> {
        self.context.scheduler.set_step_limit(max_steps)
    }

    fn run_timer_queue(&mut self, due_limit: Option<i64>, advance_clock: bool) -> Result<usize> {
        let mut steps = 0usize;
        while self.context.scheduler.has_next(due_limit) {
            steps += 1;
            if steps > self.context.scheduler.step_limit() {
                return Err(self.context.scheduler.step_limit_error(steps, due_limit));
            }
            let Some(task) = self.context.scheduler.pop_next(due_limit, advance_clock) else {
                break;
            };
            self.execute_timer_task(task);
        }
        Ok(steps)
    }

    fn execute_timer_task(&mut self, task: ScheduledTask) {
        self.trace_timer_line(format!(
            "[timer] run id={} due_at={} now_ms={} slot={:?}",
            task.id.get(),
            task.due_at,
            self.now_ms(),
            task.key.slot
        ));
        let StyleWrite {
            node,
            property,
            value,
        } = task.write;
        self.context.dom.style_set(node, &property, &value);
    }

    fn trace_timer_line(&mut self, line: String) {
        self.context.trace.record(TraceCategory::Timer, line);
    }
}
