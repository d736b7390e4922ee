use super::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TraceCategory {
    Event,
    Timer,
}

#[derive(Debug)]
pub(crate) struct TraceState {
    pub(crate) enabled: bool,
    pub(crate) events: bool,
    pub(crate) timers: bool,
    pub(crate) logs: VecDeque<String>,
    pub(crate) log_limit: usize,
}

impl Default for TraceState {
    fn default() -> Self {
        Self {
            enabled: false,
            events: true,
            timers: true,
            logs: VecDeque::new(),
            log_limit: 10_000,
        }
    }
}

impl TraceState {
    pub(crate) fn record(&mut self, category: TraceCategory, line: String) {
        if !self.enabled {
            return;
        }
        let wanted = match category {
            TraceCategory::Event => self.events,
            TraceCategory::Timer => self.timers,
        };
        if !wanted {
            return;
        }
        tracing::debug!(target: "storefront_interactions::trace", "{line}");
        if self.logs.len() >= self.log_limit {
            self.logs.pop_front();
        }
        self.logs.push_back(line);
    }

    pub(crate) fn set_log_limit(&mut self, max_entries: usize) -> Result<()> {
        if max_entries == 0 {
            return Err(Error::Config(
                "set_trace_log_limit requires at least 1 entry".into(),
            ));
        }
        self.log_limit = max_entries;
        while self.logs.len() > self.log_limit {
            self.logs.pop_front();
        }
        Ok(())
    }

    pub(crate) fn take(&mut self) -> Vec<String> {
        self.logs.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn disabled_trace_records_nothing() {
        let mut trace = TraceState::default();
        trace.record(TraceCategory::Event, "[event] click".into());
        assert!(trace.take().is_empty());
    }

    #[test]
    fn log_limit_keeps_the_newest_lines() {
        let mut trace = TraceState {
            enabled: true,
            ..TraceState::default()
        };
        for i in 0..5 {
            trace.record(TraceCategory::Timer, format!("[timer] run id={i}"));
        }
        trace.set_log_limit(2).unwrap();
        assert_eq!(trace.take(), vec!["[timer] run id=3", "[timer] run id=4"]);
        assert!(trace.set_log_limit(0).is_err());
    }

    #[test]
    fn categories_can_be_muted() {
        let mut trace = TraceState {
            enabled: true,
            timers: false,
            ..TraceState::default()
        };
        trace.record(TraceCategory::Timer, "[timer] run id=1".into());
        trace.record(TraceCategory::Event, "[event] scroll".into());
        assert_eq!(trace.take(), vec!["[event] scroll"]);
    }
}
