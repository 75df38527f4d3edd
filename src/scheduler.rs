//! Widget Scheduler
//!
//! Manages periodic refreshing of widgets. Each widget runs on its own
//! timer; due refreshes are spawned so one slow provider never delays the
//! others. Every launched refresh gets a per-widget sequence number and a
//! completion is applied only while it is still the newest launch for that
//! widget, so an overlapping slow response can never overwrite a fresher
//! one. A failed refresh writes the widget's fallback message; the next
//! scheduled tick is the only retry.

use crate::board::Board;
use crate::widgets::{Widget, WidgetError};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

/// How often the scheduler checks for due refreshes
const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Manages scheduled refreshing of widgets
pub struct WidgetScheduler {
    board: Arc<Board>,
    widgets: RwLock<HashMap<String, Arc<dyn Widget>>>,
    schedules: RwLock<HashMap<String, Schedule>>,
    running: RwLock<bool>,
}

#[derive(Debug, Clone)]
struct Schedule {
    interval: Option<Duration>,
    /// None for a one-shot widget that has already been launched
    next_refresh: Option<DateTime<Utc>>,
    last_refresh: Option<DateTime<Utc>>,
    last_status: Option<RefreshStatus>,
    /// Sequence number of the newest launched refresh
    seq: u64,
    error_count: u32,
}

/// Status of the last refresh attempt
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum RefreshStatus {
    Success { regions: usize },
    Failed { error: String },
}

/// Current status of one widget, as reported by the API
#[derive(Debug, Clone, Serialize)]
pub struct WidgetStatus {
    pub name: String,
    pub region: String,
    pub interval_secs: Option<u64>,
    pub last_refresh: Option<DateTime<Utc>>,
    pub last_status: Option<RefreshStatus>,
    pub next_refresh: Option<DateTime<Utc>>,
    pub error_count: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("unknown widget: {0}")]
    UnknownWidget(String),
}

impl WidgetScheduler {
    pub fn new(board: Arc<Board>) -> Self {
        Self {
            board,
            widgets: RwLock::new(HashMap::new()),
            schedules: RwLock::new(HashMap::new()),
            running: RwLock::new(false),
        }
    }

    /// Register a widget. Its first refresh is due immediately.
    pub async fn register(&self, widget: Arc<dyn Widget>) {
        let name = widget.name().to_string();
        let schedule = Schedule {
            interval: widget.refresh_interval(),
            next_refresh: Some(Utc::now()),
            last_refresh: None,
            last_status: None,
            seq: 0,
            error_count: 0,
        };

        self.widgets.write().await.insert(name.clone(), widget);
        self.schedules.write().await.insert(name, schedule);
    }

    /// Register every widget in a registry.
    pub async fn register_all(&self, widgets: Vec<Arc<dyn Widget>>) {
        for widget in widgets {
            self.register(widget).await;
        }
    }

    /// Status of all widgets, sorted by name
    pub async fn status(&self) -> Vec<WidgetStatus> {
        let widgets = self.widgets.read().await;
        let schedules = self.schedules.read().await;
        let mut status = Vec::new();

        for (name, widget) in widgets.iter() {
            let schedule = schedules.get(name);

            status.push(WidgetStatus {
                name: name.clone(),
                region: widget.primary_region().to_string(),
                interval_secs: widget.refresh_interval().map(|i| i.as_secs()),
                last_refresh: schedule.and_then(|s| s.last_refresh),
                last_status: schedule.and_then(|s| s.last_status.clone()),
                next_refresh: schedule.and_then(|s| s.next_refresh),
                error_count: schedule.map(|s| s.error_count).unwrap_or(0),
            });
        }

        status.sort_by(|a, b| a.name.cmp(&b.name));
        status
    }

    /// Status of a specific widget
    pub async fn widget_status(&self, name: &str) -> Option<WidgetStatus> {
        self.status().await.into_iter().find(|s| s.name == name)
    }

    /// Manually trigger a refresh, waiting for it to complete.
    pub async fn trigger(&self, name: &str) -> Result<(), SchedulerError> {
        let widget = self
            .widgets
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| SchedulerError::UnknownWidget(name.to_string()))?;

        let seq = self.launch(name).await;
        let result = widget.refresh(&self.board).await;
        self.complete(&widget, seq, result).await;
        Ok(())
    }

    /// Claim the next sequence number for a widget and push its next
    /// scheduled refresh past the current instant.
    async fn launch(&self, name: &str) -> u64 {
        let mut schedules = self.schedules.write().await;
        let schedule = schedules.get_mut(name).expect("registered widget");

        schedule.seq += 1;
        schedule.next_refresh = schedule
            .interval
            .map(|i| {
                Utc::now() + chrono::Duration::from_std(i).unwrap_or_else(|_| chrono::Duration::zero())
            });
        schedule.seq
    }

    /// Apply a finished refresh unless a newer one has been launched for
    /// the same widget since. Returns whether the result was applied.
    async fn complete(
        &self,
        widget: &Arc<dyn Widget>,
        seq: u64,
        result: Result<Vec<crate::board::RegionUpdate>, WidgetError>,
    ) -> bool {
        let name = widget.name();

        {
            let mut schedules = self.schedules.write().await;
            let schedule = schedules.get_mut(name).expect("registered widget");

            if schedule.seq != seq {
                tracing::debug!(widget = name, seq, newest = schedule.seq, "stale refresh discarded");
                return false;
            }

            schedule.last_refresh = Some(Utc::now());
            match &result {
                Ok(updates) => {
                    schedule.last_status = Some(RefreshStatus::Success {
                        regions: updates.len(),
                    });
                    schedule.error_count = 0;
                }
                Err(e) => {
                    schedule.last_status = Some(RefreshStatus::Failed {
                        error: e.to_string(),
                    });
                    schedule.error_count += 1;
                }
            }
        }

        match result {
            Ok(updates) => {
                self.board.apply(updates).await;
            }
            Err(e) => {
                tracing::error!(widget = name, error = %e, "refresh failed");
                self.board
                    .apply_fallback(widget.primary_region(), widget.fallback())
                    .await;
            }
        }

        true
    }

    /// Start the scheduler background task
    pub fn start(self: Arc<Self>) -> tokio::task::JoinHandle<()> {
        let scheduler = self.clone();

        tokio::spawn(async move {
            *scheduler.running.write().await = true;

            let mut interval = tokio::time::interval(TICK_INTERVAL);

            loop {
                interval.tick().await;

                if !*scheduler.running.read().await {
                    break;
                }

                scheduler.spawn_due_refreshes().await;
            }
        })
    }

    /// Stop the scheduler
    pub async fn stop(&self) {
        *self.running.write().await = false;
    }

    /// Spawn a refresh for every widget whose timer has elapsed.
    async fn spawn_due_refreshes(self: &Arc<Self>) {
        let now = Utc::now();
        let due: Vec<String> = {
            let schedules = self.schedules.read().await;
            schedules
                .iter()
                .filter(|(_, s)| s.next_refresh.map(|next| now >= next).unwrap_or(false))
                .map(|(name, _)| name.clone())
                .collect()
        };

        for name in due {
            let widget = match self.widgets.read().await.get(&name).cloned() {
                Some(w) => w,
                None => continue,
            };
            let seq = self.launch(&name).await;

            let scheduler = self.clone();
            tokio::spawn(async move {
                let result = widget.refresh(&scheduler.board).await;
                scheduler.complete(&widget, seq, result).await;
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{RegionContent, RegionUpdate};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicU32, Ordering};

    struct StubWidget {
        name: &'static str,
        interval: Option<Duration>,
        fail: bool,
        calls: AtomicU32,
    }

    impl StubWidget {
        fn ok(name: &'static str) -> Self {
            Self {
                name,
                interval: None,
                fail: false,
                calls: AtomicU32::new(0),
            }
        }

        fn failing(name: &'static str) -> Self {
            Self {
                fail: true,
                ..Self::ok(name)
            }
        }
    }

    #[async_trait]
    impl Widget for StubWidget {
        fn name(&self) -> &'static str {
            self.name
        }

        fn primary_region(&self) -> &'static str {
            self.name
        }

        fn refresh_interval(&self) -> Option<Duration> {
            self.interval
        }

        fn fallback(&self) -> &'static str {
            "stub unavailable"
        }

        async fn refresh(&self, _board: &Board) -> Result<Vec<RegionUpdate>, WidgetError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if self.fail {
                return Err(WidgetError::MissingField("stub"));
            }
            Ok(vec![RegionUpdate::new(
                self.name,
                RegionContent::text(format!("call {}", call)),
            )])
        }
    }

    #[tokio::test]
    async fn trigger_applies_updates_and_records_success() {
        let board = Board::new("floral");
        let scheduler = WidgetScheduler::new(board.clone());
        scheduler.register(Arc::new(StubWidget::ok("stub"))).await;

        scheduler.trigger("stub").await.unwrap();

        let state = board.region("stub").await.unwrap();
        assert_eq!(state.content, RegionContent::text("call 1"));
        assert!(!state.degraded);

        let status = scheduler.widget_status("stub").await.unwrap();
        assert!(matches!(
            status.last_status,
            Some(RefreshStatus::Success { regions: 1 })
        ));
        assert_eq!(status.error_count, 0);
    }

    #[tokio::test]
    async fn failure_writes_fallback_and_counts_errors() {
        let board = Board::new("floral");
        let scheduler = WidgetScheduler::new(board.clone());
        scheduler
            .register(Arc::new(StubWidget::failing("stub")))
            .await;

        scheduler.trigger("stub").await.unwrap();
        scheduler.trigger("stub").await.unwrap();

        let state = board.region("stub").await.unwrap();
        assert!(state.degraded);
        assert_eq!(state.content, RegionContent::text("stub unavailable"));

        let status = scheduler.widget_status("stub").await.unwrap();
        assert_eq!(status.error_count, 2);
    }

    #[tokio::test]
    async fn stale_completion_is_discarded() {
        let board = Board::new("floral");
        let scheduler = WidgetScheduler::new(board.clone());
        let widget: Arc<dyn Widget> = Arc::new(StubWidget::ok("stub"));
        scheduler.register(widget.clone()).await;

        // Two overlapping launches; the older one finishes last.
        let old_seq = scheduler.launch("stub").await;
        let new_seq = scheduler.launch("stub").await;

        let applied = scheduler
            .complete(
                &widget,
                new_seq,
                Ok(vec![RegionUpdate::new("stub", RegionContent::text("fresh"))]),
            )
            .await;
        assert!(applied);

        let applied = scheduler
            .complete(
                &widget,
                old_seq,
                Ok(vec![RegionUpdate::new("stub", RegionContent::text("stale"))]),
            )
            .await;
        assert!(!applied);

        let state = board.region("stub").await.unwrap();
        assert_eq!(state.content, RegionContent::text("fresh"));
    }

    #[tokio::test]
    async fn one_shot_widgets_are_not_rescheduled() {
        let board = Board::new("floral");
        let scheduler = WidgetScheduler::new(board);
        scheduler.register(Arc::new(StubWidget::ok("stub"))).await;

        assert!(scheduler
            .widget_status("stub")
            .await
            .unwrap()
            .next_refresh
            .is_some());

        scheduler.trigger("stub").await.unwrap();

        let status = scheduler.widget_status("stub").await.unwrap();
        assert!(status.next_refresh.is_none());
        assert!(status.interval_secs.is_none());
    }

    #[tokio::test]
    async fn periodic_widgets_get_a_next_refresh() {
        let board = Board::new("floral");
        let scheduler = WidgetScheduler::new(board);
        scheduler
            .register(Arc::new(StubWidget {
                interval: Some(Duration::from_secs(600)),
                ..StubWidget::ok("stub")
            }))
            .await;

        scheduler.trigger("stub").await.unwrap();

        let status = scheduler.widget_status("stub").await.unwrap();
        let next = status.next_refresh.unwrap();
        assert!(next > Utc::now() + chrono::Duration::seconds(590));
    }

    #[tokio::test]
    async fn unknown_widget_is_an_error() {
        let board = Board::new("floral");
        let scheduler = WidgetScheduler::new(board);
        assert!(matches!(
            scheduler.trigger("nope").await,
            Err(SchedulerError::UnknownWidget(_))
        ));
    }
}
