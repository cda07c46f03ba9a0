use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use dashmap::DashMap;
use log::debug;
use parking_lot::Mutex;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use traveller_core::{ApiObject, ClockId, ClockStatus, Resource, TestClock, Timestamp};
use traveller_ports::{RemoteError, RemoteResult, ResourceFetcher, TestClockService};
use uuid::Uuid;

use crate::config::SimConfig;

/// Remote calls the simulator serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Create,
    Advance,
    Retrieve,
    Delete,
    /// Generic object retrieval through [`ResourceFetcher`]
    FetchObject,
}

/// Clock plus the statuses it will report on upcoming retrievals
#[derive(Debug)]
struct SimClock {
    clock: TestClock,
    pending: VecDeque<ClockStatus>,
}

/// Object plus the snapshots it will turn into on upcoming retrievals
#[derive(Debug)]
struct SimObject {
    current: ApiObject,
    pending: VecDeque<ApiObject>,
}

/// In-memory test-clock service
///
/// Thread-safe; clones share state so a test can keep one handle for
/// inspection while a session owns another.
#[derive(Clone)]
pub struct SimulatedClockService {
    config: Arc<SimConfig>,
    clocks: Arc<DashMap<ClockId, SimClock>>,
    objects: Arc<DashMap<String, SimObject>>,
    /// Status sequences for upcoming advances, consumed one per advance
    scripts: Arc<Mutex<VecDeque<Vec<ClockStatus>>>>,
    /// One-shot failures, consumed by the next call of that operation
    failures: Arc<DashMap<Operation, RemoteError>>,
    calls: Arc<DashMap<Operation, usize>>,
}

impl SimulatedClockService {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config: Arc::new(config),
            clocks: Arc::new(DashMap::new()),
            objects: Arc::new(DashMap::new()),
            scripts: Arc::new(Mutex::new(VecDeque::new())),
            failures: Arc::new(DashMap::new()),
            calls: Arc::new(DashMap::new()),
        }
    }

    /// Script the statuses of the next unscripted advance.
    ///
    /// The advance call itself reports the first status, each following
    /// retrieval the next one; the last status then sticks.
    pub fn script_advance<I, S>(&self, statuses: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<ClockStatus>,
    {
        let statuses = statuses.into_iter().map(Into::into).collect();
        self.scripts.lock().push_back(statuses);
    }

    /// Make the next call of `operation` fail with `error`
    pub fn fail_next(&self, operation: Operation, error: RemoteError) {
        self.failures.insert(operation, error);
    }

    /// Number of calls received for `operation`, failed ones included
    pub fn calls(&self, operation: Operation) -> usize {
        self.calls.get(&operation).map(|c| *c.value()).unwrap_or(0)
    }

    pub fn clock(&self, id: &ClockId) -> Option<TestClock> {
        self.clocks.get(id).map(|c| c.value().clock.clone())
    }

    pub fn clock_count(&self) -> usize {
        self.clocks.len()
    }

    /// Create a domain object, optionally attached to a test clock.
    ///
    /// `fields` must be a JSON object; other values are ignored.
    pub fn create_object(
        &self,
        kind: &str,
        clock: Option<&ClockId>,
        fields: Value,
    ) -> RemoteResult<ApiObject> {
        let mut object = ApiObject::new(format!(
            "{}_{}",
            self.config.object_prefix,
            Uuid::new_v4().simple()
        ))
        .with_field("object", kind);

        if let Some(clock_id) = clock {
            if !self.clocks.contains_key(clock_id) {
                return Err(RemoteError::NotFound(clock_id.to_string()));
            }
            object = object.with_field("test_clock", clock_id.as_str());
        }

        if let Value::Object(fields) = fields {
            object.fields.extend(fields);
        }

        self.insert_object(object.clone());
        Ok(object)
    }

    /// Store an object as-is, replacing any previous version
    pub fn insert_object(&self, object: ApiObject) {
        self.objects.insert(
            object.id.clone(),
            SimObject {
                current: object,
                pending: VecDeque::new(),
            },
        );
    }

    /// Queue snapshots the object turns into, one per retrieval
    pub fn script_object(&self, id: &str, snapshots: Vec<ApiObject>) -> RemoteResult<()> {
        let mut entry = self
            .objects
            .get_mut(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;
        entry.pending.extend(snapshots);
        Ok(())
    }

    pub fn object(&self, id: &str) -> Option<ApiObject> {
        self.objects.get(id).map(|o| o.value().current.clone())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Id of the clock an object is attached to, if any
    pub fn clock_of(&self, object: &impl Resource) -> Option<ClockId> {
        self.objects
            .get(object.id())
            .and_then(|o| o.value().current.test_clock().map(ClockId::from))
    }

    /// Count the call and consume a scripted failure, if any
    fn begin(&self, operation: Operation) -> RemoteResult<()> {
        *self.calls.entry(operation).or_insert(0) += 1;
        match self.failures.remove(&operation) {
            Some((_, error)) => Err(error),
            None => Ok(()),
        }
    }

    fn next_sequence(&self) -> VecDeque<ClockStatus> {
        let scripted = self.scripts.lock().pop_front();
        match scripted {
            Some(statuses) if !statuses.is_empty() => statuses.into(),
            _ => {
                let mut statuses: VecDeque<ClockStatus> =
                    std::iter::repeat_n(ClockStatus::Advancing, self.config.settle_polls).collect();
                statuses.push_back(ClockStatus::Ready);
                statuses
            }
        }
    }
}

impl Default for SimulatedClockService {
    fn default() -> Self {
        Self::new(SimConfig::default())
    }
}

fn from_epoch(seconds: i64) -> RemoteResult<Timestamp> {
    Utc.timestamp_opt(seconds, 0)
        .single()
        .ok_or_else(|| RemoteError::Rejected(format!("Invalid frozen_time: {}", seconds)))
}

#[async_trait]
impl TestClockService for SimulatedClockService {
    async fn create(&self, frozen_time: i64) -> RemoteResult<TestClock> {
        self.begin(Operation::Create)?;

        let id = ClockId::new(format!(
            "{}_{}",
            self.config.clock_prefix,
            Uuid::new_v4().simple()
        ));
        let clock = TestClock::new(id.clone(), ClockStatus::Ready, from_epoch(frozen_time)?);

        debug!("Created simulated clock {} at {}", id, clock.frozen_time);
        self.clocks.insert(
            id,
            SimClock {
                clock: clock.clone(),
                pending: VecDeque::new(),
            },
        );
        Ok(clock)
    }

    async fn advance(&self, id: &ClockId, frozen_time: i64) -> RemoteResult<TestClock> {
        self.begin(Operation::Advance)?;
        let target = from_epoch(frozen_time)?;

        let mut entry = self
            .clocks
            .get_mut(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;

        if entry.clock.status.is_advancing() {
            return Err(RemoteError::Rejected(format!(
                "Clock {} is still advancing",
                id
            )));
        }
        if target < entry.clock.frozen_time {
            return Err(RemoteError::Rejected(format!(
                "Clock {} cannot move backwards to {}",
                id, target
            )));
        }

        let mut statuses = self.next_sequence();
        entry.clock.frozen_time = target;
        entry.clock.status = statuses.pop_front().unwrap_or(ClockStatus::Ready);
        entry.pending = statuses;

        debug!(
            "Simulated clock {} advancing to {} ({} pending statuses)",
            id,
            target,
            entry.pending.len()
        );
        Ok(entry.clock.clone())
    }

    async fn retrieve(&self, id: &ClockId) -> RemoteResult<TestClock> {
        self.begin(Operation::Retrieve)?;

        let mut entry = self
            .clocks
            .get_mut(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;

        if let Some(next) = entry.pending.pop_front() {
            entry.clock.status = next;
        }
        Ok(entry.clock.clone())
    }

    async fn delete(&self, id: &ClockId) -> RemoteResult<()> {
        self.begin(Operation::Delete)?;

        self.clocks
            .remove(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;

        let mut attached = 0usize;
        self.objects.retain(|_, object| {
            let keep = object.current.test_clock() != Some(id.as_str());
            if !keep {
                attached += 1;
            }
            keep
        });

        debug!(
            "Deleted simulated clock {} and {} attached objects",
            id, attached
        );
        Ok(())
    }
}

#[async_trait]
impl ResourceFetcher<ApiObject> for SimulatedClockService {
    async fn retrieve(&self, id: &str) -> RemoteResult<ApiObject> {
        self.begin(Operation::FetchObject)?;

        let mut entry = self
            .objects
            .get_mut(id)
            .ok_or_else(|| RemoteError::NotFound(id.to_string()))?;

        if let Some(next) = entry.pending.pop_front() {
            entry.current = next;
        }
        Ok(entry.current.clone())
    }
}

#[async_trait]
impl ResourceFetcher<TestClock> for SimulatedClockService {
    async fn retrieve(&self, id: &str) -> RemoteResult<TestClock> {
        TestClockService::retrieve(self, &ClockId::new(id)).await
    }
}
