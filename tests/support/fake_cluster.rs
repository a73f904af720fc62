// ABOUTME: In-memory cluster implementing the adapter traits.
// ABOUTME: Records every call and fails or stalls on demand.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::num::NonZeroU32;
use std::time::Duration;

use kubeship::cluster::{ClusterError, RolloutOps, WorkloadMutation, WorkloadQuery, WorkloadState};
use kubeship::types::{ImageRef, Namespace, WorkloadName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Exists,
    CountRunningPods,
    Describe,
    Create { image: String, replicas: u32 },
    Expose { port: u16 },
    UpdateImage { image: String },
    Scale { replicas: u32 },
    AwaitRollout,
}

impl Call {
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            Call::Create { .. } | Call::Expose { .. } | Call::UpdateImage { .. } | Call::Scale { .. }
        )
    }
}

/// What `await_rollout` does.
#[derive(Debug, Clone)]
pub enum Rollout {
    Converge,
    Fail(ClusterError),
    /// Never returns; only the caller's own bound ends the wait.
    Hang,
    Panic,
}

#[derive(Debug)]
struct State {
    exists: bool,
    desired: u32,
    image: Option<String>,
    running_pods: Option<u32>,
    calls: Vec<Call>,
    exists_failure: Option<ClusterError>,
    count_failure: Option<ClusterError>,
    create_failure: Option<ClusterError>,
    expose_failure: Option<ClusterError>,
    update_image_failures: VecDeque<ClusterError>,
    scale_failures: VecDeque<ClusterError>,
    rollout: Rollout,
}

#[derive(Debug)]
pub struct FakeCluster {
    state: Mutex<State>,
}

impl Default for FakeCluster {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeCluster {
    /// Empty cluster: the workload does not exist.
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                exists: false,
                desired: 0,
                image: None,
                running_pods: None,
                calls: Vec::new(),
                exists_failure: None,
                count_failure: None,
                create_failure: None,
                expose_failure: None,
                update_image_failures: VecDeque::new(),
                scale_failures: VecDeque::new(),
                rollout: Rollout::Converge,
            }),
        }
    }

    /// Cluster where the workload already runs `replicas` pods of `image`.
    pub fn existing(image: &str, replicas: u32) -> Self {
        let cluster = Self::new();
        {
            let mut state = cluster.state.lock();
            state.exists = true;
            state.desired = replicas;
            state.image = Some(image.to_string());
        }
        cluster
    }

    /// Pin the running pod count instead of following the desired count.
    pub fn with_running_pods(self, count: u32) -> Self {
        self.state.lock().running_pods = Some(count);
        self
    }

    pub fn with_rollout(self, rollout: Rollout) -> Self {
        self.state.lock().rollout = rollout;
        self
    }

    pub fn failing_exists(self, error: ClusterError) -> Self {
        self.state.lock().exists_failure = Some(error);
        self
    }

    pub fn failing_count(self, error: ClusterError) -> Self {
        self.state.lock().count_failure = Some(error);
        self
    }

    pub fn failing_create(self, error: ClusterError) -> Self {
        self.state.lock().create_failure = Some(error);
        self
    }

    pub fn failing_expose(self, error: ClusterError) -> Self {
        self.state.lock().expose_failure = Some(error);
        self
    }

    /// Queue a failure for the next `update_image` call.
    pub fn failing_update_image(self, error: ClusterError) -> Self {
        self.state.lock().update_image_failures.push_back(error);
        self
    }

    /// Queue a failure for the next `scale` call.
    pub fn failing_scale(self, error: ClusterError) -> Self {
        self.state.lock().scale_failures.push_back(error);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().calls.clone()
    }

    pub fn count_calls(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.state.lock().calls.iter().filter(|c| pred(c)).count()
    }

    pub fn exists(&self) -> bool {
        self.state.lock().exists
    }

    pub fn desired_replicas(&self) -> u32 {
        self.state.lock().desired
    }

    pub fn image(&self) -> Option<String> {
        self.state.lock().image.clone()
    }

    fn record(&self, call: Call) {
        self.state.lock().calls.push(call);
    }
}

#[async_trait]
impl WorkloadQuery for FakeCluster {
    async fn workload_exists(
        &self,
        _name: &WorkloadName,
        _namespace: &Namespace,
    ) -> Result<bool, ClusterError> {
        self.record(Call::Exists);
        let state = self.state.lock();
        match &state.exists_failure {
            Some(e) => Err(e.clone()),
            None => Ok(state.exists),
        }
    }

    async fn count_running_pods(
        &self,
        _name: &WorkloadName,
        _namespace: &Namespace,
    ) -> Result<u32, ClusterError> {
        self.record(Call::CountRunningPods);
        let state = self.state.lock();
        if let Some(e) = &state.count_failure {
            return Err(e.clone());
        }
        Ok(state.running_pods.unwrap_or(state.desired))
    }

    async fn describe(
        &self,
        _name: &WorkloadName,
        _namespace: &Namespace,
    ) -> Result<Option<WorkloadState>, ClusterError> {
        self.record(Call::Describe);
        let state = self.state.lock();
        if !state.exists {
            return Ok(None);
        }
        let replicas = state.desired as i32;
        Ok(Some(WorkloadState {
            image: state.image.clone(),
            replicas,
            updated_replicas: replicas,
            ready_replicas: replicas,
            available_replicas: replicas,
        }))
    }
}

#[async_trait]
impl WorkloadMutation for FakeCluster {
    async fn create_workload(
        &self,
        _name: &WorkloadName,
        _namespace: &Namespace,
        image: &ImageRef,
        replicas: NonZeroU32,
    ) -> Result<(), ClusterError> {
        self.record(Call::Create {
            image: image.to_string(),
            replicas: replicas.get(),
        });
        let mut state = self.state.lock();
        if let Some(e) = &state.create_failure {
            return Err(e.clone());
        }
        if state.exists {
            return Err(ClusterError::AlreadyExists("web".to_string()));
        }
        state.exists = true;
        state.desired = replicas.get();
        state.image = Some(image.to_string());
        Ok(())
    }

    async fn expose_endpoint(
        &self,
        _name: &WorkloadName,
        _namespace: &Namespace,
        port: u16,
    ) -> Result<(), ClusterError> {
        self.record(Call::Expose { port });
        match &self.state.lock().expose_failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }

    async fn update_image(
        &self,
        name: &WorkloadName,
        _namespace: &Namespace,
        image: &ImageRef,
    ) -> Result<(), ClusterError> {
        self.record(Call::UpdateImage {
            image: image.to_string(),
        });
        let mut state = self.state.lock();
        if let Some(e) = state.update_image_failures.pop_front() {
            return Err(e);
        }
        if !state.exists {
            return Err(ClusterError::NotFound(name.to_string()));
        }
        state.image = Some(image.to_string());
        Ok(())
    }

    async fn scale(
        &self,
        name: &WorkloadName,
        _namespace: &Namespace,
        replicas: NonZeroU32,
    ) -> Result<(), ClusterError> {
        self.record(Call::Scale {
            replicas: replicas.get(),
        });
        let mut state = self.state.lock();
        if let Some(e) = state.scale_failures.pop_front() {
            return Err(e);
        }
        if !state.exists {
            return Err(ClusterError::NotFound(name.to_string()));
        }
        state.desired = replicas.get();
        Ok(())
    }
}

#[async_trait]
impl RolloutOps for FakeCluster {
    async fn await_rollout(
        &self,
        _name: &WorkloadName,
        _namespace: &Namespace,
        _timeout: Duration,
    ) -> Result<(), ClusterError> {
        self.record(Call::AwaitRollout);
        let rollout = self.state.lock().rollout.clone();
        match rollout {
            Rollout::Converge => Ok(()),
            Rollout::Fail(e) => Err(e),
            Rollout::Hang => std::future::pending().await,
            Rollout::Panic => panic!("rollout watcher crashed"),
        }
    }
}
