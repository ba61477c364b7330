use anyhow::{bail, Context, Result};
use mimic_core::{CancelToken, RunSummary, SequenceRunner};
use mimic_model::{Catalog, DelayStep, InstanceId, Sequence, Step};
use mimic_store::{FlowRepository, KeyValueStore, SavedFlow};

#[cfg(feature = "logger")]
use mimic_logger::Logger;

/// Delay used when a delay step is added without a duration.
pub const DEFAULT_DELAY_MS: u64 = 1000;

/// Headless controller owning the current sequence and the saved flows.
///
/// This is the caller side of the runner contract: it owns the sequence
/// and applies every update the runner reports.
pub struct Workbench<S> {
    catalog: Catalog,
    sequence: Sequence,
    runner: SequenceRunner,
    flows: FlowRepository<S>,
    #[cfg(feature = "logger")]
    logger: Logger,
}

impl<S: KeyValueStore> Workbench<S> {
    pub fn new(catalog: Catalog, runner: SequenceRunner, flows: FlowRepository<S>) -> Self {
        Self {
            catalog,
            sequence: Sequence::new(),
            runner,
            flows,
            #[cfg(feature = "logger")]
            logger: Logger::new(),
        }
    }

    /// Replaces the logger, e.g. to pin the trace id.
    #[cfg(feature = "logger")]
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = logger;
        self
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    pub fn flows(&self) -> &[SavedFlow] {
        self.flows.list()
    }

    pub fn is_running(&self) -> bool {
        self.runner.is_running()
    }

    /// Appends the catalog item `item_id`.
    pub fn add_item(&mut self, item_id: &str) -> Result<InstanceId> {
        let item = self
            .catalog
            .get(item_id)
            .with_context(|| format!("Unknown catalog item: {item_id}"))?;
        Ok(self.sequence.push_item(item))
    }

    pub fn add_delay(&mut self) -> InstanceId {
        self.sequence.push_delay(DEFAULT_DELAY_MS)
    }

    /// Sets a delay's duration; negative input is clamped to zero.
    pub fn set_delay(&mut self, instance_id: &InstanceId, delay_ms: i64) -> Result<()> {
        let delay_ms = DelayStep::clamped(delay_ms).delay_ms;
        self.sequence.set_delay(instance_id, delay_ms)?;
        Ok(())
    }

    pub fn remove(&mut self, instance_id: &InstanceId) -> bool {
        self.sequence.remove(instance_id).is_some()
    }

    pub fn move_step(&mut self, from: usize, to: usize) -> Result<()> {
        self.sequence.move_step(from, to)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        self.sequence.clear();
    }

    pub async fn run(&mut self) -> RunSummary {
        let summary = self.runner.run_in_place(&mut self.sequence).await;
        self.report(&summary);
        summary
    }

    pub async fn run_with_cancel(&mut self, cancel: &CancelToken) -> RunSummary {
        let snapshot = self.sequence.steps().to_vec();
        let summary = self
            .runner
            .run_with_cancel(&snapshot, &mut self.sequence, cancel)
            .await;
        self.report(&summary);
        summary
    }

    /// Every step back to idle, clearing results and errors.
    pub fn reset(&mut self) {
        let snapshot: Vec<Step> = self.sequence.steps().to_vec();
        self.runner.reset(&snapshot, &mut self.sequence);
    }

    /// Saves the current sequence under `name`.
    pub fn save_current(&mut self, name: &str) -> Result<SavedFlow> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Flow name cannot be empty");
        }
        if self.sequence.is_empty() {
            bail!("Cannot save an empty sequence");
        }
        Ok(self.flows.save(name, self.sequence.steps())?)
    }

    /// Overwrites a saved flow with the current sequence.
    pub fn update_saved(&mut self, id: &str, name: &str) -> Result<SavedFlow> {
        let name = name.trim();
        if name.is_empty() {
            bail!("Flow name cannot be empty");
        }
        Ok(self.flows.update(id, name, self.sequence.steps())?)
    }

    pub fn delete_saved(&mut self, id: &str) -> Result<bool> {
        Ok(self.flows.delete(id)?)
    }

    /// Replaces the current sequence with a fresh copy of a saved flow.
    pub fn load_flow(&mut self, id: &str) -> Result<()> {
        self.sequence = self.flows.load_sequence(id)?;
        Ok(())
    }

    #[cfg(feature = "logger")]
    fn report(&self, summary: &RunSummary) {
        self.logger.log_run_summary(summary);
        self.logger.log_sequence_details(&self.sequence);
    }

    #[cfg(not(feature = "logger"))]
    fn report(&self, _summary: &RunSummary) {}

    /// Loads a saved flow and runs it.
    pub async fn run_saved(&mut self, id: &str) -> Result<RunSummary> {
        self.load_flow(id)?;
        Ok(self.run().await)
    }
}
