use std::{collections::BTreeMap, time::Duration};

use cpsim_core::v16::types::{DiagnosticsStatus, FirmwareStatus};

use crate::v16::{cp::core::ChargePointCore, drivers::timers::TimerId};

use super::parking::ParkingSpot;

/// Owner of a group of scheduled steps. Cancelling a workflow cancels all of its steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) enum Workflow {
    Dispatcher,
    Firmware,
    Diagnostics,
    Reset,
    SelfTest,
    Parking,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Step {
    TriggerHeartbeat,
    TriggerStatus(Option<usize>),
    RemoteStart { connector_id: usize, id_tag: String },
    RemoteStop { connector_id: usize, transaction_id: i32 },
    Reboot,
    Firmware(FirmwareStatus),
    Diagnostics(DiagnosticsStatus),
    SelfTestPrepare(usize),
    SelfTestAuthorize(usize),
    SelfTestStop(usize),
    ParkingFree(usize),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ScheduledTask {
    pub workflow: Workflow,
    pub step: Step,
}

#[derive(Debug, Default)]
pub(crate) struct TaskTable {
    next_id: u64,
    tasks: BTreeMap<u64, ScheduledTask>,
}

impl TaskTable {
    fn insert(&mut self, task: ScheduledTask) -> u64 {
        self.next_id += 1;
        self.tasks.insert(self.next_id, task);
        self.next_id
    }

    fn take(&mut self, id: u64) -> Option<ScheduledTask> {
        self.tasks.remove(&id)
    }

    fn remove_workflow(&mut self, workflow: Workflow) -> Vec<u64> {
        let ids: Vec<u64> = self
            .tasks
            .iter()
            .filter(|(_, t)| t.workflow == workflow)
            .map(|(id, _)| *id)
            .collect();
        for id in &ids {
            self.tasks.remove(id);
        }
        ids
    }

    fn drain(&mut self) -> Vec<u64> {
        std::mem::take(&mut self.tasks).into_keys().collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }
}

impl ChargePointCore {
    pub(crate) fn schedule(&mut self, workflow: Workflow, delay: Duration, step: Step) {
        log::trace!("{:?}: {:?} in {:?}", workflow, step, delay);
        let id = self.tasks.insert(ScheduledTask { workflow, step });
        self.add_timeout(TimerId::Task(id), delay);
    }

    pub(crate) fn cancel_workflow(&mut self, workflow: Workflow) {
        for id in self.tasks.remove_workflow(workflow) {
            log::debug!("cancelled {:?} task {}", workflow, id);
            self.remove_timeout(TimerId::Task(id));
        }
    }

    pub(crate) fn cancel_all_tasks(&mut self) {
        for id in self.tasks.drain() {
            self.remove_timeout(TimerId::Task(id));
        }
    }

    pub(crate) fn run_task(&mut self, id: u64) {
        let Some(task) = self.tasks.take(id) else {
            log::debug!("task {} was cancelled", id);
            return;
        };
        match task.step {
            Step::TriggerHeartbeat => self.send_heartbeat(),
            Step::TriggerStatus(connector_id) => self.status_notification(connector_id),
            Step::RemoteStart {
                connector_id,
                id_tag,
            } => self.continue_remote_start(connector_id, id_tag),
            Step::RemoteStop {
                connector_id,
                transaction_id,
            } => self.continue_remote_stop(connector_id, transaction_id),
            Step::Reboot => self.send_boot_notification(),
            Step::Firmware(status) => self.send_firmware_status_notification(status),
            Step::Diagnostics(status) => self.send_diagnostics_status_notification(status),
            Step::SelfTestPrepare(connector_id) => self.self_test_prepare(connector_id),
            Step::SelfTestAuthorize(connector_id) => self.self_test_authorize(connector_id),
            Step::SelfTestStop(connector_id) => self.self_test_stop(connector_id),
            Step::ParkingFree(connector_id) => self.send_parking_spot(connector_id, ParkingSpot::Free),
        }
    }
}
