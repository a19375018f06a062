//! Upload wizard step machine.
//!
//! `CollectMedia -> CollectMetadata -> CollectDistribution -> Complete`.
//! Leaving `CollectMedia` requires both cover art and audio. `Complete` is
//! only reachable through [`WizardController::submit`] followed by the
//! simulated upload reporting completion.

use serde::Serialize;
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    draft::UploadDraft,
    upload::{UploadEvent, UploadSimulation, UploadTask},
};

pub const FORM_STEPS: u8 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardState {
    CollectMedia,
    CollectMetadata,
    CollectDistribution,
    Complete,
}

impl WizardState {
    /// 1-based step number as shown in the "Step n of 3" header.
    pub fn step_number(self) -> u8 {
        match self {
            WizardState::CollectMedia => 1,
            WizardState::CollectMetadata => 2,
            WizardState::CollectDistribution => 3,
            WizardState::Complete => 4,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardState::CollectMedia => "Upload Files",
            WizardState::CollectMetadata => "Track Details",
            WizardState::CollectDistribution => "Distribution",
            WizardState::Complete => "Upload Complete",
        }
    }

    fn previous(self) -> Option<Self> {
        match self {
            WizardState::CollectMetadata => Some(WizardState::CollectMedia),
            WizardState::CollectDistribution => Some(WizardState::CollectMetadata),
            WizardState::CollectMedia | WizardState::Complete => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error("cover image and audio file are required (cover: {cover}, audio: {audio})")]
    RequiredMediaMissing { cover: bool, audio: bool },
    #[error("cannot {action} from {from:?}")]
    InvalidTransition {
        from: WizardState,
        action: &'static str,
    },
    #[error("the distribution agreement must be accepted before submitting")]
    AgreementNotAccepted,
    #[error("an upload is already in progress")]
    UploadInProgress,
    #[error("the draft cannot be edited in {0:?}")]
    DraftLocked(WizardState),
    #[error("no async runtime is available to run the upload")]
    NoRuntime,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    StepChanged(WizardState),
    UploadStarted { upload_id: Uuid },
    UploadProgress(u8),
    UploadCancelled,
    Completed,
    Reset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepMarker {
    Done,
    Current,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepIndicator {
    pub current: u8,
    pub total: u8,
    pub markers: Vec<StepMarker>,
}

impl StepIndicator {
    pub fn label(&self) -> String {
        format!("Step {} of {}", self.current, self.total)
    }
}

pub struct WizardController {
    state: WizardState,
    draft: UploadDraft,
    progress: u8,
    active_upload: Option<UploadTask>,
    simulation: UploadSimulation,
    events: broadcast::Sender<WizardEvent>,
}

impl Default for WizardController {
    fn default() -> Self {
        Self::new(UploadSimulation::default())
    }
}

impl WizardController {
    pub fn new(simulation: UploadSimulation) -> Self {
        let (events, _) = broadcast::channel(128);
        Self {
            state: WizardState::CollectMedia,
            draft: UploadDraft::default(),
            progress: 0,
            active_upload: None,
            simulation,
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<WizardEvent> {
        self.events.subscribe()
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn draft(&self) -> &UploadDraft {
        &self.draft
    }

    pub fn progress(&self) -> u8 {
        self.progress
    }

    pub fn is_uploading(&self) -> bool {
        self.active_upload.is_some()
    }

    pub fn progress_message(&self) -> Option<&'static str> {
        if !self.is_uploading() {
            return None;
        }
        Some(if self.progress < 100 {
            "Please wait while we upload your track..."
        } else {
            "Upload complete! Finalizing..."
        })
    }

    /// Header indicator; absent once the wizard is complete.
    pub fn step_indicator(&self) -> Option<StepIndicator> {
        if self.state == WizardState::Complete {
            return None;
        }
        let current = self.state.step_number();
        let markers = (1..=FORM_STEPS)
            .map(|step| match step.cmp(&current) {
                std::cmp::Ordering::Less => StepMarker::Done,
                std::cmp::Ordering::Equal => StepMarker::Current,
                std::cmp::Ordering::Greater => StepMarker::Pending,
            })
            .collect();
        Some(StepIndicator {
            current,
            total: FORM_STEPS,
            markers,
        })
    }

    /// Applies an edit to the draft while a form step is showing.
    pub fn edit<T>(&mut self, apply: impl FnOnce(&mut UploadDraft) -> T) -> Result<T, WizardError> {
        if self.state == WizardState::Complete || self.is_uploading() {
            warn!(state = ?self.state, "rejected draft edit");
            return Err(WizardError::DraftLocked(self.state));
        }
        Ok(apply(&mut self.draft))
    }

    fn check_media(&self) -> Result<(), WizardError> {
        let cover = self.draft.cover_image().is_some();
        let audio = self.draft.audio_file().is_some();
        if cover && audio {
            Ok(())
        } else {
            Err(WizardError::RequiredMediaMissing { cover, audio })
        }
    }

    fn check_advance(&self) -> Result<WizardState, WizardError> {
        if self.is_uploading() {
            return Err(WizardError::UploadInProgress);
        }
        match self.state {
            WizardState::CollectMedia => self
                .check_media()
                .map(|()| WizardState::CollectMetadata),
            WizardState::CollectMetadata => Ok(WizardState::CollectDistribution),
            WizardState::CollectDistribution | WizardState::Complete => {
                Err(WizardError::InvalidTransition {
                    from: self.state,
                    action: "advance",
                })
            }
        }
    }

    /// Whether the Continue control should be enabled.
    pub fn can_advance(&self) -> bool {
        self.check_advance().is_ok()
    }

    pub fn advance(&mut self) -> Result<WizardState, WizardError> {
        let next = self.check_advance().inspect_err(|err| {
            debug!(state = ?self.state, %err, "advance blocked");
        })?;
        self.transition(next);
        Ok(next)
    }

    /// Steps back one form page. Returns `false` when there is nowhere to go.
    pub fn retreat(&mut self) -> bool {
        if self.is_uploading() {
            return false;
        }
        match self.state.previous() {
            Some(previous) => {
                self.transition(previous);
                true
            }
            None => false,
        }
    }

    /// Starts the simulated upload from the distribution step and returns
    /// its id. The controller owns the running upload.
    ///
    /// Media removed on a later step is caught here as well.
    pub fn submit(&mut self) -> Result<Uuid, WizardError> {
        if self.is_uploading() {
            return Err(WizardError::UploadInProgress);
        }
        if self.state != WizardState::CollectDistribution {
            return Err(WizardError::InvalidTransition {
                from: self.state,
                action: "submit",
            });
        }
        self.check_media().inspect_err(|err| {
            warn!(%err, "submit blocked");
        })?;
        if !self.draft.agreement_accepted {
            return Err(WizardError::AgreementNotAccepted);
        }

        let task = UploadTask::spawn(self.simulation).map_err(|err| {
            warn!(%err, "cannot start upload");
            WizardError::NoRuntime
        })?;
        let upload_id = task.id();
        self.progress = 0;
        self.active_upload = Some(task);
        info!(
            %upload_id,
            title = %self.draft.title,
            platforms = self.draft.selected_platforms().count(),
            "release submitted"
        );
        self.publish(WizardEvent::UploadStarted { upload_id });
        Ok(upload_id)
    }

    pub fn upload_id(&self) -> Option<Uuid> {
        self.active_upload.as_ref().map(UploadTask::id)
    }

    /// Feeds one event from the running upload into the wizard.
    pub fn apply_upload_event(&mut self, event: UploadEvent) -> WizardState {
        if !self.is_uploading() {
            warn!(?event, "ignoring upload event with no active upload");
            return self.state;
        }
        match event {
            UploadEvent::Progress(value) => {
                self.progress = value.min(100);
                self.publish(WizardEvent::UploadProgress(self.progress));
            }
            UploadEvent::Finished => {
                self.progress = 100;
                self.active_upload = None;
                self.transition(WizardState::Complete);
                info!("upload finished");
                self.publish(WizardEvent::Completed);
            }
        }
        self.state
    }

    /// Waits for the running upload's next event and applies it.
    ///
    /// Returns `None` when nothing is uploading. If the upload stops without
    /// finishing, it is treated as cancelled and `None` is returned.
    pub async fn next_upload_event(&mut self) -> Option<UploadEvent> {
        let task = self.active_upload.as_mut()?;
        let upload_id = task.id();
        match task.next_event().await {
            Some(event) => {
                self.apply_upload_event(event);
                Some(event)
            }
            None => {
                warn!(%upload_id, "upload stopped before finishing");
                self.stop_upload();
                None
            }
        }
    }

    /// Drives the running upload until it completes or stops.
    pub async fn run_upload(&mut self) -> WizardState {
        while self.next_upload_event().await.is_some() {}
        self.state
    }

    /// Aborts a running upload and returns to the distribution step.
    pub fn cancel_upload(&mut self) -> bool {
        if !self.is_uploading() {
            return false;
        }
        info!("upload cancelled");
        self.stop_upload();
        true
    }

    fn stop_upload(&mut self) {
        if let Some(task) = self.active_upload.take() {
            task.cancel();
        }
        self.progress = 0;
        self.publish(WizardEvent::UploadCancelled);
    }

    /// Discards the draft and starts over.
    pub fn reset(&mut self) {
        self.draft = UploadDraft::default();
        self.progress = 0;
        self.active_upload = None;
        self.state = WizardState::CollectMedia;
        debug!("wizard reset");
        self.publish(WizardEvent::Reset);
    }

    fn transition(&mut self, next: WizardState) {
        debug!(from = ?self.state, to = ?next, "wizard transition");
        self.state = next;
        self.publish(WizardEvent::StepChanged(next));
    }

    fn publish(&self, event: WizardEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}

#[cfg(test)]
#[path = "tests/wizard_tests.rs"]
mod tests;
