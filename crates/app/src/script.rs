//! Wizard Scripts
//!
//! A script is a YAML list of [`WizardEvent`]s replayed against a wizard,
//! e.g.
//!
//! ```yaml
//! - action: select_type
//!   type: percent_order
//! - action: continue
//! - action: set
//!   field: percentage
//!   value: 15
//! ```

use std::{fs, io, path::Path};

use emporium::prelude::{PromotionDraft, Wizard, WizardError, WizardEvent, WizardStep};
use thiserror::Error;
use tracing::debug;

/// Errors loading or replaying a script.
#[derive(Debug, Error)]
pub enum ScriptError {
    /// The script file could not be read.
    #[error("failed to read script {path}: {source}")]
    Io {
        /// Script path.
        path: String,

        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The script is not a valid event list.
    #[error("invalid script: {0}")]
    Parse(#[from] serde_norway::Error),

    /// An event was rejected by the wizard.
    #[error("event {position} ({action}) rejected: {source}")]
    Event {
        /// One-based position of the event in the script.
        position: usize,

        /// Event action name.
        action: &'static str,

        /// Wizard error.
        #[source]
        source: WizardError,
    },

    /// The wizard could not reach the campaign step after the last event.
    #[error(transparent)]
    Wizard(#[from] WizardError),
}

/// Ordered list of recorded wizard interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardScript {
    events: Vec<WizardEvent>,
}

impl WizardScript {
    /// Parse a script from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`ScriptError::Parse`] for malformed YAML or unknown actions.
    pub fn parse(yaml: &str) -> Result<Self, ScriptError> {
        Ok(Self {
            events: serde_norway::from_str(yaml)?,
        })
    }

    /// Read and parse a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let yaml = fs::read_to_string(path).map_err(|source| ScriptError::Io {
            path: path.display().to_string(),
            source,
        })?;

        Self::parse(&yaml)
    }

    /// Events in replay order.
    #[must_use]
    pub fn events(&self) -> &[WizardEvent] {
        &self.events
    }

    /// Replay every event, then continue until the campaign step and hand
    /// over the finished draft.
    ///
    /// # Errors
    ///
    /// Returns the first rejected event, or the error that stopped the wizard
    /// from finishing.
    pub fn run(&self, wizard: &mut Wizard) -> Result<PromotionDraft, ScriptError> {
        for (position, event) in self.events.iter().enumerate() {
            debug!(position = position + 1, action = action_name(event), "replaying event");

            wizard
                .dispatch(event)
                .map_err(|source| ScriptError::Event {
                    position: position + 1,
                    action: action_name(event),
                    source,
                })?;
        }

        while wizard.step() != WizardStep::Campaign {
            wizard.advance()?;
        }

        Ok(wizard.finish()?)
    }
}

fn action_name(event: &WizardEvent) -> &'static str {
    match event {
        WizardEvent::SelectType { .. } => "select_type",
        WizardEvent::Continue => "continue",
        WizardEvent::Back => "back",
        WizardEvent::Set { .. } => "set",
        WizardEvent::AddCondition { .. } => "add_condition",
        WizardEvent::UpdateCondition { .. } => "update_condition",
        WizardEvent::RemoveCondition { .. } => "remove_condition",
    }
}
