//! Command status state machine.

/// Lifecycle state of one command entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CommandStatus {
    /// Command has been added and is still executing.
    #[default]
    Running,
    /// Command finished without error.
    Succeeded,
    /// Command finished with an error.
    Failed,
}

impl CommandStatus {
    /// Status a finished command lands in.
    pub fn finished(success: bool) -> Self {
        if success {
            Self::Succeeded
        } else {
            Self::Failed
        }
    }

    /// Check if transition to target state is valid.
    ///
    /// Valid transitions:
    /// - Running -> Succeeded
    /// - Running -> Failed
    pub fn can_transition_to(&self, target: CommandStatus) -> bool {
        use CommandStatus::*;
        matches!((*self, target), (Running, Succeeded) | (Running, Failed))
    }

    /// Attempt to transition to a new state.
    pub fn transition_to(&mut self, target: CommandStatus) -> crate::Result<()> {
        if self.can_transition_to(target) {
            *self = target;
            Ok(())
        } else {
            Err(crate::error::WalletShellError::InvalidStatusTransition {
                from: *self,
                to: target,
            })
        }
    }

    /// Check if the command has finished.
    pub fn is_finished(&self) -> bool {
        !matches!(self, CommandStatus::Running)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        let mut status = CommandStatus::Running;
        assert!(status.transition_to(CommandStatus::Succeeded).is_ok());
        assert_eq!(status, CommandStatus::Succeeded);

        let mut status = CommandStatus::Running;
        assert!(status.transition_to(CommandStatus::Failed).is_ok());
        assert_eq!(status, CommandStatus::Failed);
    }

    #[test]
    fn test_finished_is_final() {
        let mut status = CommandStatus::Succeeded;
        assert!(status.transition_to(CommandStatus::Failed).is_err());
        assert!(status.transition_to(CommandStatus::Running).is_err());
        assert_eq!(status, CommandStatus::Succeeded);
    }

    #[test]
    fn test_finished_constructor() {
        assert_eq!(CommandStatus::finished(true), CommandStatus::Succeeded);
        assert_eq!(CommandStatus::finished(false), CommandStatus::Failed);
    }

    #[test]
    fn test_is_finished() {
        assert!(!CommandStatus::Running.is_finished());
        assert!(CommandStatus::Succeeded.is_finished());
        assert!(CommandStatus::Failed.is_finished());
    }

    #[test]
    fn test_default() {
        assert_eq!(CommandStatus::default(), CommandStatus::Running);
    }
}
