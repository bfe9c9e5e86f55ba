//! # Pipeline Stages
//!
//! Tracks progress of a sequential crew run through its tasks.

use serde::{Deserialize, Serialize};

/// Stage of the pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    /// Running the task at this index
    Running(usize),
    /// Every task completed
    Complete,
    /// A task failed
    Failed,
}

/// The pipeline state machine
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Current stage
    pub stage: PipelineStage,
    /// Number of tasks in the run
    pub task_count: usize,
}

impl Pipeline {
    /// Create a pipeline over `task_count` tasks
    pub fn new(task_count: usize) -> Self {
        let stage = if task_count == 0 {
            PipelineStage::Complete
        } else {
            PipelineStage::Running(0)
        };
        Self { stage, task_count }
    }

    /// Index of the task currently running
    pub fn current(&self) -> Option<usize> {
        match self.stage {
            PipelineStage::Running(index) => Some(index),
            PipelineStage::Complete | PipelineStage::Failed => None,
        }
    }

    /// Advance to the next task
    pub fn advance(&mut self) {
        self.stage = match self.stage {
            PipelineStage::Running(index) if index + 1 < self.task_count => {
                PipelineStage::Running(index + 1)
            }
            PipelineStage::Running(_) => PipelineStage::Complete,
            PipelineStage::Complete => PipelineStage::Complete,
            PipelineStage::Failed => PipelineStage::Failed,
        };
    }

    /// Fail the pipeline
    pub fn fail(&mut self) {
        self.stage = PipelineStage::Failed;
    }

    /// Check if pipeline succeeded
    pub fn is_success(&self) -> bool {
        self.stage == PipelineStage::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pipeline_advance() {
        let mut pipeline = Pipeline::new(2);
        assert_eq!(pipeline.current(), Some(0));

        pipeline.advance();
        assert_eq!(pipeline.current(), Some(1));

        pipeline.advance();
        assert!(pipeline.is_success());
        assert_eq!(pipeline.current(), None);
    }

    #[test]
    fn test_failure_is_terminal() {
        let mut pipeline = Pipeline::new(2);
        pipeline.fail();
        pipeline.advance();
        assert_eq!(pipeline.current(), None);
        assert_eq!(pipeline.stage, PipelineStage::Failed);
        assert!(!pipeline.is_success());
    }

    #[test]
    fn test_empty_pipeline_is_complete() {
        assert!(Pipeline::new(0).is_success());
    }
}
