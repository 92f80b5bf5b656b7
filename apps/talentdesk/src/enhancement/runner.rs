use std::time::Duration;

use serde::Serialize;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::enhancement::scripted::{EnhancementInput, EnhancementResult, ResumeEnhancer};
use crate::errors::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressStep {
    pub progress: u8,
    pub message: &'static str,
}

/// The progress shown while an enhancement runs, one step per delay.
pub const ENHANCEMENT_STEPS: [ProgressStep; 6] = [
    ProgressStep {
        progress: 15,
        message: "Analyzing resume structure...",
    },
    ProgressStep {
        progress: 30,
        message: "Identifying skill gaps...",
    },
    ProgressStep {
        progress: 50,
        message: "Generating enhancement suggestions...",
    },
    ProgressStep {
        progress: 70,
        message: "Optimizing content for job requirements...",
    },
    ProgressStep {
        progress: 85,
        message: "Calculating improved fitment score...",
    },
    ProgressStep {
        progress: 100,
        message: "Enhancement complete!",
    },
];

/// Walks the progress steps, then asks the backend for the result.
///
/// Cancelling `cancel` at any point before the backend is called ends the run
/// with `AppError::Cancelled`; no partial result is produced.
pub async fn run_enhancement<F>(
    enhancer: &dyn ResumeEnhancer,
    input: &EnhancementInput,
    step_delay: Duration,
    cancel: &CancellationToken,
    mut on_progress: F,
) -> Result<EnhancementResult, AppError>
where
    F: FnMut(&ProgressStep),
{
    info!("Enhancement run started for candidate {}", input.candidate_id);

    for step in ENHANCEMENT_STEPS.iter() {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                info!(
                    "Enhancement run for candidate {} cancelled before {}%",
                    input.candidate_id, step.progress
                );
                return Err(AppError::Cancelled);
            }
            _ = sleep(step_delay) => {}
        }
        debug!("Enhancement progress {}%: {}", step.progress, step.message);
        on_progress(step);
    }

    let result = enhancer.enhance(input).await?;
    info!(
        "Enhancement run finished for candidate {}: {} missing skills",
        input.candidate_id,
        result.missing_skills.len()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enhancement::scripted::ScriptedEnhancer;
    use crate::models::ResumeRecord;

    fn input() -> EnhancementInput {
        EnhancementInput {
            candidate_id: "1".to_string(),
            base_score: 80,
            resume: ResumeRecord {
                name: "Janhavi Sharma".to_string(),
                skills: vec!["Java".to_string(), "React".to_string(), "SQL".to_string()],
                ..Default::default()
            },
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_reports_every_step_in_order() {
        let enhancer = ScriptedEnhancer::default();
        let cancel = CancellationToken::new();
        let mut seen = Vec::new();

        let result = run_enhancement(
            &enhancer,
            &input(),
            Duration::from_millis(800),
            &cancel,
            |step| seen.push(step.progress),
        )
        .await
        .unwrap();

        assert_eq!(seen, vec![15, 30, 50, 70, 85, 100]);
        assert_eq!(result.missing_skills, vec!["Git".to_string()]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_mid_run_stops_progress() {
        let enhancer = ScriptedEnhancer::default();
        let cancel = CancellationToken::new();
        let mut seen = Vec::new();

        let result = run_enhancement(
            &enhancer,
            &input(),
            Duration::from_millis(800),
            &cancel,
            |step| {
                seen.push(step.progress);
                if step.progress == 50 {
                    cancel.cancel();
                }
            },
        )
        .await;

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert_eq!(seen, vec![15, 30, 50]);
    }

    #[tokio::test]
    async fn test_cancelled_before_start_reports_nothing() {
        let enhancer = ScriptedEnhancer::default();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut calls = 0;

        let result = run_enhancement(&enhancer, &input(), Duration::ZERO, &cancel, |_| calls += 1).await;

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert_eq!(calls, 0);
    }
}
