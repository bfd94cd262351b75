//! Per-document processing: calibrate, select, and optionally evaluate.
//!
//! This is the collaborator layer around the engine. Documents are
//! independent, so [`Pipeline::run_batch`] fans them out with rayon.

use crate::config::Config;
use crate::error::Result;
use crate::metrics::{MetricEngine, MetricReport};
use crate::profile::ScoreProfile;
use crate::segmentation::{BoundarySelector, Segmentation};
use log::debug;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

/// One document handed over by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Optional identifier echoed in the outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Number of units; inferred from `scores` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_count: Option<usize>,
    /// Boundary scores, one per gap between units.
    pub scores: Vec<f64>,
    /// Reference boundaries for evaluation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<Vec<usize>>,
}

impl Document {
    /// Creates an unlabelled document from raw scores.
    pub fn new(scores: Vec<f64>) -> Self {
        Self {
            id: None,
            unit_count: None,
            scores,
            reference: None,
        }
    }

    /// Attaches reference boundaries.
    pub fn with_reference(mut self, reference: Vec<usize>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Sets the identifier.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Validated score profile.
    pub fn profile(&self) -> Result<ScoreProfile> {
        match self.unit_count {
            Some(n) => ScoreProfile::with_unit_count(n, self.scores.clone()),
            None => ScoreProfile::new(self.scores.clone()),
        }
    }
}

/// Result of processing one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    /// Identifier copied from the document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Selected segmentation.
    pub segmentation: Segmentation,
    /// Metrics against the reference, when one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub report: Option<MetricReport>,
}

/// Macro-averaged metrics over evaluated documents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Documents that carried a reference.
    pub documents: usize,
    /// Mean boundary precision.
    pub precision: f64,
    /// Mean boundary recall.
    pub recall: f64,
    /// Mean boundary F1.
    pub f1: f64,
    /// Mean Pk.
    pub pk: f64,
    /// Mean WindowDiff.
    #[serde(rename = "windowdiff")]
    pub window_diff: f64,
}

impl BatchSummary {
    /// Averages the reports found in `outcomes`; `None` if none were evaluated.
    pub fn from_outcomes<'a, I>(outcomes: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a DocumentOutcome>,
    {
        let reports: Vec<&MetricReport> =
            outcomes.into_iter().filter_map(|o| o.report.as_ref()).collect();
        if reports.is_empty() {
            return None;
        }

        let n = reports.len() as f64;
        let mean = |f: fn(&MetricReport) -> f64| reports.iter().map(|r| f(r)).sum::<f64>() / n;

        Some(Self {
            documents: reports.len(),
            precision: mean(|r| r.precision),
            recall: mean(|r| r.recall),
            f1: mean(|r| r.f1),
            pk: mean(|r| r.pk),
            window_diff: mean(|r| r.window_diff),
        })
    }
}

/// Calibrate → select → compare for single documents or batches.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: Config,
    selector: BoundarySelector,
    metrics: MetricEngine,
}

impl Pipeline {
    /// Creates a pipeline, validating the configuration up front.
    pub fn new(config: Config) -> Result<Self> {
        config.calibration.validate()?;
        let selector = BoundarySelector::new(config.selection)?;
        let metrics = config.evaluation.metric_engine();
        Ok(Self {
            config,
            selector,
            metrics,
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Segments a profile without evaluating it.
    pub fn segment(&self, profile: &ScoreProfile) -> Result<Segmentation> {
        let calibrated = self.config.calibration.calibrate(profile)?;
        self.selector.select(&calibrated)
    }

    /// Processes one document.
    pub fn run(&self, document: &Document) -> Result<DocumentOutcome> {
        let profile = document.profile()?;
        let segmentation = self.segment(&profile)?;

        let report = match &document.reference {
            Some(boundaries) => {
                let reference = Segmentation::new(profile.unit_count(), boundaries.clone())?;
                Some(self.metrics.compare(&segmentation, &reference)?)
            }
            None => None,
        };

        debug!(
            "document {}: {} units -> {} segments{}",
            document.id.as_deref().unwrap_or("-"),
            profile.unit_count(),
            segmentation.segment_count(),
            report
                .map(|r| format!(" (f1={:.3}, pk={:.3}, windowdiff={:.3})", r.f1, r.pk, r.window_diff))
                .unwrap_or_default()
        );

        Ok(DocumentOutcome {
            id: document.id.clone(),
            segmentation,
            report,
        })
    }

    /// Processes documents in parallel, preserving input order.
    pub fn run_batch(&self, documents: &[Document]) -> Vec<Result<DocumentOutcome>> {
        documents.par_iter().map(|doc| self.run(doc)).collect()
    }
}
