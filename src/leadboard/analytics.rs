//! # Aggregation Engine
//!
//! Dashboard metrics derived from the full lead set. [`compute_metrics`] is a pure function
//! and the reference answer for every number shown on the analytics view; it keeps no
//! state between calls.
//!
//! ## Metrics
//!
//! - `total_leads`: number of leads.
//! - `total_value`: sum of `value`, negative values included as-is.
//! - `closed_won`: leads whose status is `closed`. `lost` is a separate outcome and is not counted.
//! - `conversion_rate`: `closed_won / total_leads * 100`, rounded to one decimal; `0` for no leads.
//! - `status_counts`, `product_counts`, `source_counts`: observed value → count. A key exists only
//!   if some lead carries it; there are no zero entries.
//!
//! ## Caching
//!
//! The API's metrics cache remembers the last result together with the store revision it was computed
//! at and recomputes only when the store reports a newer revision. It always returns exactly
//! what [`compute_metrics`] would for the current snapshot.

use log::debug;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::error::Result;
use crate::model::{Lead, LeadStatus};
use crate::store::DataStore;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    pub total_leads: usize,
    pub total_value: f64,
    pub closed_won: usize,
    pub conversion_rate: f64,
    pub status_counts: BTreeMap<LeadStatus, usize>,
    pub product_counts: BTreeMap<String, usize>,
    pub source_counts: BTreeMap<String, usize>,
}

pub fn compute_metrics(leads: &[Lead]) -> Metrics {
    let total_leads = leads.len();
    let total_value = leads.iter().map(|l| l.value).sum();
    let closed_won = leads
        .iter()
        .filter(|l| l.status == LeadStatus::Closed)
        .count();

    let mut metrics = Metrics {
        total_leads,
        total_value,
        closed_won,
        conversion_rate: conversion_rate(closed_won, total_leads),
        ..Metrics::default()
    };

    for lead in leads {
        *metrics.status_counts.entry(lead.status).or_default() += 1;
        *metrics
            .product_counts
            .entry(lead.product.clone())
            .or_default() += 1;
        *metrics.source_counts.entry(lead.source.clone()).or_default() += 1;
    }

    metrics
}

/// Percentage of `total` that `won` represents, one decimal place. Zero when `total` is zero.
pub fn conversion_rate(won: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let rate = won as f64 / total as f64 * 100.0;
    (rate * 10.0).round() / 10.0
}

/// Bar length for `count` relative to the largest sibling, as a percentage.
pub fn bar_width_percent(count: usize, max: usize) -> f64 {
    if max > 0 {
        count as f64 / max as f64 * 100.0
    } else {
        0.0
    }
}

/// One row of a distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub count: usize,
    pub width_percent: f64,
}

/// Chart rows for a count mapping, scaled against its own maximum.
pub fn distribution<K: ToString>(counts: &BTreeMap<K, usize>) -> Vec<Bar> {
    let max = counts.values().copied().max().unwrap_or(0);
    counts
        .iter()
        .map(|(key, &count)| Bar {
            label: key.to_string(),
            count,
            width_percent: bar_width_percent(count, max),
        })
        .collect()
}

/// Count and value of one pipeline stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageSummary {
    pub status: LeadStatus,
    pub title: &'static str,
    pub count: usize,
    pub value: f64,
}

/// One summary per stage, in pipeline order, including empty stages.
pub fn stage_summaries(leads: &[Lead]) -> Vec<StageSummary> {
    LeadStatus::ALL
        .iter()
        .map(|&status| {
            let in_stage = leads.iter().filter(|l| l.status == status);
            let (count, value) = in_stage.fold((0, 0.0), |(n, v), l| (n + 1, v + l.value));
            StageSummary {
                status,
                title: status.title(),
                count,
                value,
            }
        })
        .collect()
}

/// Memoizes [`compute_metrics`] against a store's revision counter.
///
/// Revisions are only comparable within one store, so a cache must always be handed the
/// same store. [`crate::api::LeadsApi`] owns one cache per store it owns.
#[derive(Debug, Default)]
pub(crate) struct MetricsCache {
    cached: Option<(u64, Metrics)>,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Metrics for the store's current snapshot.
    pub fn get<S: DataStore>(&mut self, store: &S) -> Result<&Metrics> {
        let revision = store.revision();
        let metrics = match self.cached.take() {
            Some((seen, metrics)) if seen == revision => metrics,
            _ => {
                debug!("event=metrics_recompute revision={}", revision);
                compute_metrics(&store.list_leads()?)
            }
        };
        Ok(&self.cached.insert((revision, metrics)).1)
    }

    /// Revision the cached value was computed at, if any.
    pub fn revision(&self) -> Option<u64> {
        self.cached.as_ref().map(|(rev, _)| *rev)
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}
