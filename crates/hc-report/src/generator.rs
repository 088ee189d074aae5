//! Report orchestrator.
//!
//! Runs validate, title, pods, nodes, claims, and finalize strictly in that
//! order. Only scope validation, composition, and storage can fail a run; a
//! failed fetch for one section degrades that section to a sentinel and is
//! recorded in the [`RunSummary`].

use crate::backend::{PdfBackend, RenderBackend};
use crate::compose::ReportDocument;
use crate::config::ReportConfig;
use crate::error::{ReportError, Result};
use crate::format::{
    filter_events_by_sub_object, format_events, format_log_lines, format_simple_pvc_names,
    format_taints, DisplayField, CLAIMS_UNAVAILABLE, EVENTS_UNAVAILABLE, LOGS_UNAVAILABLE,
    NODE_DETAIL_UNAVAILABLE, NOT_SCHEDULED,
};
use crate::kind::ReportKind;
use crate::sections::{NodePage, PodDetailPage, PodLogsPage, PvcPage};
use crate::store::{report_file_name, ReportStore};
use chrono::{DateTime, Local};
use hc_client::ResourceSource;
use hc_common::{ConditionScan, NodeDetail, CLAIM_OBJECT_KIND};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt::Display;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Scope printed on the test report.
pub const SAMPLE_SCOPE: &str = "SAMPLE-NAMESPACE";

/// A section rendered with sentinel content because a fetch failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DegradedSection {
    /// Section identifier, e.g. `pod.logs`.
    pub section: String,
    /// Pod, node, claim, or namespace the section is about.
    pub subject: String,
    /// Fetch error message.
    pub reason: String,
}

/// Counts and degradations of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub pods: usize,
    pub nodes: usize,
    pub claims: usize,
    pub pages: usize,
    pub degraded: Vec<DegradedSection>,
}

impl RunSummary {
    /// Whether any section fell back to a fetch-failure sentinel.
    pub fn is_degraded(&self) -> bool {
        !self.degraded.is_empty()
    }

    /// Expected page count for the rendered sections.
    pub fn expected_pages(&self) -> usize {
        1 + 2 * self.pods + self.nodes + self.claims
    }

    fn degrade(&mut self, section: &str, subject: &str, reason: impl Display) {
        let reason = reason.to_string();
        warn!(section, subject, reason = %reason, "section degraded");
        self.degraded.push(DegradedSection {
            section: section.to_string(),
            subject: subject.to_string(),
            reason,
        });
    }
}

/// A composed but not yet serialized report.
#[derive(Debug)]
pub struct ComposedReport<B: RenderBackend> {
    pub document: ReportDocument<B>,
    pub summary: RunSummary,
}

/// A report written to the store.
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedReport {
    pub kind: ReportKind,
    pub scope: String,
    /// File name inside the store directory.
    pub file_name: String,
    pub path: PathBuf,
    pub pages: usize,
    pub generated_at: DateTime<Local>,
    pub summary: RunSummary,
}

/// Node details fetched during one run; each node is fetched at most once.
#[derive(Debug, Default)]
struct NodeCache {
    entries: HashMap<String, std::result::Result<NodeDetail, String>>,
}

impl NodeCache {
    fn get<S: ResourceSource>(
        &mut self,
        source: &S,
        node: &str,
    ) -> std::result::Result<&NodeDetail, String> {
        self.entries
            .entry(node.to_string())
            .or_insert_with(|| {
                debug!(node, "fetching node detail");
                source.node_detail(node).map_err(|err| err.to_string())
            })
            .as_ref()
            .map_err(Clone::clone)
    }
}

#[derive(Debug, Default)]
struct RunState {
    summary: RunSummary,
    nodes: NodeCache,
}

/// Report generator over a resource source.
pub struct ReportGenerator<S: ResourceSource> {
    source: S,
    config: ReportConfig,
}

impl<S: ResourceSource> ReportGenerator<S> {
    /// Create a new report generator.
    pub fn new(source: S, config: ReportConfig) -> Self {
        Self { source, config }
    }

    /// Get the current configuration.
    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Generate, render, and store the health check of `namespace`.
    pub fn generate_health_check(&self, namespace: &str) -> Result<GeneratedReport> {
        self.config.validate()?;
        let generated_at = Local::now();
        let backend = PdfBackend::new(self.config.layout.font_size);
        let composed = self.compose_health_check(namespace, generated_at, backend)?;
        self.store(ReportKind::HealthCheck, namespace, generated_at, composed)
    }

    /// Generate, render, and store the test report.
    pub fn generate_test_report(&self) -> Result<GeneratedReport> {
        self.config.validate()?;
        let generated_at = Local::now();
        let backend = PdfBackend::new(self.config.layout.font_size);
        let composed = self.compose_test_report(generated_at, backend)?;
        self.store(ReportKind::Test, SAMPLE_SCOPE, generated_at, composed)
    }

    /// Compose the health check of `namespace` onto `backend`.
    ///
    /// Fails with [`ReportError::ScopeNotFound`] before any page exists when
    /// the namespace is not listed.
    pub fn compose_health_check<B: RenderBackend>(
        &self,
        namespace: &str,
        generated_at: DateTime<Local>,
        backend: B,
    ) -> Result<ComposedReport<B>> {
        self.validate_scope(namespace)?;

        let mut document =
            ReportDocument::begin(backend, &self.config.templates, &self.config.layout)?;
        document.add_title_page(namespace, &generated_at)?;

        let mut run = RunState::default();
        self.compose_pods(&mut document, namespace, &mut run)?;
        self.compose_nodes(&mut document, &mut run)?;
        self.compose_claims(&mut document, namespace, &mut run)?;

        let mut summary = run.summary;
        summary.pages = document.page_count();
        info!(
            namespace,
            pods = summary.pods,
            nodes = summary.nodes,
            claims = summary.claims,
            pages = summary.pages,
            degraded = summary.degraded.len(),
            "health check composed"
        );
        Ok(ComposedReport { document, summary })
    }

    /// Compose one page of each kind from fixed sample data.
    pub fn compose_test_report<B: RenderBackend>(
        &self,
        generated_at: DateTime<Local>,
        backend: B,
    ) -> Result<ComposedReport<B>> {
        let mut document =
            ReportDocument::begin(backend, &self.config.templates, &self.config.layout)?;
        document.add_title_page(SAMPLE_SCOPE, &generated_at)?;
        document.add_pod_detail_page(&PodDetailPage::sample())?;
        document.add_pod_logs_page(&PodLogsPage::sample())?;
        document.add_node_page(&NodePage::sample())?;
        document.add_pvc_page(&PvcPage::sample())?;

        let summary = RunSummary {
            pods: 1,
            nodes: 1,
            claims: 1,
            pages: document.page_count(),
            degraded: Vec::new(),
        };
        info!(pages = summary.pages, "test report composed");
        Ok(ComposedReport { document, summary })
    }

    fn validate_scope(&self, namespace: &str) -> Result<()> {
        match self.source.namespace_exists(namespace) {
            Ok(true) => Ok(()),
            Ok(false) => {
                warn!(namespace, "namespace not found");
                Err(ReportError::ScopeNotFound {
                    namespace: namespace.to_string(),
                })
            }
            Err(source) => {
                warn!(namespace, error = %source, "failed to list namespaces");
                Err(ReportError::ScopeLookup {
                    namespace: namespace.to_string(),
                    source,
                })
            }
        }
    }

    fn compose_pods<B: RenderBackend>(
        &self,
        document: &mut ReportDocument<B>,
        namespace: &str,
        run: &mut RunState,
    ) -> Result<()> {
        let pods = match self.source.pods(namespace) {
            Ok(list) => list.pods,
            Err(err) => {
                run.summary.degrade("pods", namespace, &err);
                return Ok(());
            }
        };
        debug!(namespace, count = pods.len(), "composing pod pages");

        for pod in &pods {
            let name = pod.object_meta.name.as_str();

            let logs = match self.source.pod_logs(namespace, name) {
                Ok(details) => DisplayField::Lines(format_log_lines(&details.logs)),
                Err(err) => {
                    run.summary.degrade("pod.logs", name, &err);
                    DisplayField::Lines(vec![LOGS_UNAVAILABLE.to_string()])
                }
            };
            let events = match self.source.pod_events(namespace, name) {
                Ok(list) => DisplayField::Lines(format_events(&list.events)),
                Err(err) => {
                    run.summary.degrade("pod.events", name, &err);
                    DisplayField::Lines(vec![EVENTS_UNAVAILABLE.to_string()])
                }
            };
            let claims = match self.source.pod_claims(namespace, name) {
                Ok(list) => DisplayField::Text(format_simple_pvc_names(&list.items)),
                Err(err) => {
                    run.summary.degrade("pod.claims", name, &err);
                    DisplayField::Text(CLAIMS_UNAVAILABLE.to_string())
                }
            };
            let taints = if pod.node_name.is_empty() {
                DisplayField::Text(NOT_SCHEDULED.to_string())
            } else {
                match run.nodes.get(&self.source, &pod.node_name) {
                    Ok(detail) => DisplayField::Text(format_taints(&detail.taints)),
                    Err(reason) => {
                        run.summary.degrade("pod.taints", name, reason);
                        DisplayField::Text(NODE_DETAIL_UNAVAILABLE.to_string())
                    }
                }
            };

            document.add_pod_detail_page(&PodDetailPage::new(pod, taints, claims, events))?;
            document.add_pod_logs_page(&PodLogsPage::new(pod, logs))?;
            run.summary.pods += 1;
        }
        Ok(())
    }

    fn compose_nodes<B: RenderBackend>(
        &self,
        document: &mut ReportDocument<B>,
        run: &mut RunState,
    ) -> Result<()> {
        let nodes = match self.source.nodes() {
            Ok(list) => list.nodes,
            Err(err) => {
                run.summary.degrade("nodes", "cluster", &err);
                return Ok(());
            }
        };
        debug!(count = nodes.len(), "composing node pages");

        for node in &nodes {
            let name = node.object_meta.name.as_str();
            let page = match run.nodes.get(&self.source, name) {
                Ok(detail) => {
                    let scan = ConditionScan::scan(&detail.conditions);
                    for kind in scan.duplicates() {
                        warn!(node = name, condition = %kind, "duplicate condition kind, first entry wins");
                    }
                    NodePage::new(node, detail, &scan)
                }
                Err(reason) => {
                    run.summary.degrade("node.detail", name, reason);
                    NodePage::unavailable(node)
                }
            };
            document.add_node_page(&page)?;
            run.summary.nodes += 1;
        }
        Ok(())
    }

    fn compose_claims<B: RenderBackend>(
        &self,
        document: &mut ReportDocument<B>,
        namespace: &str,
        run: &mut RunState,
    ) -> Result<()> {
        let claims = match self.source.claims(namespace) {
            Ok(list) => list.items,
            Err(err) => {
                run.summary.degrade("claims", namespace, &err);
                return Ok(());
            }
        };
        if claims.is_empty() {
            return Ok(());
        }
        debug!(namespace, count = claims.len(), "composing claim pages");

        // One namespace feed serves every claim page.
        let feed = match self.source.events(namespace) {
            Ok(list) => Some(list.events),
            Err(err) => {
                run.summary.degrade("claims.events", namespace, &err);
                None
            }
        };

        for claim in &claims {
            let events = match &feed {
                Some(events) => DisplayField::Lines(format_events(&filter_events_by_sub_object(
                    events,
                    CLAIM_OBJECT_KIND,
                    &claim.object_meta.name,
                ))),
                None => DisplayField::Lines(vec![EVENTS_UNAVAILABLE.to_string()]),
            };
            document.add_pvc_page(&PvcPage::new(claim, events))?;
            run.summary.claims += 1;
        }
        Ok(())
    }

    fn store<B: RenderBackend>(
        &self,
        kind: ReportKind,
        scope: &str,
        generated_at: DateTime<Local>,
        composed: ComposedReport<B>,
    ) -> Result<GeneratedReport> {
        let ComposedReport { document, summary } = composed;
        let bytes = document.finish()?;
        let requested = report_file_name(kind, scope, &generated_at);
        let path = ReportStore::new(&self.config.output_dir).write(&requested, &bytes)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or(requested);

        info!(
            kind = %kind,
            scope,
            file = %file_name,
            pages = summary.pages,
            degraded = summary.degraded.len(),
            "report generated"
        );
        Ok(GeneratedReport {
            kind,
            scope: scope.to_string(),
            file_name,
            path,
            pages: summary.pages,
            generated_at,
            summary,
        })
    }
}
