//! # Audit Orchestration
//!
//! The [`Auditor`] ties the pipeline together for each logical path:
//!
//! 1. **Resolve** the branch paths behind it ([`BranchResolver`]).
//! 2. **Collect** one metadata record per branch ([`metadata::collect`]).
//! 3. **Evaluate** whether the branches diverge ([`evaluate`]).
//! 4. **Report** the divergence ([`report`]).
//! 5. **Fix** it with the configured [`FixPolicy`].
//!
//! No state is carried from one logical path to the next, so the outcome for
//! a path does not depend on the walk order or on any earlier path.
//!
//! [`Auditor::run`] drives the pipeline over a whole tree with `walkdir`.
//! Failures that concern a single path are logged and counted; the walk goes
//! on. Only a broken output stream or an interrupt ends it early.

use crate::branches::BranchResolver;
use crate::error::{Error, Result};
use crate::evaluate::{evaluate, SkipReason, Verdict};
use crate::filesystem::BranchWriter;
use crate::fix::{FixContext, FixPolicy, Prompter};
use crate::metadata;
use crate::output::OutputConfig;
use crate::report;
use crate::xattr::AttributeChannel;
use log::{debug, error};
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use walkdir::WalkDir;

/// Run-wide settings, fixed before the walk starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuditConfig {
    pub verbose: bool,
    pub size_filter: bool,
    pub fix: FixPolicy,
}

impl AuditConfig {
    /// Build a configuration. Any fix policy other than no-op forces verbose
    /// output so the operator sees what is about to change.
    pub fn new(verbose: bool, size_filter: bool, fix: FixPolicy) -> Self {
        Self {
            verbose: verbose || !fix.is_noop(),
            size_filter,
            fix,
        }
    }
}

/// What happened to a single logical path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathOutcome {
    Skipped(SkipReason),
    Divergent,
}

/// Totals for a finished (or interrupted) walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AuditSummary {
    pub visited: usize,
    pub divergent: usize,
    pub errors: usize,
    pub interrupted: bool,
}

/// Audits logical paths of a mergerfs mount.
pub struct Auditor<'a, A> {
    config: AuditConfig,
    output: OutputConfig,
    resolver: BranchResolver<A>,
    writer: &'a mut dyn BranchWriter,
    prompter: &'a mut dyn Prompter,
    out: &'a mut dyn Write,
    interrupt: Option<Arc<AtomicBool>>,
}

impl<'a, A: AttributeChannel> Auditor<'a, A> {
    pub fn new(
        config: AuditConfig,
        attributes: A,
        writer: &'a mut dyn BranchWriter,
        prompter: &'a mut dyn Prompter,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            config,
            output: OutputConfig::plain(),
            resolver: BranchResolver::new(attributes),
            writer,
            prompter,
            out,
            interrupt: None,
        }
    }

    /// Style report headings according to `output`.
    pub fn with_output(mut self, output: OutputConfig) -> Self {
        self.output = output;
        self
    }

    /// Stop the walk at the next path once `flag` is set.
    pub fn with_interrupt(mut self, flag: Arc<AtomicBool>) -> Self {
        self.interrupt = Some(flag);
        self
    }

    /// Audit one logical path, reporting and fixing a divergence.
    pub fn audit_path(&mut self, logical: &Path) -> Result<PathOutcome> {
        let branches = self.resolver.resolve(logical)?;
        if branches.len() < 2 {
            return Ok(PathOutcome::Skipped(SkipReason::SingleBranch));
        }

        let records = metadata::collect(&branches)?;
        match evaluate(&records, self.config.size_filter) {
            Verdict::Skip(reason) => {
                debug!("Skipping {}: {:?}", logical.display(), reason);
                Ok(PathOutcome::Skipped(reason))
            }
            Verdict::Divergent => {
                report::write_divergence(
                    &mut *self.out,
                    &self.output,
                    logical,
                    &branches,
                    &records,
                    self.config.verbose,
                )
                .map_err(Error::Output)?;

                let mut ctx = FixContext {
                    writer: &mut *self.writer,
                    prompter: &mut *self.prompter,
                    out: &mut *self.out,
                };
                self.config.fix.apply(&branches, &records, &mut ctx)?;
                Ok(PathOutcome::Divergent)
            }
        }
    }

    /// Audit `root` and everything below it.
    ///
    /// `root` must itself be inside a mergerfs mount. Symlinks are not
    /// followed; every directory, file and link is audited in turn.
    pub fn run(&mut self, root: &Path) -> Result<AuditSummary> {
        if !self.resolver.is_mergerfs(root) {
            return Err(Error::NotMergerfs {
                path: root.to_path_buf(),
            });
        }

        let mut summary = AuditSummary::default();
        let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();

        for entry in walker {
            if self.interrupted() {
                summary.interrupted = true;
                break;
            }

            let logical = match entry {
                Ok(entry) => entry.into_path(),
                Err(e) => {
                    error!("{}", Error::Walk(e));
                    summary.errors += 1;
                    continue;
                }
            };

            summary.visited += 1;
            match self.audit_path(&logical) {
                Ok(PathOutcome::Divergent) => summary.divergent += 1,
                Ok(PathOutcome::Skipped(_)) => {}
                Err(e) if e.is_per_path() => {
                    error!("{}", e);
                    summary.errors += 1;
                }
                // Only a fix prompt is interrupted, after the path was reported.
                Err(Error::Interrupted) => {
                    summary.divergent += 1;
                    summary.interrupted = true;
                    break;
                }
                Err(e) => return Err(e),
            }
        }

        self.out.flush().map_err(Error::Output)?;
        Ok(summary)
    }

    fn interrupted(&self) -> bool {
        self.interrupt
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}
