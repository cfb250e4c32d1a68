#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Module dependency and conditional linkage resolution for modlink
//!
//! A resolution pass takes module rules and an immutable build context and
//! produces a `ModuleConfiguration`. The pass is synchronous, reads the
//! filesystem only through a `FileSystemProbe`, and caches nothing between
//! passes. Absence of the optional SDK is never an error; it shows up as a
//! configuration without link outputs.

mod aggregate;
mod dependencies;
mod linkage;

pub use aggregate::Aggregator;
pub use dependencies::DependencySetBuilder;
pub use linkage::{GateCheck, SdkEvaluation, SdkProbe, ThirdPartyResolver};

use modlink_config::ModuleRules;
use modlink_platform::{FileSystemProbe, PathProber, ProbeResult};
use modlink_types::{
    BuildContext, DependencySet, ModuleConfiguration, TargetPlatform, ThirdPartyLinkage,
};
use serde::Serialize;
use std::path::PathBuf;
use tracing::debug;

/// Every filesystem check a pass would make, without resolving
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeReport {
    pub module: String,
    pub platform: TargetPlatform,
    pub module_root: PathBuf,
    pub include_gates: Vec<ProbeResult>,
    pub sdk: SdkEvaluation,
    pub sdk_gate_open: bool,
}

/// Resolver for one module's rules against a filesystem
pub struct ModuleResolver<'a> {
    rules: &'a ModuleRules,
    fs: &'a dyn FileSystemProbe,
}

impl<'a> ModuleResolver<'a> {
    #[must_use]
    pub fn new(rules: &'a ModuleRules, fs: &'a dyn FileSystemProbe) -> Self {
        Self { rules, fs }
    }

    fn prober(&self) -> PathProber<'a> {
        PathProber::new(self.fs)
    }

    /// Module names and include paths for `ctx`
    #[must_use]
    pub fn dependencies(&self, ctx: &BuildContext) -> DependencySet {
        DependencySetBuilder::new(self.rules).build(ctx, &self.prober())
    }

    /// Probe outcomes for the optional SDK, without a decision
    #[must_use]
    pub fn evaluate_sdk(&self, ctx: &BuildContext) -> SdkEvaluation {
        ThirdPartyResolver::new(self.rules.third_party.as_ref()).evaluate(ctx, &self.prober())
    }

    /// Linkage of the optional SDK for `ctx`
    #[must_use]
    pub fn third_party(&self, ctx: &BuildContext) -> ThirdPartyLinkage {
        ThirdPartyResolver::new(self.rules.third_party.as_ref()).resolve(ctx, &self.prober())
    }

    /// Probe outcomes for include gates and the SDK
    #[must_use]
    pub fn probe(&self, ctx: &BuildContext) -> ProbeReport {
        let sdk = self.evaluate_sdk(ctx);
        ProbeReport {
            module: self.rules.name.clone(),
            platform: ctx.platform().clone(),
            module_root: ctx.module_root().to_path_buf(),
            include_gates: DependencySetBuilder::new(self.rules).gate_probes(ctx, &self.prober()),
            sdk_gate_open: sdk.gate_open(),
            sdk,
        }
    }

    /// Full resolution pass
    #[must_use]
    pub fn resolve(&self, ctx: &BuildContext) -> ModuleConfiguration {
        debug!(
            module = %self.rules.name,
            platform = %ctx.platform(),
            editor = ctx.is_editor_build(),
            root = %ctx.module_root().display(),
            "resolving module"
        );
        let deps = self.dependencies(ctx);
        let linkage = self.third_party(ctx);
        Aggregator::new(self.rules).merge(deps, &linkage, ctx)
    }
}

/// Resolve `rules` for `ctx` in one call
#[must_use]
pub fn resolve_module(
    rules: &ModuleRules,
    ctx: &BuildContext,
    fs: &dyn FileSystemProbe,
) -> ModuleConfiguration {
    ModuleResolver::new(rules, fs).resolve(ctx)
}
