//! Optional third-party SDK linkage
//!
//! Resolution runs in three stages:
//! 1. short-circuits that make the SDK unavailable without touching the
//!    filesystem (no rules, non-Win64 target, runtime variable unset),
//! 2. an ordered list of independent probes, all evaluated,
//! 3. one gate decision over the probes that guard linkage.
//!
//! The SDK include probe never takes part in the gate: headers can be
//! visible while the libraries are not.

use modlink_config::ThirdPartyRules;
use modlink_platform::{EntryKind, PathProber, ProbeResult};
use modlink_types::{BuildContext, IndexSet, SdkLink, TargetPlatform, ThirdPartyLinkage};
use serde::Serialize;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// What a single SDK probe looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SdkProbe {
    Includes,
    LibraryDir,
    RuntimeRoot,
    LibraryFile,
}

/// One evaluated probe and whether it guards linkage
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateCheck {
    pub probe: SdkProbe,
    pub result: ProbeResult,
    pub gates_link: bool,
}

impl GateCheck {
    #[must_use]
    pub fn passed(&self) -> bool {
        !self.gates_link || self.result.exists
    }
}

/// Everything the resolver learned about the SDK in one pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SdkEvaluation {
    /// The module declares no third-party SDK
    NotConfigured,
    UnsupportedPlatform { platform: TargetPlatform },
    RuntimeUnset { env_var: String },
    /// The runtime variable is set but is not an absolute Win64 path
    RuntimeNotAbsolute { env_var: String, value: String },
    Probed {
        sdk_root: PathBuf,
        runtime_root: PathBuf,
        checks: Vec<GateCheck>,
    },
}

impl SdkEvaluation {
    /// Whether every link-guarding probe succeeded
    #[must_use]
    pub fn gate_open(&self) -> bool {
        match self {
            Self::Probed { checks, .. } => checks.iter().all(GateCheck::passed),
            _ => false,
        }
    }
}

/// Whether `value` is absolute under Win64 rules, independent of the host
///
/// Accepts a drive prefix (`C:\` or `C:/`), a UNC prefix (`\\server`) or a
/// leading separator. Drive-relative values such as `C:ndi` are rejected.
fn is_win64_absolute(value: &str) -> bool {
    match value.as_bytes() {
        [drive, b':', b'\\' | b'/', ..] => drive.is_ascii_alphabetic(),
        [b'\\' | b'/', ..] => true,
        _ => false,
    }
}

/// Decides whether the optional SDK is linked and what that emits
pub struct ThirdPartyResolver<'a> {
    rules: Option<&'a ThirdPartyRules>,
}

impl<'a> ThirdPartyResolver<'a> {
    #[must_use]
    pub fn new(rules: Option<&'a ThirdPartyRules>) -> Self {
        Self { rules }
    }

    /// Run the short-circuits and probes without deciding anything
    #[must_use]
    pub fn evaluate(&self, ctx: &BuildContext, prober: &PathProber<'_>) -> SdkEvaluation {
        let Some(sdk) = self.rules else {
            return SdkEvaluation::NotConfigured;
        };

        if !ctx.platform().is_win64() {
            return SdkEvaluation::UnsupportedPlatform {
                platform: ctx.platform().clone(),
            };
        }

        let Some(value) = ctx.env_var(&sdk.runtime_env_var) else {
            return SdkEvaluation::RuntimeUnset {
                env_var: sdk.runtime_env_var.clone(),
            };
        };
        if !is_win64_absolute(value) {
            return SdkEvaluation::RuntimeNotAbsolute {
                env_var: sdk.runtime_env_var.clone(),
                value: value.to_string(),
            };
        }

        let runtime_root = PathBuf::from(value);
        let sdk_root = PathProber::join(ctx.module_root(), &[sdk.sdk_dir.as_str()]);
        let library_dir = PathProber::join(&sdk_root, &[sdk.library_dir.as_str()]);

        let mut checks = vec![
            GateCheck {
                probe: SdkProbe::Includes,
                result: prober.probe_dir(&sdk_root, &[sdk.include_dir.as_str()]),
                gates_link: false,
            },
            GateCheck {
                probe: SdkProbe::LibraryDir,
                result: prober.probe_path(library_dir.clone(), EntryKind::Directory),
                gates_link: true,
            },
            GateCheck {
                probe: SdkProbe::RuntimeRoot,
                result: prober.probe_path(runtime_root.clone(), EntryKind::Directory),
                gates_link: true,
            },
        ];
        checks.extend(sdk.static_libraries.iter().map(|lib| GateCheck {
            probe: SdkProbe::LibraryFile,
            result: prober.probe_file(&library_dir, &[lib.as_str()]),
            gates_link: sdk.require_library_files,
        }));

        SdkEvaluation::Probed {
            sdk_root,
            runtime_root,
            checks,
        }
    }

    /// Resolve the SDK linkage for `ctx`
    ///
    /// Never fails: every negative condition yields a linkage without link
    /// outputs.
    #[must_use]
    pub fn resolve(&self, ctx: &BuildContext, prober: &PathProber<'_>) -> ThirdPartyLinkage {
        let evaluation = self.evaluate(ctx, prober);
        self.decide(&evaluation)
    }

    /// Turn an evaluation into a linkage
    #[must_use]
    pub fn decide(&self, evaluation: &SdkEvaluation) -> ThirdPartyLinkage {
        let (sdk, sdk_root, runtime_root, checks) = match (self.rules, evaluation) {
            (
                Some(sdk),
                SdkEvaluation::Probed {
                    sdk_root,
                    runtime_root,
                    checks,
                },
            ) => (sdk, sdk_root, runtime_root, checks),
            (_, SdkEvaluation::UnsupportedPlatform { platform }) => {
                debug!(%platform, "third-party SDK not supported on platform");
                return ThirdPartyLinkage::unavailable();
            }
            (_, SdkEvaluation::RuntimeUnset { env_var }) => {
                info!(env_var = %env_var, "SDK runtime variable unset, SDK disabled");
                return ThirdPartyLinkage::unavailable();
            }
            (_, SdkEvaluation::RuntimeNotAbsolute { env_var, value }) => {
                warn!(env_var = %env_var, value = %value, "SDK runtime path is not absolute, SDK disabled");
                return ThirdPartyLinkage::unavailable();
            }
            _ => return ThirdPartyLinkage::unavailable(),
        };

        let include_path = checks
            .iter()
            .find(|c| c.probe == SdkProbe::Includes && c.result.exists)
            .map(|c| c.result.path.clone());

        for check in checks.iter().filter(|c| !c.result.exists) {
            match check.probe {
                SdkProbe::LibraryFile if !check.gates_link => {
                    warn!(path = %check.result.path.display(), "SDK library file missing");
                }
                probe => {
                    debug!(?probe, path = %check.result.path.display(), "SDK probe failed");
                }
            }
        }

        if !evaluation.gate_open() {
            info!(sdk_root = %sdk_root.display(), headers = include_path.is_some(), "SDK link gate closed");
            return ThirdPartyLinkage::new(include_path, None);
        }

        let library_dir = PathProber::join(sdk_root, &[sdk.library_dir.as_str()]);
        let link = SdkLink {
            static_libraries: sdk
                .static_libraries
                .iter()
                .map(|lib| PathProber::join(&library_dir, &[lib.as_str()]))
                .collect(),
            delay_loaded_libraries: sdk.delay_load_libraries.clone(),
            runtime_search_paths: vec![runtime_root.clone()],
            feature_defines: IndexSet::from([sdk.feature_define.clone()]),
        };
        info!(
            sdk_root = %sdk_root.display(),
            runtime_root = %runtime_root.display(),
            define = %sdk.feature_define,
            "SDK linked"
        );
        ThirdPartyLinkage::new(include_path, Some(link))
    }
}
