//! Names used by the built-in module rules
//!
//! These mirror the NDI I/O plugin layout. A config file can override any of
//! them per module; the constants only seed the defaults.

pub const CORE_MODULE: &str = "NDIIO";
pub const EDITOR_MODULE: &str = "NDIIOEditor";

pub const PUBLIC_DIR: &str = "Public";
pub const PRIVATE_DIR: &str = "Private";

pub const SDK_DIR: &str = "ThirdParty/NDI";
pub const SDK_INCLUDE_DIR: &str = "Includes";
pub const SDK_LIBRARY_DIR: &str = "Libraries/Win64";

pub const RUNTIME_ENV_VAR: &str = "NDI_RUNTIME_DIR_V4";

pub const SDK_STATIC_LIBRARY: &str = "Processing.NDI.Lib.x64.lib";
pub const SDK_DYNAMIC_LIBRARY: &str = "Processing.NDI.Lib.x64.dll";

pub const SDK_FEATURE_DEFINE: &str = "NDI_SDK_ENABLED";

/// File name looked up under the user config directory
pub const CONFIG_FILE: &str = "modlink/config.toml";
