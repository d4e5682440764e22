//! Image Builder component document
//!
//! The component submitted by the image pipeline is a fixed two-phase
//! document: a `build` phase that patches the OS and a `validate` phase that
//! reads back the last patch date. Image Builder consumes it as an opaque
//! YAML blob, so the serialized field names here must match the document
//! schema exactly.

use serde::{Deserialize, Serialize};
use skylift_cloud::{CloudError, Result};

/// Top-level component document (schemaVersion 1.0)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComponentDocument {
    pub name: String,
    #[serde(rename = "schemaVersion")]
    pub schema_version: String,
    pub phases: Vec<Phase>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    pub action: String,
    pub inputs: StepInputs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepInputs {
    pub commands: Vec<String>,
}

impl ComponentDocument {
    /// Serialize to the YAML blob Image Builder expects
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self)
            .map_err(|e| CloudError::InvalidConfig(format!("component document: {e}")))
    }
}

/// Patch and validation commands for one distribution family
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchCommands {
    /// Package manager invocation that applies pending updates
    pub update: String,

    /// Command that reads back when the image was last patched
    pub last_patch_date: String,
}

/// Select the patch commands for a platform and image name.
///
/// Debian-family images get apt, RPM-family images get yum, and anything
/// unrecognized falls back to a no-op echo so the pipeline still runs.
pub fn patch_commands(platform: &str, image_name: &str) -> PatchCommands {
    if platform == "Linux" {
        if image_name.contains("Ubuntu") || image_name.contains("Debian") {
            return PatchCommands {
                update: "apt update -y".to_string(),
                last_patch_date:
                    "cat /var/log/apt/history.log | grep 'End-Date' | tail -1".to_string(),
            };
        }
        if image_name.contains("Amazon") || image_name.contains("Centos") {
            return PatchCommands {
                update: "yum -y update".to_string(),
                last_patch_date: "grep 'Updated:' /var/log/yum.log | tail -1".to_string(),
            };
        }
    }

    PatchCommands {
        update: "echo Patching stage".to_string(),
        last_patch_date: "echo Validation stage".to_string(),
    }
}

/// Build the full two-phase patch/validate document for a platform and
/// image name.
pub fn patch_document(platform: &str, image_name: &str) -> ComponentDocument {
    let commands = patch_commands(platform, image_name);

    ComponentDocument {
        name: "PatchAndValidate".to_string(),
        schema_version: "1.0".to_string(),
        phases: vec![
            Phase {
                name: "build".to_string(),
                steps: vec![Step {
                    name: "Patching".to_string(),
                    action: "ExecuteBash".to_string(),
                    inputs: StepInputs {
                        commands: vec![
                            "echo 'Start patching stage...'".to_string(),
                            commands.update,
                            "sleep 10".to_string(),
                        ],
                    },
                }],
            },
            Phase {
                name: "validate".to_string(),
                steps: vec![Step {
                    name: "LastPatchDate".to_string(),
                    action: "ExecuteBash".to_string(),
                    inputs: StepInputs {
                        commands: vec![
                            "echo 'Start validation stage...'".to_string(),
                            commands.last_patch_date,
                        ],
                    },
                }],
            },
        ],
    }
}
