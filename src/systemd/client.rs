//! Centralized `systemctl` client.
//!
//! All systemd interactions go through [`UnitBus`]. [`SystemctlClient`] is the
//! production implementation and the single point where
//! `Command::new("systemctl")` is constructed.

use super::SystemdError;
use crate::config::SystemdConfig;
use crate::service::LifecycleCommand;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::process::Output;

/// Which systemd instance to talk to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scope {
    /// The system manager (PID 1).
    #[default]
    System,
    /// The calling user's manager (`systemctl --user`).
    User,
}

/// One row of `systemctl list-unit-files`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitFileEntry {
    pub unit: String,
    pub state: String,
}

/// Session with a systemd manager.
///
/// Each call is one blocking round trip. Implementations hold no per-unit
/// state; all knowledge lives in systemd.
pub trait UnitBus: Send + Sync + fmt::Debug {
    /// Every installed service unit file.
    fn list_unit_files(&self) -> Result<Vec<UnitFileEntry>, SystemdError>;

    /// Reads the named properties of `unit`.
    ///
    /// Properties systemd does not report are absent from the result.
    fn properties(&self, unit: &str, names: &[&str])
        -> Result<HashMap<String, String>, SystemdError>;

    /// Enqueues a start, stop or restart job for `unit` and returns without
    /// waiting for the job to finish.
    fn send(&self, command: LifecycleCommand, unit: &str) -> Result<(), SystemdError>;
}

/// [`UnitBus`] backed by the `systemctl` binary.
#[derive(Debug, Clone)]
pub struct SystemctlClient {
    program: PathBuf,
    scope: Scope,
}

impl SystemctlClient {
    pub fn new(scope: Scope) -> Self {
        Self {
            program: PathBuf::from("systemctl"),
            scope,
        }
    }

    pub fn system() -> Self {
        Self::new(Scope::System)
    }

    pub fn from_config(config: &SystemdConfig) -> Self {
        let mut client = Self::new(config.scope);
        if let Some(program) = &config.systemctl {
            client.program = program.clone();
        }
        client
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    // ========================================================================
    // Internal helpers
    // ========================================================================

    fn command_line(&self, args: &[&str]) -> String {
        let mut parts = vec![self.program.display().to_string()];
        if self.scope == Scope::User {
            parts.push("--user".to_string());
        }
        parts.extend(args.iter().map(|arg| arg.to_string()));
        parts.join(" ")
    }

    /// Run systemctl, returning raw Output.
    fn run(&self, args: &[&str]) -> Result<Output, SystemdError> {
        let mut command = std::process::Command::new(&self.program);
        if self.scope == Scope::User {
            command.arg("--user");
        }
        let cmd_str = self.command_line(args);
        tracing::debug!("Running '{}'", cmd_str);
        command
            .args(args)
            .output()
            .map_err(|e| SystemdError::exec_failed(cmd_str, e))
    }

    /// Run systemctl, returning stdout only if exit 0.
    fn run_success(&self, args: &[&str]) -> Result<String, SystemdError> {
        let output = self.run(args)?;
        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(SystemdError::failed(self.command_line(args), &output))
        }
    }
}

impl Default for SystemctlClient {
    fn default() -> Self {
        Self::system()
    }
}

impl UnitBus for SystemctlClient {
    fn list_unit_files(&self) -> Result<Vec<UnitFileEntry>, SystemdError> {
        let args = [
            "list-unit-files",
            "--type=service",
            "--no-legend",
            "--no-pager",
            "--plain",
        ];
        let stdout = self.run_success(&args)?;
        parse_unit_file_list(&stdout).map_err(|line| {
            SystemdError::unexpected_output(self.command_line(&args), line)
        })
    }

    fn properties(
        &self,
        unit: &str,
        names: &[&str],
    ) -> Result<HashMap<String, String>, SystemdError> {
        let property_list = names.join(",");
        let property_arg = format!("--property={}", property_list);
        let args = ["show", property_arg.as_str(), "--no-pager", unit];
        let stdout = self.run_success(&args)?;
        parse_properties(&stdout).map_err(|line| {
            SystemdError::unexpected_output(self.command_line(&args), line)
        })
    }

    fn send(&self, command: LifecycleCommand, unit: &str) -> Result<(), SystemdError> {
        let verb = command.to_string();
        let args = ["--no-block", verb.as_str(), unit];
        self.run_success(&args)?;
        Ok(())
    }
}

/// Parses `list-unit-files --no-legend` output. Returns the offending line on
/// failure.
pub(crate) fn parse_unit_file_list(stdout: &str) -> Result<Vec<UnitFileEntry>, String> {
    let mut entries = Vec::new();
    for line in stdout.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        match (fields.next(), fields.next()) {
            (Some(unit), Some(state)) => entries.push(UnitFileEntry {
                unit: unit.to_string(),
                state: state.to_string(),
            }),
            _ => return Err(line.to_string()),
        }
    }
    Ok(entries)
}

/// Parses `show` output (`Key=Value` per line). Returns the offending line on
/// failure.
///
/// Exec properties are printed once per command; repeated keys are joined
/// with newlines in the order systemd listed them.
pub(crate) fn parse_properties(stdout: &str) -> Result<HashMap<String, String>, String> {
    let mut properties: HashMap<String, String> = HashMap::new();
    for line in stdout.lines() {
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = line.split_once('=').ok_or_else(|| line.to_string())?;
        match properties.get_mut(key) {
            Some(existing) => {
                existing.push('\n');
                existing.push_str(value);
            }
            None => {
                properties.insert(key.to_string(), value.to_string());
            }
        }
    }
    Ok(properties)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_unit_file_rows() {
        let stdout = "\
web@.service            indirect enabled
web@app1.service        enabled  enabled
sshd.service            enabled  disabled

";
        let entries = parse_unit_file_list(stdout).unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].unit, "web@.service");
        assert_eq!(entries[0].state, "indirect");
        assert_eq!(entries[1].unit, "web@app1.service");
    }

    #[test]
    fn rejects_malformed_unit_file_row() {
        let err = parse_unit_file_list("lonely\n").unwrap_err();
        assert_eq!(err, "lonely");
    }

    #[test]
    fn parses_properties_with_equals_in_value() {
        let stdout = "ActiveState=active\nExecStart={ path=/usr/bin/env ; argv[]=/usr/bin/env FOO=bar }\n";
        let props = parse_properties(stdout).unwrap();
        assert_eq!(props["ActiveState"], "active");
        assert_eq!(
            props["ExecStart"],
            "{ path=/usr/bin/env ; argv[]=/usr/bin/env FOO=bar }"
        );
    }

    #[test]
    fn keeps_every_command_of_repeated_exec_property() {
        let stdout = "\
ExecStartPre={ path=/bin/a ; argv[]=/bin/a }
ExecStartPre={ path=/bin/b ; argv[]=/bin/b }
ExecStart={ path=/usr/bin/web ; argv[]=/usr/bin/web }
";
        let props = parse_properties(stdout).unwrap();
        assert_eq!(
            props["ExecStartPre"],
            "{ path=/bin/a ; argv[]=/bin/a }\n{ path=/bin/b ; argv[]=/bin/b }"
        );
        assert_eq!(props["ExecStart"], "{ path=/usr/bin/web ; argv[]=/usr/bin/web }");
    }

    #[test]
    fn user_scope_adds_flag_to_command_line() {
        let client = SystemctlClient::new(Scope::User);
        assert_eq!(
            client.command_line(&["start", "web@a.service"]),
            "systemctl --user start web@a.service"
        );
        assert_eq!(
            SystemctlClient::system().command_line(&["show"]),
            "systemctl show"
        );
    }

    #[test]
    fn config_overrides_program() {
        let config = SystemdConfig {
            scope: Scope::User,
            systemctl: Some(PathBuf::from("/opt/bin/systemctl")),
        };
        let client = SystemctlClient::from_config(&config);
        assert_eq!(client.scope(), Scope::User);
        assert!(client.command_line(&[]).starts_with("/opt/bin/systemctl --user"));
    }
}
