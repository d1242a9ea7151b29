// src/engine/descriptor.rs — Static catalog of wrapped coding-agent CLIs

/// Everything outboard knows about one wrapped tool, fixed at compile
/// time. The `id` is the sole lookup key and doubles as the default
/// state-directory name.
#[derive(Debug, Clone, Copy)]
pub struct EngineDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    /// Executable name resolved on PATH; never a full path.
    pub cli_binary: &'static str,
    /// Shown verbatim when the binary is missing. Never executed.
    pub install_command: &'static str,
    /// Argv tail appended to the binary for an interactive login.
    pub login_command: &'static [&'static str],
    /// Redirects all of the engine's state under one directory when set.
    pub home_env: &'static str,
    /// Key whose presence in `auth.json` marks a live login.
    pub credential_key: &'static str,
    /// Instructions file the engine reads from its config dir.
    /// `None` means the engine has nothing to sync.
    pub instructions_file: Option<&'static str>,
}

pub const BUILTIN: &[EngineDescriptor] = &[
    EngineDescriptor {
        id: "opencode",
        name: "OpenCode",
        description: "Open-source terminal coding agent",
        cli_binary: "opencode",
        install_command: "curl -fsSL https://opencode.ai/install | bash",
        login_command: &["auth", "login"],
        home_env: "OPENCODE_HOME",
        credential_key: "opencode",
        instructions_file: Some("AGENTS.md"),
    },
    EngineDescriptor {
        id: "crush",
        name: "Crush",
        description: "Charm's glamorous coding agent",
        cli_binary: "crush",
        install_command: "brew install charmbracelet/tap/crush",
        login_command: &["login"],
        home_env: "CRUSH_HOME",
        credential_key: "crush",
        instructions_file: Some("CRUSH.md"),
    },
    EngineDescriptor {
        id: "amp",
        name: "Amp",
        description: "Sourcegraph's agentic coding tool",
        cli_binary: "amp",
        install_command: "npm install -g @sourcegraph/amp",
        login_command: &["login"],
        home_env: "AMP_HOME",
        credential_key: "amp",
        // Amp reads instructions from the repo itself, nothing to mirror.
        instructions_file: None,
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_unique() {
        let mut ids: Vec<&str> = BUILTIN.iter().map(|d| d.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), BUILTIN.len());
    }

    #[test]
    fn test_builtin_login_commands_nonempty() {
        for desc in BUILTIN {
            assert!(!desc.login_command.is_empty(), "{} has no login", desc.id);
            assert!(!desc.home_env.is_empty());
            assert!(!desc.credential_key.is_empty());
        }
    }
}
