//! Shared fixtures: a small documents tree and a config file in a temp dir.

use clap::Parser;
use std::path::Path;
use tempfile::TempDir;
use trellis_cli::Cli;

const CORE: &str = "---
id: PRD-CORE
type: prd
feature: platform
---
# Core platform
";

const AUTH: &str = "---
id: PRD-AUTH
type: prd
parent: PRD-CORE
feature: auth
title: Authentication
---
# Authentication

The design lives in ARCH-AUTH. UNKNOWN-99 is not a document.
";

const ARCH: &str = "---
id: ARCH-AUTH
type: arch
parents: [PRD-AUTH]
feature: auth
---
# Auth architecture
";

const TASK: &str = "---
id: TASK-1
type: task
parent: ARCH-AUTH
status: open
---
# Wire up login
";

const LONELY: &str = "# Scratch notes\n\nNothing declared here.\n";

/// A temp dir holding `docs/` and `trellis.toml`.
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("temp dir");
        let docs = dir.path().join("docs");
        write(&docs.join("product/core.md"), CORE);
        write(&docs.join("product/auth.md"), AUTH);
        write(&docs.join("arch/auth.md"), ARCH);
        write(&docs.join("tasks/one.md"), TASK);
        write(&docs.join("notes/lonely.md"), LONELY);
        write(&docs.join("node_modules/pkg/readme.md"), "---\nid: SKIP-ME\n---\n");

        let config = format!("root = {:?}\n", docs.to_string_lossy());
        write(&dir.path().join("trellis.toml"), &config);
        Self { dir }
    }

    pub fn config_path(&self) -> String {
        self.dir.path().join("trellis.toml").to_string_lossy().into_owned()
    }

    /// Parses `args` as if given after `trellis --config <this config>`.
    pub fn cli(&self, args: &[&str]) -> Cli {
        let config = self.config_path();
        let argv = ["trellis", "--config", config.as_str()]
            .into_iter()
            .chain(args.iter().copied());
        Cli::try_parse_from(argv).expect("valid command line")
    }
}

fn write(path: &Path, content: &str) {
    std::fs::create_dir_all(path.parent().expect("parent")).expect("create dirs");
    std::fs::write(path, content).expect("write file");
}
