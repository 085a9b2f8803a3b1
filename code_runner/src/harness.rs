//! The Node.js side of the sandbox.
//!
//! [`HARNESS_JS`] is written next to the submission in a fresh temp dir and
//! started as `node harness.cjs <check|run> <file> <timeout_ms> <max_logs>`.
//! It prints exactly one JSON line, parsed here into a [`HarnessReport`].

use serde::Deserialize;

/// Harness script. The submission runs inside a `vm` context whose only
/// globals are a capturing `console` and `globalThis`.
pub const HARNESS_JS: &str = r##"
"use strict";
const fs = require("fs");
const vm = require("vm");

const mode = process.argv[2];
const file = process.argv[3];
const timeout = Number(process.argv[4]) || 800;
const maxLogs = Number(process.argv[5]) || 1000;

function describe(e) {
  const text = String(e && e.stack ? e.stack : e);
  return text === "" ? `Uncaught ${JSON.stringify(e)}` : text;
}

function emit(result) {
  process.stdout.write(JSON.stringify(result) + "\n");
}

const code = fs.readFileSync(file, "utf8");

if (mode === "check") {
  try {
    new vm.Script(`(function(){ ${code}\n})();`, { filename: "submission.js" });
    emit({ status: "valid" });
  } catch (e) {
    emit({ status: "invalid", message: describe(e) });
  }
} else {
  const logs = [];
  const push = (...args) => {
    if (logs.length < maxLogs) logs.push(args.map((a) => String(a)).join(" "));
  };
  const context = {
    console: { log: push, warn: push, error: push },
    __FAULTED__: false,
    __FAULT__: undefined,
  };
  context.globalThis = context;

  const wrapped = `(function(){
"use strict";
try {
${code}
} catch (e) {
globalThis.__FAULTED__ = true;
globalThis.__FAULT__ = e;
}
})();`;

  let status = "completed";
  let message = null;
  try {
    const script = new vm.Script(wrapped, { filename: "submission.js" });
    // Promise jobs run before runInContext returns, inside the same timeout.
    const sandbox = vm.createContext(context, { microtaskMode: "afterEvaluate" });
    script.runInContext(sandbox, { timeout });
  } catch (e) {
    if (e && e.code === "ERR_SCRIPT_EXECUTION_TIMEOUT") {
      status = "timed_out";
    } else {
      status = "faulted";
      message = describe(e);
    }
  }
  if (status === "completed" && context.__FAULTED__ === true) {
    status = "faulted";
    message = describe(context.__FAULT__);
  }
  emit({ status, message, logs });
}
"##;

/// File name the harness is written to inside the temp dir.
pub const HARNESS_FILE: &str = "harness.cjs";

/// File name the submission is copied to inside the temp dir.
pub const SUBMISSION_FILE: &str = "submission.js";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HarnessMode {
    Check,
    Run,
}

impl HarnessMode {
    pub fn as_arg(self) -> &'static str {
        match self {
            HarnessMode::Check => "check",
            HarnessMode::Run => "run",
        }
    }
}

/// The single JSON line printed by the harness.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HarnessReport {
    Valid,
    Invalid {
        message: String,
    },
    Completed {
        #[serde(default)]
        logs: Vec<String>,
    },
    Faulted {
        #[serde(default)]
        logs: Vec<String>,
        message: String,
    },
    TimedOut {
        #[serde(default)]
        logs: Vec<String>,
    },
}

impl HarnessReport {
    /// Console lines carried by the report, if any.
    pub fn into_logs(self) -> Vec<String> {
        match self {
            HarnessReport::Completed { logs }
            | HarnessReport::Faulted { logs, .. }
            | HarnessReport::TimedOut { logs } => logs,
            HarnessReport::Valid | HarnessReport::Invalid { .. } => Vec::new(),
        }
    }

    /// Parse the last non-empty line of the harness's stdout.
    pub fn parse(stdout: &str) -> Result<Self, String> {
        let line = stdout
            .lines()
            .rev()
            .find(|l| !l.trim().is_empty())
            .ok_or_else(|| "harness produced no output".to_string())?;
        serde_json::from_str(line).map_err(|e| format!("unreadable harness report: {}", e))
    }
}
