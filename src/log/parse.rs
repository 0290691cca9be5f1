use crate::diagnostics;
use crate::spec::{SpecPath, SpecRun};
use anyhow::{Context, bail};
use regex::Regex;
use std::fs;

/// Parse a run log file into the spec runs it records, in file order.
///
/// Each spec line is one observation of a spec by one execution; failure
/// lines (`!`) belong to the spec line above them:
///
/// ```text
/// # execution 1
/// [0]      RootSpec
/// ! Expected '20' but was '10'
/// [0, 0]   Child A
/// ```
pub fn parse_log_file(path: &str) -> anyhow::Result<Vec<SpecRun>> {
    let text = fs::read_to_string(path).with_context(|| format!("read run log {}", path))?;
    parse_log_str(&text, path)
}

/// Deepest nesting accepted from a run log.
pub const MAX_PATH_LEN: usize = 1024;

/// Parse run log text; `origin` only labels error messages.
pub fn parse_log_str(text: &str, origin: &str) -> anyhow::Result<Vec<SpecRun>> {
    // Capture:
    // 1) path: \[ ... \]
    // 2) name: rest of line (may contain spaces, may be missing)
    let spec_re = Regex::new(r#"^\s*(\[[^\]]*\])(?:\s+(.*?))?\s*$"#)?;
    let error_re = Regex::new(r#"^\s*!\s?(.*?)\s*$"#)?;

    let mut runs: Vec<SpecRun> = Vec::new();
    // Name of the most recent root line; deeper lines belong to it.
    let mut current_root: Option<String> = None;

    for (lineno, line) in text.lines().enumerate() {
        let lno = lineno + 1;
        let line = line.trim_end();

        if line.trim().is_empty() || line.trim_start().starts_with('#') {
            continue;
        }

        if let Some(caps) = error_re.captures(line) {
            let message = &caps[1];
            match runs.last_mut() {
                Some(run) => run.add_error(message),
                None => bail!(
                    "run log parse error at {}:{}: failure line before any spec line",
                    origin,
                    lno
                ),
            }
            continue;
        }

        let caps = match spec_re.captures(line) {
            Some(c) => c,
            None => {
                bail!(
                    "run log parse error at {}:{}: cannot parse line: {:?}",
                    origin,
                    lno,
                    line
                );
            }
        };

        let path_str = &caps[1];
        let name = caps.get(2).map_or("", |m| m.as_str());
        let path = parse_path(path_str)
            .with_context(|| format!("bad path at {}:{}: {}", origin, lno, path_str))?;

        if path.is_empty() {
            bail!("empty path at {}:{}", origin, lno);
        }
        if path.0.len() > MAX_PATH_LEN {
            bail!(
                "path at {}:{} nests {} levels deep, more than {}",
                origin,
                lno,
                path.0.len(),
                MAX_PATH_LEN
            );
        }
        // Roots are told apart by name, so they all sit at index 0.
        if path.0[0] != 0 {
            bail!(
                "run log parse error at {}:{}: path {} must start at root index 0",
                origin,
                lno,
                path
            );
        }
        if name.is_empty() {
            diagnostics::warn(format!("spec at {}:{} has an empty name", origin, lno));
        }

        let root = if path.is_root() {
            current_root = Some(name.to_string());
            name.to_string()
        } else {
            match &current_root {
                Some(root) => root.clone(),
                None => bail!(
                    "run log parse error at {}:{}: nested spec {} before any root spec",
                    origin,
                    lno,
                    path
                ),
            }
        };

        runs.push(SpecRun::with_path(root, name, path));
    }

    Ok(runs)
}

/// Parse "[0, 2, 1]" into SpecPath(vec![0, 2, 1]).
fn parse_path(s: &str) -> anyhow::Result<SpecPath> {
    let s = s.trim();
    if !s.starts_with('[') || !s.ends_with(']') {
        bail!("path must be bracketed: {}", s);
    }
    let inner = s[1..s.len() - 1].trim();
    if inner.is_empty() {
        return Ok(SpecPath::new(vec![]));
    }
    let mut v = Vec::new();
    for part in inner.split(',') {
        let p = part.trim();
        if p.is_empty() {
            continue;
        }
        v.push(
            p.parse::<u32>()
                .with_context(|| format!("bad path element {}", p))?,
        );
    }
    Ok(SpecPath::new(v))
}
